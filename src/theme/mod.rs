//! Theme configuration for running content.
//!
//! A [`Theme`] is built once (in code or from JSON) and then shared
//! read-only by every stage of the placement pipeline.

mod metrics;
mod template;

pub use metrics::{FontMetrics, TextMeasure};
pub use template::{
    parse_fragments, Alignment, ContentTemplate, Fragment, Placeholder, TemplateKey,
    TemplateTable, Variant,
};

use crate::error::{Error, Result};
use crate::model::{Band, Role, Side};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Role at which virtual page numbering begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingStart {
    /// Start on the title page
    Title,
    /// Start on the first table of contents page
    Toc,
    /// Start on the first body page
    #[default]
    Body,
}

impl NumberingStart {
    /// Roles tried in order when locating the first numbered page.
    pub fn fallback_chain(&self) -> &'static [Role] {
        match self {
            NumberingStart::Title => &[Role::Title, Role::Toc, Role::Body],
            NumberingStart::Toc => &[Role::Toc, Role::Body],
            NumberingStart::Body => &[Role::Body],
        }
    }

    /// The role this start point names.
    pub fn role(&self) -> Role {
        self.fallback_chain()[0]
    }
}

impl fmt::Display for NumberingStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.role().as_str())
    }
}

impl FromStr for NumberingStart {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(NumberingStart::Title),
            "toc" => Ok(NumberingStart::Toc),
            "body" => Ok(NumberingStart::Body),
            other => Err(Error::InvalidTheme(format!(
                "unknown running content start '{}'",
                other
            ))),
        }
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Left margin
    pub left: f64,

    /// Right margin
    pub right: f64,

    /// Binding-side margin for mirrored layouts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner: Option<f64>,

    /// Outside margin for mirrored layouts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer: Option<f64>,
}

impl Margins {
    /// Symmetric left and right margins.
    pub fn new(left: f64, right: f64) -> Self {
        Self {
            left,
            right,
            inner: None,
            outer: None,
        }
    }

    /// Mirrored margins: inner is on the left of recto pages and on the
    /// right of verso pages.
    pub fn mirrored(inner: f64, outer: f64) -> Self {
        Self {
            left: inner,
            right: outer,
            inner: Some(inner),
            outer: Some(outer),
        }
    }

    /// Left and right margins for a page side.
    pub fn horizontal(&self, side: Side) -> (f64, f64) {
        match (self.inner, self.outer, side) {
            (Some(inner), Some(outer), Side::Recto) => (inner, outer),
            (Some(inner), Some(outer), Side::Verso) => (outer, inner),
            _ => (self.left, self.right),
        }
    }
}

/// Page size and horizontal margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width in points
    pub width: f64,

    /// Page height in points
    pub height: f64,

    /// Horizontal margins
    pub margins: Margins,
}

impl PageGeometry {
    /// A4 (210 x 297 mm) with 0.67in side margins.
    pub fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margins: Margins::new(48.24, 48.24),
        }
    }

    /// Replace the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Padding as `[top, right, bottom, left]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl From<[f64; 4]> for Padding {
    fn from([top, right, bottom, left]: [f64; 4]) -> Self {
        Self::new(top, right, bottom, left)
    }
}

impl From<Padding> for [f64; 4] {
    fn from(p: Padding) -> Self {
        [p.top, p.right, p.bottom, p.left]
    }
}

/// Vertical placement of the text line inside its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Style of one running content band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandStyle {
    /// Font size in points
    pub font_size: f64,

    /// Band height in points, measured from the page edge
    pub height: f64,

    /// Inner padding of the band
    pub padding: Padding,

    /// Line height as a multiple of the font size
    pub line_height: f64,

    /// Vertical alignment of the line within the padded band
    #[serde(default)]
    pub vertical_align: VerticalAlign,
}

impl Default for BandStyle {
    fn default() -> Self {
        Self {
            font_size: 9.0,
            height: 30.0,
            padding: Padding::new(6.0, 1.0, 0.0, 1.0),
            line_height: 1.0,
            vertical_align: VerticalAlign::Top,
        }
    }
}

/// Which bands a role may carry.
///
/// With `until_numbered` set, the header and footer flags only restrict
/// pages before the numbering start; numbered pages of the role carry
/// both bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermission {
    #[serde(default = "permitted")]
    pub header: bool,
    #[serde(default = "permitted")]
    pub footer: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub until_numbered: bool,
}

fn permitted() -> bool {
    true
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl RolePermission {
    /// Both bands permitted.
    pub fn both() -> Self {
        Self {
            header: true,
            footer: true,
            until_numbered: false,
        }
    }

    /// Neither band permitted.
    pub fn none() -> Self {
        Self {
            header: false,
            footer: false,
            until_numbered: false,
        }
    }

    /// Neither band permitted until the numbering start is reached.
    pub fn before_start() -> Self {
        Self {
            until_numbered: true,
            ..Self::none()
        }
    }

    /// Permission for one band on a page that is or is not numbered.
    pub fn permits(&self, band: Band, numbered: bool) -> bool {
        if self.until_numbered && numbered {
            return true;
        }
        match band {
            Band::Header => self.header,
            Band::Footer => self.footer,
        }
    }
}

impl Default for RolePermission {
    fn default() -> Self {
        Self::both()
    }
}

/// Immutable running content configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Page size and margins
    pub geometry: PageGeometry,

    /// Header band style
    pub header: BandStyle,

    /// Footer band style
    pub footer: BandStyle,

    /// Default numbering start when the document does not set one
    pub running_content_start_at: NumberingStart,

    /// Per-role band permissions; a missing role permits both bands
    pub role_permissions: BTreeMap<Role, RolePermission>,

    /// Content templates
    pub templates: TemplateTable,
}

impl Theme {
    /// The stock book theme.
    ///
    /// Footer shows the virtual page number, left-aligned on recto pages
    /// and right-aligned on verso pages. No header content is defined.
    /// Title pages carry neither band unless numbering starts on them.
    pub fn new() -> Self {
        Self::default()
    }

    /// A theme with no templates and no role restrictions.
    pub fn bare() -> Self {
        Self {
            role_permissions: BTreeMap::new(),
            templates: TemplateTable::new(),
            ..Self::default()
        }
    }

    /// Load a theme from JSON. Omitted keys take stock theme values.
    pub fn from_json(json: &str) -> Result<Self> {
        let theme: Theme = serde_json::from_str(json)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Load a theme from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize the theme to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Style of a band.
    pub fn band_style(&self, band: Band) -> &BandStyle {
        match band {
            Band::Header => &self.header,
            Band::Footer => &self.footer,
        }
    }

    /// Check if a page of a role may carry a band.
    pub fn permits(&self, role: Role, band: Band, numbered: bool) -> bool {
        self.role_permissions
            .get(&role)
            .map_or(true, |p| p.permits(band, numbered))
    }

    /// Reject configuration the placement engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        let geometry = &self.geometry;
        if !positive(geometry.width) || !positive(geometry.height) {
            return Err(Error::InvalidTheme(format!(
                "page size must be positive, got {}x{}",
                geometry.width, geometry.height
            )));
        }

        let margins = &geometry.margins;
        let margin_values = [
            Some(margins.left),
            Some(margins.right),
            margins.inner,
            margins.outer,
        ];
        if !margin_values.iter().flatten().all(|m| non_negative(*m)) {
            return Err(Error::InvalidTheme("margins must not be negative".into()));
        }

        for band in Band::ALL {
            let style = self.band_style(band);
            if !positive(style.font_size) {
                return Err(Error::InvalidTheme(format!(
                    "{} font size must be positive",
                    band
                )));
            }
            if !non_negative(style.height) || style.height > geometry.height {
                return Err(Error::InvalidTheme(format!(
                    "{} height {} does not fit the page",
                    band, style.height
                )));
            }
            if !positive(style.line_height) {
                return Err(Error::InvalidTheme(format!(
                    "{} line height must be positive",
                    band
                )));
            }
            let padding: [f64; 4] = style.padding.into();
            if !padding.iter().all(|p| non_negative(*p)) {
                return Err(Error::InvalidTheme(format!(
                    "{} padding must not be negative",
                    band
                )));
            }
        }

        for (key, template) in self.templates.iter() {
            if let Some(size) = template.font_size() {
                if !positive(size) {
                    return Err(Error::InvalidTheme(format!(
                        "{} {:?} template font size must be positive, got {}",
                        key.band, key.variant, size
                    )));
                }
            }
        }

        Ok(())
    }

    /// Set the default numbering start.
    pub fn with_start_at(mut self, start: NumberingStart) -> Self {
        self.running_content_start_at = start;
        self
    }

    /// Set the permission for a role.
    pub fn with_role_permission(mut self, role: Role, permission: RolePermission) -> Self {
        self.role_permissions.insert(role, permission);
        self
    }

    /// Add or replace a template.
    pub fn with_template(mut self, key: TemplateKey, template: ContentTemplate) -> Self {
        self.templates.insert(key, template);
        self
    }

    /// Set the same template for both recto and verso pages of a band.
    pub fn with_band_content(self, band: Band, template: ContentTemplate) -> Self {
        self.with_template(TemplateKey::new(band, Variant::Recto), template.clone())
            .with_template(TemplateKey::new(band, Variant::Verso), template)
    }

    /// Replace a band's style.
    pub fn with_band_style(mut self, band: Band, style: BandStyle) -> Self {
        match band {
            Band::Header => self.header = style,
            Band::Footer => self.footer = style,
        }
        self
    }

    /// Replace the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        let mut templates = TemplateTable::new();
        templates.insert(
            TemplateKey::new(Band::Footer, Variant::Recto),
            ContentTemplate::left("{page-number}"),
        );
        templates.insert(
            TemplateKey::new(Band::Footer, Variant::Verso),
            ContentTemplate::right("{page-number}"),
        );

        let mut role_permissions = BTreeMap::new();
        role_permissions.insert(Role::Title, RolePermission::before_start());

        Self {
            geometry: PageGeometry::a4(),
            header: BandStyle::default(),
            footer: BandStyle::default(),
            running_content_start_at: NumberingStart::Body,
            role_permissions,
            templates,
        }
    }
}
