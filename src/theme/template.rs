//! Running content templates and the table they are looked up in.
//!
//! Template strings are parsed once, when the theme is built or loaded,
//! into a list of [`Fragment`]s. Only the placeholders named by
//! [`Placeholder`] are recognised; any other `{name}` reference stays in
//! the output as literal text.

use crate::model::{Band, Role, Side};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

static PLACEHOLDER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn placeholder_pattern() -> &'static Regex {
    PLACEHOLDER_PATTERN.get_or_init(|| Regex::new(r"\{([A-Za-z][A-Za-z0-9_-]*)\}").unwrap())
}

/// Recognised placeholder kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// `{document-title}`
    DocumentTitle,
    /// `{author}`
    Author,
    /// `{page-number}`: the virtual page number
    PageNumber,
    /// `{page-count}`: the highest virtual page number
    PageCount,
    /// `{docdate}`: document date as `YYYY-MM-DD`
    DocDate,
    /// `{docyear}`: year of the document date
    DocYear,
}

impl Placeholder {
    /// Look up a placeholder by its attribute name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "document-title" | "doctitle" => Some(Placeholder::DocumentTitle),
            "author" => Some(Placeholder::Author),
            "page-number" => Some(Placeholder::PageNumber),
            "page-count" => Some(Placeholder::PageCount),
            "docdate" => Some(Placeholder::DocDate),
            "docyear" => Some(Placeholder::DocYear),
            _ => None,
        }
    }

    /// Canonical attribute name.
    pub fn name(&self) -> &'static str {
        match self {
            Placeholder::DocumentTitle => "document-title",
            Placeholder::Author => "author",
            Placeholder::PageNumber => "page-number",
            Placeholder::PageCount => "page-count",
            Placeholder::DocDate => "docdate",
            Placeholder::DocYear => "docyear",
        }
    }
}

/// A parsed piece of template content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Text copied verbatim
    Literal(String),
    /// Substituted at placement time
    Placeholder(Placeholder),
}

/// Parse a template string into fragments.
pub fn parse_fragments(source: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut literal = String::new();
    let mut last = 0;

    for caps in placeholder_pattern().captures_iter(source) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        literal.push_str(&source[last..whole.start()]);
        last = whole.end();

        match Placeholder::from_name(&caps[1]) {
            Some(placeholder) => {
                if !literal.is_empty() {
                    fragments.push(Fragment::Literal(std::mem::take(&mut literal)));
                }
                fragments.push(Fragment::Placeholder(placeholder));
            }
            None => literal.push_str(whole.as_str()),
        }
    }

    literal.push_str(&source[last..]);
    if !literal.is_empty() {
        fragments.push(Fragment::Literal(literal));
    }

    fragments
}

/// Horizontal alignment of running content within its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Flush with the left content edge
    Left,
    /// Centered between the content edges
    Center,
    /// Flush with the right content edge
    #[default]
    Right,
}

/// Serialized form of a [`ContentTemplate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TemplateDef {
    content: String,
    #[serde(default)]
    align: Alignment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_size: Option<f64>,
}

/// Content for one band on one kind of page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TemplateDef", into = "TemplateDef")]
pub struct ContentTemplate {
    source: String,
    alignment: Alignment,
    font_size: Option<f64>,
    fragments: Vec<Fragment>,
}

impl ContentTemplate {
    /// Parse a template string with the given alignment.
    pub fn new(source: impl Into<String>, alignment: Alignment) -> Self {
        let source = source.into();
        let fragments = parse_fragments(&source);
        Self {
            source,
            alignment,
            font_size: None,
            fragments,
        }
    }

    /// Left-aligned template.
    pub fn left(source: impl Into<String>) -> Self {
        Self::new(source, Alignment::Left)
    }

    /// Centered template.
    pub fn center(source: impl Into<String>) -> Self {
        Self::new(source, Alignment::Center)
    }

    /// Right-aligned template.
    pub fn right(source: impl Into<String>) -> Self {
        Self::new(source, Alignment::Right)
    }

    /// Override the band's font size for this template.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// The unparsed template string.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Horizontal alignment.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Font size override, if any.
    pub fn font_size(&self) -> Option<f64> {
        self.font_size
    }

    /// Parsed fragments in order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Check if the template references the given placeholder.
    pub fn references(&self, placeholder: Placeholder) -> bool {
        self.fragments
            .iter()
            .any(|f| *f == Fragment::Placeholder(placeholder))
    }
}

impl From<TemplateDef> for ContentTemplate {
    fn from(def: TemplateDef) -> Self {
        let template = ContentTemplate::new(def.content, def.align);
        match def.font_size {
            Some(size) => template.with_font_size(size),
            None => template,
        }
    }
}

impl From<ContentTemplate> for TemplateDef {
    fn from(template: ContentTemplate) -> Self {
        Self {
            content: template.source,
            align: template.alignment,
            font_size: template.font_size,
        }
    }
}

/// Which page kind a template applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Odd physical pages
    Recto,
    /// Even physical pages
    Verso,
    /// First page of a role, regardless of side
    First,
}

impl From<Side> for Variant {
    fn from(side: Side) -> Self {
        match side {
            Side::Recto => Variant::Recto,
            Side::Verso => Variant::Verso,
        }
    }
}

/// Key into the template table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateKey {
    /// Band the template fills
    pub band: Band,

    /// Role the template is limited to; `None` applies to every role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Page kind
    pub variant: Variant,
}

impl TemplateKey {
    /// Key for all roles.
    pub fn new(band: Band, variant: Variant) -> Self {
        Self {
            band,
            role: None,
            variant,
        }
    }

    /// Key limited to one role.
    pub fn for_role(band: Band, role: Role, variant: Variant) -> Self {
        Self {
            band,
            role: Some(role),
            variant,
        }
    }
}

/// Serialized form of one table entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TemplateEntry {
    band: Band,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    variant: Variant,
    #[serde(flatten)]
    def: TemplateDef,
}

/// Templates keyed by band, role and page kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TemplateEntry>", into = "Vec<TemplateEntry>")]
pub struct TemplateTable {
    entries: HashMap<TemplateKey, ContentTemplate>,
}

impl TemplateTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a template.
    pub fn insert(&mut self, key: TemplateKey, template: ContentTemplate) {
        self.entries.insert(key, template);
    }

    /// Iterate over all templates in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&TemplateKey, &ContentTemplate)> {
        self.entries.iter()
    }

    /// Get the template stored under exactly this key.
    pub fn get(&self, key: &TemplateKey) -> Option<&ContentTemplate> {
        self.entries.get(key)
    }

    /// Find the template for a page.
    ///
    /// On the first page of a role a `First` template for that role wins,
    /// then a role-agnostic `First` template. Otherwise the role-specific
    /// side template is preferred over the role-agnostic one.
    pub fn lookup(
        &self,
        band: Band,
        role: Role,
        side: Side,
        is_role_first: bool,
    ) -> Option<&ContentTemplate> {
        let variant = Variant::from(side);
        let first = is_role_first
            .then(|| {
                self.get(&TemplateKey::for_role(band, role, Variant::First))
                    .or_else(|| self.get(&TemplateKey::new(band, Variant::First)))
            })
            .flatten();

        first
            .or_else(|| self.get(&TemplateKey::for_role(band, role, variant)))
            .or_else(|| self.get(&TemplateKey::new(band, variant)))
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<TemplateEntry>> for TemplateTable {
    fn from(entries: Vec<TemplateEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|e| {
                    let key = TemplateKey {
                        band: e.band,
                        role: e.role,
                        variant: e.variant,
                    };
                    (key, ContentTemplate::from(e.def))
                })
                .collect(),
        }
    }
}

impl From<TemplateTable> for Vec<TemplateEntry> {
    fn from(table: TemplateTable) -> Self {
        let mut entries: Vec<TemplateEntry> = table
            .entries
            .into_iter()
            .map(|(key, template)| TemplateEntry {
                band: key.band,
                role: key.role,
                variant: key.variant,
                def: template.into(),
            })
            .collect();
        entries.sort_by_key(|e| (e.band, e.role, e.variant));
        entries
    }
}
