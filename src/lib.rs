//! # folio
//!
//! Running header and footer placement for paginated documents.
//!
//! Given the finalized page layout of a document (which pages are the
//! title page, table of contents, body and back matter), folio decides for
//! every physical page whether a running header and footer is drawn,
//! which recto/verso template it uses, what virtual page number it shows,
//! and at which coordinate the text is anchored.
//!
//! ## Quick Start
//!
//! ```
//! use folio::{place, Layout, PlacementOptions, Theme};
//!
//! fn main() -> folio::Result<()> {
//!     let layout = Layout::parse("title,body*4")?;
//!     let placements = place(&layout, &Theme::default(), &PlacementOptions::default());
//!
//!     for p in &placements {
//!         println!("page {} {}: {:?} at ({:.3}, {:.3})", p.page, p.band, p.text, p.x, p.y);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Numbering policy**: virtual numbers start at the title, toc or body,
//!   with a deterministic fallback when the requested section is absent
//! - **Suppression**: document-wide `noheader`/`nofooter` flags and
//!   per-role theme permissions
//! - **Recto/verso templates** with a first-page-of-role override and a
//!   closed set of placeholders
//! - **Parallel processing**: uses Rayon for the per-page stages

pub mod engine;
pub mod error;
pub mod model;
pub mod render;
pub mod theme;

// Re-export commonly used types
pub use engine::{place, PlacementEngine, PlacementOptions};
pub use error::{Error, Result};
pub use model::{
    Band, Layout, LayoutPage, Metadata, PageDescriptor, PlacementResult, Role, SectionSpan, Side,
};
pub use render::JsonFormat;
pub use theme::{
    Alignment, BandStyle, ContentTemplate, FontMetrics, NumberingStart, PageGeometry, Theme,
};

use std::path::Path;

/// Builder-style API bundling a theme, document options and font metrics.
///
/// # Example
///
/// ```
/// use folio::{Folio, Layout, NumberingStart};
///
/// let result = Folio::new()
///     .with_title("Document Title")
///     .with_start_at(NumberingStart::Toc)
///     .place(&Layout::parse("title,toc,body*3")?);
///
/// assert_eq!(result.placements[0].page, 2);
/// println!("{}", result.to_text());
/// # Ok::<(), folio::Error>(())
/// ```
pub struct Folio {
    theme: Theme,
    options: PlacementOptions,
    metrics: FontMetrics,
}

impl Folio {
    /// Create a builder with the stock theme and built-in metrics.
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            options: PlacementOptions::default(),
            metrics: FontMetrics::builtin(),
        }
    }

    /// Use a different theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Load the theme from a JSON file.
    pub fn with_theme_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.theme = Theme::from_file(path)?;
        Ok(self)
    }

    /// Measure text with a TrueType/OpenType font file.
    pub fn with_font_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.metrics = FontMetrics::from_file(path)?;
        Ok(self)
    }

    /// Use the given font metrics.
    pub fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Replace all document options.
    pub fn with_options(mut self, options: PlacementOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_title(title);
        self
    }

    /// Set the document metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.options = self.options.with_metadata(metadata);
        self
    }

    /// Set the numbering start.
    pub fn with_start_at(mut self, start: NumberingStart) -> Self {
        self.options = self.options.with_start_at(start);
        self
    }

    /// Suppress running headers.
    pub fn noheader(mut self) -> Self {
        self.options = self.options.with_noheader(true);
        self
    }

    /// Suppress running footers.
    pub fn nofooter(mut self) -> Self {
        self.options = self.options.with_nofooter(true);
        self
    }

    /// The theme in use.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Compute placements for a layout.
    pub fn place(&self, layout: &Layout) -> FolioResult {
        let engine = PlacementEngine::new(&self.theme, &self.metrics);
        FolioResult {
            placements: engine.place_layout(layout, &self.options),
        }
    }
}

impl Default for Folio {
    fn default() -> Self {
        Self::new()
    }
}

/// Placements computed for one layout.
#[derive(Debug, Clone, PartialEq)]
pub struct FolioResult {
    /// Placements in page order, header before footer
    pub placements: Vec<PlacementResult>,
}

impl FolioResult {
    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.placements, format)
    }

    /// Convert to plain text, one placement per line.
    pub fn to_text(&self) -> String {
        render::to_text(&self.placements)
    }

    /// Placements drawn on one physical page.
    pub fn on_page(&self, page: u32) -> impl Iterator<Item = &PlacementResult> {
        self.placements.iter().filter(move |p| p.page == page)
    }

    /// Placements in one band.
    pub fn in_band(&self, band: Band) -> impl Iterator<Item = &PlacementResult> {
        self.placements.iter().filter(move |p| p.band == band)
    }

    /// Check if nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folio_builder_default() {
        let folio = Folio::default();
        assert_eq!(folio.theme().running_content_start_at, NumberingStart::Body);
    }

    #[test]
    fn test_folio_builder_flags() {
        let layout = Layout::parse("title,body*3").unwrap();

        let result = Folio::new().nofooter().place(&layout);
        assert!(result.is_empty());

        let result = Folio::new().noheader().place(&layout);
        assert_eq!(result.in_band(Band::Footer).count(), 3);
    }

    #[test]
    fn test_folio_result_on_page() {
        let layout = Layout::parse("title,body*3").unwrap();
        let result = Folio::new().place(&layout);

        assert_eq!(result.on_page(1).count(), 0);
        let page3: Vec<_> = result.on_page(3).collect();
        assert_eq!(page3.len(), 1);
        assert_eq!(page3[0].text, "2");
    }

    #[test]
    fn test_folio_missing_font_file() {
        let result = Folio::new().with_font_file("/nonexistent/font.ttf");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_folio_result_json() {
        let layout = Layout::parse("body").unwrap();
        let json = Folio::new()
            .place(&layout)
            .to_json(JsonFormat::Compact)
            .unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"text\":\"1\""));
    }
}
