//! Running content placement engine.
//!
//! The engine maps an ordered list of physical pages to the running
//! header and footer text drawn on each of them. Every page passes
//! through the same fixed pipeline:
//!
//! 1. descriptor building (role and role-first flag per page)
//! 2. virtual numbering, a single sequential pass over all pages
//! 3. eligibility (document flags, role permissions)
//! 4. content variant selection and placeholder substitution
//! 5. anchor resolution
//!
//! Stages 3 to 5 only read shared configuration and run in parallel
//! across pages. A band that ends up with no content simply produces no
//! placement; nothing in the pipeline fails.
//!
//! # Example
//!
//! ```
//! use folio::engine::{PlacementEngine, PlacementOptions};
//! use folio::model::Layout;
//! use folio::theme::{FontMetrics, Theme};
//!
//! let layout = Layout::parse("title,body*4").unwrap();
//! let theme = Theme::default();
//! let metrics = FontMetrics::builtin();
//!
//! let engine = PlacementEngine::new(&theme, &metrics);
//! let placements = engine.place_layout(&layout, &PlacementOptions::default());
//!
//! assert_eq!(placements.len(), 4);
//! assert_eq!(placements[0].page, 2);
//! assert_eq!(placements[0].text, "1");
//! ```

mod anchor;
mod descriptors;
pub mod numbering;
mod suppression;
mod variant;

pub use anchor::resolve_anchor;
pub use descriptors::build_descriptors;
pub use numbering::{page_count, resolve_numbers, resolve_start, ResolvedStart, VirtualPageNumber};
pub use suppression::{resolve_eligibility, Eligibility};
pub use variant::{
    lookup_placeholder, resolve_text, select_content, PlaceholderContext, SelectedContent,
};

use crate::model::{Band, Layout, Metadata, PageDescriptor, PlacementResult};
use crate::theme::{NumberingStart, TextMeasure, Theme};
use rayon::prelude::*;

/// Document-level settings for a placement pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementOptions {
    /// Suppress running headers on every page (`noheader`)
    pub header_disabled: bool,

    /// Suppress running footers on every page (`nofooter`)
    pub footer_disabled: bool,

    /// Numbering start; falls back to the theme's default when unset
    pub start_at: Option<NumberingStart>,

    /// Placeholder source values
    pub metadata: Metadata,
}

impl PlacementOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the `noheader` flag.
    pub fn with_noheader(mut self, disabled: bool) -> Self {
        self.header_disabled = disabled;
        self
    }

    /// Enable or disable the `nofooter` flag.
    pub fn with_nofooter(mut self, disabled: bool) -> Self {
        self.footer_disabled = disabled;
        self
    }

    /// Set the numbering start.
    pub fn with_start_at(mut self, start: NumberingStart) -> Self {
        self.start_at = Some(start);
        self
    }

    /// Set document metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }

    /// Check if a band is disabled for the whole document.
    pub fn band_disabled(&self, band: Band) -> bool {
        match band {
            Band::Header => self.header_disabled,
            Band::Footer => self.footer_disabled,
        }
    }

    /// Numbering start after applying the theme default.
    pub fn resolved_start(&self, theme: &Theme) -> NumberingStart {
        self.start_at.unwrap_or(theme.running_content_start_at)
    }
}

/// Computes running content placements against a theme.
///
/// The engine holds only shared references; one instance can serve any
/// number of documents and passes, each producing identical output for
/// identical input.
#[derive(Clone, Copy)]
pub struct PlacementEngine<'a> {
    theme: &'a Theme,
    measure: &'a dyn TextMeasure,
}

impl<'a> PlacementEngine<'a> {
    /// Create an engine for a theme and a text measurer.
    pub fn new(theme: &'a Theme, measure: &'a dyn TextMeasure) -> Self {
        Self { theme, measure }
    }

    /// The theme in use.
    pub fn theme(&self) -> &'a Theme {
        self.theme
    }

    /// Place running content for a finalized layout.
    pub fn place_layout(&self, layout: &Layout, options: &PlacementOptions) -> Vec<PlacementResult> {
        self.place(&build_descriptors(&layout.pages), options)
    }

    /// Place running content for a descriptor sequence.
    ///
    /// Results are ordered by page, header before footer.
    pub fn place(&self, pages: &[PageDescriptor], options: &PlacementOptions) -> Vec<PlacementResult> {
        let numbers = resolve_numbers(options.resolved_start(self.theme), pages);
        let total = page_count(&numbers);

        let placements: Vec<PlacementResult> = pages
            .par_iter()
            .zip(numbers.par_iter())
            .flat_map_iter(|(page, number)| self.place_page(page, *number, total, options))
            .collect();

        log::debug!(
            "Placed {} running content items across {} pages",
            placements.len(),
            pages.len()
        );

        placements
    }

    /// Place both bands of a single page.
    pub fn place_page(
        &self,
        page: &PageDescriptor,
        page_number: VirtualPageNumber,
        page_count: Option<u32>,
        options: &PlacementOptions,
    ) -> Vec<PlacementResult> {
        let eligibility = resolve_eligibility(page, page_number, self.theme, options);
        let ctx = PlaceholderContext {
            metadata: &options.metadata,
            page_number,
            page_count,
        };

        Band::ALL
            .into_iter()
            .filter_map(|band| {
                if !eligibility.allows(band) {
                    log::trace!("Page {}: {} not eligible", page.physical_index, band);
                    return None;
                }
                let Some(content) = select_content(page, band, self.theme, &ctx) else {
                    log::trace!("Page {}: {} has no content", page.physical_index, band);
                    return None;
                };
                Some(resolve_anchor(
                    page.physical_index,
                    band,
                    content,
                    self.theme,
                    self.measure,
                ))
            })
            .collect()
    }
}

/// Place running content with the built-in font metrics.
pub fn place(layout: &Layout, theme: &Theme, options: &PlacementOptions) -> Vec<PlacementResult> {
    let metrics = crate::theme::FontMetrics::builtin();
    PlacementEngine::new(theme, &metrics).place_layout(layout, options)
}
