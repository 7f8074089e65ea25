//! Content variant selection and placeholder substitution.

use crate::model::{Band, Metadata, PageDescriptor, Side};
use crate::theme::{ContentTemplate, Fragment, Placeholder, Theme};

use super::numbering::VirtualPageNumber;

/// Values placeholders resolve against for one page.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderContext<'a> {
    /// Document metadata
    pub metadata: &'a Metadata,

    /// The page's virtual number
    pub page_number: VirtualPageNumber,

    /// Highest virtual number in the document
    pub page_count: Option<u32>,
}

/// Substitution value for a placeholder, if one is available.
pub fn lookup_placeholder(placeholder: Placeholder, ctx: &PlaceholderContext<'_>) -> Option<String> {
    match placeholder {
        Placeholder::DocumentTitle => ctx.metadata.title.clone(),
        Placeholder::Author => ctx.metadata.author.clone(),
        Placeholder::PageNumber => ctx.page_number.map(|n| n.to_string()),
        Placeholder::PageCount => ctx.page_count.map(|n| n.to_string()),
        Placeholder::DocDate => ctx.metadata.date.map(|d| d.format("%Y-%m-%d").to_string()),
        Placeholder::DocYear => ctx.metadata.date.map(|d| d.format("%Y").to_string()),
    }
}

/// Resolve a template's fragments into text.
///
/// Missing placeholder values become empty. Returns `None` when the
/// result is blank, meaning the band is not drawn on this page.
pub fn resolve_text(template: &ContentTemplate, ctx: &PlaceholderContext<'_>) -> Option<String> {
    let mut text = String::new();
    for fragment in template.fragments() {
        match fragment {
            Fragment::Literal(s) => text.push_str(s),
            Fragment::Placeholder(p) => match lookup_placeholder(*p, ctx) {
                Some(value) => text.push_str(&value),
                None => log::trace!(
                    "Placeholder '{}' has no value, substituting empty text",
                    p.name()
                ),
            },
        }
    }

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Content chosen for one band of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedContent<'a> {
    /// Facing side of the page
    pub side: Side,

    /// Template the text came from
    pub template: &'a ContentTemplate,

    /// Substituted text
    pub text: String,
}

/// Select the template for a band and resolve it for the page.
///
/// Odd physical pages use recto templates and even pages verso templates,
/// whatever their virtual number.
pub fn select_content<'a>(
    page: &PageDescriptor,
    band: Band,
    theme: &'a Theme,
    ctx: &PlaceholderContext<'_>,
) -> Option<SelectedContent<'a>> {
    let side = Side::of(page.physical_index);
    let template = theme
        .templates
        .lookup(band, page.role, side, page.is_role_first)?;
    let text = resolve_text(template, ctx)?;

    Some(SelectedContent {
        side,
        template,
        text,
    })
}
