//! Virtual page numbering.
//!
//! Numbering begins at the first page of the configured start role. When
//! that role does not occur in the document, the next role in the chain
//! title, toc, body is tried; when none occurs, numbering begins on the
//! first physical page.

use crate::model::{PageDescriptor, Role};
use crate::theme::NumberingStart;

/// Displayed page number; `None` for pages before the numbering start.
pub type VirtualPageNumber = Option<u32>;

/// Where numbering begins and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStart {
    /// Zero-based position of the first numbered page
    pub index: usize,

    /// Role whose first page starts numbering; `None` when no role in the
    /// chain occurs and numbering starts on the first page
    pub role: Option<Role>,
}

/// Locate the first numbered page, or `None` for an empty document.
pub fn resolve_start(start: NumberingStart, pages: &[PageDescriptor]) -> Option<ResolvedStart> {
    if pages.is_empty() {
        return None;
    }

    let found = start.fallback_chain().iter().find_map(|&role| {
        pages
            .iter()
            .position(|p| p.is_role_first && p.role == role)
            .map(|index| ResolvedStart {
                index,
                role: Some(role),
            })
    });

    let resolved = found.unwrap_or(ResolvedStart {
        index: 0,
        role: None,
    });

    match resolved.role {
        Some(role) if role != start.role() => log::debug!(
            "Numbering start '{}' not present, falling back to '{}' at page {}",
            start,
            role,
            resolved.index + 1
        ),
        Some(role) => log::debug!(
            "Numbering starts at '{}' on page {}",
            role,
            resolved.index + 1
        ),
        None => log::debug!(
            "No page matches numbering start '{}', numbering from page 1",
            start
        ),
    }

    Some(resolved)
}

/// Compute the virtual page number of every page, in physical order.
pub fn resolve_numbers(start: NumberingStart, pages: &[PageDescriptor]) -> Vec<VirtualPageNumber> {
    let Some(resolved) = resolve_start(start, pages) else {
        return Vec::new();
    };

    (0..pages.len())
        .map(|idx| {
            idx.checked_sub(resolved.index)
                .map(|offset| offset as u32 + 1)
        })
        .collect()
}

/// Highest virtual page number, if any page is numbered.
pub fn page_count(numbers: &[VirtualPageNumber]) -> Option<u32> {
    numbers.iter().flatten().max().copied()
}
