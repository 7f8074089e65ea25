//! Page-level types.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The structural section a page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Title page
    Title,
    /// Table of contents
    Toc,
    /// Preamble and body content
    Body,
    /// Back matter (index, colophon, appendices after the body)
    Back,
}

impl Role {
    /// All roles in document order.
    pub const ALL: [Role; 4] = [Role::Title, Role::Toc, Role::Body, Role::Back];

    /// Lowercase name used in layout strings and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Title => "title",
            Role::Toc => "toc",
            Role::Body => "body",
            Role::Back => "back",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Role::Title),
            "toc" => Ok(Role::Toc),
            "body" | "preamble" => Ok(Role::Body),
            "back" => Ok(Role::Back),
            other => Err(Error::InvalidLayout(format!("unknown role '{}'", other))),
        }
    }
}

/// A physical page as reported by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPage {
    /// Section role of the page
    pub role: Role,

    /// Page was imported wholesale (e.g. a full-page image) and takes no
    /// running content, though it still counts toward numbering
    #[serde(default)]
    pub imported: bool,
}

impl LayoutPage {
    /// Create a regular page with the given role.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            imported: false,
        }
    }

    /// Create an imported page with the given role.
    pub fn imported(role: Role) -> Self {
        Self {
            role,
            imported: true,
        }
    }
}

/// A run of consecutive pages sharing one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpan {
    /// Section role
    pub role: Role,

    /// Number of physical pages in the run
    pub pages: u32,
}

impl SectionSpan {
    /// Create a new span.
    pub fn new(role: Role, pages: u32) -> Self {
        Self { role, pages }
    }
}

/// The finalized page layout of a document, in physical order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Pages in physical order
    pub pages: Vec<LayoutPage>,
}

impl Layout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand a list of section runs into a page layout.
    pub fn from_spans(spans: &[SectionSpan]) -> Self {
        let pages = spans
            .iter()
            .flat_map(|span| (0..span.pages).map(move |_| LayoutPage::new(span.role)))
            .collect();
        Self { pages }
    }

    /// Parse a compact layout string such as `"title,toc,body*4,back*2"`.
    ///
    /// Each comma-separated item is a role name with an optional `*N`
    /// repeat count. An empty string yields an empty layout.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::new());
        }

        let mut spans = Vec::new();
        for item in s.split(',') {
            let item = item.trim();
            let (name, count) = match item.split_once('*') {
                Some((name, count)) => {
                    let count: u32 = count.trim().parse().map_err(|_| {
                        Error::InvalidLayout(format!("invalid repeat count in '{}'", item))
                    })?;
                    (name, count)
                }
                None => (item, 1),
            };
            spans.push(SectionSpan::new(name.parse()?, count));
        }

        Ok(Self::from_spans(&spans))
    }

    /// Append a page.
    pub fn push(&mut self, page: LayoutPage) {
        self.pages.push(page);
    }

    /// Number of physical pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if the layout has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Check if any page carries the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.pages.iter().any(|p| p.role == role)
    }
}

impl From<Vec<LayoutPage>> for Layout {
    fn from(pages: Vec<LayoutPage>) -> Self {
        Self { pages }
    }
}

/// Immutable per-page record produced by the descriptor builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// Physical page index (1-indexed, contiguous)
    pub physical_index: u32,

    /// Section role
    pub role: Role,

    /// First page whose role differs from the preceding page
    pub is_role_first: bool,

    /// Imported page (never carries running content)
    pub imported: bool,
}
