//! Placement output types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Running content band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// Running header at the top of the page
    Header,
    /// Running footer at the bottom of the page
    Footer,
}

impl Band {
    /// Both bands, header first.
    pub const ALL: [Band; 2] = [Band::Header, Band::Footer];

    /// Lowercase band name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Header => "header",
            Band::Footer => "footer",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Facing side of a physical page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Right-hand page (odd physical index)
    Recto,
    /// Left-hand page (even physical index)
    Verso,
}

impl Side {
    /// Side of a 1-indexed physical page.
    pub fn of(physical_index: u32) -> Self {
        if physical_index % 2 == 1 {
            Side::Recto
        } else {
            Side::Verso
        }
    }
}

/// A single piece of running content ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    /// Physical page index (1-indexed)
    pub page: u32,

    /// Band the text belongs to
    pub band: Band,

    /// Left edge of the text in points, from the left page edge
    pub x: f64,

    /// Baseline in points, from the bottom page edge
    pub y: f64,

    /// Font size in points
    pub font_size: f64,

    /// Literal text to draw
    pub text: String,
}
