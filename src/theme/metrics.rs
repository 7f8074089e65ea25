//! Font metrics used to anchor running content.
//!
//! Only advance widths and vertical extents are needed: the engine never
//! shapes or wraps text, it only measures a single line to align it.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use ttf_parser::Face;

/// Measures single lines of text.
pub trait TextMeasure: Send + Sync {
    /// Advance width of `text` at `font_size`, in points.
    fn advance(&self, text: &str, font_size: f64) -> f64;

    /// Ascender as a fraction of the em size.
    fn ascender(&self) -> f64;

    /// Descender as a fraction of the em size (negative below the baseline).
    fn descender(&self) -> f64;
}

/// Per-character advance widths in 1000 units per em.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    widths_1000: HashMap<char, f64>,
    default_width: f64,
    ascender_1000: f64,
    descender_1000: f64,
}

impl FontMetrics {
    /// Serif text face metrics used when no font file is supplied.
    pub fn builtin() -> Self {
        let widths_1000 = (32u8..=126u8)
            .map(|b| (b as char, serif_width(b)))
            .collect();
        Self {
            widths_1000,
            default_width: 559.0,
            ascender_1000: 1068.0,
            descender_1000: -292.0,
        }
    }

    /// Read metrics from TrueType/OpenType font data.
    ///
    /// Widths are cached for Latin, Latin-1, Latin Extended and general
    /// punctuation; any other character measures as the `.notdef` glyph.
    pub fn from_ttf(data: &[u8]) -> Result<Self> {
        let face = Face::parse(data, 0).map_err(|e| Error::FontParse(e.to_string()))?;
        let units = face.units_per_em() as f64;
        if units <= 0.0 {
            return Err(Error::FontParse("font reports zero units per em".into()));
        }
        let scale = 1000.0 / units;

        let mut widths_1000 = HashMap::new();
        let ranges = [0x20u32..=0x24F, 0x2000..=0x206F];
        for cp in ranges.into_iter().flatten() {
            let Some(ch) = char::from_u32(cp) else {
                continue;
            };
            if let Some(advance) = face
                .glyph_index(ch)
                .and_then(|gid| face.glyph_hor_advance(gid))
            {
                widths_1000.insert(ch, advance as f64 * scale);
            }
        }

        let default_width = face
            .glyph_hor_advance(ttf_parser::GlyphId(0))
            .map(|w| w as f64 * scale)
            .unwrap_or(500.0);

        log::debug!(
            "Loaded font metrics: {} glyph widths, ascender={}, descender={}",
            widths_1000.len(),
            face.ascender(),
            face.descender()
        );

        Ok(Self {
            widths_1000,
            default_width,
            ascender_1000: face.ascender() as f64 * scale,
            descender_1000: face.descender() as f64 * scale,
        })
    }

    /// Read metrics from a font file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_ttf(&data)
    }

    /// Width of a single character in 1000-units.
    pub fn char_width_1000(&self, ch: char) -> f64 {
        self.widths_1000
            .get(&ch)
            .copied()
            .unwrap_or(self.default_width)
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TextMeasure for FontMetrics {
    fn advance(&self, text: &str, font_size: f64) -> f64 {
        text.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    fn ascender(&self) -> f64 {
        self.ascender_1000 / 1000.0
    }

    fn descender(&self) -> f64 {
        self.descender_1000 / 1000.0
    }
}

/// Approximate serif widths at 1000 units/em for printable ASCII.
fn serif_width(b: u8) -> f64 {
    match b {
        32 => 260.0,                          // space
        40 | 41 => 303.0,                     // parentheses
        44 | 46 => 250.0,                     // comma, period
        45 => 321.0,                          // hyphen
        33..=47 => 400.0,                     // other punctuation
        48..=57 => 559.0,                     // digits
        58..=64 => 400.0,                     // more punctuation
        73 | 74 => 328.0,                     // I J (narrow uppercase)
        77 => 873.0,                          // M (wide)
        87 => 925.0,                          // W (wide)
        65..=90 => 667.0,                     // uppercase A-Z (average)
        91..=96 => 400.0,                     // brackets etc.
        102 | 105 | 106 | 108 | 116 => 320.0, // narrow lowercase: f i j l t
        109 => 866.0,                         // m (wide)
        119 => 789.0,                         // w (wide)
        97..=122 => 540.0,                    // lowercase a-z (average)
        _ => 559.0,
    }
}
