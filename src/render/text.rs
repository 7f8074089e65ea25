//! Plain text rendering for placement results.

use crate::model::PlacementResult;

/// Render placements one per line: page, band, anchor, size and quoted text.
pub fn to_text(placements: &[PlacementResult]) -> String {
    placements
        .iter()
        .map(|p| {
            format!(
                "{:>4}  {:<6}  x={:.3}  y={:.3}  size={}  {:?}",
                p.page, p.band, p.x, p.y, p.font_size, p.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
