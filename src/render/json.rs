//! JSON rendering for placement results.

use crate::error::{Error, Result};
use crate::model::PlacementResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert placement results to a JSON array.
pub fn to_json(placements: &[PlacementResult], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(placements),
        JsonFormat::Compact => serde_json::to_string(placements),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Read placement results back from JSON.
pub fn from_json(json: &str) -> Result<Vec<PlacementResult>> {
    Ok(serde_json::from_str(json)?)
}
