//! Human-readable text output formatter

use crate::error::Result;
use crate::format::{OutputFormatter, Suggestions};
use crate::picker::{Origin, Selection};

/// Text formatter - numbered suggestion list
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format_suggestions(&self, suggestions: &Suggestions) -> Result<String> {
        if suggestions.candidates.is_empty() {
            return Ok(format!("No matches for \"{}\"\n", suggestions.query));
        }

        let mut output = String::new();
        for (i, candidate) in suggestions.candidates.iter().enumerate() {
            let marker = match candidate.origin {
                Origin::Synthesized => " (coordinates)",
                Origin::Fetched => "",
            };
            output.push_str(&format!(
                "{:>2}. {}{}\n    ({:.6}, {:.6})\n",
                i + 1,
                candidate.display_name,
                marker,
                candidate.lat,
                candidate.lon
            ));
        }

        Ok(output)
    }

    fn format_selection(&self, selection: &Selection) -> Result<String> {
        Ok(format!(
            "Selected: {}\n  lat: {:.6}\n  lon: {:.6}\n",
            selection.display_name, selection.lat, selection.lon
        ))
    }
}
