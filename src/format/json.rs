//! JSON output formatter

use crate::error::Result;
use crate::format::{OutputFormatter, Suggestions};
use crate::picker::Selection;

/// JSON formatter - pretty-printed payloads
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON"
    }

    fn format_suggestions(&self, suggestions: &Suggestions) -> Result<String> {
        Ok(serde_json::to_string_pretty(suggestions)?)
    }

    fn format_selection(&self, selection: &Selection) -> Result<String> {
        Ok(serde_json::to_string_pretty(selection)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::picker::Candidate;

    #[test]
    fn test_json_suggestions() {
        let suggestions = Suggestions {
            query: "1.5, 2.5".to_string(),
            candidates: vec![Candidate::synthesized(Coordinates::new(1.5, 2.5))],
        };

        let output = JsonFormatter.format_suggestions(&suggestions).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["query"], "1.5, 2.5");
        assert_eq!(parsed["candidates"][0]["lat"], 1.5);
        assert_eq!(parsed["candidates"][0]["origin"], "synthesized");
    }

    #[test]
    fn test_json_selection() {
        let selection = Selection {
            display_name: "Lisbon, Portugal".to_string(),
            lat: 38.7223,
            lon: -9.1393,
        };

        let output = JsonFormatter.format_selection(&selection).unwrap();
        let parsed: Selection = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, selection);
    }

    #[test]
    fn test_json_formatter_info() {
        assert_eq!(JsonFormatter.name(), "json");
        assert!(!JsonFormatter.description().is_empty());
    }
}
