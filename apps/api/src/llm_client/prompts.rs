// Shared prompt fragments and prompt-building utilities.
// Each service that needs completions defines its own prompts.rs alongside it.

use serde_json::Value;

/// Placeholder substituted for optional prompt inputs the caller left out.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Pretty-printed JSON for embedding structured data in a prompt.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Returns the trimmed value, or `NOT_SPECIFIED` when absent or blank.
pub fn or_not_specified(value: Option<&str>) -> &str {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_SPECIFIED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_or_not_specified() {
        assert_eq!(or_not_specified(None), NOT_SPECIFIED);
        assert_eq!(or_not_specified(Some("  ")), NOT_SPECIFIED);
        assert_eq!(or_not_specified(Some(" Fintech ")), "Fintech");
    }

    #[test]
    fn test_pretty_json_is_indented() {
        let out = pretty_json(&json!({"a": 1}));
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }
}
