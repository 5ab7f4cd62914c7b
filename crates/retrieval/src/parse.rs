//! Best-effort extraction of structured data from free-form model output.
//!
//! Local models tend to wrap the JSON they were asked for in explanations.
//! Callers depend on [`ResponseParser`] only, so a backend with native
//! structured output can plug in a stricter parser.

use docseek_core::{AppError, AppResult};

/// Longest slice of model output quoted in an error message.
const MAX_PREVIEW_CHARS: usize = 120;

/// Turns raw model text into a list of strings.
pub trait ResponseParser: Send + Sync {
    /// Fails with `MalformedResponse` when `raw` holds no usable list.
    fn parse(&self, raw: &str) -> AppResult<Vec<String>>;
}

/// Parses the text between the last `[` and the last `]` as a JSON array of
/// strings, ignoring any prose around it.
#[derive(Debug, Default, Clone, Copy)]
pub struct BracketArrayParser;

impl ResponseParser for BracketArrayParser {
    fn parse(&self, raw: &str) -> AppResult<Vec<String>> {
        let open = raw.rfind('[').ok_or_else(|| {
            AppError::MalformedResponse(format!("no '[' in response: {}", preview(raw)))
        })?;
        let close = raw.rfind(']').ok_or_else(|| {
            AppError::MalformedResponse(format!("no ']' in response: {}", preview(raw)))
        })?;

        if close < open {
            return Err(AppError::MalformedResponse(format!(
                "last ']' precedes last '[' in response: {}",
                preview(raw)
            )));
        }

        let array = &raw[open..=close];
        serde_json::from_str::<Vec<String>>(array).map_err(|e| {
            AppError::MalformedResponse(format!(
                "not a JSON array of strings ({}): {}",
                e,
                preview(array)
            ))
        })
    }
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(MAX_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> AppResult<Vec<String>> {
        BracketArrayParser.parse(raw)
    }

    #[test]
    fn test_array_wrapped_in_prose() {
        let keywords = parse(r#"Explanation... [ "ai", "coursera" ] more text"#).unwrap();
        assert_eq!(keywords, vec!["ai".to_string(), "coursera".to_string()]);
    }

    #[test]
    fn test_bare_array() {
        assert_eq!(parse(r#"["Generative AI"]"#).unwrap(), vec!["Generative AI"]);
    }

    #[test]
    fn test_empty_array() {
        assert!(parse("Nothing relevant: []").unwrap().is_empty());
    }

    #[test]
    fn test_last_array_wins() {
        let raw = r#"Example format: ["a", "b"]. Answer: ["coursera"]"#;
        assert_eq!(parse(raw).unwrap(), vec!["coursera"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(parse(r#"["ai", "ai"]"#).unwrap(), vec!["ai", "ai"]);
    }

    #[test]
    fn test_no_brackets_is_malformed() {
        let result = parse("Keywords: ai, coursera");
        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
    }

    #[test]
    fn test_only_open_bracket_is_malformed() {
        assert!(matches!(parse("[\"ai\""), Err(AppError::MalformedResponse(_))));
    }

    #[test]
    fn test_reversed_brackets_are_malformed() {
        assert!(matches!(parse("] oops ["), Err(AppError::MalformedResponse(_))));
    }

    #[test]
    fn test_non_string_items_are_malformed() {
        assert!(matches!(parse("[1, 2]"), Err(AppError::MalformedResponse(_))));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        assert!(matches!(parse("[ai, coursera]"), Err(AppError::MalformedResponse(_))));
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(500);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), MAX_PREVIEW_CHARS + 3);
        assert!(shown.ends_with("..."));
    }
}
