//! Assistant text extraction from chat-completion payloads
//!
//! Supported `message.content` shapes:
//! - `"plain text"`
//! - `[{"type": "text", "text": "..."}, ...]` (non-text blocks are ignored)

use serde_json::Value;

use crate::error::ParseError;

/// Extract the first usable assistant text from a completion payload.
///
/// Choices are scanned in order; choices without an object `message` are
/// skipped and the first one that yields non-blank text wins.
pub fn extract_assistant_text(payload: &Value) -> Result<String, ParseError> {
    let choices = payload
        .get("choices")
        .and_then(Value::as_array)
        .filter(|choices| !choices.is_empty())
        .ok_or(ParseError::MissingChoices)?;

    choices
        .iter()
        .filter_map(|choice| choice.get("message").filter(|m| m.is_object()))
        .find_map(|message| message.get("content").and_then(text_from_content))
        .ok_or(ParseError::NoTextContent)
}

fn text_from_content(content: &Value) -> Option<String> {
    match content {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Value::Array(blocks) => {
            let chunks: Vec<&str> = blocks
                .iter()
                .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
                .filter_map(|block| block.get("text").and_then(Value::as_str))
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .collect();

            (!chunks.is_empty()).then(|| chunks.join("\n"))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_plain_content() {
        let payload = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "  Here is your summary.  "}}
            ]
        });

        assert_eq!(
            extract_assistant_text(&payload).unwrap(),
            "Here is your summary."
        );
    }

    #[test]
    fn test_first_usable_choice_wins() {
        let payload = json!({
            "choices": [
                {"message": {"content": "first"}},
                {"message": {"content": "second"}}
            ]
        });

        assert_eq!(extract_assistant_text(&payload).unwrap(), "first");
    }

    #[test]
    fn test_joins_text_blocks_with_newline() {
        let payload = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": [
                        {"type": "reasoning", "text": "hidden"},
                        {"type": "text", "text": " Line one "},
                        {"type": "text", "text": "   "},
                        {"type": "text", "text": "Line two"}
                    ]
                }
            }]
        });

        assert_eq!(
            extract_assistant_text(&payload).unwrap(),
            "Line one\nLine two"
        );
    }

    #[test]
    fn test_skips_blank_and_malformed_choices() {
        let payload = json!({
            "choices": [
                "not an object",
                {"index": 0},
                {"message": "not an object either"},
                {"message": {"content": "   "}},
                {"message": {"content": [{"type": "image_url", "text": "ignored"}]}},
                {"message": {"content": 42}},
                {"message": {"content": "Final usable answer"}}
            ]
        });

        assert_eq!(
            extract_assistant_text(&payload).unwrap(),
            "Final usable answer"
        );
    }

    #[test]
    fn test_missing_or_empty_choices() {
        assert_eq!(
            extract_assistant_text(&json!({})),
            Err(ParseError::MissingChoices)
        );
        assert_eq!(
            extract_assistant_text(&json!({"choices": []})),
            Err(ParseError::MissingChoices)
        );
        assert_eq!(
            extract_assistant_text(&json!({"choices": {"0": {}}})),
            Err(ParseError::MissingChoices)
        );
        assert_eq!(
            extract_assistant_text(&json!([1, 2])),
            Err(ParseError::MissingChoices)
        );
    }

    #[test]
    fn test_no_text_content() {
        let payload = json!({
            "choices": [{
                "message": {
                    "content": [{"type": "tool_call", "name": "search"}]
                }
            }]
        });

        assert_eq!(
            extract_assistant_text(&payload),
            Err(ParseError::NoTextContent)
        );
    }
}
