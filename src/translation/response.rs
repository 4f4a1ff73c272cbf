//! Extraction of translated text from chat-completion style responses.
//!
//! Providers answer in one of three shapes:
//!
//! ```text
//! {"choices":[{"message":{"content":"..."}}]}
//! {"output_text":"..."}
//! {"output":[{"content":"..."}, "..."]}
//! ```

use serde_json::Value;

/// Returns the translated text from a response body, or `None` when the body
/// matches none of the known shapes.
pub fn extract_translation(data: &Value) -> Option<String> {
    from_choices(data)
        .or_else(|| from_output_text(data))
        .or_else(|| from_output_list(data))
}

fn from_choices(data: &Value) -> Option<String> {
    data.get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|s| s.trim().to_string())
}

fn from_output_text(data: &Value) -> Option<String> {
    data.get("output_text")?
        .as_str()
        .map(|s| s.trim().to_string())
}

fn from_output_list(data: &Value) -> Option<String> {
    let parts: Vec<&str> = data
        .get("output")?
        .as_array()?
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => map.get("content").and_then(Value::as_str),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" ").trim().to_string())
    }
}
