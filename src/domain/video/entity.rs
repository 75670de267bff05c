//! Video metadata as returned by the extractor

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata and raw comments for one video
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: Option<String>,
    /// Uploader / channel display name
    pub channel: Option<String>,
    pub views: Option<u64>,
    pub likes: Option<u64>,
    /// Duration in seconds
    pub duration: Option<f64>,
    pub url: Option<String>,
    /// Comments exactly as the extractor reported them
    #[serde(default, skip_serializing)]
    pub comments: Vec<Value>,
}

impl VideoInfo {
    /// Build from an extractor info document
    pub fn from_info_json(info: &Value) -> Self {
        let text = |key: &str| info.get(key).and_then(Value::as_str).map(str::to_string);
        let count = |key: &str| info.get(key).and_then(Value::as_u64);

        Self {
            title: text("title"),
            channel: text("uploader"),
            views: count("view_count"),
            likes: count("like_count"),
            duration: info.get("duration").and_then(Value::as_f64),
            url: text("webpage_url"),
            comments: info
                .get("comments")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// Texts of the first `max_comments` raw comments, empties dropped
    pub fn comment_texts(&self, max_comments: usize) -> Vec<String> {
        self.comments
            .iter()
            .take(max_comments)
            .filter_map(comment_text)
            .collect()
    }
}

const TEXT_KEYS: [&str; 3] = ["text", "content", "comment"];

/// Text of one raw comment: an object's first non-empty text field, or the
/// value's own string form
fn comment_text(comment: &Value) -> Option<String> {
    let text = match comment {
        Value::Object(fields) => TEXT_KEYS
            .iter()
            .filter_map(|key| fields.get(*key))
            .find(|v| !is_blank(v))
            .map(value_text)
            .unwrap_or_default(),
        Value::Null => String::new(),
        other => value_text(other),
    };

    (!text.is_empty()).then_some(text)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
