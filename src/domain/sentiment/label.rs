//! Class labels and label decoding

use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::DomainError;

/// Raw class identifier as produced by a classifier
///
/// Models trained on encoded targets emit integer indices; models trained
/// on raw targets emit the label names directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Index(i64),
    Name(String),
}

impl ClassLabel {
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Name(_) => None,
        }
    }
}

impl Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{}", index),
            Self::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<i64> for ClassLabel {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

impl From<i32> for ClassLabel {
    fn from(index: i32) -> Self {
        Self::Index(i64::from(index))
    }
}

impl From<&str> for ClassLabel {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// Maps raw class identifiers back to the original category names
pub trait LabelDecoder: Send + Sync + Debug {
    fn inverse_transform(&self, label: &ClassLabel) -> Result<String, DomainError>;
}

/// Turns raw class identifiers into human-readable sentiment labels
///
/// Decoding failures never propagate: the raw identifier's string form is
/// used instead, one item at a time.
#[derive(Debug, Clone, Copy)]
pub struct LabelResolver<'a> {
    decoder: Option<&'a dyn LabelDecoder>,
}

impl<'a> LabelResolver<'a> {
    pub fn new(decoder: Option<&'a dyn LabelDecoder>) -> Self {
        Self { decoder }
    }

    pub fn resolve(&self, label: &ClassLabel) -> String {
        let Some(decoder) = self.decoder else {
            return label.to_string();
        };

        match decoder.inverse_transform(label) {
            Ok(decoded) => decoded,
            Err(e) => {
                debug!(label = %label, error = %e, "Label decode failed, using raw label");
                label.to_string()
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockLabelDecoder;
    use super::*;

    #[test]
    fn test_class_label_display() {
        assert_eq!(ClassLabel::Index(2).to_string(), "2");
        assert_eq!(ClassLabel::from("positive").to_string(), "positive");
    }

    #[test]
    fn test_class_label_deserializes_untagged() {
        let labels: Vec<ClassLabel> = serde_json::from_str(r#"[0, "neutral", -1]"#).unwrap();

        assert_eq!(
            labels,
            vec![
                ClassLabel::Index(0),
                ClassLabel::Name("neutral".to_string()),
                ClassLabel::Index(-1),
            ]
        );
    }

    #[test]
    fn test_resolver_without_decoder_uses_raw_label() {
        let resolver = LabelResolver::new(None);

        assert_eq!(resolver.resolve(&ClassLabel::Index(0)), "0");
        assert_eq!(resolver.resolve(&ClassLabel::Index(1)), "1");
    }

    #[test]
    fn test_resolver_decodes_known_labels() {
        let decoder = MockLabelDecoder::new()
            .with_name(0, "negative")
            .with_name(1, "positive");
        let resolver = LabelResolver::new(Some(&decoder));

        assert_eq!(resolver.resolve(&ClassLabel::Index(0)), "negative");
        assert_eq!(resolver.resolve(&ClassLabel::Index(1)), "positive");
    }

    #[test]
    fn test_resolver_falls_back_on_unknown_label() {
        let decoder = MockLabelDecoder::new().with_name(0, "negative");
        let resolver = LabelResolver::new(Some(&decoder));

        assert_eq!(resolver.resolve(&ClassLabel::Index(7)), "7");
        assert_eq!(resolver.resolve(&ClassLabel::Index(0)), "negative");
    }
}
