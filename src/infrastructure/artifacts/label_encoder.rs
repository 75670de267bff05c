//! Index to name decoding for integer-labelled classifiers

use serde::Deserialize;

use crate::domain::{ClassLabel, DomainError, LabelDecoder};

#[derive(Debug, Clone, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn from_json(bytes: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice(bytes)
            .map_err(|e| DomainError::artifact("label_decoder", e.to_string()))
    }
}

impl LabelDecoder for LabelEncoder {
    fn inverse_transform(&self, label: &ClassLabel) -> Result<String, DomainError> {
        let index = label.as_index().ok_or_else(|| {
            DomainError::label_decode(format!("label '{}' is not an integer index", label))
        })?;

        usize::try_from(index)
            .ok()
            .and_then(|i| self.classes.get(i))
            .cloned()
            .ok_or_else(|| {
                DomainError::label_decode(format!(
                    "index {} outside {} known classes",
                    index,
                    self.classes.len()
                ))
            })
    }
}
