//! Per-item predictions and batch results

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentiment prediction for one comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionItem {
    pub comment: String,
    pub sentiment: String,
    /// Probability of the model's top class, 0.0 when unavailable
    pub confidence: f64,
}

impl PredictionItem {
    pub fn new(comment: impl Into<String>, sentiment: impl Into<String>, confidence: f64) -> Self {
        Self {
            comment: comment.into(),
            sentiment: sentiment.into(),
            confidence,
        }
    }
}

/// Class distribution over a batch, keyed by sentiment label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub counts: BTreeMap<String, usize>,
    /// Share of the batch per label, rounded to one decimal
    pub percentages: BTreeMap<String, f64>,
}

impl Distribution {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Result of classifying a batch of comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub count: usize,
    pub results: Vec<PredictionItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Distribution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_confidence: Option<f64>,
    #[serde(rename = "model", default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

impl BatchResult {
    /// `{count: 0, results: []}`
    pub fn empty() -> Self {
        Self {
            count: 0,
            results: Vec::new(),
            distribution: None,
            average_confidence: None,
            model_name: None,
        }
    }
}
