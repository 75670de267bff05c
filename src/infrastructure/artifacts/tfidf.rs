//! TF-IDF bag-of-words vectorizer loaded from a fitted vocabulary

use std::collections::{HashMap, HashSet};

use regex::Regex;
use serde::Deserialize;

use crate::domain::{DomainError, FeatureMatrix, FeatureTransformer, SparseRow};

const ARTIFACT: &str = "vectorizer";

/// Row normalization applied after idf weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized form of a fitted TF-IDF vectorizer
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfArtifact {
    /// Term to column index
    pub vocabulary: HashMap<String, usize>,
    /// Per-column idf weights; absent when the vectorizer was fitted without idf
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    r"(?u)\b\w\w+\b".to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// Fitted TF-IDF vectorizer; never refits
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    n_features: usize,
    lowercase: bool,
    token_pattern: Regex,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    sublinear_tf: bool,
    norm: Option<Norm>,
}

impl TfidfVectorizer {
    pub fn from_json(bytes: &[u8]) -> Result<Self, DomainError> {
        let artifact: TfidfArtifact = serde_json::from_slice(bytes)
            .map_err(|e| DomainError::artifact(ARTIFACT, e.to_string()))?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: TfidfArtifact) -> Result<Self, DomainError> {
        let n_features = match &artifact.idf {
            Some(idf) => idf.len(),
            None => artifact.vocabulary.len(),
        };

        if let Some((term, &index)) = artifact
            .vocabulary
            .iter()
            .find(|(_, index)| **index >= n_features)
        {
            return Err(DomainError::artifact(
                ARTIFACT,
                format!(
                    "term '{}' maps to column {} but only {} columns exist",
                    term, index, n_features
                ),
            ));
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(DomainError::artifact(
                ARTIFACT,
                format!("invalid ngram_range ({}, {})", min_n, max_n),
            ));
        }

        let token_pattern = Regex::new(&artifact.token_pattern).map_err(|e| {
            DomainError::artifact(ARTIFACT, format!("invalid token_pattern: {}", e))
        })?;

        if token_pattern.captures_len() > 2 {
            return Err(DomainError::artifact(
                ARTIFACT,
                "token_pattern may contain at most one capturing group",
            ));
        }

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            n_features,
            lowercase: artifact.lowercase,
            token_pattern,
            ngram_range: artifact.ngram_range,
            stop_words: artifact.stop_words.into_iter().collect(),
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
        })
    }

    /// Terms (n-grams included) extracted from a text
    fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = self
            .token_pattern
            .captures_iter(&text)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();

        for n in min_n..=max_n {
            if n == 1 {
                terms.extend(tokens.iter().map(|t| t.to_string()));
            } else {
                terms.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }

        terms
    }

    fn vectorize(&self, text: &str) -> SparseRow {
        let mut counts: HashMap<usize, f64> = HashMap::new();

        for term in self.analyze(text) {
            if let Some(&column) = self.vocabulary.get(&term) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let pairs = counts
            .into_iter()
            .map(|(column, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                let idf = self
                    .idf
                    .as_ref()
                    .and_then(|idf| idf.get(column))
                    .copied()
                    .unwrap_or(1.0);
                (column, tf * idf)
            })
            .collect();

        let mut row = SparseRow::from_pairs(pairs);
        normalize(&mut row, self.norm);
        row
    }
}

fn normalize(row: &mut SparseRow, norm: Option<Norm>) {
    let length = match norm {
        Some(Norm::L2) => row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
        Some(Norm::L1) => row.iter().map(|(_, v)| v.abs()).sum::<f64>(),
        None => return,
    };

    if length > 0.0 {
        for value in row.values_mut() {
            *value /= length;
        }
    }
}

impl FeatureTransformer for TfidfVectorizer {
    fn transform(&self, texts: &[String]) -> Result<FeatureMatrix, DomainError> {
        let rows = texts.iter().map(|text| self.vectorize(text)).collect();
        Ok(FeatureMatrix::new(self.n_features, rows))
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vectorizer(extra: serde_json::Value) -> TfidfVectorizer {
        let mut artifact = json!({
            "vocabulary": {"love": 0, "hate": 1, "this": 2, "okay": 3},
            "idf": [2.0, 2.0, 1.0, 1.5]
        });
        if let (Some(base), Some(extra)) = (artifact.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                base.insert(k.clone(), v.clone());
            }
        }
        TfidfVectorizer::from_json(artifact.to_string().as_bytes()).unwrap()
    }

    fn texts(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_transform_one_row_per_text() {
        let v = vectorizer(json!({}));
        let matrix = v.transform(&texts(&["I love this", "I hate this", ""])).unwrap();

        assert_eq!(matrix.n_rows(), 3);
        assert_eq!(matrix.n_features(), 4);
        assert!(matrix.rows()[2].is_empty());
    }

    #[test]
    fn test_rows_are_l2_normalized() {
        let v = vectorizer(json!({}));
        let matrix = v.transform(&texts(&["LOVE this love"])).unwrap();
        let row = &matrix.rows()[0];

        let norm: f64 = row.iter().map(|(_, x)| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
        // love: tf 2 * idf 2 = 4, this: 1 * 1 = 1
        assert!((row.get(0) / row.get(2) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_terms_are_ignored() {
        let v = vectorizer(json!({}));
        let matrix = v.transform(&texts(&["completely unseen words"])).unwrap();

        assert!(matrix.rows()[0].is_empty());
    }

    #[test]
    fn test_single_character_tokens_skipped_by_default_pattern() {
        let v = vectorizer(json!({"vocabulary": {"i": 0, "love": 1}, "idf": [1.0, 1.0]}));
        let matrix = v.transform(&texts(&["I love"])).unwrap();

        assert_eq!(matrix.rows()[0].nnz(), 1);
        assert_eq!(matrix.rows()[0].get(1), 1.0);
    }

    #[test]
    fn test_bigrams_and_stop_words() {
        let v = vectorizer(json!({
            "vocabulary": {"not good": 0, "good": 1, "not": 2},
            "idf": [1.0, 1.0, 1.0],
            "ngram_range": [1, 2],
            "stop_words": ["the"],
            "norm": null
        }));
        let matrix = v.transform(&texts(&["not the good"])).unwrap();
        let row = &matrix.rows()[0];

        assert_eq!(row.get(0), 1.0);
        assert_eq!(row.get(1), 1.0);
        assert_eq!(row.get(2), 1.0);
    }

    #[test]
    fn test_sublinear_tf_without_norm() {
        let v = vectorizer(json!({"sublinear_tf": true, "norm": null}));
        let matrix = v.transform(&texts(&["okay okay okay"])).unwrap();

        let expected = (1.0 + 3.0_f64.ln()) * 1.5;
        assert!((matrix.rows()[0].get(3) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_l1_norm() {
        let v = vectorizer(json!({"norm": "l1"}));
        let matrix = v.transform(&texts(&["love hate this"])).unwrap();

        let sum: f64 = matrix.rows()[0].iter().map(|(_, x)| x).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_without_idf_uses_vocabulary_width() {
        let artifact = json!({"vocabulary": {"a1": 0, "b2": 1}, "norm": null});
        let v = TfidfVectorizer::from_json(artifact.to_string().as_bytes()).unwrap();
        let matrix = v.transform(&texts(&["a1 a1 b2"])).unwrap();

        assert_eq!(v.n_features(), 2);
        assert_eq!(matrix.rows()[0].get(0), 2.0);
    }

    #[test]
    fn test_rejects_out_of_range_vocabulary() {
        let artifact = json!({"vocabulary": {"love": 5}, "idf": [1.0]});
        let err = TfidfVectorizer::from_json(artifact.to_string().as_bytes()).unwrap_err();

        assert!(err.to_string().contains("column 5"));
    }

    #[test]
    fn test_rejects_bad_ngram_range() {
        let artifact = json!({"vocabulary": {}, "ngram_range": [2, 1]});
        assert!(TfidfVectorizer::from_json(artifact.to_string().as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(TfidfVectorizer::from_json(b"not json").is_err());
    }
}
