//! Feature representation and the feature transformer trait

use std::fmt::Debug;

use crate::domain::DomainError;

/// One sparse feature row with strictly increasing column indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseRow {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseRow {
    /// Build a row from unordered `(column, value)` pairs
    ///
    /// Duplicate columns are summed; explicit zeros are dropped.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_by_key(|(column, _)| *column);

        let mut indices: Vec<usize> = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());

        for (column, value) in pairs {
            match indices.last() {
                Some(&last) if last == column => {
                    if let Some(v) = values.last_mut() {
                        *v += value;
                    }
                }
                _ => {
                    indices.push(column);
                    values.push(value);
                }
            }
        }

        let (indices, values) = indices
            .into_iter()
            .zip(values)
            .filter(|(_, value)| *value != 0.0)
            .unzip();

        Self { indices, values }
    }

    /// Value at `column`, zero when not stored
    pub fn get(&self, column: usize) -> f64 {
        match self.indices.binary_search(&column) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Dot product with a dense weight vector; out-of-range columns count as zero
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.iter()
            .filter_map(|(column, value)| weights.get(column).map(|w| w * value))
            .sum()
    }

    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }
}

/// Row-per-document feature matrix in a fixed column space
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    n_features: usize,
    rows: Vec<SparseRow>,
}

impl FeatureMatrix {
    pub fn new(n_features: usize, rows: Vec<SparseRow>) -> Self {
        Self { n_features, rows }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn rows(&self) -> &[SparseRow] {
        &self.rows
    }
}

/// Converts raw text into features in the vectorizer's fitted column space
pub trait FeatureTransformer: Send + Sync + Debug {
    /// One output row per input text, in input order
    fn transform(&self, texts: &[String]) -> Result<FeatureMatrix, DomainError>;

    /// Width of the fitted column space
    fn n_features(&self) -> usize;
}
