//! Batch-level summary statistics

use std::collections::BTreeMap;

use super::prediction::{BatchResult, Distribution, PredictionItem};

/// Builds the distribution summary for a batch of predictions
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchAggregator;

impl BatchAggregator {
    pub fn aggregate(items: Vec<PredictionItem>, model_name: Option<&str>) -> BatchResult {
        let total = items.len();

        if total == 0 {
            return BatchResult::empty();
        }

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for item in &items {
            *counts.entry(item.sentiment.clone()).or_insert(0) += 1;
        }

        let percentages = counts
            .iter()
            .map(|(label, &count)| {
                (
                    label.clone(),
                    round_one_decimal(count as f64 / total as f64 * 100.0),
                )
            })
            .collect();

        let average_confidence =
            items.iter().map(|item| item.confidence).sum::<f64>() / total as f64;

        BatchResult {
            count: total,
            results: items,
            distribution: Some(Distribution {
                counts,
                percentages,
            }),
            average_confidence: Some(average_confidence),
            model_name: model_name.map(str::to_string),
        }
    }
}

/// One decimal, ties to even
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(labels: &[(&str, f64)]) -> Vec<PredictionItem> {
        labels
            .iter()
            .enumerate()
            .map(|(i, (label, confidence))| {
                PredictionItem::new(format!("comment {}", i), *label, *confidence)
            })
            .collect()
    }

    #[test]
    fn test_aggregate_counts_and_percentages() {
        let result = BatchAggregator::aggregate(
            items(&[
                ("positive", 0.9),
                ("negative", 0.6),
                ("positive", 0.8),
                ("neutral", 0.5),
            ]),
            Some("RandomForestClassifier"),
        );

        let distribution = result.distribution.unwrap();
        assert_eq!(result.count, 4);
        assert_eq!(distribution.counts["positive"], 2);
        assert_eq!(distribution.counts["negative"], 1);
        assert_eq!(distribution.counts["neutral"], 1);
        assert_eq!(distribution.percentages["positive"], 50.0);
        assert_eq!(distribution.percentages["negative"], 25.0);
        assert_eq!(distribution.total(), 4);
        assert!((result.average_confidence.unwrap() - 0.7).abs() < 1e-9);
        assert_eq!(result.model_name.as_deref(), Some("RandomForestClassifier"));
    }

    #[test]
    fn test_aggregate_preserves_order() {
        let result = BatchAggregator::aggregate(
            items(&[("b", 0.1), ("a", 0.2), ("c", 0.3)]),
            None,
        );

        let comments: Vec<&str> = result.results.iter().map(|r| r.comment.as_str()).collect();
        assert_eq!(comments, vec!["comment 0", "comment 1", "comment 2"]);
    }

    #[test]
    fn test_percentages_round_to_one_decimal() {
        let result = BatchAggregator::aggregate(
            items(&[("a", 0.0), ("b", 0.0), ("c", 0.0)]),
            None,
        );

        let distribution = result.distribution.unwrap();
        assert_eq!(distribution.percentages["a"], 33.3);

        let sum: f64 = distribution.percentages.values().sum();
        assert!((sum - 100.0).abs() <= 0.15);
    }

    #[test]
    fn test_percentage_ties_round_to_even() {
        let mut labels = vec![("a", 0.5)];
        labels.extend(std::iter::repeat_n(("b", 0.5), 5));
        labels.extend(std::iter::repeat_n(("c", 0.5), 10));

        let result = BatchAggregator::aggregate(items(&labels), None);
        let distribution = result.distribution.unwrap();

        assert_eq!(result.count, 16);
        assert_eq!(distribution.percentages["a"], 6.2);
        assert_eq!(distribution.percentages["b"], 31.2);
        assert_eq!(distribution.percentages["c"], 62.5);
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(0.25), 0.2);
        assert_eq!(round_one_decimal(0.35), 0.4);
        assert_eq!(round_one_decimal(33.333), 33.3);
        assert_eq!(round_one_decimal(66.666), 66.7);
    }

    #[test]
    fn test_percentages_sum_within_tolerance_for_many_classes() {
        let labels: Vec<(String, f64)> = (0..7)
            .flat_map(|i| std::iter::repeat_n((format!("class-{}", i), 0.5), i + 1))
            .collect();
        let items: Vec<PredictionItem> = labels
            .iter()
            .map(|(label, confidence)| PredictionItem::new("text", label.clone(), *confidence))
            .collect();

        let result = BatchAggregator::aggregate(items, None);
        let distribution = result.distribution.unwrap();

        assert_eq!(distribution.total(), result.count);
        let sum: f64 = distribution.percentages.values().sum();
        assert!((sum - 100.0).abs() <= 0.05 * distribution.percentages.len() as f64);
    }

    #[test]
    fn test_aggregate_empty_batch() {
        let result = BatchAggregator::aggregate(Vec::new(), Some("LinearSVC"));

        assert_eq!(result, BatchResult::empty());
        assert!(result.distribution.is_none());
        assert!(result.average_confidence.is_none());
    }

    #[test]
    fn test_aggregate_zero_confidence() {
        let result = BatchAggregator::aggregate(items(&[("0", 0.0), ("1", 0.0)]), None);

        assert_eq!(result.average_confidence, Some(0.0));
    }
}
