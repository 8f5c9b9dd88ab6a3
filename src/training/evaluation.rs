//! Holdout evaluation of a freshly fitted forest.
//!
//! Metrics are computed with the malignant class as the positive class.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Two-class confusion counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
}

impl ConfusionMatrix {
    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }
}

/// Holdout metrics stored alongside the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Class treated as positive
    pub positive_class: u32,
    /// Number of holdout samples
    pub samples: usize,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub confusion: ConfusionMatrix,
}

impl EvaluationReport {
    /// Compare holdout labels with predictions.
    ///
    /// Ratios with a zero denominator are reported as 0.
    pub fn compute(y_true: &[u32], y_pred: &[u32], positive_class: u32) -> Self {
        let mut confusion = ConfusionMatrix::default();

        for (&truth, &predicted) in y_true.iter().zip(y_pred) {
            match (truth == positive_class, predicted == positive_class) {
                (true, true) => confusion.true_positive += 1,
                (false, true) => confusion.false_positive += 1,
                (false, false) => confusion.true_negative += 1,
                (true, false) => confusion.false_negative += 1,
            }
        }

        let samples = confusion.total();
        let accuracy = ratio(confusion.true_positive + confusion.true_negative, samples);
        let precision = ratio(
            confusion.true_positive,
            confusion.true_positive + confusion.false_positive,
        );
        let recall = ratio(
            confusion.true_positive,
            confusion.true_positive + confusion.false_negative,
        );
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            positive_class,
            samples,
            accuracy,
            precision,
            recall,
            f1,
            confusion,
        }
    }

    /// Write the report to the log
    pub fn log(&self) {
        info!(
            samples = self.samples,
            accuracy = %format!("{:.4}", self.accuracy),
            precision = %format!("{:.4}", self.precision),
            recall = %format!("{:.4}", self.recall),
            f1 = %format!("{:.4}", self.f1),
            "Holdout evaluation"
        );
        info!(
            tp = self.confusion.true_positive,
            fp = self.confusion.false_positive,
            tn = self.confusion.true_negative,
            fn_ = self.confusion.false_negative,
            "Confusion matrix (positive class {})",
            self.positive_class
        );
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_predictions() {
        let labels = [0, 1, 1, 0, 1];
        let report = EvaluationReport::compute(&labels, &labels, 0);

        assert_eq!(report.samples, 5);
        assert_eq!(report.accuracy, 1.0);
        assert_eq!(report.precision, 1.0);
        assert_eq!(report.recall, 1.0);
        assert_eq!(report.f1, 1.0);
    }

    #[test]
    fn test_confusion_counts() {
        let y_true = [0, 0, 0, 1, 1, 1, 1, 1];
        let y_pred = [0, 0, 1, 1, 1, 1, 0, 1];
        let report = EvaluationReport::compute(&y_true, &y_pred, 0);

        assert_eq!(
            report.confusion,
            ConfusionMatrix {
                true_positive: 2,
                false_positive: 1,
                true_negative: 4,
                false_negative: 1,
            }
        );
        assert_eq!(report.accuracy, 6.0 / 8.0);
        assert!((report.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((report.recall - 2.0 / 3.0).abs() < 1e-12);
        assert!((report.f1 - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_positive_predictions() {
        let report = EvaluationReport::compute(&[1, 1], &[1, 1], 0);
        assert_eq!(report.precision, 0.0);
        assert_eq!(report.recall, 0.0);
        assert_eq!(report.f1, 0.0);
        assert_eq!(report.accuracy, 1.0);
    }

    #[test]
    fn test_empty_holdout() {
        let report = EvaluationReport::compute(&[], &[], 0);
        assert_eq!(report.samples, 0);
        assert_eq!(report.accuracy, 0.0);
    }
}
