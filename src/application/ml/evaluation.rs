use serde::Serialize;
use std::fmt;

/// Precision / recall / F1 for one label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Hold-out evaluation of a binary churn classifier.
///
/// Diagnostic only: nothing downstream depends on these numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    /// Indexed by label: `[retained, churned]`.
    pub per_class: [ClassMetrics; 2],
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
    /// `confusion[actual][predicted]`
    pub confusion: [[usize; 2]; 2],
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

impl ClassificationReport {
    /// Labels outside {0, 1} are ignored.
    pub fn from_predictions(actual: &[i32], predicted: &[i32]) -> Self {
        let mut confusion = [[0usize; 2]; 2];
        for (&a, &p) in actual.iter().zip(predicted.iter()) {
            if (0..=1).contains(&a) && (0..=1).contains(&p) {
                confusion[a as usize][p as usize] += 1;
            }
        }

        let total: usize = confusion.iter().flatten().sum();
        let mut per_class = [ClassMetrics {
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
            support: 0,
        }; 2];

        for (label, metrics) in per_class.iter_mut().enumerate() {
            let tp = confusion[label][label];
            let predicted_as = confusion[0][label] + confusion[1][label];
            let support = confusion[label][0] + confusion[label][1];
            let precision = ratio(tp, predicted_as);
            let recall = ratio(tp, support);
            *metrics = ClassMetrics {
                precision,
                recall,
                f1: f1(precision, recall),
                support,
            };
        }

        let macro_avg = ClassMetrics {
            precision: (per_class[0].precision + per_class[1].precision) / 2.0,
            recall: (per_class[0].recall + per_class[1].recall) / 2.0,
            f1: (per_class[0].f1 + per_class[1].f1) / 2.0,
            support: total,
        };

        let weight = |m: &ClassMetrics| ratio(m.support, total);
        let weighted_avg = ClassMetrics {
            precision: per_class.iter().map(|m| m.precision * weight(m)).sum(),
            recall: per_class.iter().map(|m| m.recall * weight(m)).sum(),
            f1: per_class.iter().map(|m| m.f1 * weight(m)).sum(),
            support: total,
        };

        Self {
            per_class,
            accuracy: ratio(confusion[0][0] + confusion[1][1], total),
            macro_avg,
            weighted_avg,
            confusion,
        }
    }

    pub fn total(&self) -> usize {
        self.macro_avg.support
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>14} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (label, m) in self.per_class.iter().enumerate() {
            writeln!(
                f,
                "{:>14} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                label, m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>14} {:>10} {:>10} {:>10.2} {:>10}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.total()
        )?;
        for (name, m) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>14} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Confusion matrix (rows = actual, cols = predicted):")?;
        writeln!(f, "    [[{:>6} {:>6}]", self.confusion[0][0], self.confusion[0][1])?;
        write!(f, "     [{:>6} {:>6}]]", self.confusion[1][0], self.confusion[1][1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_confusion_matrix() {
        // actual:    0 0 0 1 1 1 1
        // predicted: 0 0 1 1 1 0 1
        let actual = [0, 0, 0, 1, 1, 1, 1];
        let predicted = [0, 0, 1, 1, 1, 0, 1];
        let report = ClassificationReport::from_predictions(&actual, &predicted);

        assert_eq!(report.confusion, [[2, 1], [1, 3]]);
        assert_eq!(report.per_class[0].support, 3);
        assert_eq!(report.per_class[1].support, 4);
        assert!((report.per_class[1].precision - 0.75).abs() < 1e-12);
        assert!((report.per_class[1].recall - 0.75).abs() < 1e-12);
        assert!((report.per_class[0].precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((report.accuracy - 5.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_positive_predictions_yields_zero_precision() {
        let report = ClassificationReport::from_predictions(&[0, 1, 1], &[0, 0, 0]);
        assert_eq!(report.per_class[1].precision, 0.0);
        assert_eq!(report.per_class[1].f1, 0.0);
    }

    #[test]
    fn test_display_lists_both_classes() {
        let report = ClassificationReport::from_predictions(&[0, 1], &[0, 1]);
        let text = report.to_string();
        assert!(text.contains("precision"));
        assert!(text.contains("weighted avg"));
        assert!(text.contains("1.00"));
    }
}
