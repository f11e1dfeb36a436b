//! Synthetic customer dataset.
//!
//! Stands in for a real customer data source. Every column, including the
//! churn label, is drawn independently and uniformly, so the resulting model
//! has no real predictive power. It exists to exercise the pipeline end to end.

use crate::domain::customer::LabeledRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_SAMPLES: usize = 10_000;
pub const DEFAULT_SEED: u64 = 42;

/// Generates `n_samples` labeled rows. Same seed, same rows.
pub fn generate(n_samples: usize, seed: u64) -> Vec<LabeledRecord> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..n_samples)
        .map(|_| LabeledRecord {
            age: rng.random_range(18..80),
            credit_score: f64::from(rng.random_range(300u32..850)),
            balance: rng.random_range(0.0..250_000.0),
            tenure: rng.random_range(0..10),
            products_number: rng.random_range(1..5),
            credit_card: rng.random_range(0..2),
            active_member: rng.random_range(0..2),
            estimated_salary: rng.random_range(10_000.0..200_000.0),
            churn: rng.random_range(0..2),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate(50, 7), generate(50, 7));
        assert_ne!(generate(50, 7), generate(50, 8));
    }

    #[test]
    fn test_columns_stay_in_range() {
        for r in generate(2_000, DEFAULT_SEED) {
            assert!((18..80).contains(&r.age));
            assert!((300.0..850.0).contains(&r.credit_score));
            assert_eq!(r.credit_score.fract(), 0.0);
            assert!((0.0..250_000.0).contains(&r.balance));
            assert!(r.tenure < 10);
            assert!((1..5).contains(&r.products_number));
            assert!(r.credit_card <= 1);
            assert!(r.active_member <= 1);
            assert!((10_000.0..200_000.0).contains(&r.estimated_salary));
            assert!(r.churn <= 1);
        }
    }

    #[test]
    fn test_both_labels_present() {
        let rows = generate(500, DEFAULT_SEED);
        let churned = rows.iter().filter(|r| r.churn == 1).count();
        assert!(churned > 0 && churned < rows.len());
    }
}
