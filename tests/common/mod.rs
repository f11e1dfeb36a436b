#![allow(dead_code)]

use churn_predictor::application::ml::synthetic_data;
use churn_predictor::application::ml::{ChurnModel, ChurnTrainer, TrainingConfig};
use churn_predictor::domain::customer::{CustomerRecord, LabeledRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn small_config() -> TrainingConfig {
    TrainingConfig {
        n_trees: 20,
        max_depth: 6,
        ..TrainingConfig::default()
    }
}

pub fn train_small_model() -> ChurnModel {
    ChurnTrainer::new(small_config())
        .train(&synthetic_data::generate(300, 42))
        .expect("training on synthetic data")
        .model
}

/// Rows where churn is fully determined by age (> 50 churns).
pub fn age_driven_dataset(n: usize, seed: u64) -> Vec<LabeledRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let age: u32 = rng.random_range(18..80);
            LabeledRecord {
                age,
                credit_score: f64::from(rng.random_range(300u32..850)),
                balance: rng.random_range(0.0..250_000.0),
                tenure: rng.random_range(0..10),
                products_number: rng.random_range(1..5),
                credit_card: rng.random_range(0..2),
                active_member: rng.random_range(0..2),
                estimated_salary: rng.random_range(10_000.0..200_000.0),
                churn: u8::from(age > 50),
            }
        })
        .collect()
}

/// The documented example customer.
pub fn example_customer() -> CustomerRecord {
    CustomerRecord {
        customer_id: "CUST-0001".to_string(),
        age: 45,
        credit_score: 650.0,
        balance: 50_000.0,
        tenure: 5,
        products_number: 2,
        credit_card: 1,
        active_member: 1,
        estimated_salary: 60_000.0,
        gender: None,
        satisfaction_score: None,
        last_interaction: None,
    }
}
