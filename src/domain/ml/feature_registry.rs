use crate::domain::customer::{CustomerRecord, LabeledRecord};
use sha2::{Digest, Sha256};

pub const FEATURE_COUNT: usize = 8;

/// Ordered list of feature names.
/// This order MUST match between training and serving. Reordering it is a
/// breaking change for every persisted model.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "credit_score",
    "balance",
    "tenure",
    "products_number",
    "credit_card",
    "active_member",
    "estimated_salary",
];

/// Dataset column holding the binary churn label.
pub const LABEL_COLUMN: &str = "churn";

/// Numeric projection of a customer in `FEATURE_NAMES` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }
}

impl From<&CustomerRecord> for FeatureVector {
    fn from(c: &CustomerRecord) -> Self {
        Self([
            f64::from(c.age),
            c.credit_score,
            c.balance,
            f64::from(c.tenure),
            f64::from(c.products_number),
            f64::from(c.credit_card),
            f64::from(c.active_member),
            c.estimated_salary,
        ])
    }
}

impl From<&LabeledRecord> for FeatureVector {
    fn from(r: &LabeledRecord) -> Self {
        Self([
            f64::from(r.age),
            r.credit_score,
            r.balance,
            f64::from(r.tenure),
            f64::from(r.products_number),
            f64::from(r.credit_card),
            f64::from(r.active_member),
            r.estimated_salary,
        ])
    }
}

pub fn feature_names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
}

/// Hex SHA-256 over the comma-joined feature names.
/// Stored with every artifact and compared at load time.
pub fn schema_fingerprint() -> String {
    fingerprint_of(&FEATURE_NAMES)
}

pub fn fingerprint_of<S: AsRef<str>>(names: &[S]) -> String {
    let joined = names
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(",");
    hex::encode(Sha256::digest(joined.as_bytes()))
}
