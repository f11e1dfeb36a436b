use crate::domain::errors::PredictionError;
use serde::{Deserialize, Serialize};

/// A single customer as submitted for scoring.
///
/// Only the eight account attributes feed the model. `gender`,
/// `satisfaction_score` and `last_interaction` are accepted for forward
/// compatibility and are never read by the feature registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: String,
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub age: u32,
    pub credit_score: f64,
    pub balance: f64,
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub tenure: u32,
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub products_number: u32,
    #[serde(deserialize_with = "binary_flag::deserialize")]
    pub credit_card: u8,
    #[serde(deserialize_with = "binary_flag::deserialize")]
    pub active_member: u8,
    pub estimated_salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfaction_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_interaction: Option<String>,
}

impl CustomerRecord {
    /// Checks the attributes that serde cannot constrain on its own.
    pub fn validate(&self) -> Result<(), PredictionError> {
        let floats = [
            ("credit_score", self.credit_score),
            ("balance", self.balance),
            ("estimated_salary", self.estimated_salary),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(PredictionError::InvalidInput {
                    reason: format!("{} must be a finite number", name),
                });
            }
        }

        for (name, value) in [
            ("credit_card", self.credit_card),
            ("active_member", self.active_member),
        ] {
            if value > 1 {
                return Err(PredictionError::InvalidInput {
                    reason: format!("{} must be 0 or 1, got {}", name, value),
                });
            }
        }

        Ok(())
    }
}

/// One row of a training dataset: the model attributes plus the churn label.
///
/// Field names double as CSV headers, so they must stay aligned with
/// `FEATURE_NAMES` and `LABEL_COLUMN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRecord {
    pub age: u32,
    pub credit_score: f64,
    pub balance: f64,
    pub tenure: u32,
    pub products_number: u32,
    pub credit_card: u8,
    pub active_member: u8,
    pub estimated_salary: f64,
    pub churn: u8,
}

impl LabeledRecord {
    /// Reinterprets the attributes as a scoring request.
    pub fn to_customer(&self, customer_id: impl Into<String>) -> CustomerRecord {
        CustomerRecord {
            customer_id: customer_id.into(),
            age: self.age,
            credit_score: self.credit_score,
            balance: self.balance,
            tenure: self.tenure,
            products_number: self.products_number,
            credit_card: self.credit_card,
            active_member: self.active_member,
            estimated_salary: self.estimated_salary,
            gender: None,
            satisfaction_score: None,
            last_interaction: None,
        }
    }
}

/// Accepts `true`/`false` as well as `0`/`1` for the yes/no attributes.
mod binary_flag {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Int(i64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u8, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawFlag::deserialize(deserializer)? {
            RawFlag::Bool(b) => Ok(u8::from(b)),
            RawFlag::Int(v @ 0..=1) => Ok(v as u8),
            RawFlag::Int(v) => Err(D::Error::custom(format!("expected 0 or 1, got {}", v))),
        }
    }
}

/// Accepts integers and integral floats such as `45.0` for count attributes.
mod whole_number {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Int(u64),
        Float(f64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match RawNumber::deserialize(deserializer)? {
            RawNumber::Int(v) => v,
            RawNumber::Float(f) if f.is_finite() && f.fract() == 0.0 && f >= 0.0 => f as u64,
            RawNumber::Float(f) => {
                return Err(D::Error::custom(format!(
                    "expected a non-negative whole number, got {}",
                    f
                )));
            }
        };
        u32::try_from(value).map_err(|_| D::Error::custom(format!("{} is out of range", value)))
    }
}
