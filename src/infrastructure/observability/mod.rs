//! Pull-based observability for the churn predictor
//!
//! Metrics live in a private Prometheus registry and are scraped from the
//! service's `/metrics` endpoint.

pub mod metrics;

pub use metrics::Metrics;
