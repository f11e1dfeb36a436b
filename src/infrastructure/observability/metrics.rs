//! Prometheus metrics definitions for the churn predictor
//!
//! All metrics use the `churn_` prefix. Labels never carry customer data.

use prometheus::{
    CounterVec, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
    core::{AtomicF64, GenericGauge},
};
use std::sync::Arc;

/// Prometheus metrics for the prediction service
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Predictions served, by outcome (churn / retain / unavailable / invalid / error)
    pub predictions_total: CounterVec,
    /// Time spent scoring one request, in seconds
    pub prediction_latency_seconds: Histogram,
    /// 1 when a model is loaded, 0 otherwise
    pub model_loaded: GenericGauge<AtomicF64>,
}

impl Metrics {
    /// Create a new Metrics instance with all gauges and counters registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let predictions_total = CounterVec::new(
            Opts::new("churn_predictions_total", "Predictions served by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(predictions_total.clone()))?;

        let prediction_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "churn_prediction_latency_seconds",
                "Prediction latency in seconds",
            )
            .buckets(vec![
                0.0001, 0.00025, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1,
            ]),
        )?;
        registry.register(Box::new(prediction_latency_seconds.clone()))?;

        let model_loaded = Gauge::with_opts(Opts::new(
            "churn_model_loaded",
            "Whether a churn model is loaded (1) or not (0)",
        ))?;
        registry.register(Box::new(model_loaded.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            predictions_total,
            prediction_latency_seconds,
            model_loaded,
        })
    }

    pub fn record_prediction(&self, outcome: &str, elapsed_secs: f64) {
        self.predictions_total.with_label_values(&[outcome]).inc();
        self.prediction_latency_seconds.observe(elapsed_secs);
    }

    pub fn set_model_loaded(&self, loaded: bool) {
        self.model_loaded.set(if loaded { 1.0 } else { 0.0 });
    }

    /// Render all registered metrics in the Prometheus text format
    pub fn gather_text(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        Ok(encoder.encode_to_string(&metric_families)?)
    }
}
