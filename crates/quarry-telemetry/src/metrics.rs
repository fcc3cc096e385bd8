//! Metric name constants and recording helpers

use std::time::Instant;

use opentelemetry::metrics::{Histogram, Meter};

/// Meter shared by every Quarry instrument
pub fn meter() -> Meter {
    opentelemetry::global::meter("quarry")
}

/// Record a duration measurement on a histogram
pub fn record_duration(histogram: &Histogram<f64>, start: Instant, attributes: &[opentelemetry::KeyValue]) {
    let duration = start.elapsed().as_secs_f64();
    histogram.record(duration, attributes);
}

// Vendor call metric names
pub const LLM_REQUEST_DURATION: &str = "llm.request.duration";
pub const LLM_REQUEST_COUNT: &str = "llm.request.count";
