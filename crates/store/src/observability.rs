use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Encoder, Histogram, IntCounter,
    IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry)
pub static LOADS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "config_store_loads_total",
        "Total successful configuration loads"
    )
    .expect("register loads_total")
});

pub static LOAD_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "config_store_load_failures_total",
        "Total failed configuration loads by failure kind",
        &["kind"]
    )
    .expect("register load_failures_total")
});

pub static LOAD_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "config_store_load_duration_seconds",
        "Configuration load duration in seconds",
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("register load_duration")
});

/// Render the default registry in the text exposition format, for a host's
/// `/metrics` endpoint.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_metrics_include_store_series() -> Result<(), anyhow::Error> {
        LOADS_TOTAL.inc_by(0);
        LOAD_FAILURES_TOTAL.with_label_values(&["unreachable"]).inc_by(0);
        LOAD_DURATION.observe(0.0);
        let text = encode_metrics()?;
        assert!(text.contains("config_store_loads_total"));
        assert!(text.contains("config_store_load_failures_total{kind=\"unreachable\"}"));
        assert!(text.contains("config_store_load_duration_seconds_bucket"));
        Ok(())
    }
}
