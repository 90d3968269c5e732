use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Install the Prometheus recorder and describe all metrics
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "price_estimates_total",
        "Total number of price estimates computed"
    );
    describe_counter!(
        "classifier_requests_total",
        "Total number of classifier requests by outcome"
    );
    describe_histogram!(
        "classifier_request_duration_seconds",
        "Classifier round trip duration in seconds"
    );
    describe_gauge!(
        "price_estimator_info",
        "Service version information"
    );

    gauge!("price_estimator_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a computed estimate
pub fn record_estimate(category: &str, condition: &str) {
    counter!(
        "price_estimates_total",
        "category" => category.to_string(),
        "condition" => condition.to_string(),
    )
    .increment(1);
}

/// Record a classifier round trip
pub fn record_classifier_request(outcome: &str, duration: Duration) {
    counter!(
        "classifier_requests_total",
        "outcome" => outcome.to_string(),
    )
    .increment(1);

    histogram!(
        "classifier_request_duration_seconds",
        "outcome" => outcome.to_string(),
    )
    .record(duration.as_secs_f64());
}
