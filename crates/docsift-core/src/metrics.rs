//! Prometheus metrics for docsift.
//!
//! - `docsift_jobs_total{status}` - Counter of finished large-search jobs
//! - `docsift_job_duration_seconds{status}` - Histogram of job durations
//! - `docsift_batches_indexed_total` - Counter of batches confirmed by the store
//! - `docsift_chunks_indexed_total` - Counter of chunks confirmed by the store
//! - `docsift_fragments_collected_total` - Counter of non-blank per-batch answers
//! - `docsift_upstream_retries_total{operation}` - Counter of backoff retries
//! - `docsift_progress_records` - Gauge of tracked progress records
//! - `docsift_uptime_seconds` - Gauge of server uptime

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

static METRICS_START_TIME: OnceLock<Instant> = OnceLock::new();

/// Jobs range from a single small file (seconds) to multi-gigabyte
/// inputs with one upload + query round trip per batch (tens of minutes).
const JOB_DURATION_BUCKETS: &[f64] = &[1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0, 900.0, 1800.0];

/// Install the Prometheus recorder.
///
/// Idempotent: later calls return the handle installed by the first one.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let _ = METRICS_START_TIME.get_or_init(Instant::now);

    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new()
        .set_buckets(JOB_DURATION_BUCKETS)?
        .install_recorder()?;

    describe_counter!("docsift_jobs_total", "Total large-search jobs by final status");
    describe_histogram!("docsift_job_duration_seconds", "Large-search job duration in seconds");
    describe_counter!("docsift_batches_indexed_total", "Batches confirmed indexed by the store");
    describe_counter!("docsift_chunks_indexed_total", "Chunks confirmed indexed by the store");
    describe_counter!(
        "docsift_fragments_collected_total",
        "Non-blank per-batch query answers collected"
    );
    describe_counter!("docsift_upstream_retries_total", "Upstream calls retried after backoff");
    describe_gauge!("docsift_progress_records", "Progress records currently tracked");
    describe_gauge!("docsift_uptime_seconds", "Server uptime in seconds");

    Ok(PROMETHEUS_HANDLE.get_or_init(|| handle).clone())
}

/// Render metrics text, empty when the recorder was never installed.
pub fn render_metrics() -> String {
    PROMETHEUS_HANDLE.get().map(PrometheusHandle::render).unwrap_or_default()
}

pub fn record_job(status: &str, duration: Duration) {
    let labels = [("status", status.to_string())];
    counter!("docsift_jobs_total", &labels).increment(1);
    histogram!("docsift_job_duration_seconds", &labels).record(duration.as_secs_f64());
}

pub fn record_batch_indexed(chunks: usize) {
    counter!("docsift_batches_indexed_total").increment(1);
    counter!("docsift_chunks_indexed_total").increment(chunks as u64);
}

pub fn record_fragment() {
    counter!("docsift_fragments_collected_total").increment(1);
}

pub fn record_retry(operation: &str) {
    let labels = [("operation", operation.to_string())];
    counter!("docsift_upstream_retries_total", &labels).increment(1);
}

pub fn update_progress_gauge(records: usize) {
    gauge!("docsift_progress_records").set(records as f64);
}

pub fn update_uptime_gauge() {
    if let Some(start) = METRICS_START_TIME.get() {
        gauge!("docsift_uptime_seconds").set(start.elapsed().as_secs_f64());
    }
}
