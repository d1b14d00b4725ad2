//! Prometheus metrics for the relay.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use ::metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::handler::RelayOutcome;

/// Metric names as constants for consistency.
pub mod names {
    pub const REQUESTS_TOTAL: &str = "reel_requests_total";
    pub const FETCH_DURATION_SECONDS: &str = "reel_fetch_duration_seconds";
    pub const UPLOAD_DURATION_SECONDS: &str = "reel_upload_duration_seconds";
}

/// Start the Prometheus exporter on `0.0.0.0:<port>`.
///
/// Must be called from within a tokio runtime.
pub fn init_exporter(port: u16) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
        .install()
}

/// Record a handled message by outcome.
pub fn record_request(outcome: RelayOutcome) {
    let labels = [("outcome", outcome.as_str().to_string())];
    counter!(names::REQUESTS_TOTAL, &labels).increment(1);
}

/// Record fetch duration.
pub fn record_fetch_duration(duration: Duration) {
    histogram!(names::FETCH_DURATION_SECONDS).record(duration.as_secs_f64());
}

/// Record upload duration.
pub fn record_upload_duration(duration: Duration) {
    histogram!(names::UPLOAD_DURATION_SECONDS).record(duration.as_secs_f64());
}
