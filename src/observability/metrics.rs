//! Metrics collection and exposition.
//!
//! # Metrics
//! - `registro_requests_total` (counter): registrations by outcome
//! - `registro_request_duration_seconds` (histogram): handler latency by outcome
//! - `registro_store_records` (gauge): records held by the store
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one `POST /registro` and record its latency.
pub fn record_registration(outcome: &'static str, start: Instant) {
    metrics::counter!("registro_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("registro_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_store_size(records: usize) {
    metrics::gauge!("registro_store_records").set(records as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_metrics_are_recorded() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            let start = Instant::now();
            record_registration("created", start);
            record_registration("created", start);
            record_registration("duplicate", start);
            record_store_size(3);
        });

        let rendered = handle.render();
        assert!(rendered.contains(r#"registro_requests_total{outcome="created"} 2"#));
        assert!(rendered.contains(r#"registro_requests_total{outcome="duplicate"} 1"#));
        assert!(rendered.contains(r#"registro_request_duration_seconds_count{outcome="created"} 2"#));
        assert!(rendered.contains("registro_store_records 3"));
    }
}
