use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static FLAVOR_OPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "icecream_flavor_ops_total",
        "Flavor store operations by kind and outcome",
        &["op", "outcome"]
    )
    .expect("register flavor_ops_total")
});

pub fn record(op: &str, outcome: &str) {
    FLAVOR_OPS_TOTAL.with_label_values(&[op, outcome]).inc();
}

pub async fn metrics_handler() -> (StatusCode, String) {
    Lazy::force(&FLAVOR_OPS_TOTAL);
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buf) {
        return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
    }
    match String::from_utf8(buf) {
        Ok(s) => (StatusCode::OK, s),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
