use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "service_desk_http_requests_total",
        "HTTP requests by method and response status",
        &["method", "status"]
    )
    .expect("register http_requests_total")
});

pub static SERVICE_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "service_desk_service_operations_total",
        "Successful record store operations by kind",
        &["op"]
    )
    .expect("register service_operations_total")
});

pub static LOGINS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("service_desk_logins_total", "Successful logins")
        .expect("register logins_total")
});

pub static LOGOUTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("service_desk_logouts_total", "Logouts")
        .expect("register logouts_total")
});

pub static AUTH_REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("service_desk_auth_rejected_total", "Requests rejected by the session gate")
        .expect("register auth_rejected_total")
});

/// Count a successful store operation (`list`, `get`, `create`, `update`, `delete`, `dashboard`).
pub fn record_operation(op: &str) {
    SERVICE_OPERATIONS_TOTAL.with_label_values(&[op]).inc();
}

/// Count a finished request.
pub fn record_request(method: &str, status: u16) {
    HTTP_REQUESTS_TOTAL.with_label_values(&[method, &status.to_string()]).inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
