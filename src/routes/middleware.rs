// Request accounting and the catch-all for handler panics

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::any::Any;
use std::sync::Arc;
use tokio::time::Instant;

use crate::error::internal_error_response;
use crate::metrics::{ServerMetrics, duration_ms};

/// Counts every request and its latency. Outermost layer, so 404s and caught panics count too.
pub(super) async fn track_requests(
    State(metrics): State<Arc<ServerMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    let elapsed = started.elapsed();
    metrics.record_request(elapsed);
    tracing::debug!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = duration_ms(elapsed),
        "request completed"
    );
    response
}

pub(super) fn panic_response(panic: Box<dyn Any + Send + 'static>, expose_details: bool) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "handler panicked"
    };
    tracing::error!(panic = detail, "Unhandled error in request handler");
    internal_error_response(detail, expose_details)
}
