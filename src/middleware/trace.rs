//! Request logging hooks for `tower_http::trace::TraceLayer`.
//!
//! Each request gets an `http_request` span carrying method, uri and
//! request id. The request is logged on arrival and the response is logged
//! with its status and latency, which also feeds the request duration
//! histogram.

use std::time::Duration;

use axum::http::{Request, Response};
use tower_http::trace::{MakeSpan, OnRequest, OnResponse};
use tracing::{Span, info, info_span, warn};

use super::request_id::RequestIdExt;
use crate::metrics;

/// Builds the per-request span.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = request.request_id().unwrap_or("unknown"),
        )
    }
}

/// Logs every incoming request.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRequest;

impl<B> OnRequest<B> for LogRequest {
    fn on_request(&mut self, request: &Request<B>, _span: &Span) {
        info!("{} {}", request.method(), request.uri());
    }
}

/// Logs every response and records its duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogResponse;

impl<B> OnResponse<B> for LogResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status();
        let latency_ms = latency.as_secs_f64() * 1000.0;

        if status.is_server_error() {
            warn!(status = status.as_u16(), latency_ms, "Response sent");
        } else {
            info!(status = status.as_u16(), latency_ms, "Response sent");
        }

        metrics::record_request_duration(status.as_u16(), latency.as_secs_f64());
    }
}
