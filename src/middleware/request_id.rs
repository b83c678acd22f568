//! Request ID propagation.
//!
//! Every request gets an `x-request-id`: the client's value when it sent a
//! usable one, otherwise a fresh UUIDv4. The id is written back into the
//! request headers (so the trace span and handlers can read it) and echoed
//! on the response for correlation.
//!
//! ```bash
//! curl -H "x-request-id: my-correlation-id" http://localhost:3000/api/products
//! ```

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest client-supplied id that is propagated as-is.
pub const MAX_REQUEST_ID_LENGTH: usize = 128;

/// Middleware that assigns and echoes the request id.
pub async fn propagate_request_id(mut request: Request, next: Next) -> Response {
    let request_id = client_request_id(&request).unwrap_or_else(generate_request_id);

    request
        .headers_mut()
        .insert(REQUEST_ID_HEADER, request_id.clone());

    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, request_id);
    response
}

/// The client's id, if present, non-empty and of reasonable length.
fn client_request_id<B>(request: &axum::http::Request<B>) -> Option<HeaderValue> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LENGTH && v.to_str().is_ok())
        .cloned()
}

fn generate_request_id() -> HeaderValue {
    // A hyphenated UUID is always a valid header value
    HeaderValue::from_str(&Uuid::new_v4().to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}

/// Extension trait to extract request ID from requests.
pub trait RequestIdExt {
    /// Get the request ID from the request headers.
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for axum::http::Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
    }
}
