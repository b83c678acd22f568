//! API key authentication for write routes.
//!
//! # Security Features
//!
//! - **Constant-time comparison**: Prevents timing attacks on API key validation
//! - **Write-only protection**: `GET`, `HEAD` and `OPTIONS` pass through untouched
//! - **Fail closed**: Without a configured key every write is rejected
//!
//! # Usage
//!
//! ```bash
//! API_KEY=your-secret-key cargo run
//!
//! curl -X POST -H "x-api-key: your-secret-key" \
//!      -H "content-type: application/json" \
//!      -d '{"name":"Desk","price":150,"category":"furniture"}' \
//!      http://localhost:3000/api/products
//! ```
//!
//! The shared secret is a placeholder credential: there is no per-client
//! identity and no rotation.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::response::IntoResponse;
use subtle::ConstantTimeEq;
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::metrics;

/// Header name for API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Message returned for every rejected write.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: invalid or missing API key";

/// Methods that never require a key.
const PUBLIC_METHODS: [Method; 3] = [Method::GET, Method::HEAD, Method::OPTIONS];

/// API key authentication layer.
///
/// Requests with a public method are forwarded as-is. Any other method must
/// carry an `x-api-key` header equal to the configured secret.
#[derive(Clone)]
pub struct ApiKeyAuth {
    /// Expected API key (None = reject every write)
    expected_key: Option<Arc<str>>,
}

impl ApiKeyAuth {
    /// Create a new API key auth layer.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Expected API key, or `None` to lock all write routes
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            expected_key: api_key.filter(|k| !k.is_empty()).map(Arc::from),
        }
    }

    /// Check if a key is configured.
    pub fn is_configured(&self) -> bool {
        self.expected_key.is_some()
    }
}

impl<S> Layer<S> for ApiKeyAuth {
    type Service = ApiKeyAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApiKeyAuthService {
            inner,
            expected_key: self.expected_key.clone(),
        }
    }
}

/// API key authentication service wrapper.
#[derive(Clone)]
pub struct ApiKeyAuthService<S> {
    inner: S,
    expected_key: Option<Arc<str>>,
}

impl<S> Service<Request<Body>> for ApiKeyAuthService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let expected_key = self.expected_key.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if is_public_method(req.method()) {
                return inner.call(req).await;
            }

            match check_api_key(&req, expected_key.as_deref()) {
                Ok(()) => {
                    debug!(method = %req.method(), "API key authentication successful");
                    inner.call(req).await
                }
                Err(reason) => {
                    metrics::record_auth_failure(reason.as_label());
                    warn!(
                        method = %req.method(),
                        path = %req.uri().path(),
                        reason = reason.as_label(),
                        "Write request rejected"
                    );
                    Ok(AppError::Auth(UNAUTHORIZED_MESSAGE.to_string()).into_response())
                }
            }
        })
    }
}

/// Why a write request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthFailure {
    /// No key configured on the server
    NotConfigured,
    /// Header absent or not valid UTF-8
    Missing,
    /// Header present but wrong
    Invalid,
}

impl AuthFailure {
    fn as_label(self) -> &'static str {
        match self {
            AuthFailure::NotConfigured => "not_configured",
            AuthFailure::Missing => "missing",
            AuthFailure::Invalid => "invalid",
        }
    }
}

fn is_public_method(method: &Method) -> bool {
    PUBLIC_METHODS.contains(method)
}

fn check_api_key<B>(req: &Request<B>, expected: Option<&str>) -> Result<(), AuthFailure> {
    let expected = expected.ok_or(AuthFailure::NotConfigured)?;
    let provided = extract_api_key(req).ok_or(AuthFailure::Missing)?;

    if constant_time_eq(provided, expected) {
        Ok(())
    } else {
        Err(AuthFailure::Invalid)
    }
}

/// Extract the API key from the `x-api-key` header.
fn extract_api_key<B>(req: &Request<B>) -> Option<&str> {
    req.headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
}

/// Perform constant-time comparison of two strings.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
