//! HTTP middleware for authentication, validation and observability.
//!
//! - **Request ID**: Generation and propagation of `x-request-id`
//! - **Trace**: Request/response logging hooks for `TraceLayer`
//! - **API Key Authentication**: Constant-time comparison, writes only
//! - **Validation**: Product body extractor for create/update routes
//!
//! # Architecture
//!
//! ```text
//! Request → Request ID → Trace → CORS → Auth → Body limit → Validation → Handler
//!               ↓                         ↓                     ↓
//!         X-Request-Id header        401 AuthError       400 ValidationError
//! ```

pub mod auth;
pub mod request_id;
pub mod trace;
pub mod validate;

pub use auth::{API_KEY_HEADER, ApiKeyAuth};
pub use request_id::{REQUEST_ID_HEADER, RequestIdExt, propagate_request_id};
pub use trace::{LogRequest, LogResponse, RequestSpan};
pub use validate::ValidatedProduct;
