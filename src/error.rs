use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Generic message returned for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Application-wide error types with appropriate HTTP status codes.
///
/// Every variant belongs to one [`ErrorKind`], which decides the status code
/// and the `name` reported to clients. `Config` only occurs during startup
/// and is reported as an internal error if it ever reaches a response.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Auth(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Closed set of error kinds exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Auth,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Auth => StatusCode::UNAUTHORIZED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Name reported in the `error.name` field of the response body.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Auth => "AuthError",
            ErrorKind::Internal => "InternalServerError",
        }
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Auth(_) => ErrorKind::Auth,
            AppError::Internal(_) | AppError::Config(_) => ErrorKind::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind().status()
    }

    /// Message that is safe to show to clients.
    ///
    /// Internal and configuration details stay in the server log.
    pub fn client_message(&self) -> &str {
        match self {
            AppError::NotFound(msg) | AppError::Validation(msg) | AppError::Auth(msg) => msg,
            AppError::Internal(_) | AppError::Config(_) => INTERNAL_ERROR_MESSAGE,
        }
    }

    /// Shorthand for the 404 returned when a product id is unknown.
    pub fn product_not_found() -> Self {
        AppError::NotFound("Product not found".to_string())
    }
}

/// Error response body for API endpoints.
///
/// ```json
/// { "error": { "name": "NotFoundError", "message": "Product not found" } }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub name: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = kind.status();

        // Full details go to the log, clients only get the sanitized message
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = ErrorResponse {
            error: ErrorBody {
                name: kind.name().to_string(),
                message: self.client_message().to_string(),
            },
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "JSON body rejected");
        AppError::Validation(sanitize_json_rejection(&rejection))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "Query string rejected");
        AppError::Validation("Invalid query string".to_string())
    }
}

/// Turn a JSON extractor rejection into a client-facing message.
///
/// Serde errors can mention internal type names, so only the field name is
/// kept when one can be identified.
fn sanitize_json_rejection(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonDataError(_) => {
            let text = rejection.body_text();
            // "...target type: price: invalid type: ..." -> "price"
            if let Some((_, rest)) = text.split_once("target type: ")
                && let Some((field, _)) = rest.split_once(": ")
                && !field.contains(' ')
            {
                return format!("Invalid value for field: {field}");
            }
            "Invalid data type in request body".to_string()
        }
        JsonRejection::JsonSyntaxError(_) => "Malformed JSON in request body".to_string(),
        JsonRejection::MissingJsonContentType(_) => {
            "Expected request with `Content-Type: application/json`".to_string()
        }
        JsonRejection::BytesRejection(_) => "Request body could not be read".to_string(),
        _ => "Invalid request format".to_string(),
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
