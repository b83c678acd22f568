//! Body validation for write routes.
//!
//! [`ValidatedProduct`] is an extractor: it runs after the auth layer and
//! before the handler body, so a request that fails validation never reaches
//! the store.

use axum::Json;
use axum::extract::{FromRequest, Request};

use crate::error::AppError;
use crate::models::{ProductDraft, ProductPayload};
use crate::validation::validate_product;

/// A JSON product body that passed [`validate_product`].
#[derive(Debug, Clone)]
pub struct ValidatedProduct(pub ProductDraft);

impl<S> FromRequest<S> for ValidatedProduct
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<ProductPayload>::from_request(req, state).await?;
        validate_product(payload).map(Self)
    }
}
