//! Path extractors whose rejections go through [`AppError`].

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::AppError;
use crate::validation::FieldViolation;

/// The `{id}` segment of a product route.
///
/// Any id string is accepted; unknown ids are reported by the catalog as
/// not found. Only a segment axum cannot decode (e.g. invalid UTF-8 after
/// percent-decoding) is rejected, as a validation error on `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductId(pub String);

impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::validation(vec![FieldViolation::new("id", rejection.body_text())])
            })?;

        Ok(ProductId(id))
    }
}
