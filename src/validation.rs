//! Request body validation for product create/update.
//!
//! Bodies are read as raw JSON and checked field by field, so that a
//! missing field, a wrongly typed field and an invalid value all produce a
//! `ValidationError` (400) instead of a framework-level rejection. Every
//! violated rule is reported; the first one becomes the headline message.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AppError;

pub const NAME_REQUIRED: &str = "Product name is required and must be a non-empty string";
pub const PRICE_REQUIRED: &str = "Price is required and must be a non-negative number";
pub const CATEGORY_REQUIRED: &str = "Category is required and must be a non-empty string";

/// A single violated rule on a request body field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A validated, normalized product body.
///
/// `description` and `in_stock` are `None` when the client omitted them,
/// which lets updates keep the previous value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    /// Trimmed, non-empty name
    pub name: String,
    /// Trimmed description, if one was sent
    pub description: Option<String>,
    /// Non-negative price
    pub price: f64,
    /// Trimmed, lower-cased category
    pub category: String,
    /// Coerced stock flag, if the key was present
    pub in_stock: Option<bool>,
}

/// Validate a JSON body against the product schema.
///
/// Rules, in order: `name` non-empty string, `price` non-negative number,
/// `category` non-empty string. `description` and `inStock` are never
/// rejected: a non-string `description` is kept as its JSON text and
/// `inStock` is coerced by truthiness.
pub fn validate_product(body: &Value) -> Result<ProductInput, Vec<FieldViolation>> {
    let empty = Map::new();
    let fields = body.as_object().unwrap_or(&empty);
    let mut violations = Vec::new();

    let name = non_empty_string(fields.get("name"));
    if name.is_none() {
        violations.push(FieldViolation::new("name", NAME_REQUIRED));
    }

    let price = fields
        .get("price")
        .and_then(Value::as_f64)
        .filter(|p| *p >= 0.0);
    if price.is_none() {
        violations.push(FieldViolation::new("price", PRICE_REQUIRED));
    }

    let category = non_empty_string(fields.get("category"));
    if category.is_none() {
        violations.push(FieldViolation::new("category", CATEGORY_REQUIRED));
    }

    let description = fields.get("description").and_then(description_text);

    let in_stock = fields.get("inStock").map(is_truthy);

    match (name, price, category) {
        (Some(name), Some(price), Some(category)) if violations.is_empty() => Ok(ProductInput {
            name,
            description,
            price,
            category: category.to_lowercase(),
            in_stock,
        }),
        _ => Err(violations),
    }
}

/// Trimmed description text; `null` counts as omitted.
fn description_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string()),
    }
}

/// Trimmed string value, or `None` if missing, not a string or blank.
fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Boolean coercion: `false`, `null`, `0`, and `""` are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Extractor yielding a validated [`ProductInput`].
///
/// An empty body is treated as `{}`. Anything that is not valid JSON is a
/// validation failure rather than a 415/422 from the framework.
#[derive(Debug)]
pub struct ValidatedProduct(pub ProductInput);

impl<S> FromRequest<S> for ValidatedProduct
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            AppError::validation(vec![FieldViolation::new("body", rejection.body_text())])
        })?;

        let body: Value = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(&bytes)?
        };

        validate_product(&body)
            .map(ValidatedProduct)
            .map_err(AppError::validation)
    }
}
