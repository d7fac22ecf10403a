//! Product catalog handlers.
//!
//! # Endpoints
//!
//! - `GET /api/products` - Filtered, paginated listing
//! - `GET /api/products/{id}` - Single product
//! - `POST /api/products` - Create (API key + validation)
//! - `PUT /api/products/{id}` - Update (API key + validation)
//! - `DELETE /api/products/{id}` - Delete (API key)
//! - `GET /api/products/stats/summary` - Per-category statistics

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use super::extract::ProductId;
use super::util::parse_or_default;
use crate::error::AppResult;
use crate::models::{
    ApiResponse, DEFAULT_LIMIT, DEFAULT_PAGE, Pagination, Product, ProductFilter,
    ProductListResponse, StatsSummary,
};
use crate::state::AppState;
use crate::validation::ValidatedProduct;

/// Listing query parameters.
///
/// Built from the raw query map so that no combination of parameters can
/// make the request fail.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filter: ProductFilter,
    pub pagination: Pagination,
}

impl ListQuery {
    /// Interpret raw query parameters.
    ///
    /// - `category`, `search`: ignored when empty
    /// - `inStock`: `"true"` keeps in-stock products, any other value keeps
    ///   out-of-stock ones
    /// - `page`, `limit`: see [`parse_or_default`]
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let non_empty = |key: &str| params.get(key).filter(|v| !v.is_empty()).cloned();

        Self {
            filter: ProductFilter {
                category: non_empty("category"),
                in_stock: params.get("inStock").map(|v| v == "true"),
                search: non_empty("search"),
            },
            pagination: Pagination::new(
                parse_or_default(params.get("page").map(String::as_str), DEFAULT_PAGE),
                parse_or_default(params.get("limit").map(String::as_str), DEFAULT_LIMIT),
            ),
        }
    }
}

/// List products with optional filtering, search and pagination.
///
/// # Example
///
/// ```bash
/// curl "http://localhost:3000/api/products?category=electronics&search=wireless&page=1&limit=5"
/// ```
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<ProductListResponse> {
    let query = ListQuery::from_params(&params);
    let page = state.catalog.list(&query.filter, query.pagination).await;

    Json(ProductListResponse {
        success: true,
        count: page.items.len(),
        total: page.total,
        page: page.page,
        total_pages: page.total_pages,
        data: page.items,
    })
}

/// Get a single product by id.
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> AppResult<Json<ApiResponse<Product>>> {
    let product = state.catalog.get(&id).await?;
    Ok(Json(ApiResponse::ok(product)))
}

/// Create a product.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Mouse",
///   "price": 25,
///   "category": "Electronics",
///   "description": "optional",
///   "inStock": true
/// }
/// ```
#[instrument(skip(state, input))]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedProduct(input): ValidatedProduct,
) -> (StatusCode, Json<ApiResponse<Product>>) {
    let product = state.catalog.create(input).await;

    (
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Product created successfully",
            product,
        )),
    )
}

/// Replace a product's fields.
///
/// `description` and `inStock` keep their previous value when omitted.
#[instrument(skip(state, input))]
pub async fn update_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
    ValidatedProduct(input): ValidatedProduct,
) -> AppResult<Json<ApiResponse<Product>>> {
    let product = state.catalog.update(&id, input).await?;

    Ok(Json(ApiResponse::with_message(
        "Product updated successfully",
        product,
    )))
}

/// Delete a product, returning the removed record.
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> AppResult<Json<ApiResponse<Product>>> {
    let product = state.catalog.delete(&id).await?;

    Ok(Json(ApiResponse::with_message(
        "Product deleted successfully",
        product,
    )))
}

/// Per-category product statistics.
#[instrument(skip(state))]
pub async fn product_stats(State(state): State<AppState>) -> Json<ApiResponse<StatsSummary>> {
    Json(ApiResponse::ok(state.catalog.stats().await))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_query_uses_defaults() {
        let query = ListQuery::from_params(&HashMap::new());
        assert_eq!(query.filter, ProductFilter::default());
        assert_eq!(query.pagination, Pagination::default());
    }

    #[test]
    fn test_in_stock_only_true_selects_in_stock() {
        let query = ListQuery::from_params(&params(&[("inStock", "true")]));
        assert_eq!(query.filter.in_stock, Some(true));

        let query = ListQuery::from_params(&params(&[("inStock", "yes")]));
        assert_eq!(query.filter.in_stock, Some(false));

        let query = ListQuery::from_params(&params(&[("inStock", "")]));
        assert_eq!(query.filter.in_stock, Some(false));
    }

    #[test]
    fn test_empty_category_and_search_are_ignored() {
        let query = ListQuery::from_params(&params(&[("category", ""), ("search", "")]));
        assert_eq!(query.filter, ProductFilter::default());
    }

    #[test]
    fn test_malformed_pagination_degrades_to_defaults() {
        let query = ListQuery::from_params(&params(&[("page", "abc"), ("limit", "-2")]));
        assert_eq!(query.pagination, Pagination::new(DEFAULT_PAGE, DEFAULT_LIMIT));

        let query = ListQuery::from_params(&params(&[("page", "2"), ("limit", "3")]));
        assert_eq!(query.pagination.page(), 2);
        assert_eq!(query.pagination.limit(), 3);
    }

    #[test]
    fn test_fractional_limit_keeps_integer_part() {
        let query = ListQuery::from_params(&params(&[("page", "2abc"), ("limit", "2.5")]));
        assert_eq!(query.pagination.page(), 2);
        assert_eq!(query.pagination.limit(), 2);
    }
}
