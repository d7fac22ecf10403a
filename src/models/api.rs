use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Product;

/// Success envelope for single-resource responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always `true`; failures use the error body instead
    pub success: bool,
    /// Human-readable outcome for mutating operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    /// The payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message),
            data,
        }
    }
}

/// Paginated product listing response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub success: bool,
    /// Number of products on this page
    pub count: usize,
    /// Number of products matching the filters
    pub total: usize,
    /// Effective page number
    pub page: usize,
    /// Number of pages at the requested limit
    pub total_pages: usize,
    /// Products on this page
    pub data: Vec<Product>,
}

/// Aggregates for a single category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    /// Products in the category
    pub count: usize,
    /// Sum of prices in the category
    pub total_value: f64,
    /// Products currently in stock
    pub in_stock: usize,
    /// Products currently out of stock
    pub out_of_stock: usize,
}

/// Catalog-wide statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// Total number of products
    pub total_products: usize,
    /// Number of distinct categories
    pub total_categories: usize,
    /// Breakdown keyed by category name
    pub by_category: BTreeMap<String, CategoryStats>,
}

/// Root endpoint directory.
#[derive(Debug, Serialize)]
pub struct ApiInfo {
    pub success: bool,
    /// Welcome message
    pub message: &'static str,
    /// Service version
    pub version: &'static str,
    /// "METHOD path" to description
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub success: bool,
    /// Service health status
    pub status: &'static str,
    /// Service version
    pub version: &'static str,
    /// Products currently in the catalog
    pub product_count: usize,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Current timestamp
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_omits_missing_message() {
        let json = serde_json::to_value(ApiResponse::ok(1)).expect("Serialization should succeed");
        assert_eq!(json["success"], true);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_list_response_uses_camel_case() {
        let response = ProductListResponse {
            success: true,
            count: 0,
            total: 0,
            page: 1,
            total_pages: 0,
            data: vec![],
        };

        let json = serde_json::to_string(&response).expect("Serialization should succeed");
        assert!(json.contains("\"totalPages\":0"));
    }

    #[test]
    fn test_stats_summary_serialization() {
        let mut summary = StatsSummary::default();
        summary.by_category.insert(
            "kitchen".to_string(),
            CategoryStats {
                count: 1,
                total_value: 50.0,
                in_stock: 0,
                out_of_stock: 1,
            },
        );

        let json = serde_json::to_value(&summary).expect("Serialization should succeed");
        assert_eq!(json["byCategory"]["kitchen"]["outOfStock"], 1);
        assert_eq!(json["byCategory"]["kitchen"]["totalValue"], 50.0);
    }
}
