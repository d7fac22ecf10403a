mod api;
mod product;
mod query;

pub use api::{
    ApiInfo, ApiResponse, CategoryStats, HealthResponse, ProductListResponse, StatsSummary,
};
pub use product::{Product, seed_products};
pub use query::{DEFAULT_LIMIT, DEFAULT_PAGE, Pagination, ProductFilter, ProductPage};
