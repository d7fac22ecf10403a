use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::error::{AppError, AppResult};
use crate::models::{
    CategoryStats, Pagination, Product, ProductFilter, ProductPage, StatsSummary, seed_products,
};
use crate::validation::ProductInput;

/// In-memory product catalog.
///
/// Cloning is cheap and every clone shares the same records. Each
/// operation does its whole read-modify-write under one lock guard with
/// no await in between, so concurrent requests cannot lose updates.
#[derive(Clone, Default)]
pub struct CatalogService {
    products: Arc<RwLock<Vec<Product>>>,
}

impl CatalogService {
    /// Create a catalog holding the given records, in order.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// Create a catalog holding the standard sample records.
    pub fn seeded() -> Self {
        Self::new(seed_products())
    }

    /// Number of products in the catalog.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Whether the catalog holds no products.
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    /// Filter, then paginate.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &ProductFilter, pagination: Pagination) -> ProductPage {
        let products = self.products.read().await;

        let matching: Vec<&Product> = products.iter().filter(|p| filter.matches(p)).collect();
        let total = matching.len();
        let (start, end) = pagination.bounds(total);

        let items = matching
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|p| (*p).clone())
            .collect();

        debug!(total, start, end, "Listed products");

        ProductPage {
            items,
            total,
            page: pagination.page(),
            total_pages: pagination.total_pages(total),
        }
    }

    /// Look up a product by exact id.
    pub async fn get(&self, id: &str) -> AppResult<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::product_not_found(id))
    }

    /// Append a new product built from validated input.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ProductInput) -> Product {
        let product = Product::create(input);

        self.products.write().await.push(product.clone());

        info!(id = %product.id, category = %product.category, "Product created");
        product
    }

    /// Replace a product's fields, keeping its id.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: ProductInput) -> AppResult<Product> {
        let mut products = self.products.write().await;

        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::product_not_found(id))?;
        product.apply(input);

        info!(id, "Product updated");
        Ok(product.clone())
    }

    /// Remove a product and return it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> AppResult<Product> {
        let mut products = self.products.write().await;

        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::product_not_found(id))?;
        let removed = products.remove(index);

        info!(id, "Product deleted");
        Ok(removed)
    }

    /// Per-category aggregates in a single pass.
    pub async fn stats(&self) -> StatsSummary {
        let products = self.products.read().await;

        let mut summary = StatsSummary {
            total_products: products.len(),
            ..StatsSummary::default()
        };

        for product in products.iter() {
            let entry: &mut CategoryStats = summary
                .by_category
                .entry(product.category.clone())
                .or_default();
            entry.count += 1;
            entry.total_value += product.price;
            if product.in_stock {
                entry.in_stock += 1;
            } else {
                entry.out_of_stock += 1;
            }
        }

        summary.total_categories = summary.by_category.len();
        summary
    }
}
