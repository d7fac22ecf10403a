use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::ProductInput;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque unique identifier, assigned by the server
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form description (may be empty)
    pub description: String,
    /// Non-negative price
    pub price: f64,
    /// Lower-cased category
    pub category: String,
    /// Whether the product is currently in stock
    pub in_stock: bool,
}

impl Product {
    /// Build a new product from validated input with a fresh random id.
    ///
    /// Omitted optional fields take their creation defaults: an empty
    /// description and in stock.
    pub fn create(input: ProductInput) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description.unwrap_or_default(),
            price: input.price,
            category: input.category,
            in_stock: input.in_stock.unwrap_or(true),
        }
    }

    /// Overwrite every field except `id`.
    ///
    /// `description` and `in_stock` keep their current value when the
    /// input omitted them.
    pub fn apply(&mut self, input: ProductInput) {
        self.name = input.name;
        self.price = input.price;
        self.category = input.category;
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(in_stock) = input.in_stock {
            self.in_stock = in_stock;
        }
    }

    fn seed(
        id: &str,
        name: &str,
        description: &str,
        price: f64,
        category: &str,
        in_stock: bool,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price,
            category: category.to_string(),
            in_stock,
        }
    }
}

/// The sample records every fresh catalog starts with.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::seed(
            "1",
            "Laptop",
            "High-performance laptop with 16GB RAM",
            1200.0,
            "electronics",
            true,
        ),
        Product::seed(
            "2",
            "Smartphone",
            "Latest model with 128GB storage",
            800.0,
            "electronics",
            true,
        ),
        Product::seed(
            "3",
            "Coffee Maker",
            "Programmable coffee maker with timer",
            50.0,
            "kitchen",
            false,
        ),
        Product::seed(
            "4",
            "Desk Chair",
            "Ergonomic office chair with lumbar support",
            250.0,
            "furniture",
            true,
        ),
        Product::seed(
            "5",
            "Headphones",
            "Noise-cancelling wireless headphones",
            150.0,
            "electronics",
            true,
        ),
    ]
}
