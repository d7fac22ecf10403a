mod extract;
mod info;
pub mod products;
mod util;

pub use extract::ProductId;
pub use info::{ENDPOINTS, api_info, health_check, route_not_found};
pub use products::{
    create_product, delete_product, get_product, list_products, product_stats, update_product,
};
pub use util::parse_or_default;
