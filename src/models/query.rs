use super::Product;

/// Default page number for listings.
pub const DEFAULT_PAGE: usize = 1;

/// Default page size for listings.
pub const DEFAULT_LIMIT: usize = 10;

/// Optional filters applied to a product listing, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive category match
    pub category: Option<String>,
    /// Stock state to keep
    pub in_stock: Option<bool>,
    /// Case-insensitive substring of name or description
    pub search: Option<String>,
}

impl ProductFilter {
    /// Whether a product passes every configured filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && product.category.to_lowercase() != category.to_lowercase()
        {
            return false;
        }

        if let Some(in_stock) = self.in_stock
            && product.in_stock != in_stock
        {
            return false;
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !product.name.to_lowercase().contains(&needle)
                && !product.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        true
    }
}

/// A 1-based page request. Both values are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    limit: usize,
}

impl Pagination {
    /// Build a page request; zero values fall back to the defaults.
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Index range of this page within a list of `total` items, clamped
    /// to the list bounds.
    pub fn bounds(&self, total: usize) -> (usize, usize) {
        let start = (self.page - 1).saturating_mul(self.limit).min(total);
        let end = self.page.saturating_mul(self.limit).min(total);
        (start, end)
    }

    /// Number of pages needed for `total` items.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    /// Products on this page
    pub items: Vec<Product>,
    /// Size of the filtered set before pagination
    pub total: usize,
    /// Effective page number
    pub page: usize,
    /// Number of pages at this limit
    pub total_pages: usize,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::seed_products;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ProductFilter::default();
        assert!(seed_products().iter().all(|p| filter.matches(p)));
    }

    #[test]
    fn test_category_match_is_case_insensitive() {
        let filter = ProductFilter {
            category: Some("KITCHEN".to_string()),
            ..ProductFilter::default()
        };
        let hits: Vec<_> = seed_products()
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "3");
    }

    #[test]
    fn test_search_checks_name_and_description() {
        let filter = ProductFilter {
            search: Some("WIRELESS".to_string()),
            ..ProductFilter::default()
        };
        let hits: Vec<_> = seed_products()
            .into_iter()
            .filter(|p| filter.matches(p))
            .map(|p| p.id)
            .collect();
        assert_eq!(hits, vec!["5"]);
    }

    #[test]
    fn test_pagination_bounds() {
        let pagination = Pagination::new(2, 2);
        assert_eq!(pagination.bounds(5), (2, 4));
        assert_eq!(pagination.bounds(3), (2, 3));
        assert_eq!(pagination.bounds(1), (1, 1));
    }

    #[test]
    fn test_pagination_out_of_range_is_empty() {
        let (start, end) = Pagination::new(10, 10).bounds(5);
        assert_eq!(start, end);
    }

    #[test]
    fn test_pagination_zero_falls_back_to_defaults() {
        assert_eq!(Pagination::new(0, 0), Pagination::default());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let pagination = Pagination::new(1, 2);
        assert_eq!(pagination.total_pages(0), 0);
        assert_eq!(pagination.total_pages(4), 2);
        assert_eq!(pagination.total_pages(5), 3);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let (start, end) = Pagination::new(usize::MAX, usize::MAX).bounds(5);
        assert_eq!((start, end), (5, 5));
    }
}
