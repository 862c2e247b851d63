//! Product listing filters and ordering.
//!
//! Both backends funnel their listings through [`apply`] so filtering and
//! sorting behave identically regardless of where the records came from.

use core::cmp::Ordering;
use core::str::FromStr;

use mebel_catalog::{Product, ProductCategory, ProductStatus};
use mebel_core::DomainError;

/// Field a product listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSortField {
    #[default]
    Name,
    Price,
    Stock,
    Rating,
    Sold,
    CreatedAt,
}

impl FromStr for ProductSortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(ProductSortField::Name),
            "price" => Ok(ProductSortField::Price),
            "stock" => Ok(ProductSortField::Stock),
            "rating" => Ok(ProductSortField::Rating),
            "sold" => Ok(ProductSortField::Sold),
            "createdAt" => Ok(ProductSortField::CreatedAt),
            other => Err(DomainError::validation(format!(
                "sort must be one of: name, price, stock, rating, sold, createdAt (got '{other}')"
            ))),
        }
    }
}

/// Listing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(DomainError::validation(format!(
                "order must be one of: asc, desc (got '{other}')"
            ))),
        }
    }
}

/// Filters and ordering for a product listing.
///
/// `search` matches case-insensitively against the product name. Defaults
/// list the whole catalog, name ascending.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category: Option<ProductCategory>,
    pub status: Option<ProductStatus>,
    pub search: Option<String>,
    pub sort: ProductSortField,
    pub order: SortOrder,
}

/// Filter and sort a product collection according to the query.
pub fn apply(query: &ProductQuery, products: Vec<Product>) -> Vec<Product> {
    let mut products: Vec<Product> = products
        .into_iter()
        .filter(|p| matches(query, p))
        .collect();

    products.sort_by(|a, b| {
        let ordering = compare(query.sort, a, b);
        match query.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    products
}

fn matches(query: &ProductQuery, product: &Product) -> bool {
    if let Some(category) = query.category {
        if product.category != category {
            return false;
        }
    }
    if let Some(status) = query.status {
        if product.status != status {
            return false;
        }
    }
    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        if !product.name.to_lowercase().contains(&needle) {
            return false;
        }
    }
    true
}

fn compare(sort: ProductSortField, a: &Product, b: &Product) -> Ordering {
    match sort {
        ProductSortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        ProductSortField::Price => a.price.cmp(&b.price),
        ProductSortField::Stock => a.stock.cmp(&b.stock),
        ProductSortField::Rating => a.rating.total_cmp(&b.rating),
        ProductSortField::Sold => a.sold.cmp(&b.sold),
        ProductSortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}
