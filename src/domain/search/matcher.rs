use crate::domain::error::CatalogError;
use crate::domain::product::Product;

/// Case-insensitive substring test on the product title.
pub fn title_matches(product: &Product, folded_query: &str) -> bool {
    product.title.to_lowercase().contains(folded_query)
}

/// Filters `catalog` down to products whose title contains `query`, ignoring case.
///
/// There is no tokenization, fuzzy matching or ranking; matches keep catalog
/// order and an empty result is a valid answer. A missing or empty query is a
/// caller error.
pub fn search(query: Option<&str>, catalog: &[Product]) -> Result<Vec<Product>, CatalogError> {
    let query = match query {
        Some(q) if !q.is_empty() => q,
        Some(_) => {
            return Err(CatalogError::validation("query parameter `q` must not be empty"));
        }
        None => return Err(CatalogError::validation("query parameter `q` is required")),
    };

    let folded = query.to_lowercase();
    Ok(catalog
        .iter()
        .filter(|p| title_matches(p, &folded))
        .cloned()
        .collect())
}
