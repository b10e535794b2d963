//! Search filter over the in-memory catalog.
//!
//! A linear scan: case-insensitive substring match on product name or
//! category, hidden products excluded, results in catalog order. Blank input
//! is not a search at all; [`SearchTerm::parse`] returns `None` for it and the
//! caller goes back to the categorized view.

use kinetic_core::{Catalog, Product};

/// A non-blank, lowercased search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Normalize raw input. Returns `None` when the input is empty or only
    /// whitespace.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_lowercase()))
        }
    }

    /// The normalized term.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Visible products whose name or category contains `term`.
#[must_use]
pub fn filter<'a>(catalog: &'a Catalog, term: &SearchTerm) -> Vec<&'a Product> {
    catalog
        .visible()
        .filter(|product| product.matches_lowercase(term.as_str()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kinetic_core::ProductId;
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i32, name: &str, category: &str, hidden: bool) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category: category.to_string(),
            price: Decimal::from(5000),
            sale_price: None,
            img: format!("img/{id}.jpg"),
            sizes: None,
            colors: None,
            description: None,
            hidden,
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_products(vec![
            product(1, "Tee", "Street Wear", false),
            product(2, "Bull Market Tank", "Gym Wear for Traders", false),
            product(3, "Secret Tee", "Street Wear", true),
            product(4, "Logo Cap", "Brand Casuals", false),
            product(5, "Street Joggers", "Gym Wear for Traders", false),
        ])
        .unwrap()
    }

    fn ids(products: &[&Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_blank_input_is_not_a_term() {
        assert_eq!(SearchTerm::parse(""), None);
        assert_eq!(SearchTerm::parse("   \t"), None);
        assert_eq!(SearchTerm::parse("  TeE ").unwrap().as_str(), "tee");
    }

    #[test]
    fn test_scenario_matches_tee() {
        let catalog = Catalog::from_products(vec![product(1, "Tee", "Street Wear", false)]).unwrap();
        let term = SearchTerm::parse("tee").unwrap();
        assert_eq!(ids(&filter(&catalog, &term)), vec![1]);
    }

    #[test]
    fn test_matches_name_or_category_in_catalog_order() {
        let catalog = catalog();
        let term = SearchTerm::parse("STREET").unwrap();
        // category match on 1, name match on 5
        assert_eq!(ids(&filter(&catalog, &term)), vec![1, 5]);
    }

    #[test]
    fn test_excludes_hidden_products() {
        let catalog = catalog();
        let term = SearchTerm::parse("secret").unwrap();
        assert!(filter(&catalog, &term).is_empty());

        let term = SearchTerm::parse("tee").unwrap();
        assert_eq!(ids(&filter(&catalog, &term)), vec![1]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let catalog = catalog();
        let term = SearchTerm::parse("sneakers").unwrap();
        assert!(filter(&catalog, &term).is_empty());
    }
}
