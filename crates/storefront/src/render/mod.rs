//! View renderer: pure functions from catalog/cart data to HTML fragments.
//!
//! Nothing in here holds state. Each function takes the data to show and
//! returns markup; the UI controller decides where the markup goes.
//!
//! Prices are formatted through [`PriceView`], built from the core
//! `PriceTag`, so category cards, search-result cards, the modal and the cart
//! all agree on sale prices and discount badges.

mod views;

use std::fmt;
use std::str::FromStr;

use askama::Template;
use kinetic_core::Product;
use thiserror::Error;

use crate::cart::CartStore;
use crate::filters;

pub use views::{CardView, CartLineView, ModalView, PriceView};

/// Errors produced while rendering templates.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// The grid regions on the storefront page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GridRegion {
    Exchange,
    Kinetic,
    Urban,
}

impl GridRegion {
    /// All grid regions in page order.
    pub const ALL: [Self; 3] = [Self::Exchange, Self::Kinetic, Self::Urban];

    /// The element id of the region.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Exchange => "exchange-grid",
            Self::Kinetic => "kinetic-grid",
            Self::Urban => "urban-grid",
        }
    }

    /// Anchor of the section wrapping the region, used by the menu links.
    #[must_use]
    pub const fn anchor(self) -> &'static str {
        match self {
            Self::Exchange => "exchange",
            Self::Kinetic => "kinetic",
            Self::Urban => "urban",
        }
    }
}

impl fmt::Display for GridRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// A category section of the default view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySection {
    pub category: &'static str,
    pub region: GridRegion,
}

/// The three sections shown after load, in page order.
pub const CATEGORY_SECTIONS: [CategorySection; 3] = [
    CategorySection {
        category: "Gym Wear for Traders",
        region: GridRegion::Exchange,
    },
    CategorySection {
        category: "Street Wear",
        region: GridRegion::Kinetic,
    },
    CategorySection {
        category: "Brand Casuals",
        region: GridRegion::Urban,
    },
];

/// Which card markup to use.
///
/// Category grids always use [`CardStyle::Grid`]. Search results default to
/// [`CardStyle::SearchResult`] and can be switched to the grid markup via
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardStyle {
    Grid,
    #[default]
    SearchResult,
}

/// Error returned when a card style name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown card style '{0}' (expected 'grid' or 'search')")]
pub struct UnknownCardStyle(String);

impl FromStr for CardStyle {
    type Err = UnknownCardStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(Self::Grid),
            "search" | "search-result" | "search_result" => Ok(Self::SearchResult),
            other => Err(UnknownCardStyle(other.to_string())),
        }
    }
}

/// Message shown in a grid that has nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// A category with no visible products.
    ComingSoon,
    /// A search with no matches.
    NoResults,
}

impl Placeholder {
    /// The text shown to the shopper.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ComingSoon => "Coming Soon",
            Self::NoResults => "No products found.",
        }
    }
}

/// Rendered contents of one grid region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridFragment {
    pub region: GridRegion,
    pub html: String,
    /// Number of product cards rendered (zero when the placeholder is shown).
    pub card_count: usize,
}

/// Rendered cart view: badge count, total and the line-item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartFragment {
    pub count: usize,
    pub total: String,
    pub items_html: String,
}

/// One section of the page: its heading and its grid region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub title: &'static str,
    pub anchor: &'static str,
    pub grid: GridFragment,
}

/// A toast as rendered: the message and how long the page keeps it up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub message: String,
    pub remaining_ms: i64,
}

/// Everything inside the swappable `#storefront` region.
#[derive(Template)]
#[template(path = "partials/storefront.html")]
pub struct StorefrontView<'a> {
    pub sections: &'a [SectionView],
    /// Results replace the category headings with a single "Search Results" one.
    pub search_mode: bool,
    pub modal_body: Option<&'a str>,
    pub cart: &'a CartFragment,
    pub cart_open: bool,
    pub menu_open: bool,
    pub toast: Option<ToastView>,
}

#[derive(Template)]
#[template(path = "partials/grid.html")]
struct GridTemplate<'a> {
    cards: &'a [CardView],
    grid_style: bool,
    placeholder: &'a str,
}

#[derive(Template)]
#[template(path = "partials/modal.html")]
struct ModalTemplate<'a> {
    modal: &'a ModalView,
}

#[derive(Template)]
#[template(path = "partials/cart_items.html")]
struct CartItemsTemplate<'a> {
    lines: &'a [CartLineView],
}

/// Render `items` into `target`, one card per visible product.
///
/// Hidden products are skipped. When nothing is left the region gets the
/// placeholder message instead of an empty grid.
///
/// # Errors
///
/// Returns `RenderError` if the template fails to render.
pub fn render_grid(
    target: GridRegion,
    items: &[&Product],
    style: CardStyle,
    placeholder: Placeholder,
) -> Result<GridFragment, RenderError> {
    let cards: Vec<CardView> = items
        .iter()
        .filter(|product| product.is_visible())
        .map(|product| CardView::from(*product))
        .collect();

    let html = GridTemplate {
        cards: &cards,
        grid_style: style == CardStyle::Grid,
        placeholder: placeholder.message(),
    }
    .render()?;

    Ok(GridFragment {
        region: target,
        html,
        card_count: cards.len(),
    })
}

/// Render the quick-view modal body for `product`.
///
/// # Errors
///
/// Returns `RenderError` if the template fails to render.
pub fn render_modal(product: &Product) -> Result<String, RenderError> {
    let modal = ModalView::from(product);
    Ok(ModalTemplate { modal: &modal }.render()?)
}

/// Render the cart view from the current cart contents.
///
/// # Errors
///
/// Returns `RenderError` if the template fails to render.
pub fn render_cart(cart: &CartStore) -> Result<CartFragment, RenderError> {
    let lines: Vec<CartLineView> = cart.items().iter().map(CartLineView::from).collect();
    let items_html = CartItemsTemplate { lines: &lines }.render()?;

    Ok(CartFragment {
        count: cart.count(),
        total: cart.total_price().display(),
        items_html,
    })
}

/// Render the whole `#storefront` region.
///
/// # Errors
///
/// Returns `RenderError` if the template fails to render.
pub fn render_storefront(view: &StorefrontView<'_>) -> Result<String, RenderError> {
    Ok(view.render()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kinetic_core::{ColorOption, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn tee() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Tee".to_string(),
            category: "Street Wear".to_string(),
            price: Decimal::from(5000),
            sale_price: Some(Decimal::from(4000)),
            img: "img/tee.jpg".to_string(),
            sizes: None,
            colors: None,
            description: None,
            hidden: false,
        }
    }

    fn hoodie() -> Product {
        Product {
            id: ProductId::new(2),
            name: "Ledger Hoodie".to_string(),
            category: "Gym Wear for Traders".to_string(),
            price: Decimal::from(18000),
            sale_price: None,
            img: "img/hoodie.jpg".to_string(),
            sizes: Some(vec!["M".to_string(), "L".to_string()]),
            colors: Some(vec![ColorOption {
                color: "Black".to_string(),
            }]),
            description: Some("Heavyweight fleece.".to_string()),
            hidden: false,
        }
    }

    #[test]
    fn test_grid_scenario_shows_badge_and_both_prices() {
        let product = tee();
        let fragment =
            render_grid(GridRegion::Kinetic, &[&product], CardStyle::Grid, Placeholder::ComingSoon)
                .unwrap();

        assert_eq!(fragment.card_count, 1);
        assert_eq!(fragment.region, GridRegion::Kinetic);
        assert!(fragment.html.contains("-20%"));
        assert!(fragment.html.contains("₦5,000"));
        assert!(fragment.html.contains("₦4,000"));
        assert!(fragment.html.contains("original-price"));
        assert!(fragment.html.contains("Quick View"));
    }

    #[test]
    fn test_search_card_uses_same_pricing() {
        let product = tee();
        let fragment = render_grid(
            GridRegion::Exchange,
            &[&product],
            CardStyle::SearchResult,
            Placeholder::NoResults,
        )
        .unwrap();

        assert!(fragment.html.contains("p-img-box"));
        assert!(fragment.html.contains("View Options"));
        assert!(fragment.html.contains("-20%"));
        assert!(fragment.html.contains("₦5,000"));
        assert!(fragment.html.contains("₦4,000"));
    }

    #[test]
    fn test_grid_without_sale_has_no_badge() {
        let product = hoodie();
        let fragment =
            render_grid(GridRegion::Exchange, &[&product], CardStyle::Grid, Placeholder::ComingSoon)
                .unwrap();

        assert!(fragment.html.contains("₦18,000"));
        assert!(!fragment.html.contains("discount-badge"));
        assert!(!fragment.html.contains("original-price"));
    }

    #[test]
    fn test_empty_grid_renders_placeholder() {
        let fragment =
            render_grid(GridRegion::Urban, &[], CardStyle::Grid, Placeholder::ComingSoon).unwrap();
        assert_eq!(fragment.card_count, 0);
        assert!(fragment.html.contains("Coming Soon"));

        let fragment = render_grid(
            GridRegion::Exchange,
            &[],
            CardStyle::SearchResult,
            Placeholder::NoResults,
        )
        .unwrap();
        assert!(fragment.html.contains("No products found."));
    }

    #[test]
    fn test_hidden_products_never_render() {
        let mut hidden = tee();
        hidden.hidden = true;
        hidden.name = "Invisible Tee".to_string();

        let fragment =
            render_grid(GridRegion::Kinetic, &[&hidden], CardStyle::Grid, Placeholder::ComingSoon)
                .unwrap();

        assert_eq!(fragment.card_count, 0);
        assert!(!fragment.html.contains("Invisible Tee"));
        assert!(fragment.html.contains("Coming Soon"));
    }

    #[test]
    fn test_grid_escapes_product_text() {
        let mut product = tee();
        product.name = "<script>alert(1)</script>".to_string();
        let fragment =
            render_grid(GridRegion::Kinetic, &[&product], CardStyle::Grid, Placeholder::ComingSoon)
                .unwrap();
        assert!(!fragment.html.contains("<script>"));
    }

    #[test]
    fn test_modal_defaults() {
        let html = render_modal(&tee()).unwrap();
        assert!(html.contains("One Size"));
        assert!(html.contains("Standard"));
        assert!(html.contains("Premium quality fabric, designed for the driven."));
        assert!(html.contains("Add to Bag - ₦4,000"));
        assert!(html.contains("old-price"));
    }

    #[test]
    fn test_modal_lists_product_options() {
        let html = render_modal(&hoodie()).unwrap();
        assert!(html.contains(r#"<option value="M">M</option>"#));
        assert!(html.contains(r#"<option value="L">L</option>"#));
        assert!(html.contains(r#"<option value="Black">Black</option>"#));
        assert!(!html.contains("One Size"));
        assert!(html.contains("Heavyweight fleece."));
        assert!(html.contains("Add to Bag - ₦18,000"));
    }

    #[test]
    fn test_cart_fragment() {
        let mut cart = CartStore::new();
        let empty = render_cart(&cart).unwrap();
        assert_eq!(empty.count, 0);
        assert_eq!(empty.total, "₦0");
        assert!(empty.items_html.contains("Your bag is empty."));

        cart.add_item(&tee(), "One Size", "Standard");
        cart.add_item(&hoodie(), "L", "Black");
        let fragment = render_cart(&cart).unwrap();

        assert_eq!(fragment.count, 2);
        assert_eq!(fragment.total, "₦22,000");
        assert!(fragment.items_html.contains("L | Black"));
        assert!(fragment.items_html.contains("Remove"));
        let tee_at = fragment.items_html.find("Tee").unwrap();
        let hoodie_at = fragment.items_html.find("Ledger Hoodie").unwrap();
        assert!(tee_at < hoodie_at);
    }

    #[test]
    fn test_card_style_from_str() {
        assert_eq!("grid".parse::<CardStyle>().unwrap(), CardStyle::Grid);
        assert_eq!(" Search ".parse::<CardStyle>().unwrap(), CardStyle::SearchResult);
        assert!("tiles".parse::<CardStyle>().is_err());
    }
}
