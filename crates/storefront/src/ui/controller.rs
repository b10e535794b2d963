//! The per-page storefront controller.
//!
//! One controller exists per open browser page. It owns that page's cart,
//! drawer and modal state, and the rendered contents of every region. Each
//! user action mutates the stores, refreshes the affected regions, and the
//! caller renders the `#storefront` region from the result.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use kinetic_core::{CartId, CartItem, Catalog, Email, Price, ProductId};
use thiserror::Error;

use super::events::ActionKind;
use super::overlay::{DrawerState, ModalState};
use super::page::PageRegions;
use crate::cart::CartStore;
use crate::render::{
    CardStyle, CartFragment, RenderError, StorefrontView, ToastView, render_cart, render_modal,
    render_storefront,
};
use crate::search::SearchTerm;
use crate::services::checkout::{PaymentGateway, PaymentHandoff, PaymentRequest};
use crate::services::identity::IdentityWatcher;
use crate::services::notify::{DEFAULT_TOAST_DURATION, Notifier, ToastNotifier};

/// Shown on every new page when the catalog failed to load.
pub const LOAD_FAILED_MESSAGE: &str = "Error loading shop inventory.";
/// Shown when checkout is attempted with nothing in the bag.
pub const EMPTY_BAG_MESSAGE: &str = "Your bag is empty.";
/// Shown when the checkout email does not parse.
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
/// Shown when the payment gateway refuses the hand-off.
pub const PAYMENT_FAILED_MESSAGE: &str = "Payment could not be started. Please try again.";

/// Errors from handling a user action.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The submitted size or color is not one the product offers.
    #[error("{option} '{value}' is not offered for this product")]
    InvalidSelection { option: &'static str, value: String },

    /// No handler is subscribed for the action.
    #[error("no handler subscribed for {0}")]
    Unhandled(ActionKind),
}

/// Per-page settings taken from the server configuration.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub search_style: CardStyle,
    pub toast_duration: Duration,
    pub identity_redirect: Option<String>,
    /// Whether the catalog load failed at startup.
    pub load_failed: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            search_style: CardStyle::default(),
            toast_duration: DEFAULT_TOAST_DURATION,
            identity_redirect: None,
            load_failed: false,
        }
    }
}

/// State and behavior of one storefront page.
pub struct StorefrontController {
    catalog: Arc<Catalog>,
    cart: CartStore,
    cart_view: CartFragment,
    regions: PageRegions,
    drawers: DrawerState,
    modal: ModalState,
    search_style: CardStyle,
    toasts: ToastNotifier,
    identity: IdentityWatcher,
    gateway: Arc<dyn PaymentGateway>,
}

impl StorefrontController {
    /// Open a page: empty cart, closed overlays, the categorized view.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Render` if the initial regions fail to render.
    pub fn new(
        catalog: Arc<Catalog>,
        gateway: Arc<dyn PaymentGateway>,
        options: ControllerOptions,
        now: DateTime<Utc>,
    ) -> Result<Self, ControllerError> {
        let cart = CartStore::new();
        let cart_view = render_cart(&cart)?;
        let regions = PageRegions::categories(&catalog)?;

        let mut controller = Self {
            catalog,
            cart,
            cart_view,
            regions,
            drawers: DrawerState::default(),
            modal: ModalState::default(),
            search_style: options.search_style,
            toasts: ToastNotifier::new(options.toast_duration),
            identity: IdentityWatcher::new(options.identity_redirect),
            gateway,
        };

        if options.load_failed {
            controller.toasts.notify(LOAD_FAILED_MESSAGE.to_string(), now);
        }
        Ok(controller)
    }

    /// Re-render the three category sections.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Render` if a grid fails to render.
    pub fn initialize_shop(&mut self) -> Result<(), ControllerError> {
        self.regions = PageRegions::categories(&self.catalog)?;
        Ok(())
    }

    /// Apply the search box contents. Blank input resets to the category view.
    ///
    /// Returns the number of product cards now shown.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Render` if a grid fails to render.
    pub fn search(&mut self, query: &str) -> Result<usize, ControllerError> {
        match SearchTerm::parse(query) {
            None => self.initialize_shop()?,
            Some(term) => {
                tracing::debug!(term = term.as_str(), "Searching catalog");
                self.regions = PageRegions::search_results(&self.catalog, &term, self.search_style)?;
            }
        }
        Ok(self.regions.card_count())
    }

    /// Open the quick-view modal for `product_id`.
    ///
    /// Unknown or hidden ids leave the page untouched and return `false`.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Render` if the modal body fails to render.
    pub fn open_product_modal(&mut self, product_id: ProductId) -> Result<bool, ControllerError> {
        let Some(product) = self.catalog.find(product_id).filter(|p| p.is_visible()) else {
            tracing::debug!(%product_id, "Quick view for unknown product ignored");
            return Ok(false);
        };

        let body = render_modal(product)?;
        self.modal = ModalState::Open {
            product: Box::new(product.clone()),
            body,
        };
        Ok(true)
    }

    /// Close the modal and discard the pending selection.
    pub fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
    }

    /// A click landed on the backdrop outside the modal content.
    pub fn modal_backdrop_clicked(&mut self) {
        if self.modal.is_open() {
            self.close_modal();
        }
    }

    /// Add the modal's product with the chosen options.
    ///
    /// On success the cart view is refreshed, the modal closes, the shopper
    /// is notified and the cart drawer opens. With no modal open this does
    /// nothing and returns `None`.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::InvalidSelection` if `size` or `color` is not
    /// offered, or `ControllerError::Render` if the cart fails to render.
    pub fn add_to_cart_from_modal(
        &mut self,
        size: &str,
        color: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<CartItem>, ControllerError> {
        let Some(product) = self.modal.current() else {
            tracing::debug!("Add to bag with no open modal ignored");
            return Ok(None);
        };
        if !product.offers_size(size) {
            return Err(ControllerError::InvalidSelection {
                option: "size",
                value: size.to_string(),
            });
        }
        if !product.offers_color(color) {
            return Err(ControllerError::InvalidSelection {
                option: "color",
                value: color.to_string(),
            });
        }

        let item = self.cart.add_item(product, size, color);
        tracing::info!(
            product_id = %item.product_id,
            cart_id = %item.cart_id,
            count = self.cart.count(),
            "Added to cart"
        );

        self.refresh_cart()?;
        self.close_modal();
        self.toasts
            .notify(format!("Added {} ({})", item.name, item.selected_size), now);
        self.drawers.open_cart();
        Ok(Some(item))
    }

    /// Remove one cart entry. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Render` if the cart fails to render.
    pub fn remove_from_cart(&mut self, cart_id: CartId) -> Result<bool, ControllerError> {
        let removed = self.cart.remove_item(cart_id);
        if removed {
            tracing::info!(%cart_id, count = self.cart.count(), "Removed from cart");
        } else {
            tracing::debug!(%cart_id, "Removal of unknown cart entry ignored");
        }
        self.refresh_cart()?;
        Ok(removed)
    }

    pub fn toggle_cart(&mut self) {
        self.drawers.toggle_cart();
    }

    pub fn toggle_menu(&mut self) {
        self.drawers.toggle_menu();
    }

    pub fn close_all_drawers(&mut self) {
        self.drawers.close_all();
    }

    /// Hand the cart total to the payment gateway.
    ///
    /// An empty bag or an invalid email is reported to the shopper. A missing
    /// email means the shopper backed out, and nothing happens.
    pub fn checkout(&mut self, email: Option<&str>, now: DateTime<Utc>) -> Option<PaymentHandoff> {
        if self.cart.is_empty() {
            self.toasts.notify(EMPTY_BAG_MESSAGE.to_string(), now);
            return None;
        }

        let raw = email.map(str::trim).filter(|e| !e.is_empty())?;
        let email = match Email::parse(raw) {
            Ok(email) => email,
            Err(e) => {
                tracing::debug!(error = %e, "Checkout email rejected");
                self.toasts.notify(INVALID_EMAIL_MESSAGE.to_string(), now);
                return None;
            }
        };

        let request = PaymentRequest {
            amount: self.cart.total_price(),
            email,
        };
        match self.gateway.initiate(&request) {
            Ok(handoff) => {
                self.toasts.notify(
                    format!(
                        "Proceeding to payment of {} for {}",
                        handoff.amount, handoff.email
                    ),
                    now,
                );
                Some(handoff)
            }
            Err(e) => {
                tracing::error!(error = %e, amount = %request.amount, "Payment hand-off failed");
                self.toasts.notify(PAYMENT_FAILED_MESSAGE.to_string(), now);
                None
            }
        }
    }

    /// Identity widget `init` event.
    pub fn identity_init(&mut self, user: Option<&str>) {
        self.identity.on_init(user);
    }

    /// Identity widget `login` event; returns where to redirect.
    pub fn identity_login(&mut self) -> Option<String> {
        self.identity.on_login().map(str::to_owned)
    }

    /// Render the `#storefront` region as of `now`.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Render` if the template fails to render.
    pub fn render(&self, now: DateTime<Utc>) -> Result<String, ControllerError> {
        let toast = self.toasts.visible(now).map(|toast| ToastView {
            message: toast.message.clone(),
            remaining_ms: toast.remaining_ms(now),
        });

        let view = StorefrontView {
            sections: self.regions.sections(),
            search_mode: self.regions.is_search(),
            modal_body: self.modal.body(),
            cart: &self.cart_view,
            cart_open: self.drawers.cart_open(),
            menu_open: self.drawers.menu_open(),
            toast,
        };
        Ok(render_storefront(&view)?)
    }

    fn refresh_cart(&mut self) -> Result<(), ControllerError> {
        self.cart_view = render_cart(&self.cart)?;
        Ok(())
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    #[must_use]
    pub const fn cart_view(&self) -> &CartFragment {
        &self.cart_view
    }

    #[must_use]
    pub const fn regions(&self) -> &PageRegions {
        &self.regions
    }

    #[must_use]
    pub const fn drawers(&self) -> DrawerState {
        self.drawers
    }

    #[must_use]
    pub const fn modal(&self) -> &ModalState {
        &self.modal
    }

    /// The notification showing at `now`.
    #[must_use]
    pub fn toast(&self, now: DateTime<Utc>) -> Option<&str> {
        self.toasts.visible(now).map(|toast| toast.message.as_str())
    }

    /// Cart total in the store currency.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total_price()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use kinetic_core::{ColorOption, Product};
    use rust_decimal::Decimal;

    use super::*;
    use crate::render::GridRegion;
    use crate::services::checkout::{CheckoutError, StubPaymentGateway};

    pub(crate) fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_760_000_000 + secs, 0).unwrap()
    }

    pub(crate) fn catalog() -> Arc<Catalog> {
        let tee = Product {
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
        };
        let hoodie = Product {
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
            description: None,
            hidden: false,
        };
        let secret = Product {
            id: ProductId::new(3),
            name: "Unreleased Cap".to_string(),
            category: "Street Wear".to_string(),
            price: Decimal::from(7000),
            sale_price: None,
            img: "img/cap.jpg".to_string(),
            sizes: None,
            colors: None,
            description: None,
            hidden: true,
        };
        Arc::new(Catalog::from_products(vec![tee, hoodie, secret]).unwrap())
    }

    pub(crate) fn controller() -> StorefrontController {
        StorefrontController::new(
            catalog(),
            Arc::new(StubPaymentGateway::default()),
            ControllerOptions::default(),
            at(0),
        )
        .unwrap()
    }

    struct FailingGateway;

    impl PaymentGateway for FailingGateway {
        fn initiate(&self, _request: &PaymentRequest) -> Result<PaymentHandoff, CheckoutError> {
            Err(CheckoutError::Provider("declined".to_string()))
        }
    }

    #[test]
    fn test_initial_view() {
        let page = controller();
        assert!(!page.regions().is_search());
        assert_eq!(page.regions().card_count(), 2);
        assert_eq!(page.cart().count(), 0);
        assert_eq!(page.drawers(), DrawerState::Closed);
        assert!(!page.modal().is_open());
        assert!(page.toast(at(0)).is_none());

        let html = page.render(at(0)).unwrap();
        assert!(html.contains("Coming Soon"));
        assert!(!html.contains("Unreleased Cap"));
    }

    #[test]
    fn test_load_failure_notifies() {
        let page = StorefrontController::new(
            Arc::new(Catalog::empty()),
            Arc::new(StubPaymentGateway::default()),
            ControllerOptions {
                load_failed: true,
                ..ControllerOptions::default()
            },
            at(0),
        )
        .unwrap();

        assert_eq!(page.toast(at(1)), Some(LOAD_FAILED_MESSAGE));
        assert!(page.render(at(1)).unwrap().contains(LOAD_FAILED_MESSAGE));
        assert_eq!(page.regions().card_count(), 0);
    }

    #[test]
    fn test_clearing_search_restores_initial_render() {
        let mut page = controller();
        let initial = page.render(at(0)).unwrap();

        assert_eq!(page.search("TEE").unwrap(), 1);
        let searched = page.render(at(0)).unwrap();
        assert_ne!(searched, initial);
        assert!(searched.contains("Search Results"));

        assert_eq!(page.search("   ").unwrap(), 2);
        assert_eq!(page.render(at(0)).unwrap(), initial);
    }

    #[test]
    fn test_search_with_no_matches() {
        let mut page = controller();
        assert_eq!(page.search("zzz").unwrap(), 0);
        let grid = page.regions().grid(GridRegion::Exchange).unwrap();
        assert!(grid.html.contains("No products found."));
    }

    #[test]
    fn test_search_never_shows_hidden() {
        let mut page = controller();
        assert_eq!(page.search("unreleased").unwrap(), 0);
    }

    #[test]
    fn test_unknown_or_hidden_product_modal_is_noop() {
        let mut page = controller();
        assert!(!page.open_product_modal(ProductId::new(99)).unwrap());
        assert!(!page.open_product_modal(ProductId::new(3)).unwrap());
        assert!(!page.modal().is_open());
    }

    #[test]
    fn test_modal_close_discards_selection() {
        let mut page = controller();
        assert!(page.open_product_modal(ProductId::new(2)).unwrap());
        assert_eq!(page.modal().current().unwrap().name, "Ledger Hoodie");

        page.modal_backdrop_clicked();
        assert!(page.modal().current().is_none());
        assert!(page.add_to_cart_from_modal("M", "Black", at(0)).unwrap().is_none());
        assert_eq!(page.cart().count(), 0);
    }

    #[test]
    fn test_add_from_modal() {
        let mut page = controller();
        page.toggle_menu();
        page.open_product_modal(ProductId::new(1)).unwrap();

        let item = page
            .add_to_cart_from_modal("One Size", "Standard", at(0))
            .unwrap()
            .unwrap();

        assert_eq!(item.final_price, Decimal::from(4000));
        assert_eq!(page.cart_view().count, 1);
        assert_eq!(page.cart_view().total, "₦4,000");
        assert!(!page.modal().is_open());
        assert_eq!(page.drawers(), DrawerState::CartOpen);
        assert_eq!(page.toast(at(1)), Some("Added Tee (One Size)"));
    }

    #[test]
    fn test_add_rejects_unoffered_options() {
        let mut page = controller();
        page.open_product_modal(ProductId::new(2)).unwrap();

        assert!(matches!(
            page.add_to_cart_from_modal("XXL", "Black", at(0)),
            Err(ControllerError::InvalidSelection { option: "size", .. })
        ));
        assert!(matches!(
            page.add_to_cart_from_modal("M", "Pink", at(0)),
            Err(ControllerError::InvalidSelection { option: "color", .. })
        ));
        assert!(page.modal().is_open());
        assert!(page.cart().is_empty());
    }

    #[test]
    fn test_add_then_remove_round_trip() {
        let mut page = controller();
        let empty = page.cart_view().clone();

        page.open_product_modal(ProductId::new(2)).unwrap();
        let item = page
            .add_to_cart_from_modal("L", "Black", at(0))
            .unwrap()
            .unwrap();
        assert!(page.remove_from_cart(item.cart_id).unwrap());

        assert_eq!(page.cart_view(), &empty);
        assert!(!page.remove_from_cart(item.cart_id).unwrap());
    }

    #[test]
    fn test_toggle_cart_while_menu_open() {
        let mut page = controller();
        page.toggle_menu();
        page.toggle_cart();
        assert!(page.drawers().cart_open());
        assert!(!page.drawers().menu_open());

        let html = page.render(at(0)).unwrap();
        assert!(html.contains(r#"class="drawer right open""#));
        assert!(html.contains(r#"class="drawer left""#));
        assert!(html.contains(r#"class="overlay active""#));

        page.close_all_drawers();
        assert_eq!(page.drawers(), DrawerState::Closed);
    }

    #[test]
    fn test_checkout_empty_bag() {
        let mut page = controller();
        assert!(page.checkout(Some("buyer@example.ng"), at(0)).is_none());
        assert_eq!(page.toast(at(0)), Some(EMPTY_BAG_MESSAGE));
    }

    #[test]
    fn test_checkout_flow() {
        let mut page = controller();
        page.open_product_modal(ProductId::new(1)).unwrap();
        page.add_to_cart_from_modal("One Size", "Standard", at(0))
            .unwrap();

        assert!(page.checkout(None, at(10)).is_none());
        assert!(page.checkout(Some("  "), at(10)).is_none());
        assert!(page.toast(at(10)).is_none());

        assert!(page.checkout(Some("not-an-email"), at(20)).is_none());
        assert_eq!(page.toast(at(20)), Some(INVALID_EMAIL_MESSAGE));

        let handoff = page.checkout(Some("buyer@example.ng"), at(30)).unwrap();
        assert_eq!(handoff.amount.display(), "₦4,000");
        assert_eq!(
            page.toast(at(30)),
            Some("Proceeding to payment of ₦4,000 for buyer@example.ng")
        );
    }

    #[test]
    fn test_checkout_gateway_failure_is_reported() {
        let mut page = StorefrontController::new(
            catalog(),
            Arc::new(FailingGateway),
            ControllerOptions::default(),
            at(0),
        )
        .unwrap();
        page.open_product_modal(ProductId::new(1)).unwrap();
        page.add_to_cart_from_modal("One Size", "Standard", at(0))
            .unwrap();

        assert!(page.checkout(Some("buyer@example.ng"), at(5)).is_none());
        assert_eq!(page.toast(at(5)), Some(PAYMENT_FAILED_MESSAGE));
    }

    #[test]
    fn test_identity_redirect() {
        let mut page = StorefrontController::new(
            catalog(),
            Arc::new(StubPaymentGateway::default()),
            ControllerOptions {
                identity_redirect: Some("/admin/".to_string()),
                ..ControllerOptions::default()
            },
            at(0),
        )
        .unwrap();

        page.identity_init(None);
        assert_eq!(page.identity_login().as_deref(), Some("/admin/"));
    }
}
