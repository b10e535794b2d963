//! Event subscription table.
//!
//! Every user interaction arrives as a [`UiAction`]. The [`EventTable`] maps
//! each [`ActionKind`] to the controller method that handles it, so the set
//! of supported interactions is listed in one place instead of being spread
//! over markup handlers.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use kinetic_core::{CartId, ProductId};

use super::controller::{ControllerError, StorefrontController};

/// A user interaction on a storefront page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    OpenProductModal { product_id: ProductId },
    CloseModal,
    ModalBackdropClicked,
    AddToCartFromModal { size: String, color: String },
    RemoveFromCart { cart_id: CartId },
    ToggleCart,
    ToggleMenu,
    CloseAllDrawers,
    Search { query: String },
    Checkout { email: Option<String> },
    IdentityInit { user: Option<String> },
    IdentityLogin,
}

/// Discriminant of a [`UiAction`], the key of the event table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    OpenProductModal,
    CloseModal,
    ModalBackdropClicked,
    AddToCartFromModal,
    RemoveFromCart,
    ToggleCart,
    ToggleMenu,
    CloseAllDrawers,
    Search,
    Checkout,
    IdentityInit,
    IdentityLogin,
}

impl ActionKind {
    pub const ALL: [Self; 12] = [
        Self::OpenProductModal,
        Self::CloseModal,
        Self::ModalBackdropClicked,
        Self::AddToCartFromModal,
        Self::RemoveFromCart,
        Self::ToggleCart,
        Self::ToggleMenu,
        Self::CloseAllDrawers,
        Self::Search,
        Self::Checkout,
        Self::IdentityInit,
        Self::IdentityLogin,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenProductModal => "open_product_modal",
            Self::CloseModal => "close_modal",
            Self::ModalBackdropClicked => "modal_backdrop_clicked",
            Self::AddToCartFromModal => "add_to_cart_from_modal",
            Self::RemoveFromCart => "remove_from_cart",
            Self::ToggleCart => "toggle_cart",
            Self::ToggleMenu => "toggle_menu",
            Self::CloseAllDrawers => "close_all_drawers",
            Self::Search => "search",
            Self::Checkout => "checkout",
            Self::IdentityInit => "identity_init",
            Self::IdentityLogin => "identity_login",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl UiAction {
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::OpenProductModal { .. } => ActionKind::OpenProductModal,
            Self::CloseModal => ActionKind::CloseModal,
            Self::ModalBackdropClicked => ActionKind::ModalBackdropClicked,
            Self::AddToCartFromModal { .. } => ActionKind::AddToCartFromModal,
            Self::RemoveFromCart { .. } => ActionKind::RemoveFromCart,
            Self::ToggleCart => ActionKind::ToggleCart,
            Self::ToggleMenu => ActionKind::ToggleMenu,
            Self::CloseAllDrawers => ActionKind::CloseAllDrawers,
            Self::Search { .. } => ActionKind::Search,
            Self::Checkout { .. } => ActionKind::Checkout,
            Self::IdentityInit { .. } => ActionKind::IdentityInit,
            Self::IdentityLogin => ActionKind::IdentityLogin,
        }
    }
}

/// What the page should do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Re-render the storefront region.
    Render,
    /// Navigate the browser away.
    Redirect(String),
}

/// A subscribed handler.
pub type Handler =
    fn(&mut StorefrontController, UiAction, DateTime<Utc>) -> Result<Effect, ControllerError>;

/// Maps action kinds to handlers.
#[derive(Clone, Default)]
pub struct EventTable {
    handlers: HashMap<ActionKind, Handler>,
}

impl fmt::Debug for EventTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.handlers.keys().map(|kind| kind.as_str()).collect();
        kinds.sort_unstable();
        f.debug_struct("EventTable").field("handlers", &kinds).finish()
    }
}

impl EventTable {
    /// A table with no subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The storefront's full set of subscriptions.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.subscribe(ActionKind::OpenProductModal, open_product_modal);
        table.subscribe(ActionKind::CloseModal, |page, _, _| {
            page.close_modal();
            Ok(Effect::Render)
        });
        table.subscribe(ActionKind::ModalBackdropClicked, |page, _, _| {
            page.modal_backdrop_clicked();
            Ok(Effect::Render)
        });
        table.subscribe(ActionKind::AddToCartFromModal, add_to_cart_from_modal);
        table.subscribe(ActionKind::RemoveFromCart, remove_from_cart);
        table.subscribe(ActionKind::ToggleCart, |page, _, _| {
            page.toggle_cart();
            Ok(Effect::Render)
        });
        table.subscribe(ActionKind::ToggleMenu, |page, _, _| {
            page.toggle_menu();
            Ok(Effect::Render)
        });
        table.subscribe(ActionKind::CloseAllDrawers, |page, _, _| {
            page.close_all_drawers();
            Ok(Effect::Render)
        });
        table.subscribe(ActionKind::Search, search);
        table.subscribe(ActionKind::Checkout, checkout);
        table.subscribe(ActionKind::IdentityInit, identity_init);
        table.subscribe(ActionKind::IdentityLogin, |page, _, _| {
            Ok(page
                .identity_login()
                .map_or(Effect::Render, Effect::Redirect))
        });
        table
    }

    /// Subscribe `handler` to `kind`, returning the handler it replaces.
    pub fn subscribe(&mut self, kind: ActionKind, handler: Handler) -> Option<Handler> {
        self.handlers.insert(kind, handler)
    }

    /// Remove the handler for `kind`.
    pub fn unsubscribe(&mut self, kind: ActionKind) -> Option<Handler> {
        self.handlers.remove(&kind)
    }

    #[must_use]
    pub fn is_subscribed(&self, kind: ActionKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Run the handler subscribed to the action's kind.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Unhandled` if nothing is subscribed, or the
    /// handler's own error.
    pub fn dispatch(
        &self,
        page: &mut StorefrontController,
        action: UiAction,
        now: DateTime<Utc>,
    ) -> Result<Effect, ControllerError> {
        let kind = action.kind();
        let handler = self
            .handlers
            .get(&kind)
            .ok_or(ControllerError::Unhandled(kind))?;
        tracing::debug!(action = %kind, "Dispatching UI action");
        handler(page, action, now)
    }
}

fn open_product_modal(
    page: &mut StorefrontController,
    action: UiAction,
    _now: DateTime<Utc>,
) -> Result<Effect, ControllerError> {
    if let UiAction::OpenProductModal { product_id } = action {
        page.open_product_modal(product_id)?;
    }
    Ok(Effect::Render)
}

fn add_to_cart_from_modal(
    page: &mut StorefrontController,
    action: UiAction,
    now: DateTime<Utc>,
) -> Result<Effect, ControllerError> {
    if let UiAction::AddToCartFromModal { size, color } = action {
        page.add_to_cart_from_modal(&size, &color, now)?;
    }
    Ok(Effect::Render)
}

fn remove_from_cart(
    page: &mut StorefrontController,
    action: UiAction,
    _now: DateTime<Utc>,
) -> Result<Effect, ControllerError> {
    if let UiAction::RemoveFromCart { cart_id } = action {
        page.remove_from_cart(cart_id)?;
    }
    Ok(Effect::Render)
}

fn search(
    page: &mut StorefrontController,
    action: UiAction,
    _now: DateTime<Utc>,
) -> Result<Effect, ControllerError> {
    if let UiAction::Search { query } = action {
        page.search(&query)?;
    }
    Ok(Effect::Render)
}

fn checkout(
    page: &mut StorefrontController,
    action: UiAction,
    now: DateTime<Utc>,
) -> Result<Effect, ControllerError> {
    let UiAction::Checkout { email } = action else {
        return Ok(Effect::Render);
    };
    let redirect = page
        .checkout(email.as_deref(), now)
        .and_then(|handoff| handoff.authorization_url);
    Ok(redirect.map_or(Effect::Render, |url| Effect::Redirect(url.to_string())))
}

fn identity_init(
    page: &mut StorefrontController,
    action: UiAction,
    _now: DateTime<Utc>,
) -> Result<Effect, ControllerError> {
    if let UiAction::IdentityInit { user } = action {
        page.identity_init(user.as_deref());
    }
    Ok(Effect::Render)
}
