//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                - Health check
//! GET    /                      - Open a page session, full page
//! DELETE /pages/{page_id}       - Tear down a page session
//!
//! # Actions (HTMX, `X-Page-Id` header, return the #storefront region)
//! POST /actions/modal/open      - Quick view (form: product_id)
//! POST /actions/modal/close     - Close the quick view
//! POST /actions/modal/backdrop  - Click outside the quick view
//! POST /actions/cart/add        - Add the modal product (form: size, color)
//! POST /actions/cart/remove     - Remove a cart entry (form: cart_id)
//! POST /actions/drawers/cart    - Toggle the cart drawer
//! POST /actions/drawers/menu    - Toggle the menu drawer
//! POST /actions/drawers/close   - Close both drawers
//! GET  /actions/search          - Search or reset (query: q)
//! POST /actions/checkout        - Hand off to payment (form: email)
//! POST /actions/identity        - Identity widget events (form: event, user)
//! ```

pub mod actions;
pub mod home;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the action routes router.
pub fn action_routes() -> Router<AppState> {
    Router::new()
        .route("/modal/open", post(actions::open_modal))
        .route("/modal/close", post(actions::close_modal))
        .route("/modal/backdrop", post(actions::modal_backdrop))
        .route("/cart/add", post(actions::add_to_cart))
        .route("/cart/remove", post(actions::remove_from_cart))
        .route("/drawers/cart", post(actions::toggle_cart))
        .route("/drawers/menu", post(actions::toggle_menu))
        .route("/drawers/close", post(actions::close_drawers))
        .route("/search", get(actions::search))
        .route("/checkout", post(actions::checkout))
        .route("/identity", post(actions::identity))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/pages/{page_id}", delete(home::close_page))
        .nest("/actions", action_routes())
}
