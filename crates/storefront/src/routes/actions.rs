//! Storefront action handlers.
//!
//! Each handler turns the request into a [`UiAction`], dispatches it through
//! the page's event table and answers with the re-rendered `#storefront`
//! region, or an `HX-Redirect` when the action navigates away.

use axum::{
    Form,
    extract::{FromRequestParts, Query, State},
    http::{StatusCode, request::Parts},
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use chrono::Utc;
use kinetic_core::{CartId, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::PAGE_ID_HEADER;
use crate::session::{PageHandle, PageId};
use crate::state::AppState;
use crate::ui::{Effect, UiAction};

/// The page session named by the `X-Page-Id` header.
pub struct PageSession {
    pub page_id: PageId,
    pub handle: PageHandle,
}

impl FromRequestParts<AppState> for PageSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(PAGE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::BadRequest("missing page id".to_string()))?;
        let page_id: PageId = raw
            .parse()
            .map_err(|_| AppError::BadRequest("malformed page id".to_string()))?;

        let handle = state
            .sessions()
            .get(&page_id)
            .await
            .ok_or_else(|| AppError::PageNotFound(page_id.to_string()))?;

        Ok(Self { page_id, handle })
    }
}

impl std::fmt::Debug for PageSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSession")
            .field("page_id", &self.page_id)
            .finish_non_exhaustive()
    }
}

/// Run `action` against the page and build the response.
async fn dispatch(state: &AppState, session: PageSession, action: UiAction) -> Result<Response> {
    let now = Utc::now();
    let kind = action.kind();
    let page_id = session.page_id.to_string();
    add_breadcrumb("ui", kind.as_str(), Some(&[("page_id", page_id.as_str())]));

    let mut page = session.handle.lock().await;
    match state.events().dispatch(&mut page, action, now)? {
        Effect::Render => Ok(Html(page.render(now)?).into_response()),
        Effect::Redirect(location) => {
            tracing::info!(page_id = %page_id, %location, "Redirecting page");
            Ok((StatusCode::OK, AppendHeaders([("HX-Redirect", location)])).into_response())
        }
    }
}

/// Form data for opening the quick view.
#[derive(Debug, Deserialize)]
pub struct OpenModalForm {
    pub product_id: ProductId,
}

/// Form data for adding the modal product.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub size: String,
    pub color: String,
}

/// Form data for removing a cart entry.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub cart_id: CartId,
}

/// Query parameters for search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Form data for checkout. A missing email means the shopper backed out.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub email: Option<String>,
}

/// Identity widget events.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityEvent {
    Init,
    Login,
}

/// Form data for identity events.
#[derive(Debug, Deserialize)]
pub struct IdentityForm {
    pub event: IdentityEvent,
    pub user: Option<String>,
}

#[instrument(skip(state, session), fields(page_id = %session.page_id))]
pub async fn open_modal(
    State(state): State<AppState>,
    session: PageSession,
    Form(form): Form<OpenModalForm>,
) -> Result<Response> {
    let action = UiAction::OpenProductModal {
        product_id: form.product_id,
    };
    dispatch(&state, session, action).await
}

#[instrument(skip(state, session), fields(page_id = %session.page_id))]
pub async fn close_modal(State(state): State<AppState>, session: PageSession) -> Result<Response> {
    dispatch(&state, session, UiAction::CloseModal).await
}

#[instrument(skip(state, session), fields(page_id = %session.page_id))]
pub async fn modal_backdrop(
    State(state): State<AppState>,
    session: PageSession,
) -> Result<Response> {
    dispatch(&state, session, UiAction::ModalBackdropClicked).await
}

#[instrument(skip(state, session), fields(page_id = %session.page_id))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: PageSession,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let action = UiAction::AddToCartFromModal {
        size: form.size,
        color: form.color,
    };
    dispatch(&state, session, action).await
}

#[instrument(skip(state, session), fields(page_id = %session.page_id))]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    session: PageSession,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let action = UiAction::RemoveFromCart {
        cart_id: form.cart_id,
    };
    dispatch(&state, session, action).await
}

#[instrument(skip(state, session), fields(page_id = %session.page_id))]
pub async fn toggle_cart(State(state): State<AppState>, session: PageSession) -> Result<Response> {
    dispatch(&state, session, UiAction::ToggleCart).await
}

#[instrument(skip(state, session), fields(page_id = %session.page_id))]
pub async fn toggle_menu(State(state): State<AppState>, session: PageSession) -> Result<Response> {
    dispatch(&state, session, UiAction::ToggleMenu).await
}

#[instrument(skip(state, session), fields(page_id = %session.page_id))]
pub async fn close_drawers(
    State(state): State<AppState>,
    session: PageSession,
) -> Result<Response> {
    dispatch(&state, session, UiAction::CloseAllDrawers).await
}

#[instrument(skip(state, session), fields(page_id = %session.page_id))]
pub async fn search(
    State(state): State<AppState>,
    session: PageSession,
    Query(query): Query<SearchQuery>,
) -> Result<Response> {
    dispatch(&state, session, UiAction::Search { query: query.q }).await
}

#[instrument(skip(state, session, form), fields(page_id = %session.page_id))]
pub async fn checkout(
    State(state): State<AppState>,
    session: PageSession,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let action = UiAction::Checkout { email: form.email };
    dispatch(&state, session, action).await
}

#[instrument(skip(state, session, form), fields(page_id = %session.page_id, event = ?form.event))]
pub async fn identity(
    State(state): State<AppState>,
    session: PageSession,
    Form(form): Form<IdentityForm>,
) -> Result<Response> {
    let action = match form.event {
        IdentityEvent::Init => UiAction::IdentityInit { user: form.user },
        IdentityEvent::Login => UiAction::IdentityLogin,
    };
    dispatch(&state, session, action).await
}

