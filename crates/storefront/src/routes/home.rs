//! Page entry and teardown.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::session::PageId;
use crate::state::AppState;

/// Full page: the search bar, the storefront region and the page script.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page_id: PageId,
    pub storefront: String,
    pub identity_enabled: bool,
}

/// Open a new page session and render the initial view.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let now = Utc::now();
    let controller = state.new_controller(now)?;
    let storefront = controller.render(now)?;
    let page_id = state.sessions().open(controller).await;
    tracing::info!(%page_id, load_failed = state.load_failed(), "Page opened");

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        IndexTemplate {
            page_id,
            storefront,
            identity_enabled: state.config().pages.identity_redirect_path.is_some(),
        },
    ))
}

/// Tear down a page session when the shopper navigates away.
#[instrument(skip(state))]
pub async fn close_page(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
) -> Result<StatusCode> {
    let page_id: PageId = page_id
        .parse()
        .map_err(|_| AppError::BadRequest("malformed page id".to_string()))?;

    if state.sessions().close(&page_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::PageNotFound(page_id.to_string()))
    }
}
