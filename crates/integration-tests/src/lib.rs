//! Integration tests for the Kinetic Exchange storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kinetic-integration-tests
//! ```
//!
//! The tests drive the full router in-process with `tower::ServiceExt`, so
//! no server or network access is needed.

use std::path::PathBuf;
use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, Response, StatusCode},
};
use kinetic_storefront::catalog::{CatalogSource, CatalogStore, parse_document};
use kinetic_storefront::config::{PageConfig, PaymentConfig, StorefrontConfig};
use kinetic_storefront::middleware::PAGE_ID_HEADER;
use kinetic_storefront::state::AppState;
use tower::ServiceExt;

/// Catalog used by the integration tests.
///
/// Two visible street-wear items (one on sale), one gym item with explicit
/// options, one hidden product and nothing in "Brand Casuals".
pub const CATALOG: &str = r#"{
    "products": [
        {"id": 1, "name": "Kinetic Tee", "category": "Street Wear",
         "price": 5000, "sale_price": 4000, "img": "img/kinetic-tee.jpg"},
        {"id": 2, "name": "Ledger Hoodie", "category": "Gym Wear for Traders",
         "price": 18000, "img": "img/ledger-hoodie.jpg",
         "sizes": ["M", "L"], "colors": [{"color": "Black"}]},
        {"id": 3, "name": "Candlestick Cargo", "category": "Street Wear",
         "price": 22500, "img": "img/cargo.jpg"},
        {"id": 4, "name": "Unreleased Cap", "category": "Street Wear",
         "price": 3000, "img": "img/cap.jpg", "hidden": true}
    ]
}"#;

/// Configuration for an in-process storefront.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static")),
        catalog_source: CatalogSource::File(PathBuf::from("unused.json")),
        pages: PageConfig {
            idle_timeout: Duration::from_secs(60),
            max_sessions: 100,
            ..PageConfig::default()
        },
        payment: PaymentConfig::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Build the storefront router over `catalog_json`.
///
/// # Panics
///
/// Panics if the catalog document is invalid.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn test_app_with(catalog_json: &str, config: StorefrontConfig) -> Router {
    let store = CatalogStore::with_catalog(parse_document(catalog_json.as_bytes()).unwrap());
    kinetic_storefront::app(AppState::new(config, &store))
}

/// Build the storefront router over [`CATALOG`].
#[must_use]
pub fn test_app() -> Router {
    test_app_with(CATALOG, test_config())
}

/// Build the storefront router as it runs after a failed catalog load.
///
/// # Panics
///
/// Panics if the missing catalog somehow loads.
pub async fn failed_load_app() -> Router {
    let mut store = CatalogStore::new();
    let missing = CatalogSource::File(PathBuf::from("/nonexistent/kinetic/products.json"));
    assert!(store.load(&missing).await.is_err());
    kinetic_storefront::app(AppState::new(test_config(), &store))
}

/// A response with its body collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

/// Send one request through the router.
///
/// # Panics
///
/// Panics if the request cannot be built or the body cannot be read.
#[allow(clippy::unwrap_used)]
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    page_id: Option<&str>,
    form: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(page_id) = page_id {
        builder = builder.header(PAGE_ID_HEADER, page_id);
    }
    let body = match form {
        Some(form) => {
            builder = builder.header("content-type", "application/x-www-form-urlencoded");
            Body::from(form.to_string())
        }
        None => Body::empty(),
    };

    let response: Response<Body> = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

/// Open a page and return its id and the full page markup.
///
/// # Panics
///
/// Panics if the page does not load or carries no page id.
pub async fn open_page(app: &Router) -> (String, String) {
    let response = send(app, Method::GET, "/", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    let page_id = extract_page_id(&response.body).expect("page id in hx-headers");
    (page_id, response.body)
}

/// Pull the page id out of the `hx-headers` attribute.
#[must_use]
pub fn extract_page_id(html: &str) -> Option<String> {
    let marker = "\"X-Page-Id\": \"";
    let start = html.find(marker)? + marker.len();
    let rest = html.get(start..)?;
    let end = rest.find('"')?;
    rest.get(..end).map(str::to_string)
}
