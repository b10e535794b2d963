//! Application state shared across handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kinetic_core::Catalog;

use crate::catalog::CatalogStore;
use crate::config::StorefrontConfig;
use crate::services::checkout::{PaymentGateway, StubPaymentGateway};
use crate::session::PageSessions;
use crate::ui::{ControllerError, ControllerOptions, EventTable, StorefrontController};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// loaded catalog, the page-session registry and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    load_failed: bool,
    sessions: PageSessions,
    events: EventTable,
    gateway: Arc<dyn PaymentGateway>,
}

impl AppState {
    /// Create the application state from a loaded catalog store.
    ///
    /// Uses the stub payment gateway configured with the payment keys.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: &CatalogStore) -> Self {
        let gateway = Arc::new(StubPaymentGateway::new(
            config.payment.public_key.clone(),
            config.payment.secret_key.clone(),
        ));
        Self::with_gateway(config, catalog, gateway)
    }

    /// Create the application state with a specific payment gateway.
    #[must_use]
    pub fn with_gateway(
        config: StorefrontConfig,
        catalog: &CatalogStore,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        let sessions = PageSessions::new(config.pages.max_sessions, config.pages.idle_timeout);

        Self {
            inner: Arc::new(AppStateInner {
                catalog: catalog.catalog(),
                load_failed: catalog.load_failed(),
                sessions,
                events: EventTable::standard(),
                gateway,
                config,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The catalog loaded at startup.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.inner.catalog
    }

    /// Whether the startup catalog load failed.
    #[must_use]
    pub fn load_failed(&self) -> bool {
        self.inner.load_failed
    }

    /// Live page sessions.
    #[must_use]
    pub fn sessions(&self) -> &PageSessions {
        &self.inner.sessions
    }

    /// The event subscription table.
    #[must_use]
    pub fn events(&self) -> &EventTable {
        &self.inner.events
    }

    /// Build a controller for a newly opened page.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError` if the initial view fails to render.
    pub fn new_controller(&self, now: DateTime<Utc>) -> Result<StorefrontController, ControllerError> {
        let pages = &self.inner.config.pages;
        let options = ControllerOptions {
            search_style: pages.search_card_style,
            toast_duration: chrono::Duration::from_std(pages.toast_duration)
                .unwrap_or(crate::services::notify::DEFAULT_TOAST_DURATION),
            identity_redirect: pages.identity_redirect_path.clone(),
            load_failed: self.inner.load_failed,
        };
        StorefrontController::new(
            Arc::clone(&self.inner.catalog),
            Arc::clone(&self.inner.gateway),
            options,
            now,
        )
    }
}
