//! Catalog store: loads the product document once at startup.
//!
//! The source is either a JSON file on disk or an `http(s)` URL serving the
//! same document. A failed load leaves the store holding an empty catalog and
//! remembers the failure so every page can tell the shopper; there is no
//! retry.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use kinetic_core::{Catalog, CatalogDocument, CatalogError};
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading the catalog file failed.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fetching the catalog over HTTP failed.
    #[error("failed to fetch catalog: {0}")]
    Http(#[from] reqwest::Error),

    /// The document is not valid JSON or does not match the product schema.
    #[error("malformed catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but breaks a product invariant.
    #[error("invalid catalog: {0}")]
    Invalid(#[from] CatalogError),
}

/// Where the catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(Url),
}

impl CatalogSource {
    /// Interpret a configured location: `http://` and `https://` values are
    /// URLs, anything else is a file path.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the value looks like a URL but is not one.
    pub fn parse(location: &str) -> Result<Self, url::ParseError> {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            Url::parse(location).map(Self::Url)
        } else {
            Ok(Self::File(PathBuf::from(location)))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Parse and validate a catalog document.
///
/// # Errors
///
/// Returns `LoadError::Parse` for malformed JSON and `LoadError::Invalid` for
/// invariant violations.
pub fn parse_document(bytes: &[u8]) -> Result<Catalog, LoadError> {
    let document: CatalogDocument = serde_json::from_slice(bytes)?;
    Ok(Catalog::from_document(document)?)
}

/// Fetch and parse the catalog from `source`.
///
/// # Errors
///
/// Returns a `LoadError` if the source cannot be read or the document is
/// malformed or invalid.
pub async fn fetch(source: &CatalogSource) -> Result<Catalog, LoadError> {
    let bytes = match source {
        CatalogSource::File(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?
        }
        CatalogSource::Url(url) => reqwest::get(url.clone())
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec(),
    };
    parse_document(&bytes)
}

/// Holds the catalog for the lifetime of the process.
///
/// Readers get a cheap `Arc` snapshot; a load swaps the whole catalog rather
/// than merging into it.
#[derive(Debug, Default)]
pub struct CatalogStore {
    catalog: Arc<Catalog>,
    load_failed: bool,
}

impl CatalogStore {
    /// An empty store, before any load.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `catalog`.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            load_failed: false,
        }
    }

    /// Load the catalog from `source`, replacing whatever was held.
    ///
    /// On failure the store falls back to an empty catalog and
    /// [`CatalogStore::load_failed`] reports `true`.
    ///
    /// # Errors
    ///
    /// Returns the `LoadError` so the caller can notify the shopper.
    #[instrument(skip(self), fields(source = %source))]
    pub async fn load(&mut self, source: &CatalogSource) -> Result<Arc<Catalog>, LoadError> {
        match fetch(source).await {
            Ok(catalog) => {
                tracing::info!(
                    products = catalog.len(),
                    visible = catalog.visible().count(),
                    "Catalog loaded"
                );
                self.catalog = Arc::new(catalog);
                self.load_failed = false;
                Ok(Arc::clone(&self.catalog))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load catalog, continuing with an empty shop");
                self.catalog = Arc::new(Catalog::empty());
                self.load_failed = true;
                Err(e)
            }
        }
    }

    /// The current catalog snapshot.
    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Whether the last load failed.
    #[must_use]
    pub const fn load_failed(&self) -> bool {
        self.load_failed
    }
}
