//! Page-session registry.
//!
//! Each `GET /` opens a page session holding a [`StorefrontController`]. The
//! browser sends the page id with every action; the session is dropped when
//! the page is closed, when it idles out, or when the registry is full and
//! evicts it.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::ui::StorefrontController;

/// Identifies one open browser page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(Uuid);

impl PageId {
    /// A fresh random page id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PageId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A controller behind a lock. Actions on one page run one at a time.
pub type PageHandle = Arc<Mutex<StorefrontController>>;

/// Live page sessions, evicted after `idle_timeout` without an action.
#[derive(Clone)]
pub struct PageSessions {
    cache: Cache<PageId, PageHandle>,
}

impl PageSessions {
    #[must_use]
    pub fn new(max_sessions: u64, idle_timeout: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(idle_timeout)
            .build();
        Self { cache }
    }

    /// Register a controller and return the id of its page.
    pub async fn open(&self, controller: StorefrontController) -> PageId {
        let page_id = PageId::new();
        self.cache
            .insert(page_id, Arc::new(Mutex::new(controller)))
            .await;
        tracing::debug!(%page_id, "Page session opened");
        page_id
    }

    /// The session for `page_id`, refreshing its idle timer.
    pub async fn get(&self, page_id: &PageId) -> Option<PageHandle> {
        self.cache.get(page_id).await
    }

    /// Tear down a session. Returns whether it existed.
    pub async fn close(&self, page_id: &PageId) -> bool {
        let existed = self.cache.remove(page_id).await.is_some();
        if existed {
            tracing::debug!(%page_id, "Page session closed");
        }
        existed
    }

    /// Approximate number of live sessions.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply pending evictions and counter updates.
    pub async fn sync(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl fmt::Debug for PageSessions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageSessions")
            .field("entries", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}
