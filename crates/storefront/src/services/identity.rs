//! Identity widget glue.
//!
//! The identity collaborator is optional: with no redirect path configured
//! the watcher ignores every event. When present, an `init` event without a
//! signed-in user subscribes to `login`, and a later `login` redirects.

/// Tracks identity events for one page.
#[derive(Debug, Clone, Default)]
pub struct IdentityWatcher {
    redirect_path: Option<String>,
    awaiting_login: bool,
}

impl IdentityWatcher {
    #[must_use]
    pub const fn new(redirect_path: Option<String>) -> Self {
        Self {
            redirect_path,
            awaiting_login: false,
        }
    }

    /// Whether the identity collaborator is configured.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.redirect_path.is_some()
    }

    /// Handle the widget's `init` event.
    pub fn on_init(&mut self, user: Option<&str>) {
        if !self.is_present() {
            return;
        }
        let signed_out = user.is_none_or(|u| u.trim().is_empty());
        if signed_out {
            self.awaiting_login = true;
        }
        tracing::debug!(signed_out, "Identity init");
    }

    /// Handle the widget's `login` event, returning the redirect target.
    pub fn on_login(&mut self) -> Option<&str> {
        if !self.awaiting_login {
            return None;
        }
        self.awaiting_login = false;
        self.redirect_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_after_anonymous_init_redirects() {
        let mut watcher = IdentityWatcher::new(Some("/admin/".to_string()));
        watcher.on_init(None);
        assert_eq!(watcher.on_login(), Some("/admin/"));
    }

    #[test]
    fn test_login_without_subscription_is_ignored() {
        let mut watcher = IdentityWatcher::new(Some("/admin/".to_string()));
        assert_eq!(watcher.on_login(), None);

        watcher.on_init(Some("trader@example.ng"));
        assert_eq!(watcher.on_login(), None);
    }

    #[test]
    fn test_absent_collaborator_never_redirects() {
        let mut watcher = IdentityWatcher::default();
        assert!(!watcher.is_present());
        watcher.on_init(None);
        assert_eq!(watcher.on_login(), None);
    }
}
