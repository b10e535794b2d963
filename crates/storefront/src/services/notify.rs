//! Toast notifications.
//!
//! One toast at a time: a new message replaces whatever is showing and
//! restarts the timer. Expiry is evaluated lazily against the render time,
//! the page script only hides the element once the remaining time elapses.

use chrono::{DateTime, Duration, Utc};

/// Default time a toast stays on screen.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::seconds(3);

/// A message with its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Toast {
    /// Milliseconds until the toast hides, clamped at zero.
    #[must_use]
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_milliseconds().max(0)
    }
}

/// Fire-and-forget notification sink.
pub trait Notifier {
    /// Show `message`, replacing the current notification.
    fn notify(&mut self, message: String, now: DateTime<Utc>);
}

/// Notifier backing the page's toast element.
#[derive(Debug, Clone)]
pub struct ToastNotifier {
    duration: Duration,
    current: Option<Toast>,
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl ToastNotifier {
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
        }
    }

    /// The toast to show at `now`, if it has not expired.
    #[must_use]
    pub fn visible(&self, now: DateTime<Utc>) -> Option<&Toast> {
        self.current.as_ref().filter(|toast| toast.expires_at > now)
    }
}

impl Notifier for ToastNotifier {
    fn notify(&mut self, message: String, now: DateTime<Utc>) {
        tracing::debug!(%message, "Showing toast");
        let expires_at = now
            .checked_add_signed(self.duration)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.current = Some(Toast {
            message,
            expires_at,
        });
    }
}
