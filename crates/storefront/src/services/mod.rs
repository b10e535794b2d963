//! Collaborators the storefront controller talks to.
//!
//! - `notify` - toast notifications
//! - `checkout` - payment hand-off
//! - `identity` - identity widget login redirect

pub mod checkout;
pub mod identity;
pub mod notify;

pub use checkout::{CheckoutError, PaymentGateway, PaymentHandoff, PaymentRequest, StubPaymentGateway};
pub use identity::IdentityWatcher;
pub use notify::{Notifier, Toast, ToastNotifier};
