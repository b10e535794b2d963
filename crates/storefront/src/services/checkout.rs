//! Checkout hand-off to the payment provider.
//!
//! The storefront never takes payment itself. Checkout validates what the
//! shopper gave us, totals the cart and hands the request to a
//! [`PaymentGateway`]. The bundled [`StubPaymentGateway`] only issues a
//! reference; a real provider would return an authorization URL to send the
//! shopper to.

use std::fmt;

use kinetic_core::{Email, Price};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

/// Errors raised by a payment gateway.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The amount to charge is not positive.
    #[error("cannot charge a non-positive amount: {0}")]
    InvalidAmount(Price),

    /// The provider refused or failed the request.
    #[error("payment provider error: {0}")]
    Provider(String),
}

/// What we ask the provider to charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub amount: Price,
    pub email: Email,
}

/// Whether a hand-off moves real money.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMode {
    Test,
    Live,
}

impl PaymentMode {
    /// Mode implied by the provider secret key: `sk_live_` keys are live,
    /// anything else (or no key) is test.
    #[must_use]
    pub fn from_secret(secret_key: Option<&SecretString>) -> Self {
        match secret_key {
            Some(key) if key.expose_secret().starts_with("sk_live_") => Self::Live,
            _ => Self::Test,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The provider's answer: a reference, plus where to send the shopper if the
/// provider hosts its own payment page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentHandoff {
    pub reference: String,
    pub amount: Price,
    pub email: Email,
    pub mode: PaymentMode,
    pub authorization_url: Option<Url>,
}

/// Payment initiation seam.
pub trait PaymentGateway: Send + Sync {
    /// Start a payment for `request`.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` if the request is invalid or the provider fails.
    fn initiate(&self, request: &PaymentRequest) -> Result<PaymentHandoff, CheckoutError>;
}

/// Gateway that accepts every valid request without contacting a provider.
///
/// Hand-offs are marked live or test from the configured secret key.
#[derive(Debug, Clone, Default)]
pub struct StubPaymentGateway {
    public_key: Option<String>,
    secret_key: Option<SecretString>,
}

impl StubPaymentGateway {
    #[must_use]
    pub const fn new(public_key: Option<String>, secret_key: Option<SecretString>) -> Self {
        Self {
            public_key,
            secret_key,
        }
    }

    /// The mode every hand-off from this gateway carries.
    #[must_use]
    pub fn mode(&self) -> PaymentMode {
        PaymentMode::from_secret(self.secret_key.as_ref())
    }
}

impl PaymentGateway for StubPaymentGateway {
    fn initiate(&self, request: &PaymentRequest) -> Result<PaymentHandoff, CheckoutError> {
        if request.amount.amount <= Decimal::ZERO {
            return Err(CheckoutError::InvalidAmount(request.amount));
        }

        let mode = self.mode();
        let reference = format!("KX-{}", Uuid::new_v4().simple()).to_uppercase();
        tracing::info!(
            reference = %reference,
            %mode,
            amount = %request.amount,
            email_domain = request.email.domain(),
            keyed = self.public_key.is_some(),
            "Payment handed off"
        );

        Ok(PaymentHandoff {
            reference,
            amount: request.amount,
            email: request.email.clone(),
            mode,
            authorization_url: None,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(amount: i64) -> PaymentRequest {
        PaymentRequest {
            amount: Price::naira(Decimal::from(amount)),
            email: Email::parse("buyer@example.ng").unwrap(),
        }
    }

    #[test]
    fn test_stub_gateway_issues_reference() {
        let handoff = StubPaymentGateway::default().initiate(&request(4000)).unwrap();

        assert!(handoff.reference.starts_with("KX-"));
        assert_eq!(handoff.amount.display(), "₦4,000");
        assert_eq!(handoff.email.as_str(), "buyer@example.ng");
        assert_eq!(handoff.mode, PaymentMode::Test);
        assert!(handoff.authorization_url.is_none());
    }

    #[test]
    fn test_stub_gateway_rejects_zero_amount() {
        assert!(matches!(
            StubPaymentGateway::default().initiate(&request(0)),
            Err(CheckoutError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_references_are_unique() {
        let gateway = StubPaymentGateway::new(Some("pk_test_kinetic".to_string()), None);
        let a = gateway.initiate(&request(100)).unwrap();
        let b = gateway.initiate(&request(100)).unwrap();
        assert_ne!(a.reference, b.reference);
    }

    #[test]
    fn test_mode_follows_secret_key() {
        let live = StubPaymentGateway::new(
            Some("pk_live_kinetic".to_string()),
            Some(SecretString::from("sk_live_9fQ2xLr7Vb3KpZ8wT1mN")),
        );
        assert_eq!(live.mode(), PaymentMode::Live);
        assert_eq!(live.initiate(&request(4000)).unwrap().mode, PaymentMode::Live);

        let test = StubPaymentGateway::new(
            Some("pk_test_kinetic".to_string()),
            Some(SecretString::from("sk_test_9fQ2xLr7Vb3KpZ8wT1mN")),
        );
        assert_eq!(test.mode(), PaymentMode::Test);
        assert_eq!(PaymentMode::from_secret(None), PaymentMode::Test);
        assert_eq!(PaymentMode::Live.to_string(), "live");
    }
}
