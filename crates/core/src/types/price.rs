//! Type-safe price representation using decimal arithmetic.
//!
//! Every place that shows a price (category cards, search results, the
//! quick-view modal, the cart) goes through [`PriceTag`], so the sale and
//! discount rules exist exactly once.

use core::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fraction digits kept when displaying an amount.
const DISPLAY_FRACTION_DIGITS: u32 = 3;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (naira, not kobo).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the store currency.
    #[must_use]
    pub const fn naira(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::NGN)
    }

    /// Format for display, e.g. `₦5,000` or `₦1,250.5`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", self.currency_code.symbol(), group_amount(self.amount))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes the store sells in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    NGN,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::NGN => "₦",
        }
    }
}

/// Group the integer part in thousands and keep at most three fraction
/// digits, rounding half away from zero.
fn group_amount(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(DISPLAY_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Percentage taken off `price` by `sale_price`, rounded to the nearest
/// whole percent (halves round up).
///
/// Returns `None` when there is no discount to show: a non-positive base
/// price or a sale price that is not strictly lower.
#[must_use]
pub fn discount_percent(price: Decimal, sale_price: Decimal) -> Option<u32> {
    if price <= Decimal::ZERO || sale_price >= price {
        return None;
    }
    let ratio = (price - sale_price).checked_div(price)?;
    (ratio * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
}

/// The single pricing computation shared by every render context.
///
/// Holds the list price, the sale price when one applies, and the derived
/// discount badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceTag {
    original: Price,
    sale: Option<Price>,
    discount_percent: Option<u32>,
}

impl PriceTag {
    /// Build a price tag from a list price and an optional sale price.
    ///
    /// A sale price only counts when it is strictly below the list price.
    #[must_use]
    pub fn new(price: Decimal, sale_price: Option<Decimal>, currency_code: CurrencyCode) -> Self {
        let discount = sale_price.and_then(|sale| discount_percent(price, sale));
        let sale = sale_price
            .filter(|_| discount.is_some())
            .map(|sale| Price::new(sale, currency_code));

        Self {
            original: Price::new(price, currency_code),
            sale,
            discount_percent: discount,
        }
    }

    /// The list price.
    #[must_use]
    pub const fn original(&self) -> Price {
        self.original
    }

    /// The sale price, when the product is on sale.
    #[must_use]
    pub const fn sale(&self) -> Option<Price> {
        self.sale
    }

    /// What the customer pays: the sale price if present, else the list price.
    #[must_use]
    pub fn effective(&self) -> Price {
        self.sale.unwrap_or(self.original)
    }

    /// Whether a sale price applies.
    #[must_use]
    pub const fn is_on_sale(&self) -> bool {
        self.sale.is_some()
    }

    /// Whole-percent discount, when on sale.
    #[must_use]
    pub const fn discount_percent(&self) -> Option<u32> {
        self.discount_percent
    }

    /// Badge text such as `-20%`.
    #[must_use]
    pub fn badge(&self) -> Option<String> {
        self.discount_percent.map(|percent| format!("-{percent}%"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::naira(dec("5000")).display(), "₦5,000");
        assert_eq!(Price::naira(dec("1234567")).display(), "₦1,234,567");
        assert_eq!(Price::naira(dec("999")).display(), "₦999");
        assert_eq!(Price::naira(Decimal::ZERO).display(), "₦0");
    }

    #[test]
    fn test_display_trims_and_rounds_fraction() {
        assert_eq!(Price::naira(dec("4000.50")).display(), "₦4,000.5");
        assert_eq!(Price::naira(dec("12.34567")).display(), "₦12.346");
        assert_eq!(Price::naira(dec("7.0000")).display(), "₦7");
    }

    #[test]
    fn test_display_via_new() {
        let price = Price::new(dec("19.99"), CurrencyCode::NGN);
        assert_eq!(price.to_string(), "₦19.99");
        assert_eq!(price, Price::naira(dec("19.99")));
    }

    #[test]
    fn test_discount_percent_scenario() {
        assert_eq!(discount_percent(dec("5000"), dec("4000")), Some(20));
    }

    #[test]
    fn test_discount_percent_rounds_half_up() {
        // 12.5% rounds to 13
        assert_eq!(discount_percent(dec("8000"), dec("7000")), Some(13));
        // 33.33% rounds to 33
        assert_eq!(discount_percent(dec("3000"), dec("2000")), Some(33));
        // 66.67% rounds to 67
        assert_eq!(discount_percent(dec("3000"), dec("1000")), Some(67));
    }

    #[test]
    fn test_discount_percent_requires_lower_sale() {
        assert_eq!(discount_percent(dec("5000"), dec("5000")), None);
        assert_eq!(discount_percent(dec("5000"), dec("6000")), None);
        assert_eq!(discount_percent(Decimal::ZERO, dec("0")), None);
    }

    #[test]
    fn test_price_tag_on_sale() {
        let tag = PriceTag::new(dec("5000"), Some(dec("4000")), CurrencyCode::NGN);
        assert!(tag.is_on_sale());
        assert_eq!(tag.effective().amount, dec("4000"));
        assert_eq!(tag.original().display(), "₦5,000");
        assert_eq!(tag.badge().as_deref(), Some("-20%"));
    }

    #[test]
    fn test_price_tag_without_sale() {
        let tag = PriceTag::new(dec("15000"), None, CurrencyCode::NGN);
        assert!(!tag.is_on_sale());
        assert_eq!(tag.effective().display(), "₦15,000");
        assert_eq!(tag.badge(), None);
    }

    #[test]
    fn test_price_tag_ignores_non_discount_sale() {
        let tag = PriceTag::new(dec("5000"), Some(dec("5000")), CurrencyCode::NGN);
        assert!(!tag.is_on_sale());
        assert_eq!(tag.effective().amount, dec("5000"));
    }
}
