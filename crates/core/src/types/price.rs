//! Money amounts for display and line-total arithmetic.
//!
//! Amounts are kept as [`Decimal`] so that cart subtotals never drift through
//! floating point. The backend remains the authority on totals; these helpers
//! only format what it sends and compute per-line figures for the cart view.

use core::fmt;
use core::iter::Sum;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
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

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// The price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Add two prices in the same currency.
    ///
    /// Returns `None` when the currencies differ.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        (self.currency_code == other.currency_code)
            .then(|| Self::new(self.amount + other.amount, self.currency_code))
    }

    /// Format for display, e.g. `$1,299.50`.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() { "-" } else { "" };
        let text = format!("{:.2}", rounded.abs());
        let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        format!(
            "{sign}{}{}.{cents}",
            self.currency_code.symbol(),
            group_thousands(whole)
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Sum for Price {
    /// Sums prices, taking the currency of the first item.
    ///
    /// Mixed-currency input is not expected from a single store; the first
    /// currency wins.
    fn sum<I: Iterator<Item = Self>>(mut iter: I) -> Self {
        let Some(first) = iter.next() else {
            return Self::zero(CurrencyCode::default());
        };
        iter.fold(first, |acc, p| {
            Self::new(acc.amount + p.amount, acc.currency_code)
        })
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    INR,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::CAD => "CA$",
            Self::AUD => "A$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::INR => "₹",
        }
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "INR" => Ok(Self::INR),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(format!("unsupported currency: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(s: &str) -> Price {
        Price::new(s.parse().unwrap_or_default(), CurrencyCode::USD)
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(usd("1299.5").display(), "$1,299.50");
        assert_eq!(usd("1234567").display(), "$1,234,567.00");
        assert_eq!(usd("12").display(), "$12.00");
    }

    #[test]
    fn test_display_rounds_half_up() {
        assert_eq!(usd("0.125").display(), "$0.13");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(usd("-5").display(), "-$5.00");
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [usd("19.99").times(2), usd("5.01")].into_iter().sum();
        assert_eq!(total, usd("44.99"));
    }

    #[test]
    fn test_empty_sum_is_zero() {
        let total: Price = std::iter::empty().sum();
        assert_eq!(total.amount, Decimal::ZERO);
    }

    #[test]
    fn test_checked_add_rejects_mixed_currency() {
        let eur = Price::new(Decimal::ONE, CurrencyCode::EUR);
        assert!(usd("1").checked_add(eur).is_none());
        assert_eq!(usd("1").checked_add(usd("2")), Some(usd("3")));
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(CurrencyCode::INR.symbol(), "₹");
        assert_eq!("gbp".parse::<CurrencyCode>(), Ok(CurrencyCode::GBP));
    }
}
