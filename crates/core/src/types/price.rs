//! Money amounts as reported by the backend.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount with an optional ISO 4217 currency code.
///
/// The backend sends amounts as decimal strings; arithmetic never happens
/// client-side, so the type only needs to carry and format them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g. dollars, not cents).
    pub amount: Decimal,
    /// Currency code, when the backend includes one.
    pub currency: Option<String>,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Option<String>) -> Self {
        Self { amount, currency }
    }

    /// Format for display, e.g. `"120.00 USD"` or `"120.00"`.
    #[must_use]
    pub fn display(&self) -> String {
        let amount = self.amount.round_dp(2);
        match self.currency.as_deref().filter(|c| !c.is_empty()) {
            Some(code) => format!("{amount:.2} {}", code.to_uppercase()),
            None => format!("{amount:.2}"),
        }
    }

    /// Whether the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}
