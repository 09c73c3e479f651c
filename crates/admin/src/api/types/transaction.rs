//! Transaction resource.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rentdesk_core::{BookingId, Price, TransactionId, TransactionKind, TransactionStatus};

use super::common::{UserSummary, lenient_datetime};

/// A money movement tied to a booking or a payout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub booking_id: Option<BookingId>,
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, alias = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Amount with currency.
    #[must_use]
    pub fn total(&self) -> Price {
        Price::new(self.amount, self.currency.clone())
    }
}
