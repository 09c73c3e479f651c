//! Booking resource.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rentdesk_core::{BookingId, BookingStatus, ListingId, Price};

use super::common::{UserSummary, lenient_date, lenient_datetime};

/// Listing reference embedded in a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSummary {
    pub id: ListingId,
    #[serde(default)]
    pub title: String,
}

/// A reservation linking a guest, a host and a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    /// Public booking reference shown to guests.
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, deserialize_with = "lenient_date")]
    pub check_in: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub check_out: Option<NaiveDate>,
    #[serde(default)]
    pub guests: u32,
    #[serde(default)]
    pub total_price: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub listing: Option<ListingSummary>,
    #[serde(default)]
    pub guest: Option<UserSummary>,
    #[serde(default)]
    pub host: Option<UserSummary>,
    /// Free-text note left by the guest or an admin.
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Reference to show in tables: the code, or `#id`.
    #[must_use]
    pub fn reference(&self) -> String {
        self.code
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| format!("#{}", self.id))
    }

    /// Number of nights between check-in and check-out.
    #[must_use]
    pub fn nights(&self) -> Option<i64> {
        match (self.check_in, self.check_out) {
            (Some(start), Some(end)) if end >= start => Some((end - start).num_days()),
            _ => None,
        }
    }

    /// Total price with currency.
    #[must_use]
    pub fn total(&self) -> Price {
        Price::new(self.total_price, self.currency.clone())
    }
}

/// Body of a partial status update.
#[derive(Debug, Clone, Serialize)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
