//! Booking endpoints.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

use rentdesk_core::{BookingId, BookingStatus, UserId};

use super::client::{PageParams, is_blank};
use super::types::{Booking, BookingStatusUpdate, Page};
use super::{Ack, ApiClient, ApiError};

/// Filters accepted by `GET /admin/bookings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookingFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    /// Free-text search over code, guest and listing.
    #[serde(skip_serializing_if = "is_blank")]
    pub q: Option<String>,
    /// Check-in on or after.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    /// Check-in on or before.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl ApiClient {
    /// List bookings, newest first.
    ///
    /// The envelope's `info` carries per-status counts used by the dashboard.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` on transport or backend failure.
    #[instrument(skip(self, filter), fields(page = page.page(), status = ?filter.status))]
    pub async fn list_bookings(
        &self,
        page: PageParams,
        filter: &BookingFilter,
    ) -> Result<Page<Booking>, ApiError> {
        self.list("admin/bookings", page, filter).await
    }

    /// Get a booking by id, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` on transport or backend failure.
    #[instrument(skip(self), fields(booking_id = %id))]
    pub async fn get_booking(&self, id: BookingId) -> Result<Option<Booking>, ApiError> {
        self.find(&format!("admin/bookings/{id}")).await
    }

    /// Move a booking to a new status.
    ///
    /// The backend enforces the transition; callers check
    /// [`BookingStatus::can_transition_to`] first so only legal targets are sent.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` if the backend refuses the update.
    #[instrument(skip(self, note), fields(booking_id = %id, status = %status))]
    pub async fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
        note: Option<String>,
    ) -> Result<Ack, ApiError> {
        let body = BookingStatusUpdate {
            status,
            note: note.filter(|n| !n.trim().is_empty()),
        };
        self.put(&format!("admin/bookings/{id}"), &body).await
    }

    /// Delete a booking.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` if the backend refuses the delete.
    #[instrument(skip(self), fields(booking_id = %id))]
    pub async fn delete_booking(&self, id: BookingId) -> Result<Ack, ApiError> {
        self.delete(&format!("admin/bookings/{id}")).await
    }

    /// Bookings made by or hosted by one user.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` on transport or backend failure.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn bookings_for_user(
        &self,
        user_id: UserId,
        page: PageParams,
    ) -> Result<Page<Booking>, ApiError> {
        let filter = BookingFilter {
            user_id: Some(user_id),
            ..BookingFilter::default()
        };
        self.list("admin/bookings", page, &filter).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_omits_empty_values() {
        let filter = BookingFilter {
            q: Some(String::new()),
            ..BookingFilter::default()
        };
        assert_eq!(serde_json::to_value(&filter).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_filter_serializes_wire_names() {
        let filter = BookingFilter {
            status: Some(BookingStatus::Confirmed),
            q: Some("loft".to_string()),
            from: NaiveDate::from_ymd_opt(2026, 11, 1),
            to: None,
            user_id: Some(UserId::new(9)),
        };
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            serde_json::json!({
                "status": "confirmed",
                "q": "loft",
                "from": "2026-11-01",
                "user_id": 9
            })
        );
    }
}
