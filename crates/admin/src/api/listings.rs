//! Listing endpoints.

use serde::Serialize;
use tracing::instrument;

use rentdesk_core::{CategoryId, ListingId, ListingStatus};

use super::client::{PageParams, is_blank};
use super::types::{Listing, ListingPayload, ListingRules, ListingStatusUpdate, Page};
use super::{Ack, ApiClient, ApiError};

/// Filters accepted by `GET /admin/listings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ListingStatus>,
    #[serde(skip_serializing_if = "is_blank")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

impl ApiClient {
    /// List listings.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` on transport or backend failure.
    #[instrument(skip(self, filter), fields(page = page.page(), status = ?filter.status))]
    pub async fn list_listings(
        &self,
        page: PageParams,
        filter: &ListingFilter,
    ) -> Result<Page<Listing>, ApiError> {
        self.list("admin/listings", page, filter).await
    }

    /// Get a listing by id, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` on transport or backend failure.
    #[instrument(skip(self), fields(listing_id = %id))]
    pub async fn get_listing(&self, id: ListingId) -> Result<Option<Listing>, ApiError> {
        self.find(&format!("admin/listings/{id}")).await
    }

    /// Create a listing.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the backend rejects a field.
    #[instrument(skip(self, payload), fields(title = %payload.title))]
    pub async fn create_listing(&self, payload: &ListingPayload) -> Result<Ack, ApiError> {
        self.post("admin/listings", payload).await
    }

    /// Replace a listing's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the backend rejects a field.
    #[instrument(skip(self, payload), fields(listing_id = %id))]
    pub async fn update_listing(
        &self,
        id: ListingId,
        payload: &ListingPayload,
    ) -> Result<Ack, ApiError> {
        self.put(&format!("admin/listings/{id}"), payload).await
    }

    /// Replace a listing's house rules.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` if the backend refuses the update.
    #[instrument(skip(self, rules), fields(listing_id = %id))]
    pub async fn update_listing_rules(
        &self,
        id: ListingId,
        rules: &ListingRules,
    ) -> Result<Ack, ApiError> {
        self.put(&format!("admin/listings/{id}/rules"), rules).await
    }

    /// Approve, deactivate, reactivate or reject a listing.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` if the backend refuses the update.
    #[instrument(skip(self), fields(listing_id = %id, status = %status))]
    pub async fn update_listing_status(
        &self,
        id: ListingId,
        status: ListingStatus,
    ) -> Result<Ack, ApiError> {
        self.put(
            &format!("admin/listings/{id}"),
            &ListingStatusUpdate { status },
        )
        .await
    }

    /// Delete a listing.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` if the backend refuses the delete.
    #[instrument(skip(self), fields(listing_id = %id))]
    pub async fn delete_listing(&self, id: ListingId) -> Result<Ack, ApiError> {
        self.delete(&format!("admin/listings/{id}")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_serialization() {
        let filter = ListingFilter {
            status: Some(ListingStatus::Pending),
            q: Some("  ".to_string()),
            category_id: Some(CategoryId::new(2)),
        };
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            serde_json::json!({"status": "pending", "category_id": 2})
        );
    }
}
