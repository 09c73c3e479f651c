//! Feature, category and house-type endpoints.

use tracing::instrument;

use rentdesk_core::LookupId;

use super::types::{Lookup, LookupKind, LookupPayload};
use super::{Ack, ApiClient, ApiError};

fn collection(kind: LookupKind) -> String {
    format!("admin/{}", kind.segment())
}

impl ApiClient {
    /// Every record of one lookup table.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` on transport or backend failure.
    #[instrument(skip(self), fields(kind = %kind))]
    pub async fn list_lookups(&self, kind: LookupKind) -> Result<Vec<Lookup>, ApiError> {
        self.list_all(&collection(kind)).await
    }

    /// Add a record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the backend rejects the name.
    #[instrument(skip(self, payload), fields(kind = %kind, name = %payload.name))]
    pub async fn create_lookup(
        &self,
        kind: LookupKind,
        payload: &LookupPayload,
    ) -> Result<Ack, ApiError> {
        self.post(&collection(kind), payload).await
    }

    /// Rename or re-describe a record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the backend rejects the name.
    #[instrument(skip(self, payload), fields(kind = %kind, lookup_id = %id))]
    pub async fn update_lookup(
        &self,
        kind: LookupKind,
        id: LookupId,
        payload: &LookupPayload,
    ) -> Result<Ack, ApiError> {
        self.put(&format!("{}/{id}", collection(kind)), payload).await
    }

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` if the record is still in use or missing.
    #[instrument(skip(self), fields(kind = %kind, lookup_id = %id))]
    pub async fn delete_lookup(&self, kind: LookupKind, id: LookupId) -> Result<Ack, ApiError> {
        self.delete(&format!("{}/{id}", collection(kind))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_paths() {
        assert_eq!(collection(LookupKind::Features), "admin/features");
        assert_eq!(collection(LookupKind::HouseTypes), "admin/house-types");
    }
}
