//! Setting endpoints.
//!
//! Settings are few, so the collection is fetched whole and filtered locally.

use tracing::instrument;

use rentdesk_core::SettingId;

use super::types::{Setting, SettingUpdate};
use super::{Ack, ApiClient, ApiError};

impl ApiClient {
    /// Every setting.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` on transport or backend failure.
    #[instrument(skip(self))]
    pub async fn list_settings(&self) -> Result<Vec<Setting>, ApiError> {
        self.list_all("admin/settings").await
    }

    /// Get a setting by id, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` on transport or backend failure.
    #[instrument(skip(self), fields(setting_id = %id))]
    pub async fn get_setting(&self, id: SettingId) -> Result<Option<Setting>, ApiError> {
        self.find(&format!("admin/settings/{id}")).await
    }

    /// Store a new typed value.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the backend rejects the value.
    #[instrument(skip(self, value), fields(setting_id = %id))]
    pub async fn update_setting(
        &self,
        id: SettingId,
        value: serde_json::Value,
    ) -> Result<Ack, ApiError> {
        self.put(&format!("admin/settings/{id}"), &SettingUpdate { value })
            .await
    }
}
