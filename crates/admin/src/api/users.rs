//! User endpoints.

use serde::Serialize;
use tracing::instrument;

use rentdesk_core::{UserId, UserRole, UserStatus};

use super::client::{PageParams, is_blank};
use super::types::{Page, User, UserStatusUpdate};
use super::{Ack, ApiClient, ApiError};

/// Filters accepted by `GET /admin/users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(skip_serializing_if = "is_blank")]
    pub q: Option<String>,
}

impl ApiClient {
    /// List users.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` on transport or backend failure.
    #[instrument(skip(self, filter), fields(page = page.page(), role = ?filter.role))]
    pub async fn list_users(
        &self,
        page: PageParams,
        filter: &UserFilter,
    ) -> Result<Page<User>, ApiError> {
        self.list("admin/users", page, filter).await
    }

    /// Get a user by id, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` on transport or backend failure.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: UserId) -> Result<Option<User>, ApiError> {
        self.find(&format!("admin/users/{id}")).await
    }

    /// Activate or suspend an account.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` if the backend refuses the update.
    #[instrument(skip(self), fields(user_id = %id, status = %status))]
    pub async fn update_user_status(
        &self,
        id: UserId,
        status: UserStatus,
    ) -> Result<Ack, ApiError> {
        self.put(&format!("admin/users/{id}"), &UserStatusUpdate { status })
            .await
    }
}
