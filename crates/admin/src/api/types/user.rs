//! User resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rentdesk_core::{UserId, UserRole, UserStatus};

use super::common::lenient_datetime;

/// A marketplace account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub status: UserStatus,
    /// Whether the email address has been verified.
    #[serde(default)]
    pub verified: bool,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of a partial status update.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UserStatusUpdate {
    pub status: UserStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_defaults() {
        let user: User = serde_json::from_str(r#"{"id": 8, "email": "bo@x.io"}"#).unwrap();
        assert_eq!(user.role, UserRole::Guest);
        assert_eq!(user.status, UserStatus::Active);
        assert!(!user.verified);
        assert!(user.created_at.is_none());
    }

    #[test]
    fn test_user_host_suspended() {
        let user: User = serde_json::from_str(
            r#"{"id": 8, "name": "Bo", "email": "bo@x.io", "role": "host", "status": "suspended", "verified": true}"#,
        )
        .unwrap();
        assert_eq!(user.role, UserRole::Host);
        assert_eq!(user.status.toggled(), UserStatus::Active);
    }
}
