//! One-shot toast notifications carried in the session.
//!
//! A mutation handler pushes a toast and redirects; the page it redirects to
//! takes every pending toast and renders it once.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session key holding pending toasts.
const FLASH_KEY: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

impl FlashKind {
    /// CSS modifier used by the toast partial.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "toast-success",
            Self::Error => "toast-error",
            Self::Info => "toast-info",
        }
    }
}

/// A toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Info,
            message: message.into(),
        }
    }
}

/// Queue a toast for the next rendered page.
///
/// Session failures are logged and the toast is dropped; a lost toast must
/// not fail the mutation that already happened.
pub async fn push_flash(session: &Session, flash: Flash) {
    let mut pending = match session.get::<Vec<Flash>>(FLASH_KEY).await {
        Ok(pending) => pending.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read pending toasts");
            Vec::new()
        }
    };
    pending.push(flash);
    if let Err(e) = session.insert(FLASH_KEY, pending).await {
        tracing::warn!(error = %e, "Failed to store toast");
    }
}

/// Remove and return every pending toast.
pub async fn take_flashes(session: &Session) -> Vec<Flash> {
    match session.remove::<Vec<Flash>>(FLASH_KEY).await {
        Ok(pending) => pending.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to take pending toasts");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_flashes_are_one_shot() {
        let session = session();
        push_flash(&session, Flash::success("Booking accepted")).await;
        push_flash(&session, Flash::error("Listing could not be deleted")).await;

        let taken = take_flashes(&session).await;
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].kind, FlashKind::Success);
        assert_eq!(taken[1].message, "Listing could not be deleted");

        assert!(take_flashes(&session).await.is_empty());
    }

    #[test]
    fn test_css_class() {
        assert_eq!(Flash::info("x").kind.css_class(), "toast-info");
    }
}
