//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::config::AdminConfig;
use crate::services::InFlight;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: ApiClient,
    inflight: InFlight,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend API client cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api)?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                inflight: InFlight::new(),
            }),
        })
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the backend admin API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get the duplicate-submission guard.
    #[must_use]
    pub fn inflight(&self) -> &InFlight {
        &self.inner.inflight
    }

    /// Page size for list pages when the URL does not set one.
    #[must_use]
    pub fn per_page(&self) -> u32 {
        self.inner.config.per_page
    }
}
