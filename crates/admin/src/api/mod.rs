//! Backend admin REST API client (HIGH PRIVILEGE).
//!
//! # Security
//!
//! **This client carries the backend's admin bearer token.** It can read and
//! change every booking, listing, user and setting in the marketplace.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`; every path lives under `/admin/...`
//! - Every response is wrapped in the backend's envelope
//!   (`{ success, data, message?, meta?, info? }`), unwrapped in [`client`]
//! - No local sync and no caching: pages fetch, mutations re-fetch
//! - No retries; callers log failures and surface them as toasts
//!
//! # Example
//!
//! ```rust,ignore
//! use rentdesk_admin::api::{ApiClient, BookingFilter, PageParams};
//! use rentdesk_core::BookingStatus;
//!
//! let client = ApiClient::new(&config.api)?;
//!
//! let page = client.list_bookings(PageParams::new(1, 15), &BookingFilter::default()).await?;
//! client.update_booking_status(page.items[0].id, BookingStatus::Accepted, None).await?;
//! ```

mod bookings;
pub mod client;
mod listings;
mod lookups;
mod settings;
mod transactions;
pub mod types;
mod users;

pub use bookings::BookingFilter;
pub use client::{Ack, ApiClient, PageParams};
pub use listings::ListingFilter;
pub use transactions::TransactionFilter;
pub use types::*;
pub use users::UserFilter;

use thiserror::Error;

/// Errors that can occur when talking to the backend admin API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connect, timeout, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A request path could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The client could not be configured.
    #[error("Client configuration error: {0}")]
    Config(String),

    /// Non-2xx response without a more specific mapping.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// 2xx response whose envelope reported `success: false`.
    #[error("Request unsuccessful: {0}")]
    Unsuccessful(String),

    /// The backend rejected the submitted fields (HTTP 422).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Resource not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The bearer token was rejected (HTTP 401/403).
    #[error("Unauthorized: the backend rejected the admin API token")]
    Unauthorized,

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Successful envelope without the `data` the call needs.
    #[error("Response contained no data")]
    MissingData,

    /// The response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Message safe to show an operator in a toast.
    ///
    /// Messages written by the backend for humans are passed through;
    /// transport and parsing details stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. }
            | Self::Unsuccessful(message)
            | Self::Validation(message)
                if !message.is_empty() =>
            {
                message.clone()
            }
            Self::NotFound(_) => "The record no longer exists.".to_string(),
            Self::Unauthorized => "The backend rejected the dashboard's credentials.".to_string(),
            Self::RateLimited(secs) => format!("Too many requests, try again in {secs}s."),
            Self::Http(e) if e.is_timeout() => "The backend took too long to respond.".to_string(),
            Self::Http(_) => "Could not reach the backend.".to_string(),
            _ => "The backend returned an unexpected response.".to_string(),
        }
    }

    /// Whether the error means the resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("admin/bookings/9".to_string());
        assert_eq!(err.to_string(), "Not found: admin/bookings/9");

        let err = ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - boom");
    }

    #[test]
    fn test_user_message_passes_backend_text() {
        let err = ApiError::Validation("The title field is required.".to_string());
        assert_eq!(err.user_message(), "The title field is required.");

        let err = ApiError::Unsuccessful("Booking already cancelled".to_string());
        assert_eq!(err.user_message(), "Booking already cancelled");
    }

    #[test]
    fn test_user_message_hides_internal_details() {
        let err = ApiError::Parse("expected value at line 1 column 1".to_string());
        assert_eq!(
            err.user_message(),
            "The backend returned an unexpected response."
        );

        let err = ApiError::Api {
            status: 502,
            message: String::new(),
        };
        assert_eq!(
            err.user_message(),
            "The backend returned an unexpected response."
        );
    }

    #[test]
    fn test_rate_limited_error() {
        let err = ApiError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
        assert_eq!(err.user_message(), "Too many requests, try again in 60s.");
    }

    #[test]
    fn test_is_not_found() {
        assert!(ApiError::NotFound(String::new()).is_not_found());
        assert!(!ApiError::Unauthorized.is_not_found());
    }
}
