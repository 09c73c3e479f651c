//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Liveness
//! GET  /health/ready                   - Backend reachability
//!
//! GET  /                               - Dashboard (booking counts, recent bookings)
//!
//! # Bookings
//! GET  /bookings                       - List (page, per_page, status, q, from, to)
//! GET  /bookings/{id}                  - Detail with legal next-status actions
//! POST /bookings/{id}/status           - Transition
//! POST /bookings/{id}/delete           - Delete
//!
//! # Listings
//! GET  /listings                       - List (page, per_page, status, q, category_id)
//! GET  /listings/new                   - Create form
//! POST /listings                       - Create
//! GET  /listings/{id}/edit             - Edit form
//! POST /listings/{id}                  - Update
//! GET  /listings/{id}/rules            - House rules form
//! POST /listings/{id}/rules            - Update house rules
//! POST /listings/{id}/status           - Approve / deactivate / reject
//! POST /listings/{id}/delete           - Delete
//!
//! # Users
//! GET  /users                          - List (page, per_page, role, status, q)
//! GET  /users/{id}                     - Detail with the user's bookings
//! POST /users/{id}/status              - Activate / suspend
//!
//! # Settings
//! GET  /settings                       - Grouped list with local search
//! GET  /settings/{id}                  - Typed editor
//! POST /settings/{id}                  - Save value
//!
//! # Transactions
//! GET  /transactions                   - List (page, per_page, kind, status, q)
//!
//! # Lookup tables ({features,categories,house-types})
//! GET  /{kind}                         - List with local search and create form
//! POST /{kind}                         - Create
//! POST /{kind}/{id}                    - Update
//! POST /{kind}/{id}/delete             - Delete
//! ```
//!
//! Every mutation records a toast and redirects, so the next page load
//! re-fetches the backend's authoritative record.

pub mod bookings;
pub mod dashboard;
pub mod listings;
pub mod lookups;
pub mod settings;
pub mod transactions;
pub mod users;

use std::future::Future;

use axum::{
    Extension, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_sessions::Session;

use rentdesk_core::clamp_per_page;

use crate::api::{Ack, ApiError, LookupKind, PageParams};
use crate::error::AppError;
use crate::middleware::{Flash, push_flash, take_flashes};
use crate::state::AppState;

/// Build the admin router.
pub fn routes() -> Router<AppState> {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        // Dashboard
        .route("/", get(dashboard::index))
        // Bookings
        .route("/bookings", get(bookings::index))
        .route("/bookings/{id}", get(bookings::show))
        .route("/bookings/{id}/status", post(bookings::update_status))
        .route("/bookings/{id}/delete", post(bookings::delete))
        // Listings
        .route("/listings", get(listings::index).post(listings::create))
        .route("/listings/new", get(listings::new_form))
        .route("/listings/{id}", post(listings::update))
        .route("/listings/{id}/edit", get(listings::edit_form))
        .route(
            "/listings/{id}/rules",
            get(listings::rules_form).post(listings::update_rules),
        )
        .route("/listings/{id}/status", post(listings::update_status))
        .route("/listings/{id}/delete", post(listings::delete))
        // Users
        .route("/users", get(users::index))
        .route("/users/{id}", get(users::show))
        .route("/users/{id}/status", post(users::update_status))
        // Settings
        .route("/settings", get(settings::index))
        .route("/settings/{id}", get(settings::edit).post(settings::update))
        // Transactions
        .route("/transactions", get(transactions::index));

    // Lookup tables share handlers; the table is carried as an extension.
    for kind in LookupKind::ALL {
        router = router.nest(
            &format!("/{}", kind.segment()),
            Router::new()
                .route("/", get(lookups::index).post(lookups::create))
                .route("/{id}", post(lookups::update))
                .route("/{id}/delete", post(lookups::delete))
                .layer(Extension(kind)),
        );
    }

    router
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the backend is unreachable or rejects
/// the token.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.api().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Sidebar entry.
#[derive(Debug, Clone)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

const NAV: [(&str, &str); 9] = [
    ("/", "Dashboard"),
    ("/bookings", "Bookings"),
    ("/listings", "Listings"),
    ("/users", "Users"),
    ("/transactions", "Transactions"),
    ("/features", "Features"),
    ("/categories", "Categories"),
    ("/house-types", "House types"),
    ("/settings", "Settings"),
];

/// Data every page passes to `base.html`.
#[derive(Debug, Clone)]
pub struct Layout {
    pub title: String,
    pub current_path: String,
    pub nav: Vec<NavItem>,
    pub flashes: Vec<Flash>,
}

impl Layout {
    /// Build the layout and take this session's pending toasts.
    pub async fn new(session: &Session, title: impl Into<String>, current_path: &str) -> Self {
        let flashes = take_flashes(session).await;
        Self::with_flashes(title, current_path, flashes)
    }

    #[must_use]
    pub fn with_flashes(
        title: impl Into<String>,
        current_path: &str,
        flashes: Vec<Flash>,
    ) -> Self {
        let nav = NAV
            .iter()
            .map(|&(href, label)| NavItem {
                href,
                label,
                active: if href == "/" {
                    current_path == "/"
                } else {
                    current_path == href || current_path.starts_with(&format!("{href}/"))
                },
            })
            .collect();
        Self {
            title: title.into(),
            current_path: current_path.to_string(),
            nav,
            flashes,
        }
    }
}

// =============================================================================
// Shared handler helpers
// =============================================================================

/// Page request from the `page` and `per_page` query parameters.
///
/// Blank or malformed values fall back to page 1 and the configured size.
#[must_use]
pub fn page_params(
    page: Option<&String>,
    per_page: Option<&String>,
    default_per_page: u32,
) -> PageParams {
    let per_page = clamp_per_page(parse_param(per_page).or(Some(default_per_page)));
    PageParams::new(parse_param(page).unwrap_or(1), per_page)
}

/// Trim a query parameter, dropping it when blank.
#[must_use]
pub fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an optional query parameter, ignoring blank or unknown values.
#[must_use]
pub fn parse_param<T: std::str::FromStr>(value: Option<&String>) -> Option<T> {
    non_blank(value).and_then(|v| v.parse().ok())
}

/// Run one backend mutation behind the duplicate-submission guard.
///
/// The outcome is recorded as a toast. Returns `Ok(true)` when the backend
/// accepted the change.
///
/// # Errors
///
/// Returns `AppError::InFlight` when the same action is already running;
/// the backend is not called.
pub async fn run_mutation<Fut>(
    state: &AppState,
    session: &Session,
    key: String,
    success: &str,
    action: Fut,
) -> Result<bool, AppError>
where
    Fut: Future<Output = Result<Ack, ApiError>>,
{
    let Some(_guard) = state.inflight().try_begin(key.clone()) else {
        push_flash(session, Flash::info("That action is still being processed.")).await;
        return Err(AppError::InFlight(key));
    };

    match action.await {
        Ok(ack) => {
            tracing::info!(key = %key, "Mutation accepted");
            let message = ack
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| success.to_string());
            push_flash(session, Flash::success(message)).await;
            Ok(true)
        }
        Err(e) => {
            tracing::error!(key = %key, error = %e, "Mutation failed");
            push_flash(session, Flash::error(e.user_message())).await;
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_active_matches_prefix() {
        let layout = Layout::with_flashes("Bookings", "/bookings/12", vec![]);
        let active: Vec<_> = layout.nav.iter().filter(|n| n.active).map(|n| n.href).collect();
        assert_eq!(active, vec!["/bookings"]);

        let layout = Layout::with_flashes("Dashboard", "/", vec![]);
        let active: Vec<_> = layout.nav.iter().filter(|n| n.active).map(|n| n.href).collect();
        assert_eq!(active, vec!["/"]);
    }

    #[test]
    fn test_nav_does_not_match_sibling_prefix() {
        let layout = Layout::with_flashes("Users", "/users-export", vec![]);
        assert!(layout.nav.iter().all(|n| !n.active));
    }

    #[test]
    fn test_page_params_defaults_and_clamps() {
        let p = page_params(None, None, 15);
        assert_eq!((p.page(), p.per_page()), (1, 15));

        let p = page_params(Some(&"0".to_string()), Some(&"500".to_string()), 15);
        assert_eq!((p.page(), p.per_page()), (1, 100));

        let p = page_params(Some(&"abc".to_string()), Some(&String::new()), 20);
        assert_eq!((p.page(), p.per_page()), (1, 20));
    }

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param::<u32>(Some(&" 4 ".to_string())), Some(4));
        assert_eq!(parse_param::<u32>(Some(&String::new())), None);
        assert_eq!(parse_param::<u32>(None), None);
        assert_eq!(
            parse_param::<rentdesk_core::BookingStatus>(Some(&"nope".to_string())),
            None
        );
    }
}
