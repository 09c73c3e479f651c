//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use rentdesk_core::{ListingStatus, UserStatus};

use super::Layout;
use super::bookings::{BookingRow, StatusCount, status_counts};
use crate::api::{ApiError, BookingFilter, ListingFilter, Page, PageParams, UserFilter};
use crate::filters;
use crate::state::AppState;

/// Recent bookings shown on the dashboard.
const RECENT_BOOKINGS: u32 = 5;

/// One headline number.
#[derive(Debug, Clone)]
pub struct Metric {
    pub label: &'static str,
    /// Formatted total, `-` when the backend could not be reached.
    pub value: String,
    pub href: &'static str,
}

impl Metric {
    fn from_total<T>(
        label: &'static str,
        href: &'static str,
        result: &Result<Page<T>, ApiError>,
    ) -> Self {
        let value = match result {
            Ok(page) => page.pagination.total.to_string(),
            Err(e) => {
                tracing::error!(metric = label, "Failed to fetch dashboard metric: {e}");
                "-".to_string()
            }
        };
        Self { label, value, href }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub metrics: Vec<Metric>,
    pub counts: Vec<StatusCount>,
    pub recent_bookings: Vec<BookingRow>,
    pub load_error: Option<String>,
}

/// Dashboard page handler.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> DashboardTemplate {
    let api = state.api();
    let one = PageParams::new(1, 1);

    let all_bookings = BookingFilter::default();
    let all_listings = ListingFilter::default();
    let pending = ListingFilter {
        status: Some(ListingStatus::Pending),
        ..ListingFilter::default()
    };
    let all_users = UserFilter::default();
    let suspended = UserFilter {
        status: Some(UserStatus::Suspended),
        ..UserFilter::default()
    };

    let (bookings, listings, pending_listings, users, suspended_users) = tokio::join!(
        api.list_bookings(PageParams::new(1, RECENT_BOOKINGS), &all_bookings),
        api.list_listings(one, &all_listings),
        api.list_listings(one, &pending),
        api.list_users(one, &all_users),
        api.list_users(one, &suspended),
    );

    let metrics = vec![
        Metric::from_total("Bookings", "/bookings", &bookings),
        Metric::from_total("Listings", "/listings", &listings),
        Metric::from_total(
            "Listings awaiting review",
            "/listings?status=pending",
            &pending_listings,
        ),
        Metric::from_total("Users", "/users", &users),
        Metric::from_total("Suspended users", "/users?status=suspended", &suspended_users),
    ];

    let (counts, recent_bookings, load_error) = match bookings {
        Ok(page) => (
            status_counts(&page),
            page.items.iter().map(BookingRow::from).collect(),
            None,
        ),
        Err(e) => (vec![], vec![], Some(e.user_message())),
    };

    DashboardTemplate {
        layout: Layout::new(&session, "Dashboard", "/").await,
        metrics,
        counts,
        recent_bookings,
        load_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentdesk_core::Pagination;
    use std::collections::BTreeMap;

    #[test]
    fn test_metric_from_total() {
        let ok: Result<Page<()>, ApiError> = Ok(Page {
            items: vec![],
            pagination: Pagination::new(1, 1, 42),
            info: BTreeMap::new(),
        });
        assert_eq!(Metric::from_total("Users", "/users", &ok).value, "42");

        let failed: Result<Page<()>, ApiError> = Err(ApiError::Unauthorized);
        assert_eq!(Metric::from_total("Users", "/users", &failed).value, "-");
    }
}
