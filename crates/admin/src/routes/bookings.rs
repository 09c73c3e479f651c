//! Booking list, detail and status transitions.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use validator::Validate;

use rentdesk_core::{BookingId, BookingStatus};

use super::{Layout, non_blank, page_params, parse_param, run_mutation};
use crate::api::{Booking, BookingFilter, Page, format_date, format_timestamp};
use crate::components::data_table::{
    DataTableConfig, PagerView, bookings_table_config, preserve_params,
};
use crate::error::AppError;
use crate::filters;
use crate::forms::{FieldErrors, StatusForm};
use crate::middleware::{Flash, push_flash};
use crate::services::InFlight;
use crate::state::AppState;

/// Query parameters for the bookings list.
#[derive(Debug, Default, Deserialize)]
pub struct BookingsQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub status: Option<String>,
    pub q: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl BookingsQuery {
    fn filter(&self) -> BookingFilter {
        BookingFilter {
            status: parse_param(self.status.as_ref()),
            q: non_blank(self.q.as_ref()),
            from: parse_param::<NaiveDate>(self.from.as_ref()),
            to: parse_param::<NaiveDate>(self.to.as_ref()),
            user_id: None,
        }
    }

    fn value(&self, key: &str) -> Option<String> {
        match key {
            "status" => self.status.clone(),
            "q" => self.q.clone(),
            "from" => self.from.clone(),
            "to" => self.to.clone(),
            _ => None,
        }
    }

    /// Filter state to keep on pager links.
    fn preserved(&self) -> String {
        preserve_params(&[
            ("status", self.status.clone()),
            ("q", self.q.clone()),
            ("from", self.from.clone()),
            ("to", self.to.clone()),
        ])
    }
}

/// Booking row for templates.
#[derive(Debug, Clone)]
pub struct BookingRow {
    pub id: BookingId,
    pub reference: String,
    pub listing: String,
    pub guest: String,
    pub host: String,
    pub dates: String,
    pub nights: String,
    pub guests: u32,
    pub total: String,
    pub status: BookingStatus,
    pub created_at: String,
}

impl From<&Booking> for BookingRow {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            reference: booking.reference(),
            listing: booking
                .listing
                .as_ref()
                .map_or_else(|| "-".to_string(), |l| l.title.clone()),
            guest: booking
                .guest
                .as_ref()
                .map_or_else(|| "-".to_string(), |g| g.display_name()),
            host: booking
                .host
                .as_ref()
                .map_or_else(|| "-".to_string(), |h| h.display_name()),
            dates: format!(
                "{} to {}",
                format_date(booking.check_in.as_ref()),
                format_date(booking.check_out.as_ref())
            ),
            nights: booking
                .nights()
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
            guests: booking.guests,
            total: booking.total().display(),
            status: booking.status,
            created_at: format_timestamp(booking.created_at.as_ref()),
        }
    }
}

/// Per-status count shown above the table.
#[derive(Debug, Clone)]
pub struct StatusCount {
    pub status: BookingStatus,
    pub count: i64,
}

/// Per-status counts from a list response's `info`, in lifecycle order.
#[must_use]
pub fn status_counts(page: &Page<Booking>) -> Vec<StatusCount> {
    BookingStatus::ALL
        .iter()
        .filter_map(|s| {
            page.count(s.as_str()).map(|count| StatusCount {
                status: *s,
                count,
            })
        })
        .collect()
}

/// A legal next status, rendered as a button.
#[derive(Debug, Clone)]
pub struct TransitionAction {
    pub status: BookingStatus,
    pub label: &'static str,
    pub destructive: bool,
    /// Another submission for this booking is already running.
    pub busy: bool,
}

/// Actions offered for a booking in `status`.
///
/// Only legal next statuses appear; terminal bookings get none.
#[must_use]
pub fn transition_actions(status: BookingStatus, busy: bool) -> Vec<TransitionAction> {
    status
        .next_statuses()
        .iter()
        .map(|next| TransitionAction {
            status: *next,
            label: next.action_label(),
            destructive: next.is_destructive(),
            busy,
        })
        .collect()
}

/// Bookings list page template.
#[derive(Template, WebTemplate)]
#[template(path = "bookings/index.html")]
pub struct BookingsIndexTemplate {
    pub layout: Layout,
    pub table: DataTableConfig,
    pub bookings: Vec<BookingRow>,
    pub counts: Vec<StatusCount>,
    pub pager: PagerView,
    pub load_error: Option<String>,
}

/// Booking detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "bookings/show.html")]
pub struct BookingShowTemplate {
    pub layout: Layout,
    pub booking: BookingRow,
    pub note: Option<String>,
    pub actions: Vec<TransitionAction>,
}

/// Bookings list page handler.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<BookingsQuery>,
) -> BookingsIndexTemplate {
    let params = page_params(query.page.as_ref(), query.per_page.as_ref(), state.per_page());
    let result = state.api().list_bookings(params, &query.filter()).await;

    let (bookings, counts, pagination, load_error) = match result {
        Ok(page) => {
            let counts = status_counts(&page);
            let rows = page.items.iter().map(BookingRow::from).collect();
            (rows, counts, page.pagination, None)
        }
        Err(e) => {
            tracing::error!("Failed to fetch bookings: {e}");
            (
                vec![],
                vec![],
                rentdesk_core::Pagination::new(params.page(), params.per_page(), 0),
                Some(e.user_message()),
            )
        }
    };

    BookingsIndexTemplate {
        layout: Layout::new(&session, "Bookings", "/bookings").await,
        table: bookings_table_config().with_values(|k| query.value(k)),
        bookings,
        counts,
        pager: PagerView::new(&pagination, "/bookings", &query.preserved()),
        load_error,
    }
}

/// Booking detail page handler.
#[instrument(skip(state, session), fields(booking_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<BookingId>,
) -> Result<BookingShowTemplate, AppError> {
    let booking = state
        .api()
        .get_booking(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?;

    let busy = state
        .inflight()
        .is_busy(&InFlight::key("bookings", id, "status"));

    Ok(BookingShowTemplate {
        layout: Layout::new(
            &session,
            format!("Booking {}", booking.reference()),
            &format!("/bookings/{id}"),
        )
        .await,
        actions: transition_actions(booking.status, busy),
        note: booking.note.clone(),
        booking: BookingRow::from(&booking),
    })
}

/// Move a booking to the submitted status.
///
/// The current record is fetched first; a target that is not a legal next
/// status is refused without calling the update endpoint.
#[instrument(skip(state, session, form), fields(booking_id = %id, target = %form.status))]
pub async fn update_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<BookingId>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, AppError> {
    let detail = format!("/bookings/{id}");

    if let Err(errors) = form.validate() {
        let errors = FieldErrors::from(&errors);
        push_flash(&session, Flash::error(errors.summary())).await;
        return Ok(Redirect::to(&detail));
    }

    let Ok(target) = form.target::<BookingStatus>() else {
        return Err(AppError::BadRequest(format!(
            "unknown booking status: {}",
            form.status
        )));
    };

    let current = state
        .api()
        .get_booking(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?;

    if !current.status.can_transition_to(target) {
        tracing::warn!(from = %current.status, to = %target, "Illegal booking transition refused");
        push_flash(
            &session,
            Flash::error(format!(
                "A {} booking cannot be moved to {}.",
                current.status.label().to_lowercase(),
                target.label().to_lowercase()
            )),
        )
        .await;
        return Ok(Redirect::to(&detail));
    }

    run_mutation(
        &state,
        &session,
        InFlight::key("bookings", id, "status"),
        &format!("Booking {}.", target.label().to_lowercase()),
        state.api().update_booking_status(id, target, form.note.clone()),
    )
    .await?;

    Ok(Redirect::to(&detail))
}

/// Delete a booking.
#[instrument(skip(state, session), fields(booking_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<BookingId>,
) -> Result<Redirect, AppError> {
    let deleted = run_mutation(
        &state,
        &session,
        InFlight::key("bookings", id, "delete"),
        "Booking deleted.",
        state.api().delete_booking(id),
    )
    .await?;

    Ok(if deleted {
        Redirect::to("/bookings")
    } else {
        Redirect::to(&format!("/bookings/{id}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_only_for_legal_targets() {
        let actions = transition_actions(BookingStatus::Pending, false);
        let targets: Vec<_> = actions.iter().map(|a| a.status).collect();
        assert_eq!(
            targets,
            vec![
                BookingStatus::Accepted,
                BookingStatus::Rejected,
                BookingStatus::Cancelled
            ]
        );
        assert!(actions.iter().any(|a| a.destructive));
    }

    #[test]
    fn test_terminal_bookings_have_no_actions() {
        for status in [
            BookingStatus::Completed,
            BookingStatus::Cancelled,
            BookingStatus::Rejected,
        ] {
            assert!(transition_actions(status, false).is_empty());
        }
    }

    #[test]
    fn test_query_filter_drops_invalid_values() {
        let query = BookingsQuery {
            status: Some("bogus".to_string()),
            q: Some("  ".to_string()),
            from: Some("2026-11-01".to_string()),
            to: Some("next week".to_string()),
            ..BookingsQuery::default()
        };
        let filter = query.filter();
        assert_eq!(filter.status, None);
        assert_eq!(filter.q, None);
        assert_eq!(filter.from, NaiveDate::from_ymd_opt(2026, 11, 1));
        assert_eq!(filter.to, None);
    }

    #[test]
    fn test_preserved_params() {
        let query = BookingsQuery {
            page: Some("3".to_string()),
            status: Some("pending".to_string()),
            q: Some("ana".to_string()),
            ..BookingsQuery::default()
        };
        assert_eq!(query.preserved(), "status=pending&q=ana");
    }
}
