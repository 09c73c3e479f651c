//! `rd-cli bookings ...`

use rentdesk_admin::api::{ApiClient, BookingFilter, PageParams, format_date, format_timestamp};
use rentdesk_core::{BookingId, BookingStatus};

use super::{
    CliError, Table, or_dash, print_details, print_json, print_line, print_page_footer,
    print_table,
};

/// List bookings, newest first.
///
/// # Errors
///
/// Returns `CliError` on API or output failure.
pub async fn list(
    client: &ApiClient,
    params: PageParams,
    status: Option<BookingStatus>,
    q: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let filter = BookingFilter {
        status,
        q,
        ..BookingFilter::default()
    };
    let page = client.list_bookings(params, &filter).await?;

    if json {
        return print_json(&page.items);
    }

    let mut table = Table::new(vec![
        "ID", "Reference", "Listing", "Guest", "Check-in", "Check-out", "Total", "Status",
    ]);
    for b in &page.items {
        table.row(vec![
            b.id.to_string(),
            b.reference(),
            or_dash(b.listing.as_ref().map(|l| l.title.as_str())),
            b.guest
                .as_ref()
                .map_or_else(|| "-".to_string(), |g| g.display_name()),
            format_date(b.check_in.as_ref()),
            format_date(b.check_out.as_ref()),
            b.total().display(),
            b.status.to_string(),
        ]);
    }
    print_table(&table, "No bookings found.")?;
    print_page_footer(&page.pagination)
}

/// Show one booking with its legal next statuses.
///
/// # Errors
///
/// Returns `CliError::NotFound` if the booking does not exist.
pub async fn show(client: &ApiClient, id: BookingId, json: bool) -> Result<(), CliError> {
    let booking = client
        .get_booking(id)
        .await?
        .ok_or_else(|| CliError::NotFound(format!("booking {id}")))?;

    if json {
        return print_json(&booking);
    }

    let next = booking
        .status
        .next_statuses()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();

    print_details(&[
        ("Reference", booking.reference()),
        ("Status", booking.status.label().to_string()),
        (
            "Listing",
            or_dash(booking.listing.as_ref().map(|l| l.title.as_str())),
        ),
        (
            "Guest",
            booking
                .guest
                .as_ref()
                .map_or_else(|| "-".to_string(), |g| g.display_name()),
        ),
        (
            "Host",
            booking
                .host
                .as_ref()
                .map_or_else(|| "-".to_string(), |h| h.display_name()),
        ),
        ("Check-in", format_date(booking.check_in.as_ref())),
        ("Check-out", format_date(booking.check_out.as_ref())),
        (
            "Nights",
            booking
                .nights()
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
        ),
        ("Guests", booking.guests.to_string()),
        ("Total", booking.total().display()),
        ("Note", or_dash(booking.note.as_deref())),
        ("Created", format_timestamp(booking.created_at.as_ref())),
        (
            "Next",
            if next.is_empty() {
                "-".to_string()
            } else {
                next.join(", ")
            },
        ),
    ])
}

/// Move a booking to `target`, refusing illegal transitions locally.
///
/// # Errors
///
/// Returns `CliError::IllegalTransition` without calling the backend when the
/// move is not allowed from the booking's current status.
pub async fn transition(
    client: &ApiClient,
    id: BookingId,
    target: BookingStatus,
    note: Option<String>,
) -> Result<(), CliError> {
    let booking = client
        .get_booking(id)
        .await?
        .ok_or_else(|| CliError::NotFound(format!("booking {id}")))?;

    if !booking.status.can_transition_to(target) {
        return Err(CliError::IllegalTransition {
            what: format!("booking {}", booking.reference()),
            from: booking.status.to_string(),
            to: target.to_string(),
        });
    }

    let note = note.filter(|n| !n.trim().is_empty());
    let ack = client.update_booking_status(id, target, note).await?;
    tracing::info!(booking_id = %id, to = %target, "Booking transitioned");
    print_line(
        &ack.message
            .unwrap_or_else(|| format!("Booking {} is now {target}.", booking.reference())),
    )
}
