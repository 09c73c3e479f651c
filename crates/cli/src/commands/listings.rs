//! `rd-cli listings ...`

use rentdesk_admin::api::{ApiClient, ListingFilter, PageParams, format_timestamp};
use rentdesk_core::{ListingId, ListingStatus};

use super::{
    CliError, Table, or_dash, print_details, print_json, print_line, print_page_footer,
    print_table,
};

/// List listings.
///
/// # Errors
///
/// Returns `CliError` on API or output failure.
pub async fn list(
    client: &ApiClient,
    params: PageParams,
    status: Option<ListingStatus>,
    q: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let filter = ListingFilter {
        status,
        q,
        ..ListingFilter::default()
    };
    let page = client.list_listings(params, &filter).await?;

    if json {
        return print_json(&page.items);
    }

    let mut table = Table::new(vec!["ID", "Title", "City", "Host", "Per night", "Status"]);
    for l in &page.items {
        table.row(vec![
            l.id.to_string(),
            l.title.clone(),
            or_dash(l.city.as_deref()),
            l.host
                .as_ref()
                .map_or_else(|| "-".to_string(), |h| h.display_name()),
            l.nightly().display(),
            l.status.to_string(),
        ]);
    }
    print_table(&table, "No listings found.")?;
    print_page_footer(&page.pagination)
}

/// Show one listing.
///
/// # Errors
///
/// Returns `CliError::NotFound` if the listing does not exist.
pub async fn show(client: &ApiClient, id: ListingId, json: bool) -> Result<(), CliError> {
    let listing = client
        .get_listing(id)
        .await?
        .ok_or_else(|| CliError::NotFound(format!("listing {id}")))?;

    if json {
        return print_json(&listing);
    }

    let features = listing
        .feature_ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    print_details(&[
        ("Title", listing.title.clone()),
        ("Status", listing.status.to_string()),
        (
            "Host",
            listing
                .host
                .as_ref()
                .map_or_else(|| "-".to_string(), |h| h.display_name()),
        ),
        ("City", or_dash(listing.city.as_deref())),
        ("Address", or_dash(listing.address.as_deref())),
        ("Per night", listing.nightly().display()),
        ("Bedrooms", listing.bedrooms.to_string()),
        ("Bathrooms", listing.bathrooms.to_string()),
        ("Max guests", listing.max_guests.to_string()),
        ("Features", or_dash(Some(features.as_str()))),
        ("Created", format_timestamp(listing.created_at.as_ref())),
    ])
}

/// Approve, deactivate, reactivate or reject a listing.
///
/// # Errors
///
/// Returns `CliError::IllegalTransition` without calling the backend when the
/// move is not allowed from the listing's current status.
pub async fn set_status(
    client: &ApiClient,
    id: ListingId,
    target: ListingStatus,
) -> Result<(), CliError> {
    let listing = client
        .get_listing(id)
        .await?
        .ok_or_else(|| CliError::NotFound(format!("listing {id}")))?;

    if !listing.status.can_transition_to(target) {
        return Err(CliError::IllegalTransition {
            what: format!("listing {id}"),
            from: listing.status.to_string(),
            to: target.to_string(),
        });
    }

    let ack = client.update_listing_status(id, target).await?;
    tracing::info!(listing_id = %id, to = %target, "Listing status changed");
    print_line(
        &ack.message
            .unwrap_or_else(|| format!("Listing {id} is now {target}.")),
    )
}
