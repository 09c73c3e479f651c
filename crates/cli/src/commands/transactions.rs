//! `rd-cli transactions list`

use rentdesk_admin::api::{ApiClient, PageParams, TransactionFilter, format_timestamp};
use rentdesk_core::{TransactionKind, TransactionStatus};

use super::{CliError, Table, or_dash, print_json, print_page_footer, print_table};

/// List transactions, newest first.
///
/// # Errors
///
/// Returns `CliError` on API or output failure.
pub async fn list(
    client: &ApiClient,
    params: PageParams,
    kind: Option<TransactionKind>,
    status: Option<TransactionStatus>,
    q: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let page = client
        .list_transactions(params, &TransactionFilter { kind, status, q })
        .await?;

    if json {
        return print_json(&page.items);
    }

    let mut table = Table::new(vec![
        "ID", "Reference", "Booking", "User", "Type", "Amount", "Status", "Date",
    ]);
    for t in &page.items {
        table.row(vec![
            t.id.to_string(),
            or_dash(t.reference.as_deref()),
            t.booking_id
                .map_or_else(|| "-".to_string(), |b| format!("#{b}")),
            t.user
                .as_ref()
                .map_or_else(|| "-".to_string(), |u| u.display_name()),
            t.kind.to_string(),
            t.total().display(),
            t.status.to_string(),
            format_timestamp(t.created_at.as_ref()),
        ]);
    }
    print_table(&table, "No transactions found.")?;
    print_page_footer(&page.pagination)
}
