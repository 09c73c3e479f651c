//! `rd-cli lookups list <kind>`

use rentdesk_admin::api::{ApiClient, LookupKind};

use super::{CliError, Table, or_dash, print_json, print_table};

/// List one lookup table.
///
/// # Errors
///
/// Returns `CliError` on API or output failure.
pub async fn list(client: &ApiClient, kind: LookupKind, json: bool) -> Result<(), CliError> {
    let lookups = client.list_lookups(kind).await?;

    if json {
        return print_json(&lookups);
    }

    let mut headers = vec!["ID", "Name"];
    if kind.has_icon() {
        headers.push("Icon");
    }
    headers.push("Description");

    let mut table = Table::new(headers);
    for l in &lookups {
        let mut row = vec![l.id.to_string(), l.name.clone()];
        if kind.has_icon() {
            row.push(or_dash(l.icon.as_deref()));
        }
        row.push(or_dash(l.description.as_deref()));
        table.row(row);
    }
    print_table(&table, &format!("No {} found.", kind.title().to_lowercase()))
}
