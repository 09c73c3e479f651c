//! `rd-cli users ...`

use rentdesk_admin::api::{ApiClient, PageParams, UserFilter, format_timestamp};
use rentdesk_core::{UserId, UserRole, UserStatus};

use super::{CliError, Table, or_dash, print_details, print_json, print_page_footer, print_table};

/// List users.
///
/// # Errors
///
/// Returns `CliError` on API or output failure.
pub async fn list(
    client: &ApiClient,
    params: PageParams,
    role: Option<UserRole>,
    status: Option<UserStatus>,
    q: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let page = client
        .list_users(params, &UserFilter { role, status, q })
        .await?;

    if json {
        return print_json(&page.items);
    }

    let mut table = Table::new(vec!["ID", "Name", "Email", "Role", "Status", "Joined"]);
    for u in &page.items {
        table.row(vec![
            u.id.to_string(),
            or_dash(Some(u.name.as_str())),
            u.email.clone(),
            u.role.to_string(),
            u.status.to_string(),
            format_timestamp(u.created_at.as_ref()),
        ]);
    }
    print_table(&table, "No users found.")?;
    print_page_footer(&page.pagination)
}

/// Show one user.
///
/// # Errors
///
/// Returns `CliError::NotFound` if the user does not exist.
pub async fn show(client: &ApiClient, id: UserId, json: bool) -> Result<(), CliError> {
    let user = client
        .get_user(id)
        .await?
        .ok_or_else(|| CliError::NotFound(format!("user {id}")))?;

    if json {
        return print_json(&user);
    }

    print_details(&[
        ("Name", or_dash(Some(user.name.as_str()))),
        ("Email", user.email.clone()),
        ("Phone", or_dash(user.phone.as_deref())),
        ("Role", user.role.to_string()),
        ("Status", user.status.to_string()),
        ("Verified", if user.verified { "yes" } else { "no" }.to_string()),
        ("Joined", format_timestamp(user.created_at.as_ref())),
    ])
}
