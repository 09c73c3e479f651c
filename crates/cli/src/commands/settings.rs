//! `rd-cli settings ...`

use rentdesk_admin::api::{ApiClient, Setting};

use super::{CliError, Table, print_json, print_line, print_table};

/// List every setting, grouped by section.
///
/// # Errors
///
/// Returns `CliError` on API or output failure.
pub async fn list(client: &ApiClient, json: bool) -> Result<(), CliError> {
    let mut settings = client.list_settings().await?;

    if json {
        return print_json(&settings);
    }

    // Stable sort keeps the backend's order within a group.
    settings.sort_by(|a, b| a.group_name().cmp(b.group_name()));

    let mut table = Table::new(vec!["ID", "Group", "Key", "Type", "Value"]);
    for s in &settings {
        let mut value = s.display_value().replace('\n', " ");
        if value.chars().count() > 60 {
            value = value.chars().take(57).collect::<String>() + "...";
        }
        table.row(vec![
            s.id.to_string(),
            s.group_name().to_string(),
            s.key.clone(),
            s.kind.to_string(),
            value,
        ]);
    }
    print_table(&table, "No settings defined.")
}

/// Find a setting by key, or by numeric id.
#[must_use]
pub fn find<'a>(settings: &'a [Setting], key: &str) -> Option<&'a Setting> {
    settings
        .iter()
        .find(|s| s.key == key)
        .or_else(|| {
            let id = key.parse().ok()?;
            settings.iter().find(|s| s.id == id)
        })
}

/// Convert `raw` to the setting's declared type and save it.
///
/// # Errors
///
/// Returns `CliError::InvalidValue` without calling the backend when the value
/// does not fit the type.
pub async fn set(client: &ApiClient, key: &str, raw: &str) -> Result<(), CliError> {
    let settings = client.list_settings().await?;
    let setting = find(&settings, key).ok_or_else(|| CliError::NotFound(format!("setting {key}")))?;

    let value = setting
        .kind
        .parse_input(raw, &setting.options)
        .map_err(|e| CliError::InvalidValue(format!("{}: {e}", setting.key)))?;

    let ack = client.update_setting(setting.id, value).await?;
    tracing::info!(key = %setting.key, "Setting updated");
    print_line(
        &ack.message
            .unwrap_or_else(|| format!("{} saved.", setting.title())),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_key_or_id() {
        let settings: Vec<Setting> = serde_json::from_str(
            r#"[
                {"id": 4, "key": "site_name", "type": "text", "value": "Rentdesk"},
                {"id": 9, "key": "service_fee", "type": "number", "value": 10}
            ]"#,
        )
        .unwrap();
        assert_eq!(find(&settings, "service_fee").unwrap().id.as_i64(), 9);
        assert_eq!(find(&settings, "4").unwrap().key, "site_name");
        assert!(find(&settings, "missing").is_none());
    }
}
