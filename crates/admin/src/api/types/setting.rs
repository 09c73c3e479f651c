//! Setting resource.

use serde::{Deserialize, Serialize};

use rentdesk_core::{SettingId, SettingType};

/// A typed key/value configuration record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub id: SettingId,
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Section the settings page groups this record under.
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: SettingType,
    #[serde(default)]
    pub value: serde_json::Value,
    /// Allowed values for `select` settings.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Setting {
    /// Label, falling back to the key.
    #[must_use]
    pub fn title(&self) -> &str {
        self.label
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(&self.key)
    }

    /// Group name, `General` when unset.
    #[must_use]
    pub fn group_name(&self) -> &str {
        self.group
            .as_deref()
            .filter(|g| !g.is_empty())
            .unwrap_or("General")
    }

    /// Current value rendered for a form field.
    #[must_use]
    pub fn display_value(&self) -> String {
        self.kind.display_value(&self.value)
    }
}

/// Body of a value update.
#[derive(Debug, Clone, Serialize)]
pub struct SettingUpdate {
    pub value: serde_json::Value,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_deserialize() {
        let setting: Setting = serde_json::from_str(
            r#"{"id": 1, "key": "site_name", "label": "Site name", "group": "site", "type": "text", "value": "Rentdesk"}"#,
        )
        .unwrap();
        assert_eq!(setting.kind, SettingType::Text);
        assert_eq!(setting.title(), "Site name");
        assert_eq!(setting.group_name(), "site");
        assert_eq!(setting.display_value(), "Rentdesk");
    }

    #[test]
    fn test_setting_fallbacks() {
        let setting: Setting =
            serde_json::from_str(r#"{"id": 2, "key": "maintenance", "type": "bool", "value": true}"#)
                .unwrap();
        assert_eq!(setting.kind, SettingType::Bool);
        assert_eq!(setting.title(), "maintenance");
        assert_eq!(setting.group_name(), "General");
        assert!(setting.options.is_empty());
    }
}
