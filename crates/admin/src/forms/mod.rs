//! Form submissions, validated before any backend call.
//!
//! HTML forms arrive as urlencoded strings. Numeric inputs go through
//! [`empty_as_none`] so a blank box is "missing" rather than a parse failure,
//! and checkboxes through [`checkbox`] because an unchecked box is simply
//! absent from the body.

mod listing;
mod lookup;
mod setting;
mod status;

pub use listing::{ListingForm, ListingRulesForm};
pub use lookup::LookupForm;
pub use setting::SettingForm;
pub use status::StatusForm;

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use validator::ValidationErrors;

use crate::filters::humanize_label;

/// First error message per field, ready for a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Message for one field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Attach a message that did not come from `validator`.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    /// All messages joined into one line, for toasts.
    #[must_use]
    pub fn summary(&self) -> String {
        self.0.values().cloned().collect::<Vec<_>>().join(" ")
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = BTreeMap::new();
        for (field, list) in errors.field_errors() {
            if let Some(first) = list.first() {
                let message = first.message.as_ref().map_or_else(
                    || format!("{} is invalid", humanize_label(&field)),
                    ToString::to_string,
                );
                out.insert(field.to_string(), message);
            }
        }
        Self(out)
    }
}

/// Deserialize a form value, treating blank or unparseable input as absent.
///
/// # Errors
///
/// Only fails if the value is not a string at all.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            trimmed.parse().ok()
        }
    }))
}

/// Deserialize an HTML checkbox: present means checked.
///
/// # Errors
///
/// Only fails if the value is not a string at all.
pub fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.is_some_and(|v| {
        !matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "" | "false" | "off" | "0" | "no"
        )
    }))
}

/// Render an optional value into an input's `value` attribute.
#[must_use]
pub fn field_text<T: Display>(value: Option<&T>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "empty_as_none")]
        n: Option<u32>,
        #[serde(default, deserialize_with = "checkbox")]
        flag: bool,
    }

    #[test]
    fn test_empty_as_none() {
        let p: Probe = serde_json::from_str(r#"{"n": " 4 "}"#).unwrap();
        assert_eq!(p.n, Some(4));
        let p: Probe = serde_json::from_str(r#"{"n": ""}"#).unwrap();
        assert_eq!(p.n, None);
        let p: Probe = serde_json::from_str(r#"{"n": "four"}"#).unwrap();
        assert_eq!(p.n, None);
    }

    #[test]
    fn test_checkbox_absent_is_false() {
        let p: Probe = serde_json::from_str("{}").unwrap();
        assert!(!p.flag);
        let p: Probe = serde_json::from_str(r#"{"flag": "on"}"#).unwrap();
        assert!(p.flag);
        let p: Probe = serde_json::from_str(r#"{"flag": "false"}"#).unwrap();
        assert!(!p.flag);
    }

    #[test]
    fn test_field_text() {
        assert_eq!(field_text(Some(&3)), "3");
        assert_eq!(field_text::<u32>(None), "");
    }
}
