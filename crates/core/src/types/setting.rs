//! Typed values for the generic settings editor.
//!
//! Each backend setting declares a type; the dashboard renders one input
//! per type and converts the submitted string back into the JSON value the
//! backend expects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Errors produced while converting a submitted form value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingValueError {
    /// A required value was left blank.
    #[error("value cannot be empty")]
    Empty,
    /// Not a number.
    #[error("'{0}' is not a number")]
    NotANumber(String),
    /// Not a recognised boolean spelling.
    #[error("'{0}' is not a yes/no value")]
    NotABool(String),
    /// Malformed JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    /// Not an email address.
    #[error("'{0}' is not an email address")]
    InvalidEmail(String),
    /// Not an absolute http(s) URL.
    #[error("'{0}' is not an http(s) URL")]
    InvalidUrl(String),
    /// Not one of the declared options.
    #[error("'{0}' is not one of the allowed options")]
    NotAnOption(String),
}

/// Declared type of a setting.
///
/// Unknown wire values deserialize as [`SettingType::Text`] so a new backend
/// type never breaks the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SettingType {
    Textarea,
    Number,
    Bool,
    Json,
    Html,
    Email,
    Url,
    Select,
    #[default]
    #[serde(other)]
    Text,
}

impl SettingType {
    /// Wire name of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Json => "json",
            Self::Html => "html",
            Self::Email => "email",
            Self::Url => "url",
            Self::Select => "select",
        }
    }

    /// Whether the editor should use a multi-line input.
    #[must_use]
    pub const fn is_multiline(&self) -> bool {
        matches!(self, Self::Textarea | Self::Json | Self::Html)
    }

    /// Convert a submitted form string into the typed value.
    ///
    /// # Errors
    ///
    /// Returns [`SettingValueError`] when the input does not fit the type.
    pub fn parse_input(&self, raw: &str, options: &[String]) -> Result<Value, SettingValueError> {
        let trimmed = raw.trim();
        match self {
            Self::Text => {
                if trimmed.is_empty() {
                    return Err(SettingValueError::Empty);
                }
                Ok(Value::String(trimmed.to_owned()))
            }
            // Long-form text keeps its whitespace; html may be cleared entirely.
            Self::Textarea | Self::Html => Ok(Value::String(raw.to_owned())),
            Self::Number => parse_number(trimmed),
            Self::Bool => parse_bool(trimmed).map(Value::Bool),
            Self::Json => serde_json::from_str(trimmed)
                .map_err(|e| SettingValueError::InvalidJson(e.to_string())),
            Self::Email => {
                if is_email(trimmed) {
                    Ok(Value::String(trimmed.to_owned()))
                } else {
                    Err(SettingValueError::InvalidEmail(trimmed.to_owned()))
                }
            }
            Self::Url => match url::Url::parse(trimmed) {
                Ok(u) if matches!(u.scheme(), "http" | "https") => {
                    Ok(Value::String(trimmed.to_owned()))
                }
                _ => Err(SettingValueError::InvalidUrl(trimmed.to_owned())),
            },
            Self::Select => {
                if !options.is_empty() && !options.iter().any(|o| o == trimmed) {
                    return Err(SettingValueError::NotAnOption(trimmed.to_owned()));
                }
                Ok(Value::String(trimmed.to_owned()))
            }
        }
    }

    /// Render a stored value for pre-filling the editor.
    #[must_use]
    pub fn display_value(&self, value: &Value) -> String {
        match (self, value) {
            (_, Value::Null) => String::new(),
            (Self::Json, v) => serde_json::to_string_pretty(v).unwrap_or_default(),
            (Self::Bool, v) => value_is_truthy(v).to_string(),
            (_, Value::String(s)) => s.clone(),
            (_, v) => v.to_string(),
        }
    }
}

impl std::fmt::Display for SettingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_number(s: &str) -> Result<Value, SettingValueError> {
    if let Ok(i) = s.parse::<i64>() {
        return Ok(Value::from(i));
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| SettingValueError::NotANumber(s.to_owned()))
}

fn parse_bool(s: &str) -> Result<bool, SettingValueError> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Ok(true),
        // An unchecked checkbox submits nothing at all.
        "" | "false" | "off" | "0" | "no" => Ok(false),
        _ => Err(SettingValueError::NotABool(s.to_owned())),
    }
}

fn value_is_truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => parse_bool(s).unwrap_or(false),
        _ => false,
    }
}

fn is_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !s.contains(' ')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_rejects_blank() {
        assert_eq!(
            SettingType::Text.parse_input("   ", &[]),
            Err(SettingValueError::Empty)
        );
        assert_eq!(
            SettingType::Text.parse_input(" Rentdesk ", &[]),
            Ok(json!("Rentdesk"))
        );
    }

    #[test]
    fn test_html_may_be_empty() {
        assert_eq!(SettingType::Html.parse_input("", &[]), Ok(json!("")));
    }

    #[test]
    fn test_number_integer_and_float() {
        assert_eq!(SettingType::Number.parse_input("12", &[]), Ok(json!(12)));
        assert_eq!(SettingType::Number.parse_input("2.5", &[]), Ok(json!(2.5)));
        assert!(matches!(
            SettingType::Number.parse_input("twelve", &[]),
            Err(SettingValueError::NotANumber(_))
        ));
        assert!(SettingType::Number.parse_input("NaN", &[]).is_err());
    }

    #[test]
    fn test_bool_spellings() {
        for yes in ["true", "on", "1", "YES"] {
            assert_eq!(SettingType::Bool.parse_input(yes, &[]), Ok(json!(true)));
        }
        for no in ["", "false", "off", "0", "no"] {
            assert_eq!(SettingType::Bool.parse_input(no, &[]), Ok(json!(false)));
        }
        assert!(SettingType::Bool.parse_input("maybe", &[]).is_err());
    }

    #[test]
    fn test_json_parsing() {
        assert_eq!(
            SettingType::Json.parse_input(r#"{"a": [1, 2]}"#, &[]),
            Ok(json!({"a": [1, 2]}))
        );
        assert!(matches!(
            SettingType::Json.parse_input("{broken", &[]),
            Err(SettingValueError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_email_and_url() {
        assert!(SettingType::Email.parse_input("ops@rentdesk.io", &[]).is_ok());
        assert!(SettingType::Email.parse_input("ops@", &[]).is_err());
        assert!(SettingType::Url.parse_input("https://rentdesk.io/help", &[]).is_ok());
        assert!(SettingType::Url.parse_input("ftp://rentdesk.io", &[]).is_err());
        assert!(SettingType::Url.parse_input("not a url", &[]).is_err());
    }

    #[test]
    fn test_select_restricts_to_options() {
        let options = vec!["usd".to_owned(), "eur".to_owned()];
        assert_eq!(
            SettingType::Select.parse_input("eur", &options),
            Ok(json!("eur"))
        );
        assert!(SettingType::Select.parse_input("gbp", &options).is_err());
        assert!(SettingType::Select.parse_input("gbp", &[]).is_ok());
    }

    #[test]
    fn test_unknown_type_falls_back_to_text() {
        let ty: SettingType = serde_json::from_str("\"color\"").unwrap_or(SettingType::Json);
        assert_eq!(ty, SettingType::Text);
        let ty: SettingType = serde_json::from_str("\"text\"").unwrap_or(SettingType::Json);
        assert_eq!(ty, SettingType::Text);
        let ty: SettingType = serde_json::from_str("\"select\"").unwrap_or(SettingType::Json);
        assert_eq!(ty, SettingType::Select);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(SettingType::Bool.display_value(&json!(1)), "true");
        assert_eq!(SettingType::Bool.display_value(&json!("off")), "false");
        assert_eq!(SettingType::Number.display_value(&json!(3)), "3");
        assert_eq!(SettingType::Text.display_value(&Value::Null), "");
        assert!(SettingType::Json.display_value(&json!({"a": 1})).contains("\"a\": 1"));
    }
}
