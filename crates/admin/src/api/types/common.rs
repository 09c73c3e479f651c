//! Shapes and deserializers shared by several resources.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use rentdesk_core::UserId;

/// Compact user reference embedded in bookings, listings and transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserSummary {
    /// Name, falling back to the email, then to `#id`.
    #[must_use]
    pub fn display_name(&self) -> String {
        if !self.name.trim().is_empty() {
            return self.name.clone();
        }
        self.email
            .clone()
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}

/// Accept `2026-10-19`, `2026-10-19T00:00:00Z` or `2026-10-19 00:00:00`.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        s.get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }))
}

/// Accept RFC 3339 timestamps or `YYYY-MM-DD HH:MM:SS` (read as UTC).
///
/// Unparseable timestamps become `None` rather than failing the whole record.
pub fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| parse_timestamp(&s)))
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format a timestamp for tables, or `-` when absent.
#[must_use]
pub fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    ts.map_or_else(|| "-".to_string(), |t| t.format("%b %d, %Y %H:%M").to_string())
}

/// Format a date for tables.
#[must_use]
pub fn format_date(date: Option<&NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.format("%b %d, %Y").to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Dates {
        #[serde(default, deserialize_with = "lenient_date")]
        day: Option<NaiveDate>,
        #[serde(default, deserialize_with = "lenient_datetime")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_lenient_date_formats() {
        for raw in ["2026-10-19", "2026-10-19T12:00:00Z", "2026-10-19 12:00:00"] {
            let parsed: Dates =
                serde_json::from_value(serde_json::json!({ "day": raw })).unwrap();
            assert_eq!(parsed.day, NaiveDate::from_ymd_opt(2026, 10, 19));
        }
    }

    #[test]
    fn test_lenient_datetime_formats() {
        let parsed: Dates =
            serde_json::from_str(r#"{"at": "2026-10-19T08:30:00.000000Z"}"#).unwrap();
        assert_eq!(
            parsed.at.map(|t| t.to_rfc3339()),
            Some("2026-10-19T08:30:00+00:00".to_string())
        );

        let parsed: Dates = serde_json::from_str(r#"{"at": "2026-10-19 08:30:00"}"#).unwrap();
        assert!(parsed.at.is_some());

        let parsed: Dates = serde_json::from_str(r#"{"at": "yesterday"}"#).unwrap();
        assert!(parsed.at.is_none());
    }

    #[test]
    fn test_missing_and_null_dates() {
        let parsed: Dates = serde_json::from_str(r#"{"day": null}"#).unwrap();
        assert!(parsed.day.is_none());
        assert!(parsed.at.is_none());
    }

    #[test]
    fn test_user_summary_display_name() {
        let named: UserSummary = serde_json::from_str(r#"{"id": 3, "name": "Ana"}"#).unwrap();
        assert_eq!(named.display_name(), "Ana");
        let email_only: UserSummary =
            serde_json::from_str(r#"{"id": 3, "name": "", "email": "ana@x.io"}"#).unwrap();
        assert_eq!(email_only.display_name(), "ana@x.io");
        let bare: UserSummary = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(bare.display_name(), "#3");
    }
}
