//! Response envelope shared by every backend endpoint.

use std::collections::BTreeMap;

use serde::Deserialize;

use rentdesk_core::Pagination;

/// `{ success, data, message?, meta?, info? }`.
///
/// A missing `success` flag on a 2xx response is treated as success.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Whether the backend considers the request successful.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Payload.
    pub data: Option<T>,
    /// Human readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Pagination metadata on list responses.
    #[serde(default)]
    pub meta: Option<ListMeta>,
    /// Aggregate counts on list responses (e.g. bookings per status).
    #[serde(default)]
    pub info: Option<BTreeMap<String, serde_json::Value>>,
}

const fn default_success() -> bool {
    true
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListMeta {
    /// Total rows across all pages.
    #[serde(default)]
    pub total: Option<u64>,
    /// Last page number.
    #[serde(default)]
    pub last_page: Option<u32>,
    /// Page the backend actually served.
    #[serde(default)]
    pub current_page: Option<u32>,
    /// Page size the backend actually used.
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// One page of a collection plus the envelope's aggregate counts.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Rows on this page.
    pub items: Vec<T>,
    /// Where this page sits in the collection.
    pub pagination: Pagination,
    /// Raw `info` object.
    pub info: BTreeMap<String, serde_json::Value>,
}

impl<T> Page<T> {
    /// Integer count from `info`, if present.
    ///
    /// Counts sent as numeric strings are accepted too.
    #[must_use]
    pub fn count(&self, key: &str) -> Option<i64> {
        match self.info.get(key)? {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Every integer count in `info`, in key order.
    #[must_use]
    pub fn counts(&self) -> Vec<(String, i64)> {
        self.info
            .keys()
            .filter_map(|k| self.count(k).map(|v| (k.clone(), v)))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_success_defaults_true() {
        let env: Envelope<u32> = serde_json::from_str(r#"{"data": 5}"#).unwrap();
        assert!(env.success);
        assert_eq!(env.data, Some(5));
    }

    #[test]
    fn test_unsuccessful_envelope() {
        let env: Envelope<u32> =
            serde_json::from_str(r#"{"success": false, "message": "nope"}"#).unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("nope"));
    }

    #[test]
    fn test_counts_accept_strings() {
        let page: Page<()> = Page {
            items: vec![],
            pagination: Pagination::new(1, 15, 0),
            info: serde_json::from_str(r#"{"pending": 3, "confirmed": "7", "label": "x"}"#)
                .unwrap(),
        };
        assert_eq!(page.count("pending"), Some(3));
        assert_eq!(page.count("confirmed"), Some(7));
        assert_eq!(page.count("label"), None);
        assert_eq!(
            page.counts(),
            vec![("confirmed".to_string(), 7), ("pending".to_string(), 3)]
        );
    }
}
