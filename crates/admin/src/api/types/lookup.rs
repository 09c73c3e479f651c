//! Listing lookup tables: features, categories and house types.
//!
//! All three share one shape and one set of endpoints, so a single client is
//! parametrised by [`LookupKind`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use rentdesk_core::LookupId;

/// Which lookup table a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupKind {
    Features,
    Categories,
    HouseTypes,
}

impl LookupKind {
    pub const ALL: [Self; 3] = [Self::Features, Self::Categories, Self::HouseTypes];

    /// URL segment, shared by the backend and the dashboard routes.
    #[must_use]
    pub const fn segment(&self) -> &'static str {
        match self {
            Self::Features => "features",
            Self::Categories => "categories",
            Self::HouseTypes => "house-types",
        }
    }

    /// Plural heading.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Features => "Features",
            Self::Categories => "Categories",
            Self::HouseTypes => "House types",
        }
    }

    /// Singular noun for buttons and toasts.
    #[must_use]
    pub const fn singular(&self) -> &'static str {
        match self {
            Self::Features => "Feature",
            Self::Categories => "Category",
            Self::HouseTypes => "House type",
        }
    }

    /// Whether records of this kind carry an icon name.
    #[must_use]
    pub const fn has_icon(&self) -> bool {
        matches!(self, Self::Features)
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for LookupKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.segment() == s || (s == "house_types" && *k == Self::HouseTypes))
            .ok_or_else(|| format!("unknown lookup table: {s}"))
    }
}

/// A feature, category or house type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lookup {
    pub id: LookupId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body sent to create or rename a lookup record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_round_trip() {
        for kind in LookupKind::ALL {
            assert_eq!(kind.segment().parse::<LookupKind>().unwrap(), kind);
        }
        assert_eq!(
            "house_types".parse::<LookupKind>().unwrap(),
            LookupKind::HouseTypes
        );
        assert!("amenities".parse::<LookupKind>().is_err());
    }

    #[test]
    fn test_serde_uses_segment() {
        assert_eq!(
            serde_json::to_value(LookupKind::HouseTypes).unwrap(),
            serde_json::json!("house-types")
        );
    }

    #[test]
    fn test_payload_skips_empty_optionals() {
        let body = LookupPayload {
            name: "Wifi".to_string(),
            icon: None,
            description: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"name": "Wifi"})
        );
    }
}
