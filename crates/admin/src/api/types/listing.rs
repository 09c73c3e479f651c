//! Listing resource.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rentdesk_core::{CategoryId, FeatureId, HouseTypeId, ListingId, ListingStatus, Price};

use super::common::{UserSummary, lenient_datetime};

/// House rules attached to a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRules {
    /// Earliest check-in, e.g. `15:00`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<String>,
    /// Latest check-out, e.g. `11:00`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<String>,
    #[serde(default)]
    pub smoking_allowed: bool,
    #[serde(default)]
    pub pets_allowed: bool,
    #[serde(default)]
    pub parties_allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_rules: Option<String>,
}

/// A rentable property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub price_per_night: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(default)]
    pub max_guests: u32,
    #[serde(default)]
    pub host: Option<UserSummary>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub house_type_id: Option<HouseTypeId>,
    #[serde(default)]
    pub feature_ids: Vec<FeatureId>,
    #[serde(default)]
    pub rules: Option<ListingRules>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Listing {
    /// Nightly price with currency.
    #[must_use]
    pub fn nightly(&self) -> Price {
        Price::new(self.price_per_night, self.currency.clone())
    }

    /// Whether a feature is attached, for pre-checking form boxes.
    #[must_use]
    pub fn has_feature(&self, id: FeatureId) -> bool {
        self.feature_ids.contains(&id)
    }
}

/// Body sent to create or update a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price_per_night: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub max_guests: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_type_id: Option<HouseTypeId>,
    pub feature_ids: Vec<FeatureId>,
}

/// Body of a partial status update.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ListingStatusUpdate {
    pub status: ListingStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_deserialize() {
        let listing: Listing = serde_json::from_str(
            r#"{
                "id": 4,
                "title": "Loft by the canal",
                "status": "active",
                "price_per_night": "120.5",
                "currency": "USD",
                "bedrooms": 2,
                "bathrooms": 1,
                "max_guests": 4,
                "category_id": 3,
                "feature_ids": [1, 7],
                "rules": {"check_in_time": "15:00", "pets_allowed": true},
                "photos": ["a.jpg"]
            }"#,
        )
        .unwrap();

        assert_eq!(listing.status, ListingStatus::Active);
        assert_eq!(listing.nightly().display(), "120.50 USD");
        assert!(listing.has_feature(FeatureId::new(7)));
        assert!(!listing.has_feature(FeatureId::new(2)));
        let rules = listing.rules.unwrap();
        assert!(rules.pets_allowed);
        assert!(!rules.smoking_allowed);
        assert_eq!(rules.check_in_time.as_deref(), Some("15:00"));
    }

    #[test]
    fn test_rules_skip_absent_optionals() {
        let rules = ListingRules {
            smoking_allowed: true,
            ..ListingRules::default()
        };
        assert_eq!(
            serde_json::to_value(&rules).unwrap(),
            serde_json::json!({
                "smoking_allowed": true,
                "pets_allowed": false,
                "parties_allowed": false
            })
        );
    }
}
