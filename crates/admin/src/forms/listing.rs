//! Listing create/edit and house-rules forms.

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use rentdesk_core::{CategoryId, FeatureId, HouseTypeId};

use super::{checkbox, empty_as_none, field_text};
use crate::api::{Listing, ListingPayload, ListingRules};

/// Listing fields as submitted by the create and edit pages.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListingForm {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    #[serde(default)]
    pub title: String,

    #[validate(length(max = 5000, message = "Description is too long"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,

    #[validate(
        required(message = "Enter a nightly price"),
        custom(function = "positive_price", message = "Price must be greater than zero")
    )]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub price_per_night: Option<Decimal>,

    #[validate(length(max = 120))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub city: Option<String>,

    #[validate(length(max = 255))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub address: Option<String>,

    #[validate(
        required(message = "Enter the number of bedrooms"),
        range(max = 50, message = "Bedrooms must be between 0 and 50")
    )]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub bedrooms: Option<u32>,

    #[validate(
        required(message = "Enter the number of bathrooms"),
        range(max = 50, message = "Bathrooms must be between 0 and 50")
    )]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub bathrooms: Option<u32>,

    #[validate(
        required(message = "Enter the maximum number of guests"),
        range(min = 1, max = 100, message = "Guests must be between 1 and 100")
    )]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_guests: Option<u32>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub category_id: Option<CategoryId>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub house_type_id: Option<HouseTypeId>,

    /// Checked feature boxes; filled by [`ListingForm::from_pairs`].
    #[serde(skip)]
    pub feature_ids: Vec<FeatureId>,
}

fn positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_positive() && !price.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("positive"))
    }
}

impl ListingForm {
    /// Build from raw urlencoded pairs.
    ///
    /// Feature checkboxes repeat the `feature_ids` key, which a plain struct
    /// extractor cannot collect, so the body is taken as pairs.
    ///
    /// # Errors
    ///
    /// Returns the deserializer error if a scalar field has the wrong shape.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, serde_json::Error> {
        let mut map = serde_json::Map::new();
        let mut feature_ids = Vec::new();
        for (key, value) in pairs {
            if key == "feature_ids" {
                if let Ok(id) = value.parse::<FeatureId>() {
                    feature_ids.push(id);
                }
            } else {
                map.insert(key.clone(), serde_json::Value::String(value.clone()));
            }
        }
        let mut form: Self = serde_json::from_value(serde_json::Value::Object(map))?;
        feature_ids.sort();
        feature_ids.dedup();
        form.feature_ids = feature_ids;
        Ok(form)
    }

    /// Pre-fill the edit page from the stored listing.
    #[must_use]
    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            title: listing.title.clone(),
            description: listing.description.clone(),
            price_per_night: Some(listing.price_per_night),
            city: listing.city.clone(),
            address: listing.address.clone(),
            bedrooms: Some(listing.bedrooms),
            bathrooms: Some(listing.bathrooms),
            max_guests: Some(listing.max_guests),
            category_id: listing.category_id,
            house_type_id: listing.house_type_id,
            feature_ids: listing.feature_ids.clone(),
        }
    }

    /// Request body. Call after [`Validate::validate`] succeeds.
    #[must_use]
    pub fn to_payload(&self) -> ListingPayload {
        ListingPayload {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            price_per_night: self.price_per_night.unwrap_or_default(),
            city: self.city.clone(),
            address: self.address.clone(),
            bedrooms: self.bedrooms.unwrap_or_default(),
            bathrooms: self.bathrooms.unwrap_or_default(),
            max_guests: self.max_guests.unwrap_or(1),
            category_id: self.category_id,
            house_type_id: self.house_type_id,
            feature_ids: self.feature_ids.clone(),
        }
    }

    #[must_use]
    pub fn price_text(&self) -> String {
        field_text(self.price_per_night.as_ref())
    }

    #[must_use]
    pub fn bedrooms_text(&self) -> String {
        field_text(self.bedrooms.as_ref())
    }

    #[must_use]
    pub fn bathrooms_text(&self) -> String {
        field_text(self.bathrooms.as_ref())
    }

    #[must_use]
    pub fn max_guests_text(&self) -> String {
        field_text(self.max_guests.as_ref())
    }

    /// Whether a feature box should render checked.
    #[must_use]
    pub fn has_feature(&self, id: &FeatureId) -> bool {
        self.feature_ids.contains(id)
    }
}

/// House rules as submitted by the rules page.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListingRulesForm {
    #[validate(custom(function = "clock_time", message = "Use HH:MM, e.g. 15:00"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub check_in_time: Option<String>,

    #[validate(custom(function = "clock_time", message = "Use HH:MM, e.g. 11:00"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub check_out_time: Option<String>,

    #[serde(default, deserialize_with = "checkbox")]
    pub smoking_allowed: bool,

    #[serde(default, deserialize_with = "checkbox")]
    pub pets_allowed: bool,

    #[serde(default, deserialize_with = "checkbox")]
    pub parties_allowed: bool,

    #[validate(length(max = 2000, message = "Additional rules are too long"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub additional_rules: Option<String>,
}

fn clock_time(value: &str) -> Result<(), ValidationError> {
    chrono::NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| ValidationError::new("time"))
}

impl ListingRulesForm {
    #[must_use]
    pub fn from_rules(rules: &ListingRules) -> Self {
        Self {
            check_in_time: rules.check_in_time.clone(),
            check_out_time: rules.check_out_time.clone(),
            smoking_allowed: rules.smoking_allowed,
            pets_allowed: rules.pets_allowed,
            parties_allowed: rules.parties_allowed,
            additional_rules: rules.additional_rules.clone(),
        }
    }

    #[must_use]
    pub fn to_rules(&self) -> ListingRules {
        ListingRules {
            check_in_time: self.check_in_time.clone(),
            check_out_time: self.check_out_time.clone(),
            smoking_allowed: self.smoking_allowed,
            pets_allowed: self.pets_allowed,
            parties_allowed: self.parties_allowed,
            additional_rules: self.additional_rules.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::forms::FieldErrors;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn valid() -> Vec<(String, String)> {
        pairs(&[
            ("title", "Loft by the canal"),
            ("price_per_night", "120.50"),
            ("bedrooms", "2"),
            ("bathrooms", "1"),
            ("max_guests", "4"),
            ("category_id", "3"),
            ("house_type_id", ""),
            ("feature_ids", "7"),
            ("feature_ids", "1"),
            ("feature_ids", "7"),
        ])
    }

    #[test]
    fn test_valid_listing_form() {
        let form = ListingForm::from_pairs(&valid()).unwrap();
        assert!(form.validate().is_ok());
        let payload = form.to_payload();
        assert_eq!(payload.title, "Loft by the canal");
        assert_eq!(payload.category_id, Some(CategoryId::new(3)));
        assert_eq!(payload.house_type_id, None);
        assert_eq!(payload.feature_ids, vec![FeatureId::new(1), FeatureId::new(7)]);
        assert_eq!(form.price_text(), "120.50");
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut raw = valid();
        raw[0].1 = String::new();
        let form = ListingForm::from_pairs(&raw).unwrap();
        let errors = FieldErrors::from(&form.validate().unwrap_err());
        assert_eq!(
            errors.get("title"),
            Some("Title must be between 1 and 200 characters")
        );
    }

    #[test]
    fn test_price_must_be_positive() {
        for price in ["0", "-5", "", "abc"] {
            let mut raw = valid();
            raw[1].1 = price.to_string();
            let form = ListingForm::from_pairs(&raw).unwrap();
            let errors = FieldErrors::from(&form.validate().unwrap_err());
            assert!(errors.get("price_per_night").is_some(), "price {price:?}");
        }
    }

    #[test]
    fn test_guests_minimum() {
        let mut raw = valid();
        raw[4].1 = "0".to_string();
        let form = ListingForm::from_pairs(&raw).unwrap();
        let errors = FieldErrors::from(&form.validate().unwrap_err());
        assert_eq!(errors.get("max_guests"), Some("Guests must be between 1 and 100"));
    }

    #[test]
    fn test_rules_form_checkboxes_and_times() {
        let form: ListingRulesForm = serde_json::from_value(serde_json::json!({
            "check_in_time": "15:00",
            "check_out_time": "",
            "pets_allowed": "on"
        }))
        .unwrap();
        assert!(form.validate().is_ok());
        let rules = form.to_rules();
        assert!(rules.pets_allowed);
        assert!(!rules.smoking_allowed);
        assert_eq!(rules.check_out_time, None);

        let bad: ListingRulesForm =
            serde_json::from_value(serde_json::json!({"check_in_time": "3pm"})).unwrap();
        let errors = FieldErrors::from(&bad.validate().unwrap_err());
        assert_eq!(errors.get("check_in_time"), Some("Use HH:MM, e.g. 15:00"));
    }
}
