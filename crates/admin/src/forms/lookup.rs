//! Feature / category / house-type form.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use super::empty_as_none;
use crate::api::{Lookup, LookupPayload};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LookupForm {
    #[validate(
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"),
        custom(function = "not_blank", message = "Name is required")
    )]
    #[serde(default)]
    pub name: String,

    #[validate(length(max = 64, message = "Icon name is too long"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub icon: Option<String>,

    #[validate(length(max = 500, message = "Description is too long"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
}

impl LookupForm {
    #[must_use]
    pub fn from_lookup(lookup: &Lookup) -> Self {
        Self {
            name: lookup.name.clone(),
            icon: lookup.icon.clone(),
            description: lookup.description.clone(),
        }
    }

    #[must_use]
    pub fn to_payload(&self) -> LookupPayload {
        LookupPayload {
            name: self.name.trim().to_string(),
            icon: self.icon.clone(),
            description: self.description.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_name_required() {
        let form = LookupForm::default();
        assert!(form.validate().is_err());

        let form: LookupForm =
            serde_json::from_value(serde_json::json!({"name": " Wifi ", "icon": ""})).unwrap();
        assert!(form.validate().is_ok());
        assert_eq!(form.to_payload().name, "Wifi");
        assert_eq!(form.to_payload().icon, None);
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let form = LookupForm {
            name: "   ".to_string(),
            ..LookupForm::default()
        };
        let errors = crate::forms::FieldErrors::from(&form.validate().unwrap_err());
        assert_eq!(errors.get("name"), Some("Name is required"));
    }
}
