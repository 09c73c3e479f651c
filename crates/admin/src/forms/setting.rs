//! Typed setting editor form.

use serde::Deserialize;
use validator::Validate;

use rentdesk_core::{SettingType, SettingValueError};

/// Raw value as typed into the editor.
///
/// `bool` settings render as a checkbox, so an absent value means `false`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SettingForm {
    #[validate(length(max = 65_535, message = "Value is too long"))]
    #[serde(default)]
    pub value: String,
}

impl SettingForm {
    /// Convert to the JSON value the backend stores.
    ///
    /// # Errors
    ///
    /// Returns the type's parse error if the text does not fit the type.
    pub fn typed_value(
        &self,
        kind: SettingType,
        options: &[String],
    ) -> Result<serde_json::Value, SettingValueError> {
        kind.parse_input(&self.value, options)
    }
}
