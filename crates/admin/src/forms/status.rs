//! Status transition form shared by bookings, listings and users.

use serde::Deserialize;
use validator::Validate;

use super::empty_as_none;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StatusForm {
    /// Target status wire name.
    #[validate(length(min = 1, message = "Choose a status"))]
    #[serde(default)]
    pub status: String,

    /// Optional note stored with a booking transition.
    #[validate(length(max = 500, message = "Note is too long"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub note: Option<String>,
}

impl StatusForm {
    /// Parse the target into a status enum.
    ///
    /// # Errors
    ///
    /// Returns the enum's parse error for unknown wire names.
    pub fn target<S: std::str::FromStr>(&self) -> Result<S, S::Err> {
        self.status.trim().parse()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rentdesk_core::BookingStatus;

    use super::*;

    #[test]
    fn test_target_parses_wire_name() {
        let form = StatusForm {
            status: "accepted".to_string(),
            note: None,
        };
        assert!(form.validate().is_ok());
        assert_eq!(form.target::<BookingStatus>().unwrap(), BookingStatus::Accepted);
    }

    #[test]
    fn test_empty_status_invalid() {
        assert!(StatusForm::default().validate().is_err());
        let form = StatusForm {
            status: "archived".to_string(),
            note: None,
        };
        assert!(form.target::<BookingStatus>().is_err());
    }
}
