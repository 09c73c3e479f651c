//! Status enums for marketplace resources.
//!
//! The backend owns every status; these enums mirror its wire names
//! (snake_case) so the dashboard can decide which actions to offer.

use serde::{Deserialize, Serialize};

/// Error returned when a status string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value}")]
pub struct UnknownStatus {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Implements `Display`, `FromStr` and `as_str` over a fixed table of wire names.
macro_rules! wire_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The snake_case name used on the wire and in query strings.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownStatus;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(UnknownStatus {
                        kind: $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

/// Reservation lifecycle.
///
/// ```text
/// pending ──▶ accepted ──▶ confirmed ──▶ completed
///    │            │            │
///    ├──▶ rejected└──▶ cancelled◀┘
///    └──▶ cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Accepted,
    Confirmed,
    Completed,
    Cancelled,
    Rejected,
}

wire_enum!(BookingStatus, "booking status", {
    Pending => "pending",
    Accepted => "accepted",
    Confirmed => "confirmed",
    Completed => "completed",
    Cancelled => "cancelled",
    Rejected => "rejected",
});

impl BookingStatus {
    /// Statuses an admin may move a booking to from this one.
    ///
    /// The backend re-checks every transition; this table only decides which
    /// buttons the dashboard renders.
    #[must_use]
    pub const fn next_statuses(&self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Accepted, Self::Rejected, Self::Cancelled],
            Self::Accepted => &[Self::Confirmed, Self::Cancelled],
            Self::Confirmed => &[Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled | Self::Rejected => &[],
        }
    }

    /// Whether `target` is a legal next status.
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        self.next_statuses().contains(&target)
    }

    /// Whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.next_statuses().is_empty()
    }

    /// Button label for moving a booking *into* this status.
    #[must_use]
    pub const fn action_label(&self) -> &'static str {
        match self {
            Self::Pending => "Reopen",
            Self::Accepted => "Accept",
            Self::Confirmed => "Confirm",
            Self::Completed => "Mark completed",
            Self::Cancelled => "Cancel",
            Self::Rejected => "Reject",
        }
    }

    /// Whether moving into this status should be styled as destructive.
    #[must_use]
    pub const fn is_destructive(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Rejected)
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Confirmed => "Confirmed",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Rejected => "Rejected",
        }
    }
}

/// Moderation state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    #[default]
    Pending,
    Active,
    Inactive,
    Rejected,
}

wire_enum!(ListingStatus, "listing status", {
    Pending => "pending",
    Active => "active",
    Inactive => "inactive",
    Rejected => "rejected",
});

impl ListingStatus {
    /// Statuses an admin may move a listing to from this one.
    #[must_use]
    pub const fn next_statuses(&self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Active, Self::Rejected],
            Self::Active => &[Self::Inactive],
            Self::Inactive => &[Self::Active],
            Self::Rejected => &[Self::Pending],
        }
    }

    /// Whether `target` is a legal next status.
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        self.next_statuses().contains(&target)
    }

    /// Button label for moving a listing into this status.
    #[must_use]
    pub const fn action_label(&self) -> &'static str {
        match self {
            Self::Pending => "Send back to review",
            Self::Active => "Activate",
            Self::Inactive => "Deactivate",
            Self::Rejected => "Reject",
        }
    }
}

/// Role of a marketplace account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Guest,
    Host,
    Admin,
}

wire_enum!(UserRole, "user role", {
    Guest => "guest",
    Host => "host",
    Admin => "admin",
});

/// Whether an account may sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Suspended,
}

wire_enum!(UserStatus, "user status", {
    Active => "active",
    Suspended => "suspended",
});

impl UserStatus {
    /// The status the single toggle button on the user page moves to.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Active => Self::Suspended,
            Self::Suspended => Self::Active,
        }
    }
}

/// What a money movement was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    #[default]
    Payment,
    Refund,
    Payout,
    Fee,
}

wire_enum!(TransactionKind, "transaction kind", {
    Payment => "payment",
    Refund => "refund",
    Payout => "payout",
    Fee => "fee",
});

/// Settlement state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

wire_enum!(TransactionStatus, "transaction status", {
    Pending => "pending",
    Completed => "completed",
    Failed => "failed",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        let s = BookingStatus::Pending;
        assert!(s.can_transition_to(BookingStatus::Accepted));
        assert!(s.can_transition_to(BookingStatus::Rejected));
        assert!(s.can_transition_to(BookingStatus::Cancelled));
        assert!(!s.can_transition_to(BookingStatus::Confirmed));
        assert!(!s.can_transition_to(BookingStatus::Completed));
    }

    #[test]
    fn test_accepted_and_confirmed_transitions() {
        assert_eq!(
            BookingStatus::Accepted.next_statuses(),
            &[BookingStatus::Confirmed, BookingStatus::Cancelled]
        );
        assert_eq!(
            BookingStatus::Confirmed.next_statuses(),
            &[BookingStatus::Completed, BookingStatus::Cancelled]
        );
        assert!(!BookingStatus::Accepted.can_transition_to(BookingStatus::Rejected));
    }

    #[test]
    fn test_terminal_statuses() {
        for s in [
            BookingStatus::Completed,
            BookingStatus::Cancelled,
            BookingStatus::Rejected,
        ] {
            assert!(s.is_terminal(), "{s} should be terminal");
            for target in BookingStatus::ALL {
                assert!(!s.can_transition_to(*target));
            }
        }
    }

    #[test]
    fn test_no_self_transitions() {
        for s in BookingStatus::ALL {
            assert!(!s.can_transition_to(*s));
        }
    }

    #[test]
    fn test_every_transition_target_has_a_predecessor() {
        // Pending is the only entry point; every other status is reachable.
        for target in BookingStatus::ALL
            .iter()
            .filter(|s| **s != BookingStatus::Pending)
        {
            assert!(
                BookingStatus::ALL
                    .iter()
                    .any(|from| from.can_transition_to(*target)),
                "{target} is unreachable"
            );
        }
    }

    #[test]
    fn test_booking_status_wire_names() {
        assert_eq!(BookingStatus::Cancelled.to_string(), "cancelled");
        assert_eq!(
            "confirmed".parse::<BookingStatus>(),
            Ok(BookingStatus::Confirmed)
        );
        let err = "archived".parse::<BookingStatus>().unwrap_err();
        assert_eq!(err.to_string(), "invalid booking status: archived");
        let json = serde_json::to_string(&BookingStatus::Accepted).unwrap_or_default();
        assert_eq!(json, "\"accepted\"");
    }

    #[test]
    fn test_listing_transitions() {
        assert!(ListingStatus::Pending.can_transition_to(ListingStatus::Active));
        assert!(ListingStatus::Active.can_transition_to(ListingStatus::Inactive));
        assert!(!ListingStatus::Active.can_transition_to(ListingStatus::Rejected));
        assert!(ListingStatus::Inactive.can_transition_to(ListingStatus::Active));
    }

    #[test]
    fn test_user_status_toggle() {
        assert_eq!(UserStatus::Active.toggled(), UserStatus::Suspended);
        assert_eq!(UserStatus::Suspended.toggled(), UserStatus::Active);
    }

    #[test]
    fn test_transaction_enums_parse() {
        assert_eq!("payout".parse::<TransactionKind>(), Ok(TransactionKind::Payout));
        assert_eq!(
            "failed".parse::<TransactionStatus>(),
            Ok(TransactionStatus::Failed)
        );
        assert!("".parse::<UserRole>().is_err());
    }
}
