//! Newtype IDs for type-safe resource references.
//!
//! Every resource the backend admin API exposes is keyed by an integer. The
//! `define_id!` macro wraps those integers so a booking id can never be sent
//! to a listing endpoint by accident.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>`/`Into<i64>`, `Display` and `FromStr`
///
/// # Example
///
/// ```rust
/// # use rentdesk_core::define_id;
/// define_id!(GuestId);
/// define_id!(RoomId);
///
/// let guest_id = GuestId::new(1);
/// let room_id = RoomId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: GuestId = room_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(BookingId);
define_id!(ListingId);
define_id!(UserId);
define_id!(SettingId);
define_id!(TransactionId);
define_id!(FeatureId);
define_id!(CategoryId);
define_id!(HouseTypeId);

// Features, categories and house types share one generic editor, so their
// rows are addressed through a single lookup id.
define_id!(LookupId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_and_parse() {
        let id = BookingId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(" 42 ".parse::<BookingId>().ok(), Some(id));
        assert!("abc".parse::<BookingId>().is_err());
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = ListingId::new(7);
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("7"));
        let parsed: ListingId = serde_json::from_str("7").unwrap_or(ListingId::new(0));
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_conversions() {
        let id: UserId = 9_i64.into();
        let raw: i64 = id.into();
        assert_eq!(raw, 9);
        assert_eq!(id.as_i64(), 9);
    }
}
