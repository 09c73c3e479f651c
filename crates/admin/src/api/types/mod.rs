//! Resource shapes mirrored from the backend admin API.
//!
//! Only the fields the dashboard renders or edits are modelled; unknown
//! fields are ignored and optional ones default, so backend additions never
//! break a page.

mod booking;
mod common;
mod envelope;
mod listing;
mod lookup;
mod setting;
mod transaction;
mod user;

pub use booking::{Booking, BookingStatusUpdate, ListingSummary};
pub use common::{UserSummary, format_date, format_timestamp, lenient_date, lenient_datetime};
pub use envelope::{Envelope, ListMeta, Page};
pub use listing::{Listing, ListingPayload, ListingRules, ListingStatusUpdate};
pub use lookup::{Lookup, LookupKind, LookupPayload};
pub use setting::{Setting, SettingUpdate};
pub use transaction::Transaction;
pub use user::{User, UserStatusUpdate};
