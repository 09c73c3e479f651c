//! Core types for Rentdesk.
//!
//! This module provides type-safe wrappers for the marketplace's domain concepts.

pub mod id;
pub mod pagination;
pub mod price;
pub mod setting;
pub mod status;

pub use id::*;
pub use pagination::{DEFAULT_PER_PAGE, MAX_PER_PAGE, Pagination, clamp_per_page};
pub use price::Price;
pub use setting::{SettingType, SettingValueError};
pub use status::*;
