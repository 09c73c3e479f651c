//! Services shared by route handlers.

pub mod inflight;

pub use inflight::{InFlight, InFlightGuard};
