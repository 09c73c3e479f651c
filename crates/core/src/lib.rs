//! Rentdesk Core - Shared types library.
//!
//! This crate provides common types used across all Rentdesk components:
//! - `admin` - Server-rendered administration dashboard
//! - `cli` - Command-line access to the backend admin API
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Everything that decides what the dashboard may offer (legal
//! booking transitions, typed setting values, page counts) lives here so it
//! can be tested without a backend.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, status enums, setting types, pagination, prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
