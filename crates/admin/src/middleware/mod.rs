//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (recorded into the request span)
//! 4. Session layer (in-memory store, toasts only)

pub mod flash;
pub mod request_id;
pub mod session;

pub use flash::{Flash, FlashKind, push_flash, take_flashes};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
