//! actiongate-server — axum boundary for the action gate.
//!
//! Authentication middleware builds the caller from a bearer token, the
//! per-route gate middleware enforces authorization and validation, and
//! the handlers are the trusted action bodies.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
