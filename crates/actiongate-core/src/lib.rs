//! Request-authorization gate for core web actions.
//!
//! This crate provides:
//!
//! - **Action / ActionRegistry**: declarative tier markers resolved at
//!   registration time — no runtime reflection
//! - **AuthorityTier / PermissionKey**: the `(function_id, tier)` unit
//!   checked against a caller's grants
//! - **Caller**: the authenticated principal and its grant set
//! - **RequestContext / EventId**: per-request correlation state
//! - **InputForm**: the two-hook validation capability
//! - **RequestGate**: the interception point tying the above together
//!
//! # Architecture
//!
//! ```text
//! inbound call ──► RequestGate::handle
//!                      │
//!                      ├─ 1. tier resolution (Action markers)
//!                      ├─ 2. authority check (Caller grants)   ──► 401 / 403
//!                      ├─ 3. event-id stamp (RequestContext)
//!                      ├─ 4. form validation (InputForm)       ──► 422 / legacy 200
//!                      └─ 5. Proceed ──► action body, result passed through
//! ```
//!
//! The boundary layer (an HTTP server, or anything else that dispatches
//! actions) owns translating [`GateError`] values into responses; the gate
//! never recovers, retries, or swallows a failure.

mod action;
mod authority;
mod context;
mod error;
mod form;
mod gate;
mod principal;

pub use action::{Action, ActionRegistry, AuthorityMarker};
pub use authority::{AuthorityTier, PermissionKey};
pub use context::{EventId, RequestContext};
pub use error::GateError;
pub use form::{FieldError, InputForm, ValidationErrors};
pub use gate::{GateConfig, GateDecision, RequestGate};
pub use principal::{Caller, JwtClaims};
