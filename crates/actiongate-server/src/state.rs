//! Shared application state.

use std::sync::Arc;

use actiongate_core::RequestGate;

use crate::middleware::auth::AuthConfig;

/// Startup-built state shared across requests: the gate and the
/// bearer-token configuration. Everything here is read-only after boot.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<RequestGate>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(gate: RequestGate, auth: AuthConfig) -> Self {
        Self {
            gate: Arc::new(gate),
            auth,
        }
    }
}
