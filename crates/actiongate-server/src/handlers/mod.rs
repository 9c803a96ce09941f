//! HTTP handlers: the home page, liveness, and the gated inventory
//! actions.

use serde::{Deserialize, Serialize};

pub mod health;
pub mod home;
pub mod inventory;

/// Common response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}
