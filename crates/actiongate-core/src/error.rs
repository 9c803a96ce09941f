use thiserror::Error;

use crate::authority::PermissionKey;
use crate::form::ValidationErrors;

/// Terminal rejection reasons raised by the gate. Authentication and
/// authority failures stay distinguishable so the boundary layer can
/// answer 401 vs 403.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("caller is not authenticated")]
    NotAuthenticated,

    #[error("caller does not have the required authority: {key}")]
    InsufficientAuthority { key: PermissionKey },

    #[error("input validation failed: {} error(s)", errors.len())]
    ValidationFailed { errors: ValidationErrors },
}

impl GateError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotAuthenticated => 401,
            Self::InsufficientAuthority { .. } => 403,
            Self::ValidationFailed { .. } => 422,
        }
    }
}
