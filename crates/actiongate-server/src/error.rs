//! Boundary error type: translates gate rejections into HTTP responses.

use actiongate_core::GateError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP clients. Gate rejections keep their own status
/// mapping (401 / 403 / 422); everything else is a boundary concern.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error("invalid request body: {0}")]
    BadRequest(String),

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Gate(err) => StatusCode::from_u16(err.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = match &self {
            AppError::Gate(GateError::ValidationFailed { errors }) => json!({
                "error": self.to_string(),
                "details": errors,
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actiongate_core::{AuthorityTier, PermissionKey, ValidationErrors};

    #[test]
    fn status_not_authenticated() {
        let err = AppError::from(GateError::NotAuthenticated);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn status_insufficient_authority() {
        let err = AppError::from(GateError::InsufficientAuthority {
            key: PermissionKey::new("INVENTORY", AuthorityTier::Update),
        });
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn status_validation_failed() {
        let err = AppError::from(GateError::ValidationFailed {
            errors: ValidationErrors::new(),
        });
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn status_bad_request() {
        assert_eq!(
            AppError::BadRequest("nope".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn status_internal() {
        let err = AppError::Internal(anyhow::anyhow!("boom"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn gate_error_message_passes_through() {
        let err = AppError::from(GateError::NotAuthenticated);
        assert_eq!(err.to_string(), "caller is not authenticated");
    }
}
