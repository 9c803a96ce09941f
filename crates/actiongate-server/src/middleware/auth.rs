//! Bearer-token middleware: builds the [`Caller`] for the request.
//!
//! A valid token yields an authenticated caller carrying the token's
//! authority grants; a missing header yields the anonymous caller (public
//! actions must still work); a malformed or badly-signed token is rejected
//! at the boundary. Token issuance belongs to the external identity
//! provider — this middleware only verifies and reads.

use actiongate_core::{Caller, GateError, JwtClaims};
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::warn;

use crate::error::AppError;

/// Verification configuration for inbound bearer tokens.
#[derive(Clone)]
pub struct AuthConfig {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthConfig {
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // The identity provider owns token lifetime; expiry is not part of
        // the claims contract consumed here.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

pub async fn bearer_auth(
    State(config): State<AuthConfig>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let caller = match token {
        None => Caller::anonymous(),
        Some(token) => match decode::<JwtClaims>(token, &config.decoding_key, &config.validation) {
            Ok(data) => match Caller::from_jwt_claims(&data.claims) {
                Ok(caller) => caller,
                Err(err) => {
                    warn!(error = %err, "bearer token carried unusable claims");
                    return AppError::from(err).into_response();
                }
            },
            Err(err) => {
                warn!(error = %err, "rejected malformed bearer token");
                return AppError::from(GateError::NotAuthenticated).into_response();
            }
        },
    };

    req.extensions_mut().insert(caller);
    next.run(req).await
}
