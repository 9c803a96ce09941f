//! The caller identity the gate checks against.

use std::collections::HashSet;

use crate::authority::PermissionKey;
use crate::error::GateError;

/// The principal for the current request: actor id, authenticated flag,
/// and the set of granted permission-key strings.
///
/// Built at the server boundary (from validated JWT claims, or explicitly
/// for in-process callers). The gate only reads it; there is no implicit
/// or thread-local identity anywhere in the codebase.
#[derive(Debug, Clone)]
pub struct Caller {
    actor_id: String,
    authenticated: bool,
    grants: HashSet<String>,
}

impl Caller {
    /// The unauthenticated caller: no identity, no grants.
    pub fn anonymous() -> Self {
        Self {
            actor_id: "anonymous".to_string(),
            authenticated: false,
            grants: HashSet::new(),
        }
    }

    /// An authenticated caller with the given grants.
    pub fn authenticated(
        actor_id: impl Into<String>,
        grants: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            authenticated: true,
            grants: grants.into_iter().collect(),
        }
    }

    /// Construct from validated JWT claims at the server boundary.
    /// The server middleware calls this; gate logic never reads raw tokens.
    pub fn from_jwt_claims(claims: &JwtClaims) -> Result<Self, GateError> {
        let actor_id = claims.sub.clone().ok_or(GateError::NotAuthenticated)?;
        Ok(Self::authenticated(
            actor_id,
            claims.authorities.clone().unwrap_or_default(),
        ))
    }

    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Whether the caller holds the exact permission key.
    pub fn has_grant(&self, key: &PermissionKey) -> bool {
        self.grants.contains(&key.to_string())
    }

    pub fn grants(&self) -> impl Iterator<Item = &str> {
        self.grants.iter().map(String::as_str)
    }
}

/// JWT claims shape expected from the identity provider.
/// Deserialised by the server bearer-token middleware.
#[derive(Debug, serde::Deserialize)]
pub struct JwtClaims {
    pub sub: Option<String>,
    pub authorities: Option<Vec<String>>,
}
