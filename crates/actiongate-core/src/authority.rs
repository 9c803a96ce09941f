//! Authority tiers and the permission keys derived from them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse-grained capability level required to invoke an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorityTier {
    /// No authority check is performed at all.
    None,
    /// Read-level authority. The default for unmarked actions.
    Read,
    /// Update-level authority for mutating actions.
    Update,
}

impl AuthorityTier {
    /// Token used in permission-key strings and grant lists.
    pub fn token(&self) -> &'static str {
        match self {
            AuthorityTier::None => "NO_AUTHORITY",
            AuthorityTier::Read => "AUTHORITY_READ",
            AuthorityTier::Update => "AUTHORITY_UPDATE",
        }
    }

    /// Whether invoking an action at this tier requires an authority check.
    pub fn requires_check(&self) -> bool {
        !matches!(self, AuthorityTier::None)
    }
}

impl fmt::Display for AuthorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The unit checked against a caller's grants: `(function_id, tier)`,
/// rendered as `"{FUNCTION_ID}:{TIER_TOKEN}"` to match the grant strings
/// handed out by the authority store.
///
/// Computed per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermissionKey {
    function_id: String,
    tier: AuthorityTier,
}

impl PermissionKey {
    pub fn new(function_id: impl Into<String>, tier: AuthorityTier) -> Self {
        Self {
            function_id: function_id.into(),
            tier,
        }
    }

    pub fn function_id(&self) -> &str {
        &self.function_id
    }

    pub fn tier(&self) -> AuthorityTier {
        self.tier
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.function_id, self.tier.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_tokens() {
        assert_eq!(AuthorityTier::None.token(), "NO_AUTHORITY");
        assert_eq!(AuthorityTier::Read.token(), "AUTHORITY_READ");
        assert_eq!(AuthorityTier::Update.token(), "AUTHORITY_UPDATE");
    }

    #[test]
    fn only_none_skips_the_check() {
        assert!(!AuthorityTier::None.requires_check());
        assert!(AuthorityTier::Read.requires_check());
        assert!(AuthorityTier::Update.requires_check());
    }

    #[test]
    fn permission_key_rendering() {
        let key = PermissionKey::new("INVENTORY", AuthorityTier::Read);
        assert_eq!(key.to_string(), "INVENTORY:AUTHORITY_READ");

        let key = PermissionKey::new("INVENTORY", AuthorityTier::Update);
        assert_eq!(key.to_string(), "INVENTORY:AUTHORITY_UPDATE");
    }

    #[test]
    fn permission_key_accessors() {
        let key = PermissionKey::new("ORDERS", AuthorityTier::Update);
        assert_eq!(key.function_id(), "ORDERS");
        assert_eq!(key.tier(), AuthorityTier::Update);
    }
}
