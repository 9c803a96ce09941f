//! Actions and the startup-time registration table.
//!
//! An [`Action`] is a single invocable operation on a controller-like
//! surface, identified by its owning function id and method name. Tier
//! markers are declared at registration time and resolved with a fixed
//! priority, so the required tier of every action is known before the
//! first request is served — there is no runtime reflection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::authority::{AuthorityTier, PermissionKey};

/// Declarative authorization-tier marker attached to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorityMarker {
    /// The action mutates state and requires update-level authority.
    AuthorityUpdate,
    /// The action is public; no authority check is performed.
    NoAuthorityRequired,
}

/// A registered action: `(function_id, method)` plus its tier markers.
/// Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    function_id: String,
    method: String,
    markers: Vec<AuthorityMarker>,
}

impl Action {
    pub fn new(function_id: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            function_id: function_id.into(),
            method: method.into(),
            markers: Vec::new(),
        }
    }

    /// Attach a tier marker. Duplicates are harmless; resolution only asks
    /// whether a marker is present.
    pub fn with_marker(mut self, marker: AuthorityMarker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn function_id(&self) -> &str {
        &self.function_id
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Resolve the tier this action requires.
    ///
    /// Markers are inspected in fixed priority order: `AuthorityUpdate`
    /// wins, then `NoAuthorityRequired`, and an unmarked action defaults to
    /// `Read`. An action carrying both markers therefore resolves to
    /// `Update`; the ordering is load-bearing.
    pub fn required_tier(&self) -> AuthorityTier {
        if self.markers.contains(&AuthorityMarker::AuthorityUpdate) {
            AuthorityTier::Update
        } else if self.markers.contains(&AuthorityMarker::NoAuthorityRequired) {
            AuthorityTier::None
        } else {
            AuthorityTier::Read
        }
    }

    /// Permission key checked against the caller's grants, or `None` for
    /// actions whose tier performs no check.
    pub fn permission_key(&self) -> Option<PermissionKey> {
        let tier = self.required_tier();
        tier.requires_check()
            .then(|| PermissionKey::new(self.function_id.clone(), tier))
    }
}

/// Startup-time table of registered actions, keyed by
/// `(function_id, method)`.
///
/// The router resolves each action from this table while it is being
/// built, so a missing entry surfaces at startup rather than at dispatch
/// time. Re-registering a key replaces the earlier entry.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    actions: HashMap<(String, String), Action>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, action: Action) {
        self.actions.insert(
            (action.function_id.clone(), action.method.clone()),
            action,
        );
    }

    pub fn get(&self, function_id: &str, method: &str) -> Option<&Action> {
        self.actions
            .get(&(function_id.to_string(), method.to_string()))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn unmarked_action_defaults_to_read() {
        let action = Action::new("INVENTORY", "search");
        assert_eq!(action.required_tier(), AuthorityTier::Read);
    }

    #[test]
    fn update_marker_resolves_to_update() {
        let action = Action::new("INVENTORY", "update").with_marker(AuthorityMarker::AuthorityUpdate);
        assert_eq!(action.required_tier(), AuthorityTier::Update);
    }

    #[test]
    fn no_authority_marker_resolves_to_none() {
        let action =
            Action::new("INVENTORY", "status").with_marker(AuthorityMarker::NoAuthorityRequired);
        assert_eq!(action.required_tier(), AuthorityTier::None);
    }

    #[test]
    fn update_wins_over_no_authority() {
        // Both markers present, in either declaration order.
        let action = Action::new("INVENTORY", "both")
            .with_marker(AuthorityMarker::AuthorityUpdate)
            .with_marker(AuthorityMarker::NoAuthorityRequired);
        assert_eq!(action.required_tier(), AuthorityTier::Update);

        let action = Action::new("INVENTORY", "both")
            .with_marker(AuthorityMarker::NoAuthorityRequired)
            .with_marker(AuthorityMarker::AuthorityUpdate);
        assert_eq!(action.required_tier(), AuthorityTier::Update);
    }

    #[test]
    fn permission_key_for_checked_tiers() {
        let action = Action::new("INVENTORY", "search");
        let key = action.permission_key().unwrap();
        assert_eq!(key.to_string(), "INVENTORY:AUTHORITY_READ");

        let action =
            Action::new("INVENTORY", "status").with_marker(AuthorityMarker::NoAuthorityRequired);
        assert!(action.permission_key().is_none());
    }

    #[test]
    fn registry_lookup_and_replace() {
        let mut registry = ActionRegistry::new();
        registry.register(Action::new("INVENTORY", "search"));
        registry.register(
            Action::new("INVENTORY", "update").with_marker(AuthorityMarker::AuthorityUpdate),
        );

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("INVENTORY", "search").unwrap().required_tier(),
            AuthorityTier::Read
        );
        assert!(registry.get("INVENTORY", "missing").is_none());

        // Re-registering replaces the earlier entry.
        registry.register(
            Action::new("INVENTORY", "search").with_marker(AuthorityMarker::NoAuthorityRequired),
        );
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("INVENTORY", "search").unwrap().required_tier(),
            AuthorityTier::None
        );
    }

    proptest! {
        /// Any unmarked action resolves to Read, whatever its identifiers.
        #[test]
        fn unmarked_always_reads(function_id in "[A-Z_]{1,16}", method in "[a-z_]{1,16}") {
            let action = Action::new(function_id, method);
            prop_assert_eq!(action.required_tier(), AuthorityTier::Read);
        }

        /// Resolution ignores marker multiplicity and ordering: if the
        /// update marker appears anywhere, the tier is Update.
        #[test]
        fn update_marker_dominates(markers in proptest::collection::vec(
            prop_oneof![
                Just(AuthorityMarker::AuthorityUpdate),
                Just(AuthorityMarker::NoAuthorityRequired),
            ],
            0..6,
        )) {
            let mut action = Action::new("F", "m");
            for marker in &markers {
                action = action.with_marker(*marker);
            }

            let expected = if markers.contains(&AuthorityMarker::AuthorityUpdate) {
                AuthorityTier::Update
            } else if markers.contains(&AuthorityMarker::NoAuthorityRequired) {
                AuthorityTier::None
            } else {
                AuthorityTier::Read
            };
            prop_assert_eq!(action.required_tier(), expected);
        }
    }
}
