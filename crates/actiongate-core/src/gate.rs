//! The request gate: authorization, correlation stamping, and validation
//! gating in front of every core action.
//!
//! | Step | Check                      | On failure                         |
//! |------|----------------------------|------------------------------------|
//! | 1    | Resolve action tier        | — (total)                          |
//! | 2    | Authentication + authority | `NotAuthenticated` / `InsufficientAuthority` |
//! | 3    | Stamp event id             | — (first write wins)               |
//! | 4    | Form validation            | `ValidationFailed` (or legacy 200 sentinel) |
//! | 5    | Proceed                    | —                                  |
//!
//! The gate runs at most once per inbound call, holds no cross-request
//! state, and never swallows a failure — rejections are logged and handed
//! to the boundary layer unchanged.

use tracing::{debug, warn};

use crate::action::Action;
use crate::context::{EventId, RequestContext};
use crate::error::GateError;
use crate::form::InputForm;
use crate::principal::Caller;

/// Gate configuration, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct GateConfig {
    /// Compatibility switch for the historical boundary contract: when
    /// set, a failed form validation is reported to the caller as the
    /// generic success sentinel instead of a distinct validation error.
    pub legacy_validation_success: bool,
}

/// Outcome of a gate pass that did not reject.
#[derive(Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// All checks passed; the action body runs with its original
    /// arguments and its result is passed through unmodified.
    Proceed,
    /// Validation failed under `legacy_validation_success`; the boundary
    /// answers with the generic success sentinel and the action body
    /// never runs.
    ShortCircuit,
}

/// The interception point in front of every core action.
#[derive(Debug, Default)]
pub struct RequestGate {
    config: GateConfig,
}

impl RequestGate {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Run the gate for one inbound call.
    ///
    /// Sequencing is a hard contract: tier resolution, then the authority
    /// check, then the event-id stamp (exactly once, before any
    /// validation or delegation), then form validation. A rejection at
    /// step 2 returns before the stamp.
    pub fn handle(
        &self,
        action: &Action,
        caller: &Caller,
        ctx: &mut RequestContext,
        path: &str,
        form: Option<&mut dyn InputForm>,
    ) -> Result<GateDecision, GateError> {
        let tier = action.required_tier();

        if let Some(key) = action.permission_key() {
            if !caller.is_authenticated() {
                warn!(
                    function_id = action.function_id(),
                    method = action.method(),
                    "caller is not authenticated"
                );
                return Err(GateError::NotAuthenticated);
            }
            if !caller.has_grant(&key) {
                warn!(
                    actor = caller.actor_id(),
                    authority = %key,
                    "caller does not have the required authority"
                );
                return Err(GateError::InsufficientAuthority { key });
            }
        }

        ctx.stamp_event_id(EventId::from_path(path));

        if let Some(form) = form {
            // Both hooks always run, in this order, so every error is
            // accumulated before the decision.
            form.validate();
            form.verify_strictly();

            if form.has_errors() {
                let errors = form.errors().clone();
                if self.config.legacy_validation_success {
                    debug!(
                        method = action.method(),
                        error_count = errors.len(),
                        "validation failed; reporting legacy success sentinel"
                    );
                    return Ok(GateDecision::ShortCircuit);
                }
                return Err(GateError::ValidationFailed { errors });
            }
        }

        debug!(
            actor = caller.actor_id(),
            method = action.method(),
            tier = %tier,
            "action authorized"
        );
        Ok(GateDecision::Proceed)
    }
}
