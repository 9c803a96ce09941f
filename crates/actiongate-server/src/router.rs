//! Router construction. The gate is composed explicitly at the routing
//! layer: every core action route is wrapped with the gate middleware
//! carrying the action it was registered with.

use std::sync::Arc;

use actiongate_core::{Action, ActionRegistry, AuthorityMarker};
use axum::{
    middleware as axum_mw,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::handlers::inventory::{SearchForm, UpdateForm, FUNCTION_ID};
use crate::middleware::auth::bearer_auth;
use crate::middleware::gate::{action_gate, action_gate_with_form, GateRoute};
use crate::state::AppState;

/// Registration table for the core action family. Built once at startup;
/// the routes below resolve their actions from it while the router is
/// assembled, so a missing registration fails at boot, not at dispatch.
pub fn core_actions() -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    registry.register(Action::new(FUNCTION_ID, "search"));
    registry.register(
        Action::new(FUNCTION_ID, "update").with_marker(AuthorityMarker::AuthorityUpdate),
    );
    registry.register(
        Action::new(FUNCTION_ID, "status").with_marker(AuthorityMarker::NoAuthorityRequired),
    );
    registry
}

/// Build the full axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let registry = core_actions();
    let gate_route = |method: &str| {
        let action = registry
            .get(FUNCTION_ID, method)
            .cloned()
            .expect("core action registered at startup");
        GateRoute::new(Arc::clone(&state.gate), action)
    };

    // Gated core action routes
    let core = Router::new()
        .route(
            "/core/inventory/search",
            post(handlers::inventory::search).route_layer(axum_mw::from_fn_with_state(
                gate_route("search"),
                action_gate_with_form::<SearchForm>,
            )),
        )
        .route(
            "/core/inventory/update",
            post(handlers::inventory::update).route_layer(axum_mw::from_fn_with_state(
                gate_route("update"),
                action_gate_with_form::<UpdateForm>,
            )),
        )
        .route(
            "/core/inventory/status",
            get(handlers::inventory::status).route_layer(axum_mw::from_fn_with_state(
                gate_route("status"),
                action_gate,
            )),
        );

    // Public routes (no gate)
    let public = Router::new()
        .route("/", get(handlers::home::home))
        .route("/health", get(handlers::health::health));

    public
        .merge(core)
        .layer(axum_mw::from_fn_with_state(state.auth.clone(), bearer_auth))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}
