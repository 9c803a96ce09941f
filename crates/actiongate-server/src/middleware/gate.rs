//! Action-gate middleware, attached per route at the routing layer.
//!
//! Each gated route carries its own [`GateRoute`] — the gate plus the
//! action the route was registered with — so tier resolution never happens
//! at dispatch time. Routes with an input form buffer the JSON body,
//! validate it through the gate, and restore it unchanged for the handler.

use std::sync::Arc;

use actiongate_core::{
    Action, Caller, GateDecision, InputForm, RequestContext, RequestGate,
};
use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::error;

use crate::error::AppError;
use crate::handlers::ApiResponse;

/// Cap on buffered form bodies.
const BODY_LIMIT: usize = 1 << 20;

static EVENT_ID_HEADER: HeaderName = HeaderName::from_static("x-event-id");

/// Per-route gate state: the shared gate plus this route's action.
#[derive(Clone)]
pub struct GateRoute {
    gate: Arc<RequestGate>,
    action: Arc<Action>,
}

impl GateRoute {
    pub fn new(gate: Arc<RequestGate>, action: Action) -> Self {
        Self {
            gate,
            action: Arc::new(action),
        }
    }
}

/// Gate middleware for actions without an input form.
pub async fn action_gate(State(route): State<GateRoute>, req: Request, next: Next) -> Response {
    let caller = current_caller(&req);
    let mut ctx = RequestContext::new();
    let path = req.uri().path().to_string();

    let decision = route.gate.handle(&route.action, &caller, &mut ctx, &path, None);
    dispatch(route, ctx, decision, req, next).await
}

/// Gate middleware for actions whose JSON body is an input form.
pub async fn action_gate_with_form<F>(
    State(route): State<GateRoute>,
    req: Request,
    next: Next,
) -> Response
where
    F: InputForm + DeserializeOwned + Send,
{
    let caller = current_caller(&req);
    let mut ctx = RequestContext::new();
    let path = req.uri().path().to_string();

    let (parts, body) = req.into_parts();
    let bytes = match to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(err) => {
            return AppError::BadRequest(format!("unreadable request body: {err}")).into_response()
        }
    };
    let mut form: F = match serde_json::from_slice(&bytes) {
        Ok(form) => form,
        Err(err) => {
            return AppError::BadRequest(format!("malformed request body: {err}")).into_response()
        }
    };

    let decision = route
        .gate
        .handle(&route.action, &caller, &mut ctx, &path, Some(&mut form));

    // The handler sees the original body, untouched by validation.
    let req = Request::from_parts(parts, Body::from(bytes));
    dispatch(route, ctx, decision, req, next).await
}

async fn dispatch(
    route: GateRoute,
    ctx: RequestContext,
    decision: Result<GateDecision, actiongate_core::GateError>,
    mut req: Request,
    next: Next,
) -> Response {
    match decision {
        Ok(GateDecision::Proceed) => {
            if let Some(event_id) = ctx.event_id() {
                req.extensions_mut().insert(event_id.clone());
            }
            let response = next.run(req).await;
            if response.status().is_server_error() {
                error!(
                    method = route.action.method(),
                    status = %response.status(),
                    "action failed"
                );
            }
            attach_event_id(response, &ctx)
        }
        Ok(GateDecision::ShortCircuit) => attach_event_id(legacy_success(), &ctx),
        Err(err) => attach_event_id(AppError::from(err).into_response(), &ctx),
    }
}

/// The generic success sentinel used by the historical boundary contract.
fn legacy_success() -> Response {
    Json(ApiResponse::<serde_json::Value> {
        success: true,
        data: None,
        error: None,
    })
    .into_response()
}

fn attach_event_id(mut response: Response, ctx: &RequestContext) -> Response {
    if let Some(event_id) = ctx.event_id() {
        if let Ok(value) = HeaderValue::from_str(event_id.as_str()) {
            response.headers_mut().insert(EVENT_ID_HEADER.clone(), value);
        }
    }
    response
}

fn current_caller(req: &Request) -> Caller {
    req.extensions()
        .get::<Caller>()
        .cloned()
        .unwrap_or_else(Caller::anonymous)
}
