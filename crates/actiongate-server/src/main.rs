//! actiongate-server — standalone web server for the gated core actions.
//!
//! Reads config from env vars:
//!   ACTIONGATE_JWT_SECRET — bearer-token HMAC secret (required)
//!   ACTIONGATE_BIND_ADDR  — listen address (default: 0.0.0.0:4200)
//!   ACTIONGATE_LEGACY_VALIDATION_SUCCESS — report failed form validation
//!     as the generic success sentinel (default: false)

use actiongate_core::{GateConfig, RequestGate};
use actiongate_server::middleware::auth::AuthConfig;
use actiongate_server::router::build_router;
use actiongate_server::state::AppState;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actiongate_server=debug".into()),
        )
        .init();

    let jwt_secret = std::env::var("ACTIONGATE_JWT_SECRET")
        .map_err(|_| anyhow::anyhow!("ACTIONGATE_JWT_SECRET must be set"))?;
    let bind_addr =
        std::env::var("ACTIONGATE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:4200".into());
    let legacy_validation_success = std::env::var("ACTIONGATE_LEGACY_VALIDATION_SUCCESS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let gate = RequestGate::new(GateConfig {
        legacy_validation_success,
    });
    let state = AppState::new(gate, AuthConfig::from_secret(jwt_secret.as_bytes()));
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("actiongate-server listening on {bind_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
