use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, IdPolicyKind};
use service::roster::{IdPolicy, RosterRepository, SharedRoster};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn id_policy(kind: IdPolicyKind) -> IdPolicy {
    match kind {
        IdPolicyKind::Sequence => IdPolicy::Sequence,
        IdPolicyKind::Counter => IdPolicy::Counter,
    }
}

/// Construct the process's single roster and wrap it as handler state.
pub fn build_state(cfg: &AppConfig) -> AppState {
    let roster: Arc<dyn RosterRepository> = Arc::new(SharedRoster::new(id_policy(cfg.roster.id_policy)));
    AppState::new(roster)
}

/// Build the complete application for a given config.
pub fn build_app(cfg: &AppConfig) -> Router {
    routes::build_router(build_state(cfg), build_cors())
}

fn load_bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    let addr = cfg.server.bind_addr();
    addr.parse::<SocketAddr>()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {addr}: {e}")).into())
}

/// Serve the application until `shutdown` resolves.
pub async fn serve<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = load_bind_addr(&cfg)?;
    let app = build_app(&cfg);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })?;
    info!(
        service = "server",
        event = "listening",
        %addr,
        id_policy = ?cfg.roster.id_policy,
        "attendance server listening"
    );
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}
