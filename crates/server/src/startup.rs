use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use configs::ServerConfig;
use service::{FlavorStore, MemoryFlavorStore};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolve the socket address from the server config.
pub fn bind_addr(cfg: &ServerConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {raw}: {e}")))
}

/// Router over the given flavor collection.
pub fn app_with_store(store: Arc<dyn FlavorStore>) -> Router {
    routes::build_router(AppState::new(store), build_cors())
}

/// Router over a freshly seeded in-memory store.
pub fn build_app() -> Router {
    app_with_store(MemoryFlavorStore::seeded())
}

/// Serve the flavor API on `cfg` until `shutdown` resolves.
///
/// Logging, `.env` and config loading belong to the caller.
pub async fn run<F>(cfg: &ServerConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = bind_addr(cfg)?;
    let store = MemoryFlavorStore::seeded();
    let app = app_with_store(store.clone());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })?;
    let port = listener.local_addr()?.port();
    info!(%addr, "Ice Cream Shop REST API running at http://localhost:{}", port);

    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

    // the collection lives only as long as the process
    info!(flavors_dropped = store.len().await, "flavor store released");
    Ok(())
}
