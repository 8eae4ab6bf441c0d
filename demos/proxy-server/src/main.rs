use std::sync::Arc;

use synapse_client::RemoteClient;
use synapse_http::AppState;
use synapse_registry::RuntimeRegistry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod shelf;

use shelf::FsShelf;

// ---------------------------------------------------------------------------
// Proxy server — the service remote runtimes register against.
//
// Serves: POST/GET /environments (registration + probed status) and
// GET /artifacts/** (the shelf runtimes pull code from). Activation is
// a library call; see synapse-proxy.
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "proxy_server=info,synapse_http=info,synapse_registry=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let shelf_dir = std::env::var("SYNAPSE_SHELF_DIR").unwrap_or_else(|_| "./shelf".into());
    let registry = Arc::new(RuntimeRegistry::new(RemoteClient::new()));
    let state = Arc::new(AppState::new(registry, Arc::new(FsShelf::new(&shelf_dir))));

    let port = std::env::var("SYNAPSE_PORT").unwrap_or_else(|_| "8080".into());
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(shelf = %shelf_dir, "listening on {}", listener.local_addr()?);
    synapse_http::serve(listener, state).await?;
    Ok(())
}
