//! Certificate Server Binary
//!
//! Runs the certificate HTTP server.

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use certificate_server::{create_router, AppState, MemoryStore, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let users = config.load_users()?;
    info!(
        port = config.port,
        users = users.len(),
        users_file = ?config.users_file,
        "Starting certificate server"
    );

    let store = Arc::new(MemoryStore::with_users(users));
    let state = Arc::new(AppState::new(store));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(addr = %addr, "Certificate server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
