//! Service binary: load config, open the datastore, serve `/user` until SIGINT/SIGTERM.

use std::net::{Ipv4Addr, SocketAddr};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use user_service::{app, AppState, Lifecycle, MySqlStore, ServiceConfig};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("user_service=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "fatal");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env()?;
    let store = Arc::new(MySqlStore::open(&config.datastore).await?);
    let state = AppState::new(store.clone());

    let lifecycle = Lifecycle::new(config.shutdown_drain);
    lifecycle.spawn_signal_listener();

    let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port))).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    let server = axum::serve(listener, app(state)).with_graceful_shutdown(lifecycle.token().cancelled_owned());
    lifecycle.run(server, store.as_ref()).await?;
    Ok(())
}
