use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use service::{slash::directory::Directory, storage::PersDict};
use tracing::{error, info};

use crate::errors::StartupError;
use crate::routes::{self, CceState, CerinoState, MemeState, ServerState};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

/// Open the store and load the directory named by the configuration.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    common::env::ensure_parent_dir(&cfg.meme.persistence).await?;
    let store = PersDict::open(&cfg.meme.persistence)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    info!(file = %cfg.meme.persistence, entries = store.keys().await.len(), "meme store ready");

    let cce = match &cfg.cce {
        Some(c) => {
            common::env::require_file(&c.names).await?;
            let directory = Directory::load(&c.names, c.picture_url.clone())
                .await
                .map_err(|e| StartupError::Runtime(e.to_string()))?;
            Some(CceState { directory: Arc::new(directory), token: c.token.clone() })
        }
        None => None,
    };

    let cerino = cfg.cerino.as_ref().map(|c| CerinoState { token: c.token.clone() });

    Ok(ServerState {
        meme: MemeState { store, token: cfg.meme.token.clone() },
        cce,
        cerino,
    })
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            // without a signal handler the server runs until killed
            error!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(cfg.server.bind_addr()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, cce = cfg.cce.is_some(), cerino = cfg.cerino.is_some(), "starting slash command server, use <Ctrl-C> to stop");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
