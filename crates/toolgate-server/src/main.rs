//! Toolgate HTTP server
//!
//! Loads configuration, opens every tool-provider session (fatal on the
//! first failure), serves the façade routes until ctrl-c, then tears the
//! sessions down.

mod handlers;
mod models;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};

use toolgate_core::{
    ConfigFile, ConsoleLogger, Logger, OpenRouterModel, Orchestrator, SessionRegistry,
    ToolDispatch,
};

use crate::handlers::{
    get_tools, orchestrate_explicit, orchestrate_from_prompt, root, run_tool, ApiState,
};

fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/tools/:provider", get(get_tools))
        .route("/tools/:provider/run", post(run_tool))
        .route("/orchestrate-text", post(orchestrate_from_prompt))
        .route("/orchestrate", post(orchestrate_explicit))
        .with_state(state)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

#[tokio::main]
async fn main() -> Result<()> {
    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::new());

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(ConfigFile::default_path);
    let config = ConfigFile::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    logger.info(&format!(
        "[Server] Loaded config from {} ({} provider(s))",
        config_path.display(),
        config.providers.len()
    ));

    // A provider that fails to initialize aborts startup; there is no
    // partial-availability mode.
    let registry = Arc::new(
        SessionRegistry::open(config.providers, Arc::clone(&logger))
            .await
            .map_err(|e| anyhow::anyhow!("startup failed: {}", e))?,
    );

    let model = Arc::new(OpenRouterModel::new(config.model, Arc::clone(&logger)));
    let orchestrator = Arc::new(Orchestrator::new(
        Arc::clone(&registry) as Arc<dyn ToolDispatch>,
        model,
        Arc::clone(&logger),
    ));

    let state = Arc::new(ApiState {
        registry: Arc::clone(&registry),
        orchestrator,
        logger: Arc::clone(&logger),
    });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    logger.info(&format!("[Server] Listening on {}", addr));

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    registry.close_all().await;
    logger.info("[Server] Shutdown complete");

    Ok(())
}
