use axum::serve;
use interfaces_github_search::index::{BuildClientError, GitHubSearchClient};
use projects_repositories::{
    config::{Config, ConfigError},
    db::{init_pool, InitPoolError},
    endpoints::{router, state::AppState},
};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum MainError {
    #[error("Config: {source}")]
    Config {
        #[source]
        source: ConfigError,
    },
    #[error("TracingInit: {source}")]
    TracingInit {
        #[source]
        source: utils_trace::TracingInitError,
    },
    #[error("InitPool: {source}")]
    InitPool {
        #[source]
        source: InitPoolError,
    },
    #[error("BuildClient: {source}")]
    BuildClient {
        #[source]
        source: BuildClientError,
    },
    #[error("TcpListenerBind: {source}")]
    TcpListenerBind {
        #[source]
        source: std::io::Error,
    },
    #[error("Serve: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
    // A missing .env is fine; the environment may already be populated.
    let dotenv = dotenvy::dotenv();

    let config = Config::from_env().map_err(|source| MainError::Config { source })?;

    utils_trace::init(&config.log_level).map_err(|source| MainError::TracingInit { source })?;
    if let Err(err) = dotenv {
        warn!("no .env file loaded: {err}");
    }

    let pool = init_pool(&config.database_url, config.database_pool_size)
        .map_err(|source| MainError::InitPool { source })?;
    let github = GitHubSearchClient::new(config.github_search_settings())
        .map_err(|source| MainError::BuildClient { source })?;

    let app = router(AppState::postgres(&config, pool, github));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| MainError::TcpListenerBind { source })?;

    info!("Server running on addr: {}", config.bind_addr);

    serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| MainError::Serve { source })?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
