mod error;
mod routes;

pub use error::{ApiError, ErrorBody};
pub use routes::{check_limit, parse_limit};

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::reddit::RedditClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub reddit: RedditClient,
}

impl AppState {
    /// Build state, including the upstream client, from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let reddit = RedditClient::new(&config).context("Failed to build upstream client")?;
        Ok(Self {
            config: Arc::new(config),
            reddit,
        })
    }
}

/// Start the web server and run until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails.
pub async fn serve<F>(config: Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = AppState::new(config)?;
    let addr: SocketAddr = format!("{}:{}", state.config.web_host, state.config.web_port)
        .parse()
        .context("Invalid web server address")?;

    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind web server")?;

    info!(addr = %addr, "Starting HTTP web server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Web server error")?;

    Ok(())
}

/// Create the main application router.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
