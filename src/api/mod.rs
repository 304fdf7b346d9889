//! HTTP API server: configuration, routing, and startup.

mod routes;
mod state;
mod system;
mod todos;


pub use routes::create_router;
pub use state::AppState;

use std::net::IpAddr;

use miette::Diagnostic;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::SurrealDatabase;

/// Port used when neither the CLI nor the environment names one.
const DEFAULT_PORT: u16 = 5000;

/// API server errors.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(todos::api::io))]
    Io(#[from] std::io::Error),
}

/// API server configuration.
///
/// Values resolve with the precedence CLI flag > env var > default.
/// `Config::new` covers the environment and default layers; the binary
/// applies CLI flags on top through the `with_*` builders.
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Database endpoint, e.g. `surrealkv:///var/lib/todos/data` or
    /// `ws://localhost:8000`. When absent the server still comes up, but
    /// the todo routes answer 503 until a restart provides one.
    pub db_url: Option<String>,
}

impl Config {
    /// Build a configuration from `TODOS_PORT` and `TODOS_DB_URL`,
    /// falling back to defaults. An unparseable port is ignored.
    pub fn new() -> Self {
        let mut config = Self::default();
        if let Ok(port) = std::env::var("TODOS_PORT")
            && let Ok(port) = port.parse()
        {
            config.port = port;
        }
        if let Ok(db_url) = std::env::var("TODOS_DB_URL") {
            config.db_url = Some(db_url);
        }
        config
    }

    /// Override the host address.
    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    /// Override the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override the database endpoint.
    pub fn with_db_url(mut self, db_url: String) -> Self {
        self.db_url = Some(db_url);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".parse().unwrap(),
            port: DEFAULT_PORT,
            db_url: None,
        }
    }
}

/// Initialize tracing subscriber with env filter
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todos=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server with the given configuration and database handle.
///
/// The database connection is established in the background so the server
/// binds immediately; requests that land before the handshake completes
/// are answered with 503 by the handlers rather than queued. A failed or
/// missing endpoint is logged and leaves the todo routes on 503.
pub async fn run(config: Config, db: SurrealDatabase) -> Result<(), ApiError> {
    init_tracing();

    match config.db_url.clone() {
        Some(endpoint) => {
            let db = db.clone();
            tokio::spawn(async move {
                match db.connect(&endpoint).await {
                    Ok(()) => info!(%endpoint, "database connection established"),
                    Err(e) => error!(%endpoint, error = %e, "database connection failed; todo routes answer 503"),
                }
            });
        }
        None => {
            error!("no database endpoint configured (set TODOS_DB_URL or pass --db); todo routes answer 503")
        }
    }

    let app = routes::create_router(AppState::new(db)).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
