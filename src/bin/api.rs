//! Todos API server binary.
//!
//! This binary creates the (still unconnected) database handle and passes
//! it to the API server together with the resolved configuration. The
//! connection itself is established in the background once the server is
//! listening.

use std::net::IpAddr;

use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use todos::api::{self, ApiError, Config};
use todos::db::SurrealDatabase;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("API server error: {0}")]
    #[diagnostic(code(todos::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "todos-api")]
#[command(author, version, about = "Todos API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on (overrides TODOS_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Database endpoint (overrides TODOS_DB_URL), e.g.
    /// surrealkv:///var/lib/todos/data or ws://localhost:8000
    #[arg(long)]
    db: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    // Load a local .env file if present; real environment wins
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::new();
    if let Some(host) = cli.host {
        config = config.with_host(host);
    }
    if let Some(port) = cli.port {
        config = config.with_port(port);
    }
    if let Some(db) = cli.db {
        config = config.with_db_url(db);
    }

    api::run(config, SurrealDatabase::new()).await?;

    Ok(())
}
