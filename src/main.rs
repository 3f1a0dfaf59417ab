//! incident-search: full-text incident search server
//!
//! This is the main entry point for the application.

use anyhow::Result;
use incident_search::{
    config::{self, Settings},
    engines::Manticore,
    indexer::Reindexer,
    network::HttpClient,
    store::PgRecordStore,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

enum Command {
    Serve,
    Reindex,
    Help,
    Version,
}

fn parse_command() -> Result<Command> {
    match std::env::args().nth(1).as_deref() {
        None | Some("serve") => Ok(Command::Serve),
        Some("reindex") => Ok(Command::Reindex),
        Some("-h") | Some("--help") | Some("help") => Ok(Command::Help),
        Some("-V") | Some("--version") => Ok(Command::Version),
        Some(other) => anyhow::bail!("unknown command '{}', see --help", other),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let command = parse_command()?;
    match command {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Version => {
            println!("incident-search {}", incident_search::VERSION);
            return Ok(());
        }
        _ => {}
    }

    let settings_path = config::locate();
    let settings = config::load(settings_path.as_deref())?;
    init_logging(&settings);
    info!("Starting incident-search v{}", incident_search::VERSION);
    match &settings_path {
        Some(path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }

    let client = HttpClient::with_settings(&settings.engine)?;
    let engine = Arc::new(Manticore::new(client, &settings.engine)?);
    info!("Search engine at {}", settings.engine.url);

    let store = Arc::new(PgRecordStore::connect_lazy(&settings.database)?);
    info!("Record store pool initialized");

    let result = match command {
        Command::Reindex => reindex(&settings, engine.as_ref(), store.as_ref()).await,
        _ => serve(settings, engine, store.clone()).await,
    };

    store.close().await;
    result
}

async fn serve(settings: Settings, engine: Arc<Manticore>, store: Arc<PgRecordStore>) -> Result<()> {
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    let state = AppState::new(settings, engine, store)?;
    info!("Application state initialized");

    let app = create_router(state);

    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn reindex(settings: &Settings, engine: &Manticore, store: &PgRecordStore) -> Result<()> {
    let written = Reindexer::new(store, engine, &settings.engine.index, &settings.indexer)
        .run()
        .await?;
    info!("Index '{}' now holds {} documents", settings.engine.index, written);
    Ok(())
}

/// Initialize logging; `RUST_LOG` wins over the configured level
fn init_logging(settings: &Settings) {
    let default_level = if settings.general.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
incident-search v{}
Full-text incident search with rank-preserving enrichment

USAGE:
    incident-search [COMMAND]

COMMANDS:
    serve      Run the HTTP server (default)
    reindex    Copy every incident from the database into the search index

OPTIONS:
    -h, --help       Print help information
    -V, --version    Print version information

ENVIRONMENT VARIABLES:
    INCIDENT_SEARCH_SETTINGS_PATH  Path to settings.yml
    INCIDENT_SEARCH_DEBUG          Enable debug logging (true/false)
    INCIDENT_SEARCH_PORT           Server port
    INCIDENT_SEARCH_BIND_ADDRESS   Bind address
    INCIDENT_SEARCH_DATABASE_URL   PostgreSQL connection URL
    INCIDENT_SEARCH_ENGINE_URL     Manticore HTTP URL
    RUST_LOG                       Log filter (overrides the debug flag)
"#,
        incident_search::VERSION
    );
}
