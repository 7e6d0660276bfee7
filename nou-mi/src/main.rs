//! nou-mi - Member Import microservice
//!
//! Admin-facing service for the Nou membership organization:
//! bulk CSV member import, CSV template download, health check.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use nou_mi::AppState;

#[derive(Debug, Parser)]
#[command(name = "nou-mi", about = "Nou member import service")]
struct Args {
    /// Root data folder (overrides NOU_ROOT_FOLDER and the config file)
    #[arg(long)]
    root_folder: Option<String>,

    /// Port to listen on (overrides the config file)
    #[arg(long, env = "NOU_MI_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Starting nou-mi (Member Import) microservice");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Step 1: Resolve configuration (CLI > env > TOML > defaults)
    let toml_config = nou_common::config::TomlConfig::load()?;
    let root_folder = nou_common::config::resolve_root_folder(
        args.root_folder.as_deref(),
        "NOU_ROOT_FOLDER",
        &toml_config,
    );

    // Step 2: Create root folder if missing, locate the database inside it
    let db_path = nou_common::config::ensure_root_folder(&root_folder)?;
    info!("Database: {}", db_path.display());

    // Step 3: Open or create the member store
    let db_pool = nou_common::db::init_database_pool(&db_path).await?;
    info!("Database connection established");

    // Create application state and router
    let state = AppState::new(db_pool);
    let app = nou_mi::build_router(state);

    // Start server
    let bind_address = toml_config
        .bind_address
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = args.port.or(toml_config.port).unwrap_or(5810);

    let listener = tokio::net::TcpListener::bind((bind_address.as_str(), port)).await?;
    info!("Listening on http://{}:{}", bind_address, port);
    info!("Health check: http://{}:{}/health", bind_address, port);

    axum::serve(listener, app).await?;

    Ok(())
}
