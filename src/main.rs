use tracing_subscriber::EnvFilter;

use clinic_api::api::server::start_server;
use clinic_api::api::types::ApiContext;
use clinic_api::config;
use clinic_api::db::Database;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let db_path = config::database_path();
    if let Some(parent) = db_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::error!("Cannot create data directory {}: {e}", parent.display());
            std::process::exit(1);
        }
    }

    // Connectivity probe at startup: refuse to serve without a database.
    let database = match Database::open(&db_path) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Database connection failed: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("Connected to SQLite database at {}", db_path.display());

    let ctx = ApiContext::new(database);
    let mut server = match start_server(ctx, config::bind_addr()).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };
    tracing::info!("Server running on http://{}", server.local_addr);

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    server.shutdown();
}
