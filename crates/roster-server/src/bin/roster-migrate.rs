//! Creates the configured database when missing and applies pending migrations.

use roster_config::ConfigLoader;
use roster_core::RosterResult;
use roster_repository::{DatabasePool, DatabasePoolInterface};
use roster_server::telemetry::{init_telemetry, shutdown_telemetry};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.into_config(),
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_telemetry(&config) {
        eprintln!("Failed to initialize telemetry: {}", e);
        std::process::exit(1);
    }

    let result = migrate(&config.database).await;
    shutdown_telemetry();

    if let Err(e) = result {
        error!("Migration failed: {}", e);
        std::process::exit(1);
    }
}

async fn migrate(config: &roster_config::DatabaseConfig) -> RosterResult<()> {
    if DatabasePool::ensure_database(config).await? {
        info!("Created missing database");
    }

    let pool = DatabasePool::new(config).await?;
    pool.run_migrations().await?;
    pool.close().await;

    info!("Migrations applied");
    Ok(())
}
