//! # Roster Server
//!
//! Serves the user API over HTTP. The record store is PostgreSQL; with
//! `redis.enabled` a cache-aside layer sits in front of it.

use roster_config::{AppConfig, ConfigLoader};
use roster_core::{RosterError, RosterResult};
use roster_rest::create_router;
use roster_server::{
    di::AppModule,
    prometheus::{metrics_router, setup_metrics_recorder},
    startup::{print_banner, print_startup_info},
    telemetry::{init_telemetry, shutdown_telemetry},
};
use tokio::signal;
use tracing::{error, info, warn};

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

    print_banner();
    info!("Starting Roster server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    let result = run(config).await;
    shutdown_telemetry();

    if let Err(e) = result {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> RosterResult<()> {
    let module = AppModule::connect(&config.database, &config.redis).await?;
    let database = module.database();

    if config.database.run_migrations {
        database.run_migrations().await?;
    }

    let mut router = match &module {
        AppModule::Store(module) => create_router(module.as_ref(), &config.server),
        AppModule::CachedStore(module) => create_router(module.as_ref(), &config.server),
    };

    if config.observability.metrics_enabled {
        match setup_metrics_recorder() {
            Ok(handle) => {
                router = router.merge(metrics_router(&config.observability.metrics_path, handle));
            }
            Err(e) => warn!(error = %e, "Metrics disabled: failed to install recorder"),
        }
    }

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RosterError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    print_startup_info(&config, module.is_cached());
    info!("Starting REST server on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RosterError::internal(format!("REST server error: {}", e)))?;

    database.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
