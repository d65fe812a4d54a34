//! Server startup utilities.

use roster_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
    ____             __
   / __ \____  _____/ /____  _____
  / /_/ / __ \/ ___/ __/ _ \/ ___/
 / _, _/ /_/ (__  ) /_/  __/ /
/_/ |_|\____/____/\__/\___/_/
    "#
    );
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig, cached: bool) {
    let separator = "=".repeat(60);
    let base = format!("http://{}", config.server.addr());

    info!("{}", separator);
    info!("Users API: {}/user/api/v1/", base);
    info!("Health:    {}/health", base);
    if config.observability.metrics_enabled {
        info!("Metrics:   {}{}", base, config.observability.metrics_path);
    }
    info!("Cache:     {}", if cached { config.redis.url.as_str() } else { "disabled" });
    info!("{}", separator);
}
