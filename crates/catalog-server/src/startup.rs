//! Server startup utilities.

use catalog_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
   ______      __        __
  / ____/___ _/ /_____ _/ /___  ____ _
 / /   / __ `/ __/ __ `/ / __ \/ __ `/
/ /___/ /_/ / /_/ /_/ / / /_/ / /_/ /
\____/\__,_/\__/\__,_/_/\____/\__, /
                             /____/
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let port = config.server.port;
    info!("{}", separator);
    info!("Products:  http://{}:{}/api/products", config.server.host, port);
    info!("Processed: http://{}:{}/api/products/all", config.server.host, port);
    info!("Health:    http://{}:{}/health", config.server.host, port);
    info!("API Docs:  http://{}:{}/swagger-ui", config.server.host, port);
    info!("Store:     {}", config.database.backend);
    info!(
        "Cache:     {}",
        if config.redis.enabled { "redis" } else { "memory" }
    );
    info!("{}", separator);
}
