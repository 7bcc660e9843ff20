//! FreightCMS carriers service: CLI server
//!
//! ```sh
//! # Run with default config (~/.config/freightcms-carriers/config.toml)
//! carriers-service
//!
//! # Custom config path
//! carriers-service --config /etc/freightcms-carriers/config.toml
//!
//! # Override the listen port and storage
//! carriers-service --port 9090 --database-url sqlite://./dev.db?mode=rwc
//!
//! # Validate config without starting
//! carriers-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use freightcms_carriers::config::{AppConfig, StorageBackend};
use freightcms_carriers::server::{init_tracing, run, ServerOptions};

/// FreightCMS carriers: REST API for freight carrier records.
#[derive(Parser, Debug)]
#[command(
    name = "carriers-service",
    version,
    about = "REST API for freight carrier records",
    long_about = "FreightCMS carriers service: paginated listing and CRUD for \
                  freight carrier records over HTTP.\n\n\
                  Default config: ~/.config/freightcms-carriers/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CARRIERS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen host.
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the storage backend (sqlite, memory).
    #[arg(long, value_parser = parse_backend)]
    storage: Option<StorageBackend>,

    /// Override the database connection URL.
    #[arg(long)]
    database_url: Option<String>,

    /// Override allowed CORS origins (comma separated, `*` for any).
    #[arg(long, value_delimiter = ',')]
    allowed_origins: Option<Vec<String>>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

fn parse_backend(raw: &str) -> Result<StorageBackend, String> {
    match raw.to_lowercase().as_str() {
        "sqlite" => Ok(StorageBackend::Sqlite),
        "memory" => Ok(StorageBackend::Memory),
        other => Err(format!("unknown storage backend \"{other}\"")),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli
        .config
        .unwrap_or_else(freightcms_carriers::default_config_path);

    let mut load_error = None;
    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) if cli.check => return Err(e.into()),
        Err(e) => {
            load_error = Some(e);
            AppConfig::default()
        }
    };

    // CLI overrides go in before tracing so --log-level takes effect
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if let Some(host) = cli.host {
        info!("CLI override: host = {}", host);
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if let Some(backend) = cli.storage {
        info!("CLI override: storage = {}", backend.as_str());
        config.database.backend = backend;
    }
    if let Some(url) = cli.database_url {
        info!("CLI override: database_url = {}", url);
        config.database.url = url;
    }
    if let Some(origins) = cli.allowed_origins {
        info!("CLI override: allowed_origins = {:?}", origins);
        config.cors.allowed_origins = origins;
    }

    if let Err(e) = config.validate() {
        error!("{}", e);
        return Err(e.into());
    }

    // Config validation mode
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file   : {}", config_path.display());
        println!("   Listen address: {}", config.server.address());
        println!("   Storage       : {}", config.database.backend.as_str());
        if config.database.backend == StorageBackend::Sqlite {
            println!("   Database      : {}", config.database.connection_url());
        }
        println!("   Max page size : {}", config.pagination.max_page_size);
        println!("   CORS origins  : {}", config.cors.allowed_origins.join(", "));
        println!("   Log level     : {}", config.logging.level);
        println!("   Metrics       : {}", config.metrics.enabled);
        return Ok(());
    }

    let options = ServerOptions {
        auto_migrate: !cli.no_migrate,
    };

    if let Err(e) = run(config, options).await {
        error!("Service failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
