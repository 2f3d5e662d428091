//! CLI command implementations
//!
//! `run_command` loads the configuration; each command then installs
//! logging and opens the store before doing its work. `serve`, `seed` and
//! `delete-hero` migrate first.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::model::Id;
use crate::storage::{self, Relations, Store, IN_MEMORY};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Environment variable that overrides the configured database
pub const DB_URI_ENV: &str = "DB_URI";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database path, or `:memory:` (default "app.db")
    #[serde(default = "default_database")]
    pub database: String,

    /// Log filter used when `RUST_LOG` is unset (default "info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// HTTP listener settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_database() -> String {
    "app.db".to_string()
}
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            log_filter: default_log_filter(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, then apply `DB_URI`.
    ///
    /// A missing file is not an error; built-in defaults are used instead.
    pub fn load(path: &Path) -> CliResult<Self> {
        let mut config = Self::from_file(path)?;

        if let Ok(uri) = env::var(DB_URI_ENV) {
            config.database = database_path(&uri);
        }

        config.validate()?;

        Ok(config)
    }

    /// Read configuration from file without consulting the environment
    pub fn from_file(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    fn validate(&self) -> CliResult<()> {
        if self.database.trim().is_empty() {
            return Err(CliError::config_error("database must not be empty"));
        }

        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        EnvFilter::try_new(&self.log_filter).map_err(|e| {
            CliError::config_error(format!("Invalid log_filter '{}': {}", self.log_filter, e))
        })?;

        Ok(())
    }

    /// Open the configured database
    pub fn open_store(&self) -> CliResult<Store> {
        Store::open(&self.database).map_err(|e| {
            CliError::storage_error(format!("Failed to open database '{}': {}", self.database, e))
        })
    }
}

/// Turns a `DB_URI` value into a path `Store::open` understands.
///
/// Accepts plain paths as well as `sqlite:///relative.db`,
/// `sqlite:////absolute.db` and the in-memory forms `sqlite://` and
/// `sqlite:///:memory:`.
pub fn database_path(uri: &str) -> String {
    let uri = uri.trim();
    match uri.strip_prefix("sqlite://") {
        Some("") => IN_MEMORY.to_string(),
        Some(rest) => rest.strip_prefix('/').unwrap_or(rest).to_string(),
        None => uri.to_string(),
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `filter`. Installing twice is a no-op.
pub fn init_logging(filter: &str) -> CliResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(env_filter) => env_filter,
        Err(_) => EnvFilter::try_new(filter)
            .map_err(|e| CliError::config_error(format!("Invalid log filter: {}", e)))?,
    };

    // Err only means a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();

    Ok(())
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&Config::load(&config)?, port),
        Command::Migrate { config } => migrate(&Config::load(&config)?),
        Command::Seed { config } => seed(&Config::load(&config)?),
        Command::DeleteHero { config, id } => delete_hero(&Config::load(&config)?, id),
    }
}

fn boot(config: &Config) -> CliResult<Store> {
    init_logging(&config.log_filter)?;
    config.open_store()
}

/// Migrate the database and serve the HTTP API until shutdown
pub fn serve(config: &Config, port: Option<u16>) -> CliResult<()> {
    let store = boot(config)?;
    store.migrate()?;

    let mut http_config = config.http.clone();
    if let Some(port) = port {
        http_config.port = port;
    }

    let server = HttpServer::with_config(http_config, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Apply pending schema migrations
pub fn migrate(config: &Config) -> CliResult<()> {
    let store = boot(config)?;
    let report = store.migrate()?;

    if report.applied() == 0 {
        info!(database = %config.database, version = report.to, "Schema already up to date");
    } else {
        info!(
            database = %config.database,
            from = report.from,
            to = report.to,
            "Schema migrated"
        );
    }

    Ok(())
}

/// Replace every record with the demo data set
pub fn seed(config: &Config) -> CliResult<()> {
    let store = boot(config)?;
    store.migrate()?;
    storage::seed(&store)?;
    Ok(())
}

/// Delete one hero; its hero powers go with it
pub fn delete_hero(config: &Config, id: Id) -> CliResult<()> {
    let store = boot(config)?;
    store.migrate()?;

    let removed_links = store.write(|tx| -> CliResult<usize> {
        if tx.hero(id)?.is_none() {
            return Err(CliError::not_found(format!("Hero {} not found", id)));
        }
        let links = tx.hero_powers_of_hero(id)?.len();
        tx.delete_hero(id)?;
        Ok(links)
    })?;

    info!(hero_id = id, hero_powers = removed_links, "Hero deleted");
    Ok(())
}
