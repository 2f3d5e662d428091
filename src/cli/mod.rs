//! CLI module for the superheroes service
//!
//! Provides command-line interface for:
//! - serve: Migrate and run the HTTP API
//! - migrate: Apply schema migrations
//! - seed: Load the demo data set
//! - delete-hero: Cascading delete of one hero

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{
    database_path, delete_hero, init_logging, migrate, run, run_command, seed, serve, Config,
    DB_URI_ENV,
};
pub use errors::{CliError, CliErrorCode, CliResult};
