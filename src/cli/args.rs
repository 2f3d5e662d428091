//! CLI argument definitions using clap
//!
//! Commands:
//! - superheroes serve --config <path> [--port <n>]
//! - superheroes migrate --config <path>
//! - superheroes seed --config <path>
//! - superheroes delete-hero --id <n> --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::model::Id;

/// Superheroes - heroes, powers and hero powers over HTTP
#[derive(Parser, Debug)]
#[command(name = "superheroes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Migrate the database and serve the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./superheroes.json")]
        config: PathBuf,

        /// Port to listen on, overriding the configuration
        #[arg(long)]
        port: Option<u16>,
    },

    /// Apply pending schema migrations
    Migrate {
        /// Path to configuration file
        #[arg(long, default_value = "./superheroes.json")]
        config: PathBuf,
    },

    /// Replace all records with the demo data set
    Seed {
        /// Path to configuration file
        #[arg(long, default_value = "./superheroes.json")]
        config: PathBuf,
    },

    /// Delete a hero and every hero power it owns
    DeleteHero {
        /// Path to configuration file
        #[arg(long, default_value = "./superheroes.json")]
        config: PathBuf,

        /// Id of the hero to delete
        #[arg(long)]
        id: Id,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["superheroes", "serve"]).unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, PathBuf::from("./superheroes.json"));
                assert_eq!(port, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_delete_hero_requires_id() {
        assert!(Cli::try_parse_from(["superheroes", "delete-hero"]).is_err());

        let cli = Cli::try_parse_from(["superheroes", "delete-hero", "--id", "7"]).unwrap();
        assert!(matches!(cli.command, Command::DeleteHero { id: 7, .. }));
    }
}
