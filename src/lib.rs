//! superheroes - heroes, powers and hero powers over a JSON HTTP API
//!
//! Layering, bottom up:
//! - `validation`: field rules shared by constructors and setters
//! - `model`: entities and their unsaved drafts
//! - `storage`: SQLite store, migrations and demo data
//! - `serialize`: rule-driven shaping of entity graphs into JSON
//! - `rest_api` / `http_server`: routes, handlers and the listener
//! - `cli`: configuration, logging and process commands

pub mod cli;
pub mod http_server;
pub mod model;
pub mod rest_api;
pub mod serialize;
pub mod storage;
pub mod validation;
