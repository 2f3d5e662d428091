//! Record storage for heroes, powers and hero powers
//!
//! # Design
//!
//! - SQLite via `rusqlite`, one connection behind a mutex
//! - One transaction per unit of work ([`Store::write`], [`Store::read`])
//! - Referential integrity is declared in the schema: `hero_powers` rows are
//!   removed by `ON DELETE CASCADE` when their hero or power goes away
//! - Lookups by id return `Ok(None)` for a missing row
//! - Ids are `AUTOINCREMENT`, never reused

mod errors;
pub mod migrations;
mod seed;
mod store;

pub use errors::{StorageError, StorageResult};
pub use migrations::MigrationReport;
pub use seed::{seed, SeedError, SeedReport};
pub use store::{Relations, Store, Tx, IN_MEMORY};
