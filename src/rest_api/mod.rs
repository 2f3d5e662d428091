//! # REST API Module
//!
//! HTTP endpoints for heroes, powers and hero powers.
//!
//! | Method | Path              | Shape                                   |
//! |--------|-------------------|-----------------------------------------|
//! | GET    | `/`               | static greeting                         |
//! | GET    | `/heroes`         | `{id, name, super_name}` list           |
//! | GET    | `/heroes/:id`     | hero without `hero_powers.hero`         |
//! | GET    | `/powers`         | `{id, name, description}` list          |
//! | GET    | `/powers/:id`     | power without `hero_powers`             |
//! | PATCH  | `/powers/:id`     | power with its hero powers              |
//! | POST   | `/hero_powers`    | hero power with flat `hero` and `power` |

pub mod errors;
pub mod handler;
pub mod server;

pub use errors::{ApiError, ApiResult, ErrorResponse, ValidationErrorResponse};
pub use handler::{AppState, CreateHeroPowerRequest, SharedState, UpdatePowerRequest};
pub use server::RestServer;
