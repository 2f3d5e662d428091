//! # REST API Router
//!
//! Route table for the heroes API.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::storage::Store;

use super::handler::{self, AppState, SharedState};

/// REST API server state
#[derive(Debug)]
pub struct RestServer {
    state: SharedState,
}

impl RestServer {
    pub fn new(store: Store) -> Self {
        Self {
            state: Arc::new(AppState::new(store)),
        }
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        Router::new()
            .route("/", get(handler::index))
            .route("/heroes", get(handler::list_heroes))
            .route("/heroes/:id", get(handler::get_hero))
            .route("/powers", get(handler::list_powers))
            .route(
                "/powers/:id",
                get(handler::get_power).patch(handler::update_power),
            )
            .route("/hero_powers", post(handler::create_hero_power))
            .with_state(self.state)
    }
}
