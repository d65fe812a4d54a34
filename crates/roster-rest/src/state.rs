//! Application state for Axum handlers.

use roster_repository::DatabasePoolInterface;
use roster_service::UserService;
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    /// Store handle pinged by the readiness probe.
    pub database: Arc<dyn DatabasePoolInterface>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        database: Arc<dyn DatabasePoolInterface>,
    ) -> Self {
        Self {
            user_service,
            database,
        }
    }

    /// Resolves the state from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module + HasComponent<dyn UserService> + HasComponent<dyn DatabasePoolInterface>,
    {
        Self {
            user_service: module.resolve(),
            database: module.resolve(),
        }
    }
}
