//! Application state - Dependency injection container.
//!
//! Provides centralized access to application services and
//! infrastructure.

use std::sync::Arc;

use crate::infra::{Database, UserStore};
use crate::services::{AuthService, Authenticator};

/// Application state containing all services.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state backed by the SeaORM user store.
    pub fn from_database(database: Arc<Database>) -> Self {
        let users = Arc::new(UserStore::new(database.get_connection()));

        Self {
            auth_service: Arc::new(Authenticator::new(users)),
            database,
        }
    }

    /// Create application state with a manually injected service.
    pub fn new(auth_service: Arc<dyn AuthService>, database: Arc<Database>) -> Self {
        Self {
            auth_service,
            database,
        }
    }
}
