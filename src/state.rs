// src/state.rs

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::{ProductRepository, UserRepository};

/// Shared per-worker application state. Repositories are trait objects so
/// the integration tests can swap in an in-memory store.
#[derive(Clone)]
pub struct AppState {
  pub products: Arc<dyn ProductRepository>,
  pub users: Arc<dyn UserRepository>,
  pub config: Arc<AppConfig>,
}
