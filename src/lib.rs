//! Bookshelf Book Catalog Server
//!
//! Record management for a catalog of books: validated create, read, update
//! and delete over a single `Book` entity, backed by PostgreSQL and exposed
//! as a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
