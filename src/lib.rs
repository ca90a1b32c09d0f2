//! Bookshelf Library Server
//!
//! Tracks books, members and borrow/return transactions, exposing a REST JSON
//! API. Available copies are always derived from outstanding borrow records.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
