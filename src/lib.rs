//! Bookshelf catalog server
//!
//! A small REST JSON API for keeping track of books being read, backed by an
//! in-memory catalog that lives as long as the process.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone, Default)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            services: Arc::new(services::Services::new()),
        }
    }
}
