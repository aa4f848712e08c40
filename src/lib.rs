//! Open Library catalog loader
//!
//! Bulk-loads the Open Library author and work dumps into the catalog store.
//! Authors are loaded first; works are then flattened into books carrying the
//! display names of their authors.

pub mod config;
pub mod dump;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult, LineError};
