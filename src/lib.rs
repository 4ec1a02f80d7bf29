pub mod config;
pub mod db;
pub mod error;

// External search provider
pub mod provider;

// Store + provider workflows
pub mod service;

// REST API
pub mod api;

pub mod cli;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
