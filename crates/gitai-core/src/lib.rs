//! Core types, configuration, and error handling for gitai.
//!
//! This crate provides the shared foundation used by the analysis crates:
//! - [`GitaiError`] — unified error type using `thiserror`
//! - [`GitaiConfig`] — configuration loaded from `.gitai.toml`
//! - Shared types: [`OutputFormat`]

mod config;
mod error;
mod types;

pub use config::{DiffConfig, GitaiConfig, StatsConfig, TicketConfig};
pub use error::GitaiError;
pub use types::OutputFormat;

/// A convenience `Result` type for gitai operations.
pub type Result<T> = std::result::Result<T, GitaiError>;
