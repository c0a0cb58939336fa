//! Hazardfeed Core - Domain models, ports, and configuration
//!
//! This crate contains the shared domain types and port definitions used by
//! the feed client, the NSW specialization and the CLI.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{FeedError, Result};
pub use models::{Coordinates, UpdateStatus};
