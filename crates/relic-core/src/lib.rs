//! Relic Core
//!
//! Shared error handling and configuration for the relic build cache.
//! This crate has minimal dependencies and defines the vocabulary used
//! across the other crates.

pub mod config;
pub mod error;

pub use config::CacheConfig;
pub use error::{Error, Result};
