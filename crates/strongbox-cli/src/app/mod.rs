//! Application-level utilities for the Strongbox CLI.
//!
//! This module provides:
//! - Path and settings resolution (flags, environment, config file)
//! - An application context that owns the resolved settings

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
