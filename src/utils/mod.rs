//! Utility functions and helpers.
//!
//! - [`paths`]: Directory creation
//! - [`serialization`]: JSON encoding of the manifest
//! - [`thread_pool`]: Thread pool used for parallel stat calls

/// Directory helpers
pub mod paths;
/// JSON serialization utilities
pub mod serialization;
/// Thread pool configuration for parallel operations
pub mod thread_pool;
