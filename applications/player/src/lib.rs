//! Podcastr Player Library
//!
//! Catalog loading, layered configuration and update rendering for the
//! `podcastr-player` binary.
//!
//! This library exposes the core components for testing purposes.

pub mod catalog;
pub mod config;
pub mod error;
pub mod render;

// Re-export commonly used types for convenience
pub use catalog::load_catalog;
pub use config::{PlayerConfig, SimulationSettings};
pub use error::{PlayerError, Result};
pub use render::describe;
