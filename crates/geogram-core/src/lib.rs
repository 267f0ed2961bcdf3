#![deny(missing_docs)]
#![doc = "Core error taxonomy and shared aliases for the geogram grammar induction engine."]

pub mod errors;

pub use errors::{ErrorInfo, GeogramError, DEGENERATE_GEOMETRY};

/// A point in R^dim stored as a flat coordinate vector.
pub type Point = Vec<f64>;

/// Convenience result alias used across geogram crates.
pub type Result<T, E = GeogramError> = std::result::Result<T, E>;
