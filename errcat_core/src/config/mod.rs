//! Configuration for errcat
//!
//! Compile-time constants, environment-driven runtime preferences and the TOML
//! catalog loader.

pub mod constants;
pub mod loader;
pub mod runtime;

pub use loader::{load_into, load_registry, parse_registry, CatalogFileError};
pub use runtime::{LoggingPreferences, QueryPreferences, RuntimeConfig};
