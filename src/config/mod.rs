//! Configuration module
//!
//! Handles loading and validation of job configuration records: the typed
//! schema, the file loading pipeline, and the semantic validator.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigLimits, ConfigLoader, LoadResult, LoadWarning, LoaderOptions};
pub use schema::JobConfig;
pub use validation::{ValidationResult, Validator};
