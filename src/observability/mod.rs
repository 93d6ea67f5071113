//! Observability module
//!
//! Logging infrastructure for the `wikicat` CLI.

pub mod logging;

pub use logging::{LogFormat, init_logging};
