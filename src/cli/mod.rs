//! Command-line interface
//!
//! Argument definitions and command handlers for the `wikicat` binary.

pub mod args;
pub mod commands;
