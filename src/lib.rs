//! `wikicat` — configuration toolkit for the wiki comment categorization
//! pipeline
//!
//! This library defines the job's configuration contract: the typed,
//! immutable record the categorization job is parameterized with, the
//! loading and validation pipeline that produces it, and the credential
//! source abstraction that points the job at its key material.

pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod observability;
