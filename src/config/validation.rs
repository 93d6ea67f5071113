//! Configuration validation
//!
//! Semantic validation for job configuration records, performed on the
//! fully deserialized [`JobConfig`]. The record itself stores opaque
//! values; every interpretation of them lives here, as an explicit
//! pipeline stage.
//!
//! Validation collects ALL errors (doesn't stop at first) to provide
//! comprehensive feedback to users.

use crate::config::schema::JobConfig;
use crate::error::{Severity, ValidationIssue};

// ============================================================================
// Public API
// ============================================================================

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Configuration validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a configuration record and returns the result.
    ///
    /// Collects all errors and warnings rather than stopping at the first
    /// issue.
    pub fn validate(&mut self, config: &JobConfig) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_required(config);
        self.validate_project_id(config);
        self.validate_dataset_id(config);
        self.validate_key_filename(config);
        self.validate_tables(config);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // Field Presence
    // ========================================================================

    /// Every field must be a non-empty value.
    fn validate_required(&mut self, config: &JobConfig) {
        if config.project_id.is_empty() {
            self.add_error("projectId", "value cannot be empty");
        }
        if config.key_filename.as_os_str().is_empty() {
            self.add_error("keyFilename", "value cannot be empty");
        }
        if config.dataset_id.is_empty() {
            self.add_error("datasetID", "value cannot be empty");
        }
        if config.original_data_table.is_empty() {
            self.add_error("originalDataTable", "value cannot be empty");
        }
        if config.dist_data_table.is_empty() {
            self.add_error("distDataTable", "value cannot be empty");
        }
    }

    // ========================================================================
    // Identifier Shape
    // ========================================================================

    /// Cloud project identifiers are lowercase letters, digits, and hyphens.
    fn validate_project_id(&mut self, config: &JobConfig) {
        if config.project_id.is_empty() {
            return;
        }

        let unusual = config
            .project_id
            .chars()
            .any(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        if unusual {
            self.add_warning(
                "projectId",
                "contains characters outside [a-z0-9-]; project identifiers are usually lowercase",
            );
        }
    }

    /// Dataset identifiers are letters, digits, and underscores.
    fn validate_dataset_id(&mut self, config: &JobConfig) {
        if config.dataset_id.is_empty() {
            return;
        }

        if !is_dataset_identifier(&config.dataset_id) {
            self.add_warning(
                "datasetID",
                "contains characters outside [A-Za-z0-9_]; dataset identifiers are usually restricted to these",
            );
        }
    }

    // ========================================================================
    // Key File Path
    // ========================================================================

    /// The key file path must be syntactically valid for the host platform;
    /// an in-tree relative path is flagged for review.
    fn validate_key_filename(&mut self, config: &JobConfig) {
        let path = &config.key_filename;
        if path.as_os_str().is_empty() {
            return;
        }

        if path.to_string_lossy().contains('\u{0}') {
            self.add_error("keyFilename", "path contains a NUL byte");
            return;
        }

        if path.is_relative() {
            self.add_warning(
                "keyFilename",
                "relative path resolves inside the working tree; prefer an env-injected \
                 or secret-manager credential source over a key file kept with the sources",
            );
        }
    }

    // ========================================================================
    // Table Names
    // ========================================================================

    /// Table names share the dataset identifier character set; reading and
    /// writing the same table is almost certainly a mistake.
    fn validate_tables(&mut self, config: &JobConfig) {
        for (path, value) in [
            ("originalDataTable", &config.original_data_table),
            ("distDataTable", &config.dist_data_table),
        ] {
            if !value.is_empty() && !is_dataset_identifier(value) {
                self.add_warning(
                    path,
                    "contains characters outside [A-Za-z0-9_]; table names are usually restricted to these",
                );
            }
        }

        if !config.original_data_table.is_empty()
            && config.original_data_table == config.dist_data_table
        {
            self.add_warning(
                "distDataTable",
                "source and destination name the same table; the job would overwrite its own input",
            );
        }
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    /// Adds an error to the collection.
    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    /// Adds a warning to the collection.
    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Returns `true` if the value is entirely `[A-Za-z0-9_]`.
fn is_dataset_identifier(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ============================================================================
// Tests
// ============================================================================
