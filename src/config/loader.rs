//! Configuration loader
//!
//! Implements the configuration loading pipeline:
//! 1. File size check
//! 2. Raw read (UTF-8 BOM tolerated)
//! 3. Environment variable expansion (pre-parse, on raw text)
//! 4. Parsing (JSON for `.json` paths, YAML otherwise)
//! 5. Deserialization to the typed record
//! 6. Validation
//! 7. Freeze with `Arc`

use crate::config::schema::JobConfig;
use crate::config::validation::Validator;
use crate::error::ConfigError;

use std::path::{Path, PathBuf};
use std::sync::Arc;

// ============================================================================
// Public API
// ============================================================================

/// Options for the configuration loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// Limits for configuration size.
    pub limits: ConfigLimits,
}

/// Limits for configuration size to prevent resource exhaustion.
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    /// Maximum configuration file size in bytes.
    pub max_config_size: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            // A five-field record has no business being larger than this.
            max_config_size: env_or("WIKICAT_MAX_CONFIG_SIZE", 1024 * 1024),
        }
    }
}

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration, frozen for hand-off.
    pub config: Arc<JobConfig>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Configuration loader.
///
/// Handles the full pipeline from a YAML or JSON file to a frozen
/// [`JobConfig`].
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new configuration loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads a configuration file and returns the frozen record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read or exceeds the size limit
    /// - Parsing fails
    /// - An environment variable reference is unclosed or a required
    ///   variable is unset
    /// - Validation fails
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > self.options.limits.max_config_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {} bytes", self.options.limits.max_config_size),
            });
        }

        let raw_content = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        // Tolerate a UTF-8 BOM
        let raw_content = raw_content.strip_prefix('\u{feff}').unwrap_or(&raw_content);

        // Environment variable substitution runs on raw text, before
        // parsing, so type inference in the parser is unaffected.
        let mut env_sub = EnvSubstitution::new();
        let substituted = env_sub.substitute(raw_content, path)?;
        warnings.extend(env_sub.warnings);

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => parse_json(&substituted, path)?,
            _ => parse_yaml(&substituted, path)?,
        };

        let mut validator = Validator::new();
        let validation_result = validator.validate(&config);

        if validation_result.has_errors() {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                errors: validation_result.errors,
            });
        }

        for issue in validation_result.warnings {
            warnings.push(LoadWarning {
                message: issue.message,
                location: Some(issue.path),
            });
        }

        Ok(LoadResult {
            config: Arc::new(config),
            warnings,
        })
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parses a YAML document into the typed record.
fn parse_yaml(content: &str, path: &Path) -> Result<JobConfig, ConfigError> {
    let root: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })?;

    if root.is_null() {
        return Err(ConfigError::ParseError {
            path: path.to_path_buf(),
            line: None,
            message: "configuration file is empty".to_string(),
        });
    }

    serde_yaml::from_value(root).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        line: None,
        message: format!("failed to deserialize configuration: {e}"),
    })
}

/// Parses a JSON document into the typed record.
fn parse_json(content: &str, path: &Path) -> Result<JobConfig, ConfigError> {
    serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        line: Some(e.line()),
        message: e.to_string(),
    })
}

// ============================================================================
// Environment Variable Substitution
// ============================================================================

/// A parsed `${...}` variable reference.
#[derive(Debug, PartialEq, Eq)]
enum VarSpec {
    /// `${VAR}` - expand to value, empty string with warning if unset.
    Plain(String),
    /// `${VAR:-default}` - expand to default if unset.
    Defaulted(String, String),
    /// `${VAR:?message}` - fail with the message if unset.
    Required(String, String),
}

/// Pre-parse environment variable substitution.
struct EnvSubstitution {
    warnings: Vec<LoadWarning>,
}

impl EnvSubstitution {
    const fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Substitutes environment variables in raw configuration text.
    ///
    /// Supports `${VAR}`, `${VAR:-default}`, `${VAR:?message}`, and `$$`
    /// as an escape for a literal `$`.
    fn substitute(&mut self, raw: &str, source_path: &Path) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(raw.len());
        let mut chars = raw.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                result.push(c);
                continue;
            }

            match chars.peek() {
                Some('$') => {
                    chars.next();
                    result.push('$');
                }
                Some('{') => {
                    chars.next();
                    let spec = parse_var_spec(&mut chars)?;
                    self.expand(&spec, &mut result, source_path)?;
                }
                _ => result.push('$'),
            }
        }

        Ok(result)
    }

    /// Expands a single variable reference into the output buffer.
    fn expand(
        &mut self,
        spec: &VarSpec,
        out: &mut String,
        source_path: &Path,
    ) -> Result<(), ConfigError> {
        let name = match spec {
            VarSpec::Plain(name) | VarSpec::Defaulted(name, _) | VarSpec::Required(name, _) => name,
        };

        if let Ok(value) = std::env::var(name) {
            out.push_str(&value);
            return Ok(());
        }

        match spec {
            VarSpec::Defaulted(_, default) => out.push_str(default),
            VarSpec::Required(name, message) => {
                return Err(ConfigError::EnvVarNotSet {
                    var: name.clone(),
                    location: message.clone(),
                });
            }
            VarSpec::Plain(name) => {
                // Unset without a default expands to the empty string.
                self.warnings.push(LoadWarning {
                    message: format!(
                        "Environment variable '{name}' is not set, using empty string"
                    ),
                    location: Some(source_path.display().to_string()),
                });
            }
        }

        Ok(())
    }
}

/// Parses the body of a `${...}` reference, cursor positioned after `{`.
fn parse_var_spec(
    chars: &mut std::iter::Peekable<std::str::Chars>,
) -> Result<VarSpec, ConfigError> {
    let mut name = String::new();

    while let Some(c) = chars.next() {
        match c {
            '}' => return Ok(VarSpec::Plain(name)),
            ':' => match chars.peek() {
                Some('-') => {
                    chars.next();
                    return Ok(VarSpec::Defaulted(name, read_until_close(chars)?));
                }
                Some('?') => {
                    chars.next();
                    return Ok(VarSpec::Required(name, read_until_close(chars)?));
                }
                _ => name.push(':'),
            },
            _ => name.push(c),
        }
    }

    Err(ConfigError::ParseError {
        path: PathBuf::new(),
        line: None,
        message: format!("unclosed environment variable reference: ${{{name}"),
    })
}

/// Reads content until the closing `}`, handling nested braces.
fn read_until_close(
    chars: &mut std::iter::Peekable<std::str::Chars>,
) -> Result<String, ConfigError> {
    let mut value = String::new();
    let mut depth = 1;

    for c in chars.by_ref() {
        match c {
            '{' => {
                depth += 1;
                value.push(c);
            }
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(value);
                }
                value.push(c);
            }
            _ => value.push(c),
        }
    }

    Err(ConfigError::ParseError {
        path: PathBuf::new(),
        line: None,
        message: "unclosed environment variable reference".to_string(),
    })
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parses an environment variable with a default value.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Tests
// ============================================================================
