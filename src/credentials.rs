//! Credential source abstraction
//!
//! The configuration record stores a *pointer* to credential material, not
//! the material itself. `CredentialSource` generalizes that pointer so a
//! deployment can name a key file, an environment variable, or a
//! secret-manager handle, and the consuming job receives one injected value
//! instead of a path hardcoded in source-controlled configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::schema::JobConfig;
use crate::error::CredentialError;

// ============================================================================
// Credential Source
// ============================================================================

/// Where the consuming job finds its credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialSource {
    /// A service-account key file on disk.
    KeyFile {
        /// Path to the key file.
        path: PathBuf,
    },

    /// An environment variable whose value is a key file path.
    Env {
        /// Name of the environment variable.
        var: String,
    },

    /// An opaque secret-manager handle, resolved by the consuming job
    /// against its platform SDK.
    SecretManager {
        /// The handle, in whatever form the platform expects.
        handle: String,
    },
}

impl CredentialSource {
    /// The source a configuration record implies: its `keyFilename` as a
    /// key file path. This is the original deployment shape.
    #[must_use]
    pub fn from_config(config: &JobConfig) -> Self {
        Self::KeyFile {
            path: config.key_filename.clone(),
        }
    }

    /// Resolves the source to a key file path.
    ///
    /// Detects the consumer-side failures up front: a missing key file, an
    /// unset environment variable. Secret-manager handles cannot be
    /// resolved here (the caller owns the platform SDK), so that variant
    /// returns [`CredentialError::UnresolvedHandle`]; match on the source
    /// before calling if handles are in play.
    ///
    /// # Errors
    ///
    /// Returns an error if the key file does not exist, the environment
    /// variable is unset, or the source is a secret-manager handle.
    pub fn resolve(&self) -> Result<PathBuf, CredentialError> {
        match self {
            Self::KeyFile { path } => locate(path.clone()),
            Self::Env { var } => match std::env::var(var) {
                Ok(value) => locate(PathBuf::from(value)),
                Err(_) => Err(CredentialError::EnvVarNotSet { var: var.clone() }),
            },
            Self::SecretManager { handle } => Err(CredentialError::UnresolvedHandle {
                handle: handle.clone(),
            }),
        }
    }
}

/// Checks that the key file exists and returns its path.
fn locate(path: PathBuf) -> Result<PathBuf, CredentialError> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(CredentialError::KeyFileNotFound { path })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_is_key_file() {
        let config = JobConfig::builtin();
        let source = CredentialSource::from_config(&config);
        assert_eq!(
            source,
            CredentialSource::KeyFile {
                path: config.key_filename.clone()
            }
        );
    }

    #[test]
    fn test_key_file_resolves_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let key_path = dir.path().join("sa.json");
        std::fs::write(&key_path, "{}").unwrap();

        let source = CredentialSource::KeyFile {
            path: key_path.clone(),
        };
        assert_eq!(source.resolve().unwrap(), key_path);
    }

    #[test]
    fn test_key_file_missing_is_error() {
        let source = CredentialSource::KeyFile {
            path: PathBuf::from("/nonexistent/sa.json"),
        };
        match source.resolve() {
            Err(CredentialError::KeyFileNotFound { path }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/sa.json"));
            }
            other => panic!("Expected KeyFileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_env_var_unset_is_error() {
        let source = CredentialSource::Env {
            var: "WIKICAT_TEST_CRED_UNSET_XYZ123".to_string(),
        };
        match source.resolve() {
            Err(CredentialError::EnvVarNotSet { var }) => {
                assert_eq!(var, "WIKICAT_TEST_CRED_UNSET_XYZ123");
            }
            other => panic!("Expected EnvVarNotSet, got {other:?}"),
        }
    }

    #[test]
    fn test_secret_manager_handle_unresolved() {
        let source = CredentialSource::SecretManager {
            handle: "projects/wikidetox-viz/secrets/sa-key/versions/latest".to_string(),
        };
        match source.resolve() {
            Err(CredentialError::UnresolvedHandle { handle }) => {
                assert!(handle.contains("sa-key"));
            }
            other => panic!("Expected UnresolvedHandle, got {other:?}"),
        }
    }

    #[test]
    fn test_credential_source_deserialize() {
        let yaml = r#"
type: env
var: GOOGLE_APPLICATION_CREDENTIALS
"#;
        let source: CredentialSource = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            source,
            CredentialSource::Env {
                var: "GOOGLE_APPLICATION_CREDENTIALS".to_string()
            }
        );
    }
}
