//! Configuration schema types
//!
//! Defines the job configuration record deserialized from YAML or JSON
//! configuration files. The record is pure data: it stores opaque
//! identifiers and paths, and interprets none of them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Job Configuration Record
// ============================================================================

/// Configuration record for the wiki comment categorization job.
///
/// Exactly five fields, all required. Wire names match the deployed
/// configuration files (`projectId`, `keyFilename`, `datasetID`,
/// `originalDataTable`, `distDataTable`); unknown keys are rejected.
///
/// The record is constructed once, from the compiled-in defaults via
/// [`JobConfig::builtin`] or from a file via
/// [`ConfigLoader::load`](crate::config::loader::ConfigLoader::load), and
/// handed to consumers frozen behind an `Arc`. No mutation API is exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobConfig {
    /// Cloud project the job runs under.
    pub project_id: String,

    /// Path to the service-account key file. The record stores only the
    /// path, never the key material.
    pub key_filename: PathBuf,

    /// Dataset containing the source and destination tables.
    #[serde(rename = "datasetID")]
    pub dataset_id: String,

    /// Table the job reads page records from.
    pub original_data_table: String,

    /// Table the job writes categorized records to.
    pub dist_data_table: String,
}

impl JobConfig {
    /// The compiled-in record for the production categorization job.
    ///
    /// Preserves the original "construct once, read many" contract: all
    /// values are literals, so construction cannot fail. The key file path
    /// is a placeholder; production deployments should supply credentials
    /// through [`CredentialSource`](crate::credentials::CredentialSource)
    /// instead of a path checked into the tree.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            project_id: "wikidetox-viz".to_string(),
            key_filename: PathBuf::from("./credentials/wikidetox-viz.json"),
            dataset_id: "wiki_conv_v2_categorize".to_string(),
            original_data_table: "unique_pageID_rerun".to_string(),
            dist_data_table: "unique_pageIDs_categorized".to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_config_deserialize_yaml() {
        let yaml = r#"
projectId: "wikidetox-viz"
keyFilename: "./credentials/wikidetox-viz.json"
datasetID: "wiki_conv_v2_categorize"
originalDataTable: "unique_pageID_rerun"
distDataTable: "unique_pageIDs_categorized"
"#;

        let config: JobConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.project_id, "wikidetox-viz");
        assert_eq!(
            config.key_filename,
            PathBuf::from("./credentials/wikidetox-viz.json")
        );
        assert_eq!(config.dataset_id, "wiki_conv_v2_categorize");
        assert_eq!(config.original_data_table, "unique_pageID_rerun");
        assert_eq!(config.dist_data_table, "unique_pageIDs_categorized");
    }

    #[test]
    fn test_job_config_deserialize_json() {
        let json = r#"{
            "projectId": "wikidetox-viz",
            "keyFilename": "./credentials/wikidetox-viz.json",
            "datasetID": "wiki_conv_v2_categorize",
            "originalDataTable": "unique_pageID_rerun",
            "distDataTable": "unique_pageIDs_categorized"
        }"#;

        let config: JobConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, JobConfig::builtin());
    }

    #[test]
    fn test_missing_field_rejected() {
        // distDataTable omitted; no partial configuration is valid
        let yaml = r#"
projectId: "wikidetox-viz"
keyFilename: "./key.json"
datasetID: "wiki_conv_v2_categorize"
originalDataTable: "unique_pageID_rerun"
"#;

        let result: std::result::Result<JobConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err(), "missing field should be rejected");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let yaml = r#"
projectId: "wikidetox-viz"
keyFilename: "./key.json"
datasetID: "wiki_conv_v2_categorize"
originalDataTable: "unique_pageID_rerun"
distDataTable: "unique_pageIDs_categorized"
extraKey: "surprise"
"#;

        let result: std::result::Result<JobConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err(), "unknown key should be rejected");
    }

    #[test]
    fn test_wire_names_round_trip() {
        let yaml = serde_yaml::to_string(&JobConfig::builtin()).unwrap();
        for key in [
            "projectId",
            "keyFilename",
            "datasetID",
            "originalDataTable",
            "distDataTable",
        ] {
            assert!(yaml.contains(key), "serialized config missing key {key}");
        }

        let back: JobConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, JobConfig::builtin());
    }

    #[test]
    fn test_builtin_literals() {
        let config = JobConfig::builtin();
        assert_eq!(config.project_id, "wikidetox-viz");
        assert_eq!(config.dataset_id, "wiki_conv_v2_categorize");
        assert_eq!(config.original_data_table, "unique_pageID_rerun");
        assert_eq!(config.dist_data_table, "unique_pageIDs_categorized");
    }

    #[test]
    fn test_referential_stability() {
        // Two reads of the same record observe identical values
        let config = std::sync::Arc::new(JobConfig::builtin());
        let first = std::sync::Arc::clone(&config);
        let second = std::sync::Arc::clone(&config);
        assert_eq!(*first, *second);
        assert_eq!(first.project_id, second.project_id);
    }
}
