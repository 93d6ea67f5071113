//! Config command handlers
//!
//! Implements `config validate`, `config show`, and `config init`.

use std::sync::Arc;

use crate::cli::args::{ConfigInitArgs, ConfigShowArgs, ConfigValidateArgs, OutputFormat, ShowFormat};
use crate::config::loader::ConfigLoader;
use crate::config::schema::JobConfig;
use crate::error::{ConfigError, Severity, ValidationIssue, WikicatError};

/// Validate configuration files without running anything.
///
/// # Errors
///
/// Returns an I/O error if a file does not exist, or a config error if
/// loading or validation fails. With `--strict`, warnings are promoted to
/// validation errors.
pub fn validate(args: &ConfigValidateArgs) -> Result<(), WikicatError> {
    let loader = ConfigLoader::with_defaults();

    for path in &args.files {
        if !path.exists() {
            return Err(WikicatError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            )));
        }
        tracing::info!(file = %path.display(), "validating configuration");

        let load_result = loader.load(path)?;

        if args.strict && !load_result.warnings.is_empty() {
            let errors = load_result
                .warnings
                .iter()
                .map(|w| ValidationIssue {
                    path: w.location.clone().unwrap_or_default(),
                    message: w.message.clone(),
                    severity: Severity::Error,
                })
                .collect();
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                errors,
            }
            .into());
        }

        for warning in &load_result.warnings {
            tracing::warn!(
                location = warning.location.as_deref().unwrap_or("<unknown>"),
                "{}",
                warning.message
            );
        }

        match args.format {
            OutputFormat::Human => {
                println!(
                    "{}: ok ({} warning(s))",
                    path.display(),
                    load_result.warnings.len()
                );
            }
            OutputFormat::Json => {
                let warnings: Vec<_> = load_result
                    .warnings
                    .iter()
                    .map(|w| {
                        serde_json::json!({
                            "message": w.message,
                            "location": w.location,
                        })
                    })
                    .collect();
                let summary = serde_json::json!({
                    "file": path.display().to_string(),
                    "valid": true,
                    "warnings": warnings,
                });
                println!("{summary}");
            }
        }
    }

    Ok(())
}

/// Show a resolved configuration record.
///
/// Loads the record from `--config` when given, otherwise shows the
/// compiled-in record.
///
/// # Errors
///
/// Returns a config error if loading fails, or a serialization error for
/// the structured output formats.
pub fn show(args: &ConfigShowArgs) -> Result<(), WikicatError> {
    let config: Arc<JobConfig> = if let Some(ref path) = args.config {
        tracing::info!(config = %path.display(), "loading configuration");
        let load_result = ConfigLoader::with_defaults().load(path)?;

        for warning in &load_result.warnings {
            tracing::warn!(
                location = warning.location.as_deref().unwrap_or("<unknown>"),
                "{}",
                warning.message
            );
        }

        load_result.config
    } else {
        Arc::new(JobConfig::builtin())
    };

    match args.format {
        ShowFormat::Human => {
            println!("projectId:         {}", config.project_id);
            println!("keyFilename:       {}", config.key_filename.display());
            println!("datasetID:         {}", config.dataset_id);
            println!("originalDataTable: {}", config.original_data_table);
            println!("distDataTable:     {}", config.dist_data_table);
        }
        ShowFormat::Json => println!("{}", serde_json::to_string_pretty(&*config)?),
        ShowFormat::Yaml => print!("{}", serde_yaml::to_string(&*config)?),
    }

    Ok(())
}

/// Write a starter configuration file from the compiled-in record.
///
/// # Errors
///
/// Returns an I/O error if the destination exists (without `--force`) or
/// cannot be written.
pub fn init(args: &ConfigInitArgs) -> Result<(), WikicatError> {
    if args.path.exists() && !args.force {
        return Err(WikicatError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!(
                "refusing to overwrite {} (use --force)",
                args.path.display()
            ),
        )));
    }

    let yaml = serde_yaml::to_string(&JobConfig::builtin())?;
    let content = format!("# wikicat job configuration\n{yaml}");
    std::fs::write(&args.path, content)?;

    tracing::info!(file = %args.path.display(), "wrote starter configuration");
    Ok(())
}
