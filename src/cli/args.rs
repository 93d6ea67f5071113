//! CLI argument definitions
//!
//! All Clap derive structs for `wikicat` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// Root CLI
// ============================================================================

/// Configuration toolkit for the wiki comment categorization pipeline.
#[derive(Parser, Debug)]
#[command(name = "wikicat", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "WIKICAT_COLOR")]
    pub color: ColorChoice,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect, validate, or scaffold job configuration files.
    Config(ConfigCommand),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Config Command
// ============================================================================

/// Configuration management commands.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Config subcommand.
    #[command(subcommand)]
    pub subcommand: ConfigSubcommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Validate configuration files without running anything.
    Validate(ConfigValidateArgs),

    /// Show a resolved configuration record.
    Show(ConfigShowArgs),

    /// Write a starter configuration file.
    Init(ConfigInitArgs),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
pub struct ConfigValidateArgs {
    /// Configuration files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `config show`.
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Path to a configuration file. Without it, the compiled-in record
    /// is shown.
    #[arg(short, long, env = "WIKICAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: ShowFormat,
}

/// Arguments for `config init`.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Destination path for the starter configuration file.
    pub path: PathBuf,

    /// Overwrite the destination if it already exists.
    #[arg(long)]
    pub force: bool,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Output format for `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShowFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
    /// YAML output (valid as a configuration file).
    Yaml,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validate_parses() {
        let cli = Cli::try_parse_from(["wikicat", "config", "validate", "job.yaml"]);
        assert!(cli.is_ok(), "Failed to parse: {cli:?}");
    }

    #[test]
    fn test_config_validate_requires_files() {
        let result = Cli::try_parse_from(["wikicat", "config", "validate"]);
        assert!(result.is_err(), "Expected error for missing files");
    }

    #[test]
    fn test_config_validate_multiple_files() {
        let cli =
            Cli::try_parse_from(["wikicat", "config", "validate", "a.yaml", "b.json"]).unwrap();
        if let Commands::Config(cmd) = cli.command {
            if let ConfigSubcommand::Validate(args) = cmd.subcommand {
                assert_eq!(args.files.len(), 2);
                assert!(!args.strict);
                return;
            }
        }
        panic!("Expected ConfigValidateArgs");
    }

    #[test]
    fn test_config_show_without_path() {
        let cli = Cli::try_parse_from(["wikicat", "config", "show"]).unwrap();
        if let Commands::Config(cmd) = cli.command {
            if let ConfigSubcommand::Show(args) = cmd.subcommand {
                assert!(args.config.is_none());
                assert_eq!(args.format, ShowFormat::Human);
                return;
            }
        }
        panic!("Expected ConfigShowArgs");
    }

    #[test]
    fn test_config_show_formats_parse() {
        for format in ["human", "json", "yaml"] {
            let cli = Cli::try_parse_from(["wikicat", "config", "show", "--format", format]);
            assert!(cli.is_ok(), "Failed to parse format={format}");
        }
    }

    #[test]
    fn test_config_init_parses() {
        let cli = Cli::try_parse_from(["wikicat", "config", "init", "job.yaml", "--force"]).unwrap();
        if let Commands::Config(cmd) = cli.command {
            if let ConfigSubcommand::Init(args) = cmd.subcommand {
                assert_eq!(args.path, PathBuf::from("job.yaml"));
                assert!(args.force);
                return;
            }
        }
        panic!("Expected ConfigInitArgs");
    }

    #[test]
    fn test_help_output() {
        let result = Cli::try_parse_from(["wikicat", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_output() {
        let result = Cli::try_parse_from(["wikicat", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_color_choices_parse() {
        for variant in ["auto", "always", "never"] {
            let cli = Cli::try_parse_from(["wikicat", "--color", variant, "config", "show"]);
            assert!(cli.is_ok(), "Failed to parse color={variant}");
        }
    }

    #[test]
    fn test_completions_shells_parse() {
        for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
            let cli = Cli::try_parse_from(["wikicat", "completions", shell]);
            assert!(cli.is_ok(), "Failed to parse shell={shell}");
        }
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["wikicat", "-vvv", "config", "show"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_quiet_flag() {
        let cli = Cli::try_parse_from(["wikicat", "--quiet", "config", "show"]).unwrap();
        assert!(cli.quiet);
    }
}
