use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// TidyRules: rule-driven cleanup of build artifacts and caches
#[derive(Parser, Debug)]
#[command(
    name = "tidyrules",
    version,
    about = "Rule-driven cleanup of build artifacts and caches",
    long_about = "TidyRules walks a directory tree and deletes whatever your rules name,\n\
                   conditioned on marker files nearby. Runs are dry by default.",
    after_help = "RULES:\n  \
        delete target when exists Cargo.toml\n  \
        delete node_modules when exists package.json and not parents exists .keep\n  \
        delete **/*.tmp\n\n\
        EXAMPLES:\n  \
        tidyrules run                          Dry run with ./.tidyrules\n  \
        tidyrules run ~/code --preset dev      Dry run with built-in developer rules\n  \
        tidyrules run --rules clean.rules --apply   Delete matches (asks first)\n  \
        tidyrules check clean.rules            Validate a rule file\n  \
        tidyrules presets                      List built-in rule sets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (defaults to the configured one)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode, minimal output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply rules to a directory tree
    Run {
        /// Directory to clean
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Rule file to use
        #[arg(long, short, value_name = "FILE", env = "TIDYRULES_RULES")]
        rules: Option<PathBuf>,

        /// Built-in rule set to use instead of a file
        #[arg(long, value_name = "NAME", conflicts_with = "rules")]
        preset: Option<String>,

        /// Actually delete matches
        #[arg(long)]
        apply: bool,

        /// Only report matches, even if the config disables dry runs
        #[arg(long, conflicts_with = "apply")]
        dry_run: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Parse a rule file and print the normalized rules
    Check {
        /// Rule file to validate
        file: PathBuf,
    },

    /// List built-in rule sets
    Presets {
        /// Print the rules of one preset
        name: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset to default configuration
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Write the default config file
    Init,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

impl From<OutputFormat> for crate::common::config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => Self::Human,
            OutputFormat::Json => Self::Json,
            OutputFormat::Quiet => Self::Quiet,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
