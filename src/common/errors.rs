use std::path::PathBuf;
use thiserror::Error;

/// Why a single line of rule text failed to parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unknown action '{found}', expected 'delete'")]
    UnknownAction { found: String },

    #[error("missing target pattern after '{action}'")]
    MissingTarget { action: String },

    #[error("missing pattern after 'exists'")]
    MissingPattern,

    #[error("expected {expected}, found '{found}'")]
    UnexpectedToken { expected: String, found: String },

    #[error("expected {expected}, found end of line")]
    UnexpectedEnd { expected: String },
}

/// A parse failure located in the rule text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind} (in `{text}`)")]
pub struct ParseError {
    /// 1-based line number
    pub line: usize,
    pub text: String,
    pub kind: ParseErrorKind,
}

/// Errors from the layers around the rule engine.
/// `anyhow` carries these up to the CLI with added context.
#[derive(Debug, Error)]
pub enum TidyError {
    #[error("Config error in '{}': {message}", path.display())]
    ConfigError { path: PathBuf, message: String },

    #[error("No rules found for '{}'. Pass --rules FILE, --preset NAME, or create a .tidyrules file", root.display())]
    RulesNotFound { root: PathBuf },

    #[error("Preset '{name}' not found. Available: {}", available.join(", "))]
    PresetNotFound {
        name: String,
        available: Vec<&'static str>,
    },

    #[error("SAFETY: Refusing to delete under protected path: {}", path.display())]
    Protected { path: PathBuf },
}
