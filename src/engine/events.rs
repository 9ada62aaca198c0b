use std::fmt;
use std::io;
use std::path::PathBuf;

/// Pipeline stage an error was raised in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Capturing the directory snapshot
    Traversal,
    /// Removing a matched path
    Deletion,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Traversal => write!(f, "traversal"),
            Phase::Deletion => write!(f, "deletion"),
        }
    }
}

/// Progress notifications from a run, delivered in pipeline order
#[derive(Debug)]
pub enum ScanEvent {
    ScanStart { root: PathBuf, rule_count: usize },
    ScanDirectory { directory: PathBuf },
    FileFound { path: PathBuf },
    FileDeleted { path: PathBuf, is_directory: bool },
    Error { phase: Phase, path: PathBuf, error: io::Error },
    ScanComplete { root: PathBuf, files_found: usize },
}
