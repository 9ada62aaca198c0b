use serde::Serialize;
use std::path::PathBuf;

use crate::engine::ScanEvent;

/// Summary of one run, assembled from its events
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub rule_count: usize,
    pub directories_visited: usize,
    pub paths: Vec<PathBuf>,
    pub deleted: usize,
    pub errors: Vec<String>,
    pub duration_secs: f64,
}

impl RunReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Fold one event into the report
    pub fn record(&mut self, event: &ScanEvent) {
        match event {
            ScanEvent::ScanStart { root, rule_count } => {
                self.root = root.clone();
                self.rule_count = *rule_count;
            }
            ScanEvent::ScanDirectory { .. } => self.directories_visited += 1,
            ScanEvent::FileFound { path } => self.paths.push(path.clone()),
            ScanEvent::FileDeleted { .. } => self.deleted += 1,
            ScanEvent::Error { phase, path, error } => self.errors.push(format!(
                "{} failed for {}: {}",
                phase,
                crate::common::format::format_path(path),
                error
            )),
            ScanEvent::ScanComplete { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Phase;
    use std::io;

    #[test]
    fn test_record_counts_events() {
        let mut report = RunReport::new(false);
        let events = vec![
            ScanEvent::ScanStart {
                root: PathBuf::from("/work"),
                rule_count: 2,
            },
            ScanEvent::ScanDirectory {
                directory: PathBuf::from("/work"),
            },
            ScanEvent::FileFound {
                path: PathBuf::from("/work/a.log"),
            },
            ScanEvent::FileDeleted {
                path: PathBuf::from("/work/a.log"),
                is_directory: false,
            },
            ScanEvent::FileFound {
                path: PathBuf::from("/work/locked.log"),
            },
            ScanEvent::Error {
                phase: Phase::Deletion,
                path: PathBuf::from("/work/locked.log"),
                error: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            },
            ScanEvent::ScanComplete {
                root: PathBuf::from("/work"),
                files_found: 2,
            },
        ];
        for event in &events {
            report.record(event);
        }

        assert_eq!(report.root, PathBuf::from("/work"));
        assert_eq!(report.rule_count, 2);
        assert_eq!(report.directories_visited, 1);
        assert_eq!(report.paths.len(), 2);
        assert_eq!(report.deleted, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("deletion failed"));
    }
}
