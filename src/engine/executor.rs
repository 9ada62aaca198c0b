use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::condition::evaluate;
use super::events::{Phase, ScanEvent};
use super::listing::{absolutize, is_dir_entry, sorted_entries, to_slash};
use crate::rules::ast::{Action, Rule};
use crate::rules::glob::Glob;

/// Options for a single run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Report matches without removing anything
    pub dry_run: bool,
}

impl RunOptions {
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    pub fn live() -> Self {
        Self { dry_run: false }
    }
}

/// Apply `rules` to every directory under `root` and return the matched
/// paths in discovery order.
///
/// Returned paths are absolute. A path matched by several rules is listed
/// once per rule. In a live run each match is removed as soon as it is
/// found; removal failures are ignored and the path is still reported.
pub fn run(root: &Path, rules: &[Rule], options: &RunOptions) -> Vec<PathBuf> {
    run_with_events(root, rules, options, |_| {})
}

/// Same as [`run`], reporting progress through `on_event` as it goes
pub fn run_with_events<F>(
    root: &Path,
    rules: &[Rule],
    options: &RunOptions,
    mut on_event: F,
) -> Vec<PathBuf>
where
    F: FnMut(ScanEvent),
{
    let root = absolutize(root);
    on_event(ScanEvent::ScanStart {
        root: root.clone(),
        rule_count: rules.len(),
    });

    // Captured once; deletions below never change which directories are visited
    let directories = snapshot_directories(&root, &mut on_event);
    tracing::debug!(
        root = %root.display(),
        directories = directories.len(),
        rules = rules.len(),
        dry_run = options.dry_run,
        "directory snapshot captured"
    );

    let mut sink = MatchSink {
        dry_run: options.dry_run,
        found: Vec::new(),
        on_event: &mut on_event,
    };

    for rule in rules {
        tracing::debug!(rule = %rule, "applying rule");
        for directory in &directories {
            sink.emit(ScanEvent::ScanDirectory {
                directory: directory.clone(),
            });
            if !evaluate(directory, rule.condition.as_ref()) {
                continue;
            }
            match rule.action {
                Action::Delete => resolve_target(directory, &rule.target, &mut sink),
            }
        }
    }

    let found = sink.found;
    on_event(ScanEvent::ScanComplete {
        root,
        files_found: found.len(),
    });
    found
}

/// Every readable directory under `root`, `root` included, in pre-order
fn snapshot_directories<F>(root: &Path, on_event: &mut F) -> Vec<PathBuf>
where
    F: FnMut(ScanEvent),
{
    let mut directories = Vec::new();
    let mut unreadable = HashSet::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_dir() => directories.push(entry.into_path()),
            Ok(_) => {}
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                unreadable.insert(path.clone());
                on_event(ScanEvent::Error {
                    phase: Phase::Traversal,
                    path,
                    error: io::Error::from(err),
                });
            }
        }
    }

    directories.retain(|d| !unreadable.contains(d));
    directories
}

/// Collect the concrete paths `target` names inside `directory`
fn resolve_target<F>(directory: &Path, target: &Glob, sink: &mut MatchSink<'_, F>)
where
    F: FnMut(ScanEvent),
{
    if target.is_recursive() {
        descend(directory, target, sink);
        return;
    }

    for entry in sorted_entries(directory) {
        if target.matches(&entry.file_name().to_string_lossy()) {
            let is_directory = is_dir_entry(&entry);
            sink.matched(entry.into_path(), is_directory);
        }
    }
}

/// Test every path below `directory` against `target` by its `/`-separated
/// relative path. Subdirectories are entered whether or not they matched,
/// unless the match was just removed.
fn descend<F>(directory: &Path, target: &Glob, sink: &mut MatchSink<'_, F>)
where
    F: FnMut(ScanEvent),
{
    let mut walker = WalkDir::new(directory)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        // Unreadable, or gone because an earlier rule removed it
        let Ok(entry) = entry else {
            continue;
        };
        let is_directory = is_dir_entry(&entry);
        let relative = to_slash(entry.path().strip_prefix(directory).unwrap_or(entry.path()));

        if target.matches(&relative) {
            let removed = sink.matched(entry.into_path(), is_directory);
            // The walker listed this directory before yielding it
            if removed && is_directory {
                walker.skip_current_dir();
            }
        }
    }
}

/// Accumulates matches and performs removals for a run
struct MatchSink<'a, F> {
    dry_run: bool,
    found: Vec<PathBuf>,
    on_event: &'a mut F,
}

impl<F> MatchSink<'_, F>
where
    F: FnMut(ScanEvent),
{
    fn emit(&mut self, event: ScanEvent) {
        (self.on_event)(event);
    }

    /// Record a match, removing it in a live run. Returns whether the path
    /// was removed.
    fn matched(&mut self, path: PathBuf, is_directory: bool) -> bool {
        tracing::trace!(path = %path.display(), is_directory, "matched");
        self.emit(ScanEvent::FileFound { path: path.clone() });
        let removed = !self.dry_run && self.remove(&path, is_directory);
        self.found.push(path);
        removed
    }

    fn remove(&mut self, path: &Path, is_directory: bool) -> bool {
        let result = if is_directory {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };

        match result {
            Ok(()) => {
                self.emit(ScanEvent::FileDeleted {
                    path: path.to_path_buf(),
                    is_directory,
                });
                true
            }
            // Already gone, usually taken out by an earlier rule
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(error) => {
                tracing::debug!(path = %path.display(), %error, "removal failed");
                self.emit(ScanEvent::Error {
                    phase: Phase::Deletion,
                    path: path.to_path_buf(),
                    error,
                });
                false
            }
        }
    }
}
