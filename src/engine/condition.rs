use std::iter;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::listing::{absolutize, sorted_entries, subdirectories};
use crate::rules::ast::{Location, Predicate};
use crate::rules::glob::Glob;

/// Evaluate an optional rule condition in `directory`. No condition is always true.
pub fn evaluate(directory: &Path, condition: Option<&Predicate>) -> bool {
    match condition {
        None => true,
        Some(predicate) => predicate.evaluate(directory),
    }
}

impl Predicate {
    /// Evaluate against the live filesystem around `directory`.
    /// Read errors count as "not found" and never abort evaluation.
    pub fn evaluate(&self, directory: &Path) -> bool {
        match self {
            Predicate::Exists { location, pattern } => {
                let directory = absolutize(directory);
                // Bound before returning so the iterator is dropped ahead of `directory`
                let found = location
                    .search_set(&directory)
                    .any(|candidate| contains_match(&candidate, pattern));
                found
            }
            Predicate::Not(inner) => !inner.evaluate(directory),
            Predicate::And(operands) => operands.iter().all(|op| op.evaluate(directory)),
        }
    }
}

impl Location {
    /// Directories an `exists` check at this location inspects, produced lazily
    pub fn search_set<'a>(&self, directory: &'a Path) -> Box<dyn Iterator<Item = PathBuf> + 'a> {
        match self {
            Location::Here => Box::new(iter::once(directory.to_path_buf())),
            Location::Parent => Box::new(directory.parent().map(Path::to_path_buf).into_iter()),
            Location::Parents => Box::new(directory.ancestors().skip(1).map(Path::to_path_buf)),
            Location::Child => Box::new(subdirectories(directory).into_iter()),
            Location::Children => Box::new(
                WalkDir::new(directory)
                    .min_depth(1)
                    .follow_links(false)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_dir())
                    .map(|e| e.into_path()),
            ),
            Location::Sibling => {
                let Some(parent) = directory.parent() else {
                    return Box::new(iter::empty());
                };
                let own_name = directory.file_name();
                Box::new(
                    subdirectories(parent)
                        .into_iter()
                        .filter(move |p| p.file_name() != own_name),
                )
            }
        }
    }
}

/// Whether any entry directly inside `dir` has a name matching `pattern`
fn contains_match(dir: &Path, pattern: &Glob) -> bool {
    sorted_entries(dir).any(|e| pattern.matches(&e.file_name().to_string_lossy()))
}
