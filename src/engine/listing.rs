use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Entries directly inside `dir`, sorted by file name. Unreadable entries
/// are dropped, and an unreadable `dir` yields nothing.
pub fn sorted_entries(dir: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
}

/// True for real directories; symlinks are never treated as directories
pub fn is_dir_entry(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
}

/// Immediate subdirectories of `dir`, empty when it cannot be read
pub fn subdirectories(dir: &Path) -> Vec<PathBuf> {
    sorted_entries(dir)
        .filter(is_dir_entry)
        .map(DirEntry::into_path)
        .collect()
}

/// Make `path` absolute and fold away `.` and `..` lexically, without
/// resolving symlinks
pub fn absolutize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// `/`-separated form of a path relative to some base
pub fn to_slash(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_slash() {
        assert_eq!(to_slash(Path::new("a/b/c.tmp")), "a/b/c.tmp");
        assert_eq!(to_slash(Path::new("x")), "x");
    }

    #[test]
    fn test_unreadable_dir_has_no_subdirectories() {
        assert!(subdirectories(Path::new("/definitely/not/here")).is_empty());
    }

    #[test]
    fn test_absolutize_folds_dot_components() {
        assert_eq!(absolutize(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(absolutize(Path::new("/a/b/..")), PathBuf::from("/a"));
        assert_eq!(absolutize(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn test_absolutize_relative_has_no_parent_components() {
        let resolved = absolutize(Path::new("src/.."));
        assert!(resolved.is_absolute());
        assert!(!resolved.components().any(|c| c == Component::ParentDir));
        assert_eq!(resolved, absolutize(Path::new(".")));
    }

    #[test]
    fn test_entries_are_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b", "c", "a"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let names: Vec<_> = sorted_entries(dir.path())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
