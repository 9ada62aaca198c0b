use std::path::Path;

use super::errors::TidyError;

/// Roots a live run must never start from
const PROTECTED_PATHS: &[&str] = &[
    "/",
    "/bin",
    "/boot",
    "/dev",
    "/etc",
    "/lib",
    "/opt",
    "/proc",
    "/sbin",
    "/sys",
    "/usr",
    "/var",
    "/System",
    "/Applications",
    "/Library",
    "/Users",
    "/home",
];

/// Subdirectories of home that must never be used as a live-run root
const PROTECTED_HOME_DIRS: &[&str] = &["", "Desktop", "Documents", "Downloads", ".ssh", ".gnupg"];

/// Check if a path is protected and must never be cleaned as a whole
pub fn is_protected(path: &Path) -> bool {
    if PROTECTED_PATHS.iter().any(|p| path == Path::new(p)) {
        return true;
    }

    if let Some(home) = dirs::home_dir() {
        return PROTECTED_HOME_DIRS.iter().any(|dir| {
            if dir.is_empty() {
                path == home
            } else {
                path == home.join(dir)
            }
        });
    }

    false
}

/// Refuse a live run rooted at a protected path. Dry runs are always allowed.
pub fn check_root(root: &Path, dry_run: bool) -> Result<(), TidyError> {
    if !dry_run && is_protected(root) {
        return Err(TidyError::Protected {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}
