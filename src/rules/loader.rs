use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::ast::Rule;
use super::parser::parse_text;
use crate::common::config::Config;
use crate::common::errors::TidyError;

/// File name looked up in the scan root when no rules are given explicitly
pub const ROOT_RULES_FILE: &str = ".tidyrules";

const RUST_RULES: &str = include_str!("presets/rust.rules");
const NODE_RULES: &str = include_str!("presets/node.rules");
const PYTHON_RULES: &str = include_str!("presets/python.rules");
const DEV_RULES: &str = concat!(
    include_str!("presets/rust.rules"),
    "\n",
    include_str!("presets/node.rules"),
    "\n",
    include_str!("presets/python.rules"),
);

/// Names of the built-in rule sets
pub const PRESETS: &[&str] = &["rust", "node", "python", "dev"];

/// Rule text for a built-in preset
pub fn preset(name: &str) -> Option<&'static str> {
    match name {
        "rust" => Some(RUST_RULES),
        "node" => Some(NODE_RULES),
        "python" => Some(PYTHON_RULES),
        "dev" => Some(DEV_RULES),
        _ => None,
    }
}

/// Parse a built-in preset
pub fn load_preset(name: &str) -> Result<Vec<Rule>> {
    let text = preset(name).ok_or_else(|| TidyError::PresetNotFound {
        name: name.to_string(),
        available: PRESETS.to_vec(),
    })?;
    parse_text(text).with_context(|| format!("Built-in preset '{}' is invalid", name))
}

/// Read and parse a rule file
pub fn load_rules_file(path: &Path) -> Result<Vec<Rule>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules: {}", path.display()))?;
    let rules = parse_text(&contents)
        .with_context(|| format!("Failed to parse rules: {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = rules.len(), "loaded rule file");
    Ok(rules)
}

/// Where a run's rules come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    File(PathBuf),
    Preset(String),
}

impl RuleSource {
    /// Pick the rule source for a run: explicit file, then preset, then a
    /// `.tidyrules` file in the root, then the configured default file
    /// (relative paths resolve against the root).
    pub fn resolve(
        root: &Path,
        rules_file: Option<&Path>,
        preset_name: Option<&str>,
        config: &Config,
    ) -> Result<Self, TidyError> {
        if let Some(path) = rules_file {
            return Ok(RuleSource::File(path.to_path_buf()));
        }
        if let Some(name) = preset_name {
            return Ok(RuleSource::Preset(name.to_string()));
        }

        let in_root = root.join(ROOT_RULES_FILE);
        if in_root.is_file() {
            return Ok(RuleSource::File(in_root));
        }

        let configured = root.join(&config.default_rules_file);
        if configured.is_file() {
            return Ok(RuleSource::File(configured));
        }

        Err(TidyError::RulesNotFound {
            root: root.to_path_buf(),
        })
    }

    pub fn load(&self) -> Result<Vec<Rule>> {
        match self {
            RuleSource::File(path) => load_rules_file(path),
            RuleSource::Preset(name) => load_preset(name),
        }
    }
}

impl std::fmt::Display for RuleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleSource::File(path) => write!(f, "{}", crate::common::format::format_path(path)),
            RuleSource::Preset(name) => write!(f, "preset '{}'", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_parse() {
        for name in PRESETS {
            let rules = load_preset(name).unwrap();
            assert!(!rules.is_empty(), "preset {} is empty", name);
        }
    }

    #[test]
    fn test_dev_preset_is_union() {
        let dev = load_preset("dev").unwrap().len();
        let parts: usize = ["rust", "node", "python"]
            .iter()
            .map(|n| load_preset(n).unwrap().len())
            .sum();
        assert_eq!(dev, parts);
    }

    #[test]
    fn test_dev_text_contains_every_preset() {
        let dev = preset("dev").unwrap();
        for name in ["rust", "node", "python"] {
            assert!(dev.contains(preset(name).unwrap()), "dev is missing {}", name);
        }
        assert!(preset("cobol").is_none());
    }

    #[test]
    fn test_unknown_preset() {
        let err = load_preset("cobol").unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("rust"));
    }

    #[test]
    fn test_resolve_prefers_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ROOT_RULES_FILE), "delete x\n").unwrap();
        let explicit = dir.path().join("other.rules");

        let source =
            RuleSource::resolve(dir.path(), Some(explicit.as_path()), Some("rust"), &Config::default())
                .unwrap();
        assert_eq!(source, RuleSource::File(explicit));
    }

    #[test]
    fn test_resolve_falls_back_to_root_file() {
        let dir = tempfile::tempdir().unwrap();
        let in_root = dir.path().join(ROOT_RULES_FILE);
        std::fs::write(&in_root, "delete x\n").unwrap();

        let source = RuleSource::resolve(dir.path(), None, None, &Config::default()).unwrap();
        assert_eq!(source, RuleSource::File(in_root));
    }

    #[test]
    fn test_resolve_without_rules_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = RuleSource::resolve(dir.path(), None, None, &Config::default());
        assert!(matches!(result, Err(TidyError::RulesNotFound { .. })));
    }

    #[test]
    fn test_load_rules_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.rules");
        std::fs::write(&path, "delete ok\narchive nope\n").unwrap();

        let err = load_rules_file(&path).unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("bad.rules"));
        assert!(chain.contains("line 2"));
    }
}
