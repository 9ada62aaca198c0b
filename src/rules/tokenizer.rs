/// Comment marker, recognised only as the first non-whitespace character
pub const COMMENT: char = '#';

/// Split one line of rule text into whitespace-delimited tokens.
///
/// Comment lines and blank lines produce no tokens. There are no inline
/// comments and no quoting, so a token can never contain whitespace.
pub fn tokenize(line: &str) -> Vec<&str> {
    let line = line.trim();
    if line.starts_with(COMMENT) {
        return Vec::new();
    }
    line.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_whitespace_runs() {
        assert_eq!(
            tokenize("  delete   target\twhen exists  Cargo.toml  "),
            vec!["delete", "target", "when", "exists", "Cargo.toml"]
        );
    }

    #[test]
    fn test_comment_and_blank_lines() {
        assert!(tokenize("# delete everything").is_empty());
        assert!(tokenize("    # indented comment").is_empty());
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t ").is_empty());
    }

    #[test]
    fn test_hash_inside_line_is_a_token() {
        assert_eq!(tokenize("delete #tmp#"), vec!["delete", "#tmp#"]);
    }

    #[test]
    fn test_glob_survives_as_one_token() {
        assert_eq!(tokenize("delete **/*.tmp"), vec!["delete", "**/*.tmp"]);
    }
}
