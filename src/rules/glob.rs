use regex::Regex;
use std::fmt;

/// A compiled glob pattern.
///
/// Supported syntax: `*` (any run of non-separator
/// characters), `**/` (zero or more whole path segments), a trailing or
/// isolated `**` (anything, separators included) and `?` (one non-separator
/// character). Everything else is literal. Matching is anchored and
/// case-sensitive.
#[derive(Debug, Clone)]
pub struct Glob {
    source: String,
    regex: Option<Regex>,
}

impl Glob {
    pub fn new(pattern: &str) -> Self {
        Self {
            source: pattern.to_string(),
            regex: Regex::new(&translate(pattern)).ok(),
        }
    }

    /// Test a bare entry name or a `/`-separated relative path
    pub fn matches(&self, text: &str) -> bool {
        if text == self.source {
            return true;
        }
        match &self.regex {
            Some(re) => re.is_match(text),
            None => false,
        }
    }

    /// Whether the pattern spans directory levels (`**`)
    pub fn is_recursive(&self) -> bool {
        self.source.contains("**")
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PartialEq for Glob {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Glob {}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// One-shot match of `text` against `pattern`
pub fn matches(text: &str, pattern: &str) -> bool {
    Glob::new(pattern).matches(text)
}

/// Translate glob syntax into an anchored regular expression
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2 + 2);
    out.push('^');

    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                if chars.get(i + 2) == Some(&'/') {
                    out.push_str("(?:[^/]*/)*");
                    i += 3;
                } else {
                    out.push_str(".*");
                    i += 2;
                }
            }
            '*' => {
                out.push_str("[^/]*");
                i += 1;
            }
            '?' => {
                out.push_str("[^/]");
                i += 1;
            }
            c => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
                i += 1;
            }
        }
    }

    out.push('$');
    out
}
