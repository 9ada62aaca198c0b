use std::fmt;
use std::str::FromStr;

use super::glob::Glob;

/// What a rule does to the paths its target matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Delete,
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delete" => Ok(Action::Delete),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Delete => write!(f, "delete"),
        }
    }
}

/// Which directories an `exists` check looks in, relative to the directory
/// being evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Location {
    /// The directory itself
    #[default]
    Here,
    /// The immediate parent
    Parent,
    /// Every strict ancestor up to the filesystem root
    Parents,
    /// Immediate subdirectories
    Child,
    /// Every descendant directory at any depth
    Children,
    /// Other directories sharing the same parent
    Sibling,
}

impl Location {
    pub const KEYWORDS: &'static [&'static str] =
        &["here", "parent", "parents", "child", "children", "sibling"];
}

impl FromStr for Location {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "here" => Ok(Location::Here),
            "parent" => Ok(Location::Parent),
            "parents" => Ok(Location::Parents),
            "child" => Ok(Location::Child),
            "children" => Ok(Location::Children),
            "sibling" => Ok(Location::Sibling),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Location::Here => "here",
            Location::Parent => "parent",
            Location::Parents => "parents",
            Location::Child => "child",
            Location::Children => "children",
            Location::Sibling => "sibling",
        };
        f.write_str(keyword)
    }
}

/// A boolean condition over the filesystem around a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Exists { location: Location, pattern: Glob },
    Not(Box<Predicate>),
    /// Never empty; a single operand is stored as the operand itself
    And(Vec<Predicate>),
}

impl Predicate {
    pub fn exists(location: Location, pattern: &str) -> Self {
        Predicate::Exists {
            location,
            pattern: Glob::new(pattern),
        }
    }

    pub fn negate(inner: Predicate) -> Self {
        Predicate::Not(Box::new(inner))
    }
}

/// Renders the rule-text form of the condition. The parser reads back every
/// tree it produces; a hand-built `Not(And(..))` has no textual form, and its
/// output parses as an `and` whose first operand is negated.
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Exists { location, pattern } => {
                write!(f, "{} exists {}", location, pattern)
            }
            Predicate::Not(inner) => write!(f, "not {}", inner),
            Predicate::And(operands) => {
                for (i, op) in operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" and ")?;
                    }
                    write!(f, "{}", op)?;
                }
                Ok(())
            }
        }
    }
}

/// One line of rule text. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub action: Action,
    pub target: Glob,
    /// `None` means the rule applies in every directory
    pub condition: Option<Predicate>,
}

impl Rule {
    pub fn delete(target: &str) -> Self {
        Self {
            action: Action::Delete,
            target: Glob::new(target),
            condition: None,
        }
    }

    pub fn delete_when(target: &str, condition: Predicate) -> Self {
        Self {
            action: Action::Delete,
            target: Glob::new(target),
            condition: Some(condition),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.target)?;
        if let Some(ref condition) = self.condition {
            write!(f, " when {}", condition)?;
        }
        Ok(())
    }
}
