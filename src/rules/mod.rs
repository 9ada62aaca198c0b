pub mod ast;
pub mod glob;
pub mod loader;
pub mod parser;
pub mod tokenizer;

pub use ast::{Action, Location, Predicate, Rule};
pub use glob::Glob;
pub use loader::{load_preset, load_rules_file, RuleSource};
pub use parser::{parse_line, parse_text};
pub use tokenizer::tokenize;
