//! # TidyRules
//!
//! Rule-driven cleanup of build artifacts and caches.
//!
//! Rules are written in a small line-oriented language:
//!
//! ```text
//! # Rust build output, only next to a manifest
//! delete target when exists Cargo.toml
//! # Dependencies of JS projects that are not vendored on purpose
//! delete node_modules when exists package.json and not parents exists .keep-deps
//! # Scratch files at any depth
//! delete **/*.tmp
//! ```
//!
//! - **Rules**: tokenizer, parser and glob matcher in [`rules`]
//! - **Engine**: location-aware condition evaluation and the traversal
//!   executor in [`engine`], with an event callback for progress reporting
//! - **Safety-First**: dry-run by default, protected roots refuse live runs

pub mod cli;
pub mod common;
pub mod engine;
pub mod rules;

pub use engine::{run, run_with_events, RunOptions, ScanEvent};
pub use rules::{parse_text, Rule};
