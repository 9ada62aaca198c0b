//! Rule evaluation over a live directory tree.
//!
//! A run is three steps: capture every directory under the root once, then
//! for each rule and each captured directory evaluate the rule's condition,
//! then resolve and (unless dry-running) remove the rule's targets there.
//! Everything is sequential; progress can be observed through [`ScanEvent`]s.

pub mod condition;
pub mod events;
pub mod executor;
mod listing;

pub use condition::evaluate;
pub use events::{Phase, ScanEvent};
pub use executor::{run, run_with_events, RunOptions};
