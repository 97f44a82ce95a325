// extensions/mod.rs
//
// Optional extension modules for the quest engine.
// Games opt-in by owning these systems; the core loop knows nothing about them.

pub mod timer;

pub use timer::{Scheduler, TimerId};
