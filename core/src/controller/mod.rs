//! Overlay controller
//!
//! Glues the engine together: pulls records from a status source, runs them
//! through filter, sort and reconciliation, and pushes the result to a render
//! sink once per host tick. Everything runs on the host's update thread;
//! there is exactly one writer and it finishes before the next tick starts.

mod dirty;
mod overlay;

#[cfg(test)]
mod controller_tests;

pub use dirty::ConfigChange;
pub use overlay::{DataMode, OverlayController, TickReport};
