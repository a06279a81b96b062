//! Status sources
//!
//! The game-state reader lives outside this crate. It is consumed through
//! the `StatusSource` trait: a synchronous, in-memory read that must finish
//! well inside one frame and must return each `StatusKey` at most once.

use auragrid_types::FilterConfig;
use thiserror::Error;

use super::StatusRecord;

/// Errors while reading statuses for one tick.
///
/// These are transient: the controller shows an empty overlay for that tick
/// and tries again on the next one.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no local player is loaded")]
    NoLocalPlayer,

    #[error("no hostile target is available")]
    NoTarget,

    #[error("status table unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Provider of the current status set
pub trait StatusSource {
    /// Read the current statuses.
    ///
    /// The filter is passed so a source can skip work it knows will be
    /// discarded; the engine applies the filter again regardless.
    fn fetch(&mut self, filter: &FilterConfig) -> Result<Vec<StatusRecord>, SourceError>;
}

impl<F> StatusSource for F
where
    F: FnMut(&FilterConfig) -> Result<Vec<StatusRecord>, SourceError>,
{
    fn fetch(&mut self, filter: &FilterConfig) -> Result<Vec<StatusRecord>, SourceError> {
        self(filter)
    }
}

/// Source that always returns a fixed snapshot
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub records: Vec<StatusRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<StatusRecord>) -> Self {
        Self { records }
    }
}

impl StatusSource for StaticSource {
    fn fetch(&mut self, _filter: &FilterConfig) -> Result<Vec<StatusRecord>, SourceError> {
        Ok(self.records.clone())
    }
}
