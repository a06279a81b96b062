//! Render sink
//!
//! The host UI toolkit owns the actual nodes. The engine only tells it, per
//! slot handle, where the slot sits, whether it is visible and what it shows.
//! Calls are one-way and assumed infallible; the host logs its own errors.

use crate::layout::{Point, Size};
use crate::pool::SlotHandle;
use crate::status::StatusRecord;

/// Overlay-wide options for how slot content is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_countdown: bool,
    pub show_stacks: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_countdown: true,
            show_stacks: true,
        }
    }
}

/// Receiver of per-slot updates
pub trait RenderSink {
    fn set_position(&mut self, slot: SlotHandle, position: Point);

    fn set_visible(&mut self, slot: SlotHandle, visible: bool);

    fn set_content(&mut self, slot: SlotHandle, record: &StatusRecord);

    /// Pool capacity changed; handles at or above `capacity` are gone
    fn set_capacity(&mut self, _capacity: usize) {}

    /// Bounding size of the grid changed
    fn set_bounds(&mut self, _size: Size) {}

    /// Display options changed; applies to every slot
    fn set_display_options(&mut self, _options: DisplayOptions) {}
}
