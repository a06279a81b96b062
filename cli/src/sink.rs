//! Text render sink
//!
//! Mirrors what a host toolkit would hold per slot so the harness can print
//! the overlay after each tick.

use auragrid_core::{DisplayOptions, Point, RenderSink, Size, SlotHandle, StatusRecord};

#[derive(Debug, Clone, Default)]
pub struct SlotView {
    pub position: Point,
    pub visible: bool,
    pub record: Option<StatusRecord>,
}

/// Host-side slot state plus call counters
#[derive(Debug, Clone, Default)]
pub struct TextSink {
    slots: Vec<SlotView>,
    bounds: Size,
    options: DisplayOptions,
    /// Sink calls since the last `reset_calls`
    pub calls: usize,
}

impl TextSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn options(&self) -> DisplayOptions {
        self.options
    }

    pub fn slot(&self, handle: SlotHandle) -> Option<&SlotView> {
        self.slots.get(handle.index())
    }

    /// Visible slots ordered top-to-bottom, then left-to-right
    pub fn visible(&self) -> Vec<(SlotHandle, &SlotView)> {
        let mut visible: Vec<_> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.visible)
            .map(|(i, slot)| (SlotHandle(i), slot))
            .collect();
        visible.sort_by(|(_, a), (_, b)| {
            a.position
                .y
                .total_cmp(&b.position.y)
                .then(a.position.x.total_cmp(&b.position.x))
        });
        visible
    }

    pub fn reset_calls(&mut self) -> usize {
        std::mem::take(&mut self.calls)
    }

    fn slot_mut(&mut self, handle: SlotHandle) -> &mut SlotView {
        let index = handle.index();
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, SlotView::default);
        }
        &mut self.slots[index]
    }
}

impl RenderSink for TextSink {
    fn set_position(&mut self, slot: SlotHandle, position: Point) {
        self.calls += 1;
        self.slot_mut(slot).position = position;
    }

    fn set_visible(&mut self, slot: SlotHandle, visible: bool) {
        self.calls += 1;
        self.slot_mut(slot).visible = visible;
    }

    fn set_content(&mut self, slot: SlotHandle, record: &StatusRecord) {
        self.calls += 1;
        self.slot_mut(slot).record = Some(record.clone());
    }

    fn set_capacity(&mut self, capacity: usize) {
        self.slots.resize_with(capacity, SlotView::default);
    }

    fn set_bounds(&mut self, size: Size) {
        self.bounds = size;
    }

    fn set_display_options(&mut self, options: DisplayOptions) {
        self.calls += 1;
        self.options = options;
    }
}
