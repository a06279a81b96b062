//! Pooled slots
//!
//! A slot is an arena entry: an index-based handle plus the record it is
//! currently bound to. The render layer only ever sees the handle, so visual
//! nodes never need a reference back into engine state.

use crate::status::{StatusKey, StatusRecord};

/// Index-based handle to a pooled slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotHandle(pub usize);

impl SlotHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// What changed on one slot during a reconcile pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotChange {
    pub handle: SlotHandle,
    /// Slot became visible
    pub shown: bool,
    /// Slot was released and must be hidden
    pub hidden: bool,
    /// Bound record differs from what was last pushed
    pub content: bool,
    /// Display rank changed, so its grid cell changed
    pub moved: bool,
}

impl SlotChange {
    fn none(handle: SlotHandle) -> Self {
        Self {
            handle,
            shown: false,
            hidden: false,
            content: false,
            moved: false,
        }
    }

    pub fn is_noop(&self) -> bool {
        !(self.shown || self.hidden || self.content || self.moved)
    }
}

/// One reusable visual placeholder
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    handle: SlotHandle,
    record: Option<StatusRecord>,
    /// Index in the sorted display list while visible
    rank: Option<usize>,
    visible: bool,
}

impl Slot {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            handle: SlotHandle(index),
            record: None,
            rank: None,
            visible: false,
        }
    }

    pub fn handle(&self) -> SlotHandle {
        self.handle
    }

    pub fn record(&self) -> Option<&StatusRecord> {
        self.record.as_ref()
    }

    pub fn key(&self) -> Option<StatusKey> {
        self.record.as_ref().map(StatusRecord::key)
    }

    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Bind `record` at display rank `rank`, touching only what differs
    pub(crate) fn assign(&mut self, record: &StatusRecord, rank: usize) -> SlotChange {
        let mut change = SlotChange::none(self.handle);

        if self.record.as_ref() != Some(record) {
            self.record = Some(record.clone());
            change.content = true;
        }
        if self.rank != Some(rank) {
            self.rank = Some(rank);
            change.moved = true;
        }
        if !self.visible {
            self.visible = true;
            change.shown = true;
        }
        change
    }

    /// Unbind and hide. A slot that is already hidden reports no change.
    pub(crate) fn release(&mut self) -> SlotChange {
        let mut change = SlotChange::none(self.handle);
        change.hidden = self.visible;
        self.record = None;
        self.rank = None;
        self.visible = false;
        change
    }
}
