//! Slot pool and reconciliation
//!
//! The pool owns every slot. Each tick the sorted, truncated record list is
//! mapped onto the slots with one of two strategies:
//!
//! - **Positional**: record `i` goes to slot `i`; leftover slots are hidden.
//! - **Keyed**: a record keeps the slot its `StatusKey` was bound to on the
//!   previous tick. Departed keys free their slot first, then new keys take
//!   the lowest free slot. When no slot is free the record is dropped;
//!   displayed statuses are never evicted to make room.
//!
//! Reconciling the same input twice changes nothing the second time: every
//! slot compares before it writes, and only real changes are reported.

use std::collections::BTreeSet;

use auragrid_types::ReconcileStrategy;
use hashbrown::{HashMap, HashSet};

use super::{Slot, SlotChange, SlotHandle};
use crate::status::{StatusKey, StatusRecord};

/// Outcome of one reconcile pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    /// Slots that actually changed
    pub changes: Vec<SlotChange>,
    /// Records that found no free slot
    pub dropped: usize,
    /// Repeated keys ignored in the input
    pub duplicates: usize,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Fixed-capacity arena of slots
#[derive(Debug, Clone)]
pub struct SlotPool {
    strategy: ReconcileStrategy,
    slots: Vec<Slot>,
    /// Keyed strategy: which slot each displayed key is bound to
    active: HashMap<StatusKey, SlotHandle>,
    /// Keyed strategy: unbound slots, lowest index handed out first
    free: BTreeSet<usize>,
}

impl SlotPool {
    pub fn new(capacity: usize, strategy: ReconcileStrategy) -> Self {
        Self {
            strategy,
            slots: (0..capacity).map(Slot::new).collect(),
            active: HashMap::new(),
            free: (0..capacity).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn strategy(&self) -> ReconcileStrategy {
        self.strategy
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, handle: SlotHandle) -> Option<&Slot> {
        self.slots.get(handle.index())
    }

    /// Slots currently showing a record
    pub fn visible_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|s| s.is_visible())
    }

    pub fn bound_count(&self) -> usize {
        self.visible_slots().count()
    }

    /// Slot bound to `key` under the keyed strategy
    pub fn handle_for(&self, key: &StatusKey) -> Option<SlotHandle> {
        self.active.get(key).copied()
    }

    /// Switch strategy. All slots are released so the next pass starts clean.
    pub fn set_strategy(&mut self, strategy: ReconcileStrategy) -> Vec<SlotChange> {
        if self.strategy == strategy {
            return Vec::new();
        }
        self.strategy = strategy;
        self.release_all()
    }

    /// Hide and unbind every slot
    pub fn release_all(&mut self) -> Vec<SlotChange> {
        self.active.clear();
        self.free = (0..self.slots.len()).collect();
        self.slots
            .iter_mut()
            .map(Slot::release)
            .filter(|c| !c.is_noop())
            .collect()
    }

    /// Grow or shrink the pool.
    ///
    /// Returns hide changes for visible slots that were removed; their handles
    /// are no longer valid afterwards. New slots start hidden and free.
    pub fn resize(&mut self, capacity: usize) -> Vec<SlotChange> {
        let current = self.slots.len();
        if capacity >= current {
            self.slots.extend((current..capacity).map(Slot::new));
            self.free.extend(current..capacity);
            return Vec::new();
        }

        let removed: Vec<SlotChange> = self.slots[capacity..]
            .iter_mut()
            .map(Slot::release)
            .filter(|c| !c.is_noop())
            .collect();
        self.slots.truncate(capacity);
        self.active.retain(|_, handle| handle.index() < capacity);
        self.free.retain(|&index| index < capacity);
        removed
    }

    /// Bind `records` (already filtered, sorted and truncated) to slots
    pub fn reconcile(&mut self, records: &[StatusRecord]) -> ReconcileReport {
        let (records, duplicates) = dedup_by_key(records);
        if duplicates > 0 {
            tracing::debug!(duplicates, "Ignoring repeated status keys");
        }

        let mut report = match self.strategy {
            ReconcileStrategy::Positional => self.reconcile_positional(&records),
            ReconcileStrategy::Keyed => self.reconcile_keyed(&records),
        };
        report.duplicates = duplicates;

        if report.dropped > 0 {
            tracing::trace!(
                dropped = report.dropped,
                capacity = self.capacity(),
                "Slot pool full, statuses not displayed"
            );
        }
        report
    }

    fn reconcile_positional(&mut self, records: &[&StatusRecord]) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        for (index, slot) in self.slots.iter_mut().enumerate() {
            let change = match records.get(index) {
                Some(record) => slot.assign(record, index),
                None => slot.release(),
            };
            if !change.is_noop() {
                report.changes.push(change);
            }
        }

        report.dropped = records.len().saturating_sub(self.slots.len());
        report
    }

    fn reconcile_keyed(&mut self, records: &[&StatusRecord]) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let incoming: HashSet<StatusKey> = records.iter().map(|r| r.key()).collect();

        // Release departed keys first so their slots can be reused this pass
        let mut departed: Vec<(StatusKey, SlotHandle)> = self
            .active
            .iter()
            .filter(|(key, _)| !incoming.contains(*key))
            .map(|(key, handle)| (*key, *handle))
            .collect();
        departed.sort_by_key(|(_, handle)| *handle);

        let mut released = Vec::with_capacity(departed.len());
        for (key, handle) in departed {
            self.active.remove(&key);
            self.free.insert(handle.index());
            let change = self.slots[handle.index()].release();
            if !change.is_noop() {
                released.push(change);
            }
        }

        // Ranks count displayed records only, so a dropped record leaves no gap
        let mut rank = 0;
        let mut bound = Vec::with_capacity(records.len());
        for record in records {
            let key = record.key();
            let existing = self.active.get(&key).copied();
            let handle = match existing {
                Some(handle) => handle,
                None => match self.free.pop_first() {
                    Some(index) => {
                        let handle = SlotHandle(index);
                        self.active.insert(key, handle);
                        handle
                    }
                    None => {
                        report.dropped += 1;
                        continue;
                    }
                },
            };

            let mut change = self.slots[handle.index()].assign(record, rank);
            if let Some(pos) = released.iter().position(|c| c.handle == handle) {
                // Released and rebound in one pass: the slot never left the screen
                released.remove(pos);
                change.shown = false;
            }
            if !change.is_noop() {
                bound.push(change);
            }
            rank += 1;
        }

        report.changes = released;
        report.changes.extend(bound);
        report
    }
}

/// Keep the first record for each key
fn dedup_by_key(records: &[StatusRecord]) -> (Vec<&StatusRecord>, usize) {
    let mut seen = HashSet::with_capacity(records.len());
    let unique: Vec<&StatusRecord> = records.iter().filter(|r| seen.insert(r.key())).collect();
    let duplicates = records.len() - unique.len();
    (unique, duplicates)
}
