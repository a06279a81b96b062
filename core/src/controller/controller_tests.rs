//! Tests for OverlayController ticks
//!
//! Verifies that:
//! - The pipeline filters, sorts and truncates before binding slots
//! - Unchanged input produces no render calls
//! - Source failures degrade to an empty overlay
//! - Config setters only invalidate what they touch

use std::cell::Cell;

use auragrid_types::{
    FilterConfig, GridSpec, MAX_ITEMS, OverlayConfig, OverlayKind, ReconcileStrategy,
    SortCriterion, SortSpec, SortTier,
};

use super::{ConfigChange, DataMode, OverlayController};
use crate::layout::{Point, Size};
use crate::pool::SlotHandle;
use crate::render::{DisplayOptions, RenderSink};
use crate::status::{SourceError, StaticSource, StatusRecord};

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
enum SinkCall {
    Position(SlotHandle, Point),
    Visible(SlotHandle, bool),
    Content(SlotHandle, u32),
    Capacity(usize),
    Bounds(Size),
    Display(DisplayOptions),
}

/// Render sink that records every call
#[derive(Debug, Default)]
struct RecordingSink {
    calls: Vec<SinkCall>,
}

impl RecordingSink {
    fn take(&mut self) -> Vec<SinkCall> {
        std::mem::take(&mut self.calls)
    }

    fn positions(calls: &[SinkCall]) -> usize {
        calls.iter().filter(|c| matches!(c, SinkCall::Position(..))).count()
    }

    fn contents(calls: &[SinkCall]) -> usize {
        calls.iter().filter(|c| matches!(c, SinkCall::Content(..))).count()
    }

    fn displays(calls: &[SinkCall]) -> usize {
        calls.iter().filter(|c| matches!(c, SinkCall::Display(..))).count()
    }

    fn shown(calls: &[SinkCall]) -> usize {
        calls.iter().filter(|c| matches!(c, SinkCall::Visible(_, true))).count()
    }

    fn hidden(calls: &[SinkCall]) -> usize {
        calls.iter().filter(|c| matches!(c, SinkCall::Visible(_, false))).count()
    }
}

impl RenderSink for RecordingSink {
    fn set_position(&mut self, slot: SlotHandle, position: Point) {
        self.calls.push(SinkCall::Position(slot, position));
    }

    fn set_visible(&mut self, slot: SlotHandle, visible: bool) {
        self.calls.push(SinkCall::Visible(slot, visible));
    }

    fn set_content(&mut self, slot: SlotHandle, record: &StatusRecord) {
        self.calls.push(SinkCall::Content(slot, record.id));
    }

    fn set_capacity(&mut self, capacity: usize) {
        self.calls.push(SinkCall::Capacity(capacity));
    }

    fn set_bounds(&mut self, size: Size) {
        self.calls.push(SinkCall::Bounds(size));
    }

    fn set_display_options(&mut self, options: DisplayOptions) {
        self.calls.push(SinkCall::Display(options));
    }
}

fn make_status(id: u32, remaining: f32) -> StatusRecord {
    StatusRecord {
        id,
        name: format!("Status {}", id),
        remaining_secs: remaining,
        max_secs: 60.0,
        source_entity_id: 1,
        ..Default::default()
    }
}

fn make_config(max_items: u32) -> OverlayConfig {
    OverlayConfig {
        grid: GridSpec {
            items_per_line: 5,
            max_items,
            ..GridSpec::default()
        },
        ..OverlayConfig::default()
    }
}

fn make_controller(max_items: u32) -> OverlayController {
    OverlayController::new(OverlayKind::Player, make_config(max_items))
}

/// Displayed status ids in rank order
fn displayed_ids(controller: &OverlayController) -> Vec<u32> {
    let mut ranked: Vec<(usize, u32)> = controller
        .pool()
        .visible_slots()
        .filter_map(|s| Some((s.rank()?, s.record()?.id)))
        .collect();
    ranked.sort();
    ranked.into_iter().map(|(_, id)| id).collect()
}

fn visible_records(controller: &OverlayController) -> Vec<StatusRecord> {
    controller
        .pool()
        .visible_slots()
        .filter_map(|s| s.record().cloned())
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Pipeline
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_first_tick_pushes_everything() {
    let mut controller = make_controller(10);
    let mut source = StaticSource::new((0..4).map(|i| make_status(i, 10.0)).collect());
    let mut sink = RecordingSink::default();

    let report = controller.tick(&mut source, &mut sink);
    let calls = sink.take();

    assert_eq!(report.fetched, 4);
    assert_eq!(report.displayed, 4);
    assert!(report.layout_recomputed);
    assert!(calls.contains(&SinkCall::Capacity(10)));
    assert_eq!(RecordingSink::positions(&calls), 4);
    assert_eq!(RecordingSink::contents(&calls), 4);
    assert_eq!(RecordingSink::shown(&calls), 4);
    assert_eq!(RecordingSink::displays(&calls), 1);
    // Slots are shown only after they are positioned and filled
    let last_position = calls
        .iter()
        .rposition(|c| matches!(c, SinkCall::Position(..)))
        .unwrap();
    let first_shown = calls
        .iter()
        .position(|c| matches!(c, SinkCall::Visible(_, true)))
        .unwrap();
    assert!(last_position < first_shown);
}

#[test]
fn test_unchanged_tick_makes_no_calls() {
    for strategy in [ReconcileStrategy::Keyed, ReconcileStrategy::Positional] {
        let config = OverlayConfig {
            strategy,
            ..make_config(10)
        };
        let mut controller = OverlayController::new(OverlayKind::Player, config);
        let mut source = StaticSource::new((0..6).map(|i| make_status(i, 10.0)).collect());
        let mut sink = RecordingSink::default();

        controller.tick(&mut source, &mut sink);
        sink.take();
        let report = controller.tick(&mut source, &mut sink);

        assert!(sink.calls.is_empty(), "{:?}: {:?}", strategy, sink.calls);
        assert_eq!(report.slot_changes, 0);
        assert!(!report.layout_recomputed);
    }
}

#[test]
fn test_truncates_after_sort() {
    let mut controller = make_controller(30);
    controller.set_sort(SortSpec::new(
        SortTier::ascending(SortCriterion::TimeRemaining),
        SortTier::default(),
        SortTier::default(),
    ));
    let records: Vec<_> = (0..50).map(|i| make_status(100 + i, 50.0 - i as f32)).collect();
    let mut source = StaticSource::new(records);
    let mut sink = RecordingSink::default();

    let report = controller.tick(&mut source, &mut sink);

    assert_eq!(report.fetched, 50);
    assert_eq!(report.displayed, 30);
    assert_eq!(report.dropped, 0);
    // Least time remaining first: ids 149 down to 120
    let expected: Vec<u32> = (120..150).rev().collect();
    assert_eq!(displayed_ids(&controller), expected);
}

#[test]
fn test_filter_applied_before_truncation() {
    let mut controller = make_controller(2);
    controller.set_filter(FilterConfig::blacklist([0, 1]));
    let mut source = StaticSource::new((0..5).map(|i| make_status(i, 10.0)).collect());
    let mut sink = RecordingSink::default();

    controller.tick(&mut source, &mut sink);

    assert_eq!(displayed_ids(&controller), vec![2, 3]);
}

#[test]
fn test_default_config_keeps_source_order() {
    let mut controller = OverlayController::new(OverlayKind::Player, OverlayConfig::default());
    let mut source = StaticSource::new(vec![
        make_status(7, 3.0),
        make_status(2, 9.0),
        make_status(5, 1.0),
    ]);
    let mut sink = RecordingSink::default();

    controller.tick(&mut source, &mut sink);

    assert_eq!(displayed_ids(&controller), vec![7, 2, 5]);
}

#[test]
fn test_zero_capacity_is_harmless() {
    let mut controller = make_controller(0);
    let mut source = StaticSource::new((0..3).map(|i| make_status(i, 10.0)).collect());
    let mut sink = RecordingSink::default();

    let report = controller.tick(&mut source, &mut sink);
    let calls = sink.take();

    assert_eq!(report.displayed, 0);
    assert!(controller.layout().size().is_empty());
    assert_eq!(RecordingSink::positions(&calls), 0);
    assert_eq!(RecordingSink::shown(&calls), 0);
}

#[test]
fn test_oversized_max_items_clamped() {
    let mut controller = make_controller(2_000_000);

    assert_eq!(controller.pool().capacity(), MAX_ITEMS as usize);
    assert_eq!(controller.config().grid.max_items, MAX_ITEMS);

    // Asking for even more once clamped is not a change
    let grid = GridSpec {
        max_items: u32::MAX,
        ..controller.config().grid
    };
    assert!(controller.set_grid(grid).is_empty());

    let records: Vec<_> = (0..150).map(|i| make_status(i, 10.0)).collect();
    let mut source = StaticSource::new(records);
    let mut sink = RecordingSink::default();
    let report = controller.tick(&mut source, &mut sink);

    assert_eq!(report.displayed, MAX_ITEMS as usize);
    assert_eq!(controller.layout().len(), MAX_ITEMS as usize);
    assert!(sink.take().contains(&SinkCall::Capacity(MAX_ITEMS as usize)));
}

// ═══════════════════════════════════════════════════════════════════════════
// Failure Handling
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_source_error_empties_overlay() {
    let records: Vec<_> = (0..3).map(|i| make_status(i, 10.0)).collect();
    let mut calls = 0;
    let mut source = move |_: &FilterConfig| -> Result<Vec<StatusRecord>, SourceError> {
        calls += 1;
        if calls == 1 {
            Ok(records.clone())
        } else {
            Err(SourceError::Unavailable {
                reason: "status table not mapped".to_string(),
            })
        }
    };
    let mut controller = make_controller(10);
    let mut sink = RecordingSink::default();

    controller.tick(&mut source, &mut sink);
    sink.take();
    let report = controller.tick(&mut source, &mut sink);
    let calls = sink.take();

    assert!(report.source_failed);
    assert_eq!(report.fetched, 0);
    assert_eq!(report.displayed, 0);
    assert_eq!(RecordingSink::hidden(&calls), 3);
}

// ═══════════════════════════════════════════════════════════════════════════
// Config Changes
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_grid_change_repositions_only() {
    let mut controller = make_controller(10);
    let mut source = StaticSource::new((0..3).map(|i| make_status(i, 10.0)).collect());
    let mut sink = RecordingSink::default();
    controller.tick(&mut source, &mut sink);
    sink.take();

    let grid = GridSpec {
        horizontal_padding: 12.0,
        ..controller.config().grid
    };
    let change = controller.set_grid(grid);
    assert_eq!(change, ConfigChange::layout());

    let report = controller.tick(&mut source, &mut sink);
    let calls = sink.take();
    assert!(report.layout_recomputed);
    assert_eq!(RecordingSink::positions(&calls), 3);
    assert_eq!(RecordingSink::contents(&calls), 0);
    assert_eq!(RecordingSink::shown(&calls) + RecordingSink::hidden(&calls), 0);
    assert!(calls.contains(&SinkCall::Position(SlotHandle(1), Point::new(48.0, 0.0))));

    // Dirty flag consumed
    assert!(!controller.tick(&mut source, &mut sink).layout_recomputed);
    assert!(sink.calls.is_empty());
}

#[test]
fn test_shrinking_max_items_resizes_pool() {
    let mut controller = make_controller(5);
    let mut source = StaticSource::new((0..5).map(|i| make_status(i, 10.0)).collect());
    let mut sink = RecordingSink::default();
    controller.tick(&mut source, &mut sink);
    sink.take();

    let grid = GridSpec {
        max_items: 3,
        ..controller.config().grid
    };
    let change = controller.set_grid(grid);
    assert!(change.layout && change.pool);

    let report = controller.tick(&mut source, &mut sink);
    let calls = sink.take();
    assert!(calls.contains(&SinkCall::Capacity(3)));
    assert_eq!(RecordingSink::hidden(&calls), 2);
    assert_eq!(report.displayed, 3);
    assert_eq!(controller.pool().capacity(), 3);
}

#[test]
fn test_resort_moves_slots_without_showing() {
    let mut controller = make_controller(10);
    let mut source = StaticSource::new(vec![
        make_status(1, 3.0),
        make_status(2, 6.0),
        make_status(3, 9.0),
    ]);
    let mut sink = RecordingSink::default();
    controller.tick(&mut source, &mut sink);
    sink.take();

    controller.set_sort(SortSpec::new(
        SortTier::descending(SortCriterion::TimeRemaining),
        SortTier::default(),
        SortTier::default(),
    ));
    controller.tick(&mut source, &mut sink);
    let calls = sink.take();

    assert_eq!(displayed_ids(&controller), vec![3, 2, 1]);
    // Outer slots swap cells; the middle one stays put
    assert_eq!(RecordingSink::positions(&calls), 2);
    assert_eq!(RecordingSink::shown(&calls) + RecordingSink::hidden(&calls), 0);
}

#[test]
fn test_apply_config_flags_only_differences() {
    let mut controller = make_controller(10);
    let same = controller.config().clone();
    assert!(controller.apply_config(same).is_empty());

    let mut next = controller.config().clone();
    next.sort.primary = SortTier::ascending(SortCriterion::PartyPriority);
    next.grid.vertical_padding = 0.0;
    let change = controller.apply_config(next.clone());

    assert!(change.layout && change.content && !change.pool);
    assert_eq!(controller.config(), &next);
}

#[test]
fn test_display_options_reach_sink_without_content() {
    let mut controller = make_controller(10);
    let mut source = StaticSource::new((0..3).map(|i| make_status(i, 10.0)).collect());
    let mut sink = RecordingSink::default();
    controller.tick(&mut source, &mut sink);
    sink.take();

    let options = DisplayOptions {
        show_countdown: true,
        show_stacks: false,
    };
    assert_eq!(controller.set_display_options(options), ConfigChange::display());
    assert!(controller.set_display_options(options).is_empty());

    controller.tick(&mut source, &mut sink);
    let calls = sink.take();
    assert_eq!(calls, vec![SinkCall::Display(options)]);

    let mut next = controller.config().clone();
    next.show_countdown = false;
    assert_eq!(controller.apply_config(next), ConfigChange::display());
    controller.tick(&mut source, &mut sink);
    let calls = sink.take();
    assert_eq!(RecordingSink::displays(&calls), 1);
    assert_eq!(RecordingSink::contents(&calls), 0);
}

#[test]
fn test_disable_hides_and_enable_restores() {
    let mut controller = make_controller(10);
    let mut source = StaticSource::new((0..3).map(|i| make_status(i, 10.0)).collect());
    let mut sink = RecordingSink::default();
    controller.tick(&mut source, &mut sink);
    sink.take();

    controller.set_enabled(false);
    let report = controller.tick(&mut source, &mut sink);
    assert_eq!(report.displayed, 0);
    assert_eq!(RecordingSink::hidden(&sink.take()), 3);

    controller.set_enabled(true);
    let report = controller.tick(&mut source, &mut sink);
    let calls = sink.take();
    assert_eq!(report.displayed, 3);
    assert_eq!(RecordingSink::shown(&calls), 3);
    assert_eq!(RecordingSink::positions(&calls), 3);
}

#[test]
fn test_enabling_late_still_computes_layout() {
    let config = OverlayConfig {
        enabled: false,
        ..make_config(10)
    };
    let mut controller = OverlayController::new(OverlayKind::Player, config);
    let mut source = StaticSource::new((0..2).map(|i| make_status(i, 10.0)).collect());
    let mut sink = RecordingSink::default();

    assert_eq!(controller.tick(&mut source, &mut sink).displayed, 0);
    controller.set_enabled(true);
    let report = controller.tick(&mut source, &mut sink);

    assert!(report.layout_recomputed);
    assert_eq!(controller.layout().len(), 10);
    assert_eq!(report.displayed, 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// Data Mode
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_preview_mode_bypasses_live_source() {
    let live_reads = Cell::new(0);
    let mut source = |_: &FilterConfig| -> Result<Vec<StatusRecord>, SourceError> {
        live_reads.set(live_reads.get() + 1);
        Ok(Vec::new())
    };
    let mut controller = make_controller(12);
    let mut sink = RecordingSink::default();

    assert_eq!(controller.set_data_mode(DataMode::Preview), ConfigChange::content());
    let report = controller.tick(&mut source, &mut sink);
    assert_eq!(report.displayed, 12);

    controller.set_data_mode(DataMode::Live);
    let report = controller.tick(&mut source, &mut sink);
    assert_eq!(report.displayed, 0);
    assert_eq!(live_reads.get(), 1);
}

#[test]
fn test_preview_restarts_after_mode_switch() {
    let mut controller = make_controller(6);
    let mut source = StaticSource::default();
    let mut sink = RecordingSink::default();

    controller.set_data_mode(DataMode::Preview);
    controller.tick(&mut source, &mut sink);
    let first = visible_records(&controller);
    controller.tick(&mut source, &mut sink);

    controller.set_data_mode(DataMode::Live);
    controller.set_data_mode(DataMode::Preview);
    controller.tick(&mut source, &mut sink);
    let restarted = visible_records(&controller);

    assert_eq!(first, restarted);
}
