//! Per-overlay tick driver
//!
//! Each tick runs the full pipeline in a fixed order:
//!
//! 1. fetch records (live source or preview generator)
//! 2. filter
//! 3. sort
//! 4. truncate to `max_items`
//! 5. reconcile against the slot pool
//! 6. recompute the grid if geometry changed
//! 7. push positions, visibility and content to the render sink
//!
//! A tick never fails. A source error shows an empty overlay for that tick,
//! and bad geometry is clamped by the layout.

use auragrid_types::{
    AppConfig, FilterConfig, GridSpec, MAX_ITEMS, OverlayConfig, OverlayKind, ReconcileStrategy,
    SortSpec,
};

use super::ConfigChange;
use crate::filter::{filter_statuses, truncate};
use crate::layout::GridLayout;
use crate::pool::{SlotChange, SlotPool};
use crate::render::{DisplayOptions, RenderSink};
use crate::sort::sort_statuses;
use crate::status::{PreviewSource, SourceError, StatusRecord, StatusSource};

/// Where an overlay gets its records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataMode {
    /// Game state through the supplied `StatusSource`
    #[default]
    Live,
    /// Generated preview records; the supplied source is not read
    Preview,
}

/// Summary of one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Records returned by the source (0 on failure)
    pub fetched: usize,
    /// Slots visible after the tick
    pub displayed: usize,
    /// Records that found no slot
    pub dropped: usize,
    pub source_failed: bool,
    /// Slots touched by reconciliation
    pub slot_changes: usize,
    pub layout_recomputed: bool,
}

/// Drives one status overlay
#[derive(Debug, Clone)]
pub struct OverlayController {
    kind: OverlayKind,
    config: OverlayConfig,
    pool: SlotPool,
    layout: GridLayout,
    /// Changes not yet consumed by a tick
    dirty: ConfigChange,
    data_mode: DataMode,
    preview: PreviewSource,
}

impl OverlayController {
    pub fn new(kind: OverlayKind, mut config: OverlayConfig) -> Self {
        config.grid = clamp_grid(kind, config.grid);
        let capacity = config.grid.max_items as usize;
        Self {
            kind,
            pool: SlotPool::new(capacity, config.strategy),
            layout: GridLayout::default(),
            dirty: ConfigChange::ALL,
            data_mode: DataMode::Live,
            preview: PreviewSource::new(kind, capacity),
            config,
        }
    }

    /// Controller for one overlay of a loaded app config
    pub fn from_app_config(kind: OverlayKind, app: &AppConfig) -> Self {
        let mut controller = Self::new(kind, app.overlay(kind).clone());
        if app.preview_mode {
            controller.set_data_mode(DataMode::Preview);
        }
        controller
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn kind(&self) -> OverlayKind {
        self.kind
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn pool(&self) -> &SlotPool {
        &self.pool
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn data_mode(&self) -> DataMode {
        self.data_mode
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            show_countdown: self.config.show_countdown,
            show_stacks: self.config.show_stacks,
        }
    }

    /// Changes waiting for the next tick
    pub fn pending_changes(&self) -> ConfigChange {
        self.dirty
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Config setters
    // ─────────────────────────────────────────────────────────────────────────

    fn mark(&mut self, change: ConfigChange) -> ConfigChange {
        self.dirty |= change;
        change
    }

    pub fn set_sort(&mut self, sort: SortSpec) -> ConfigChange {
        if self.config.sort == sort {
            return ConfigChange::NONE;
        }
        self.config.sort = sort;
        self.mark(ConfigChange::content())
    }

    pub fn set_filter(&mut self, filter: FilterConfig) -> ConfigChange {
        if self.config.filter == filter {
            return ConfigChange::NONE;
        }
        self.config.filter = filter;
        self.mark(ConfigChange::content())
    }

    pub fn set_grid(&mut self, grid: GridSpec) -> ConfigChange {
        let grid = clamp_grid(self.kind, grid);
        if self.config.grid == grid {
            return ConfigChange::NONE;
        }
        let mut change = ConfigChange::layout();
        change.pool = self.config.grid.max_items != grid.max_items;
        self.config.grid = grid;
        self.mark(change)
    }

    pub fn set_strategy(&mut self, strategy: ReconcileStrategy) -> ConfigChange {
        if self.config.strategy == strategy {
            return ConfigChange::NONE;
        }
        self.config.strategy = strategy;
        self.mark(ConfigChange::pool())
    }

    pub fn set_enabled(&mut self, enabled: bool) -> ConfigChange {
        if self.config.enabled == enabled {
            return ConfigChange::NONE;
        }
        self.config.enabled = enabled;
        self.mark(ConfigChange::content())
    }

    /// Replace the whole config, flagging only what differs
    pub fn apply_config(&mut self, config: OverlayConfig) -> ConfigChange {
        let mut change = ConfigChange::NONE;
        change |= self.set_sort(config.sort);
        change |= self.set_filter(config.filter);
        change |= self.set_grid(config.grid);
        change |= self.set_strategy(config.strategy);
        change |= self.set_enabled(config.enabled);
        change |= self.set_display_options(DisplayOptions {
            show_countdown: config.show_countdown,
            show_stacks: config.show_stacks,
        });
        change
    }

    pub fn set_display_options(&mut self, options: DisplayOptions) -> ConfigChange {
        if self.display_options() == options {
            return ConfigChange::NONE;
        }
        self.config.show_countdown = options.show_countdown;
        self.config.show_stacks = options.show_stacks;
        self.mark(ConfigChange::display())
    }

    /// Switch between live and preview data. Preview state always restarts.
    pub fn set_data_mode(&mut self, mode: DataMode) -> ConfigChange {
        self.preview.reset();
        if self.data_mode == mode {
            return ConfigChange::NONE;
        }
        tracing::debug!(overlay = self.kind.config_key(), ?mode, "Switching data mode");
        self.data_mode = mode;
        self.mark(ConfigChange::content())
    }

    /// Seconds each preview fetch advances the countdowns. Restarts the preview.
    pub fn set_preview_step(&mut self, step_secs: f32) {
        self.preview = PreviewSource::new(self.kind, self.config.grid.max_items as usize)
            .with_step(step_secs);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tick
    // ─────────────────────────────────────────────────────────────────────────

    /// Run one update pass
    pub fn tick(&mut self, source: &mut dyn StatusSource, sink: &mut dyn RenderSink) -> TickReport {
        let dirty = self.dirty.take();
        let mut report = TickReport::default();

        if dirty.pool {
            self.apply_pool_changes(sink);
        }
        if dirty.display {
            sink.set_display_options(self.display_options());
        }

        if !self.config.enabled {
            hide_all(self.pool.release_all(), sink);
            // Geometry and content are still stale when the overlay comes back
            self.dirty |= ConfigChange {
                pool: false,
                display: false,
                ..dirty
            };
            return report;
        }

        let records = match self.fetch(source) {
            Ok(records) => records,
            Err(err) => {
                tracing::debug!(
                    overlay = self.kind.config_key(),
                    error = %err,
                    "Status fetch failed"
                );
                report.source_failed = true;
                Vec::new()
            }
        };
        report.fetched = records.len();

        let mut records = filter_statuses(records, &self.config.filter);
        sort_statuses(&mut records, &self.config.sort);
        truncate(&mut records, self.config.grid.max_items);

        let reconcile = self.pool.reconcile(&records);
        report.dropped = reconcile.dropped;
        report.slot_changes = reconcile.changes.len();

        if dirty.layout {
            self.layout = GridLayout::compute(&self.config.grid);
            sink.set_bounds(self.layout.size());
            report.layout_recomputed = true;
        }

        self.push(&reconcile.changes, dirty, sink);

        report.displayed = self.pool.bound_count();
        report
    }

    fn fetch(&mut self, source: &mut dyn StatusSource) -> Result<Vec<StatusRecord>, SourceError> {
        match self.data_mode {
            DataMode::Live => source.fetch(&self.config.filter),
            DataMode::Preview => self.preview.fetch(&self.config.filter),
        }
    }

    fn apply_pool_changes(&mut self, sink: &mut dyn RenderSink) {
        hide_all(self.pool.set_strategy(self.config.strategy), sink);

        let capacity = self.config.grid.max_items as usize;
        if capacity != self.pool.capacity() {
            tracing::debug!(
                overlay = self.kind.config_key(),
                from = self.pool.capacity(),
                to = capacity,
                "Resizing slot pool"
            );
            hide_all(self.pool.resize(capacity), sink);
            self.preview.set_count(capacity);
        }
        sink.set_capacity(capacity);
    }

    /// Push reconcile changes and any invalidated state to the sink.
    ///
    /// Within a slot, position and content always land before it is shown.
    fn push(&self, changes: &[SlotChange], dirty: ConfigChange, sink: &mut dyn RenderSink) {
        for change in changes.iter().filter(|c| c.hidden) {
            sink.set_visible(change.handle, false);
        }

        // Whole grid moved: every visible slot gets a fresh position
        if dirty.layout {
            for slot in self.pool.visible_slots() {
                if let Some(position) = slot.rank().and_then(|rank| self.layout.position(rank)) {
                    sink.set_position(slot.handle(), position);
                }
            }
        }

        for change in changes {
            let Some(slot) = self.pool.slot(change.handle) else {
                continue;
            };
            if change.content {
                if let Some(record) = slot.record() {
                    sink.set_content(change.handle, record);
                }
            }
            if change.moved && !dirty.layout {
                if let Some(position) = slot.rank().and_then(|rank| self.layout.position(rank)) {
                    sink.set_position(change.handle, position);
                }
            }
        }

        if dirty.content {
            for slot in self.pool.visible_slots() {
                let covered = changes
                    .iter()
                    .any(|c| c.handle == slot.handle() && c.content);
                if covered {
                    continue;
                }
                if let Some(record) = slot.record() {
                    sink.set_content(slot.handle(), record);
                }
            }
        }

        for change in changes.iter().filter(|c| c.shown) {
            sink.set_visible(change.handle, true);
        }
    }
}

/// Grid with `max_items` capped, warning when the config asked for more
fn clamp_grid(kind: OverlayKind, grid: GridSpec) -> GridSpec {
    let clamped = grid.clamped();
    if clamped.max_items != grid.max_items {
        tracing::warn!(
            overlay = kind.config_key(),
            max_items = grid.max_items,
            limit = MAX_ITEMS,
            "max_items above limit, clamping"
        );
    }
    clamped
}

fn hide_all(changes: Vec<SlotChange>, sink: &mut dyn RenderSink) {
    for change in changes.iter().filter(|c| c.hidden) {
        sink.set_visible(change.handle, false);
    }
}
