//! Grid layout
//!
//! Computes the bounding size of a status grid and the absolute position of
//! every slot in it. Items fill a line (a row when `fill_rows_first`, a column
//! otherwise) up to `items_per_line`, then wrap to the next line. The grow
//! direction decides which corner slot 0 is anchored to:
//!
//! ```text
//!   DownRight      DownLeft       UpRight        UpLeft
//!   0 1 2 3        3 2 1 0        8 9            9 8
//!   4 5 6 7        7 6 5 4        4 5 6 7        7 6 5 4
//!   8 9              9 8          0 1 2 3        3 2 1 0
//! ```
//!
//! Layout is recomputed in full whenever any grid setting changes. That is
//! O(max_items), and max_items is small.

use auragrid_types::GridSpec;

/// Top-left corner of a slot, relative to the grid origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Bounding box of the whole grid
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Line/wrap counts derived from a grid spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMetrics {
    /// Items per line after clamping to [1, max_items]
    pub per_line: u32,
    /// Number of lines (rows when filling rows first)
    pub lines: u32,
    /// Items on the last line
    pub last_line: u32,
}

impl GridMetrics {
    /// Metrics for a spec, or `None` when the grid holds no items
    pub fn from_spec(spec: &GridSpec) -> Option<Self> {
        if spec.max_items == 0 {
            return None;
        }
        let per_line = spec.items_per_line.min(spec.max_items).max(1);
        let lines = spec.max_items.div_ceil(per_line);
        let last_line = spec.max_items - (lines - 1) * per_line;
        Some(Self {
            per_line,
            lines,
            last_line,
        })
    }

    /// (row, column) of the item at `index`
    pub fn cell(&self, index: u32, fill_rows_first: bool) -> (u32, u32) {
        let line = index / self.per_line;
        let within = index % self.per_line;
        if fill_rows_first {
            (line, within)
        } else {
            (within, line)
        }
    }
}

/// Spec with negative geometry clamped to zero and `max_items` capped
fn sanitized(spec: &GridSpec) -> GridSpec {
    GridSpec {
        horizontal_padding: spec.horizontal_padding.max(0.0),
        vertical_padding: spec.vertical_padding.max(0.0),
        slot_width: spec.slot_width.max(0.0),
        slot_height: spec.slot_height.max(0.0),
        ..spec.clamped()
    }
}

/// Length of a line of `count` slots
fn line_extent(count: u32, slot: f32, padding: f32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    count as f32 * slot + (count - 1) as f32 * padding
}

/// Bounding size of the grid at full capacity
pub fn compute_size(spec: &GridSpec) -> Size {
    let spec = sanitized(spec);
    let Some(metrics) = GridMetrics::from_spec(&spec) else {
        return Size::default();
    };

    if spec.fill_rows_first {
        let full = line_extent(metrics.per_line, spec.slot_width, spec.horizontal_padding);
        let last = line_extent(metrics.last_line, spec.slot_width, spec.horizontal_padding);
        Size::new(
            full.max(last),
            line_extent(metrics.lines, spec.slot_height, spec.vertical_padding),
        )
    } else {
        let full = line_extent(metrics.per_line, spec.slot_height, spec.vertical_padding);
        let last = line_extent(metrics.last_line, spec.slot_height, spec.vertical_padding);
        Size::new(
            line_extent(metrics.lines, spec.slot_width, spec.horizontal_padding),
            full.max(last),
        )
    }
}

/// Position of the slot at display rank `index` within a grid of `size`
pub fn slot_position(index: u32, spec: &GridSpec, size: Size) -> Point {
    let spec = sanitized(spec);
    let Some(metrics) = GridMetrics::from_spec(&spec) else {
        return Point::default();
    };
    let (row, col) = metrics.cell(index, spec.fill_rows_first);
    let (row, col) = (row as f32, col as f32);

    let x = if spec.grow_direction.align_right() {
        size.width - (col + 1.0) * spec.slot_width - col * spec.horizontal_padding
    } else {
        col * (spec.slot_width + spec.horizontal_padding)
    };
    let y = if spec.grow_direction.align_bottom() {
        size.height - (row + 1.0) * spec.slot_height - row * spec.vertical_padding
    } else {
        row * (spec.slot_height + spec.vertical_padding)
    };

    Point::new(x.max(0.0), y.max(0.0))
}

/// Precomputed layout for every slot of a grid
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLayout {
    spec: GridSpec,
    size: Size,
    positions: Vec<Point>,
}

impl GridLayout {
    pub fn compute(spec: &GridSpec) -> Self {
        let spec = sanitized(spec);
        let size = compute_size(&spec);
        let positions = (0..spec.max_items)
            .map(|index| slot_position(index, &spec, size))
            .collect();
        Self {
            spec,
            size,
            positions,
        }
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Position for display rank `rank`, if the grid has room for it
    pub fn position(&self, rank: usize) -> Option<Point> {
        self.positions.get(rank).copied()
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
