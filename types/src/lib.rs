//! Shared configuration types for auragrid
//!
//! This crate contains the serializable overlay configuration: sort tiers,
//! filter lists and grid geometry. It is shared between the engine
//! (auragrid-core) and anything that edits or persists the config.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ─────────────────────────────────────────────────────────────────────────────
// Sorting
// ─────────────────────────────────────────────────────────────────────────────

/// What a single sort tier compares on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortCriterion {
    /// No ordering; ends the tier chain
    #[default]
    None,
    /// Buff before debuff
    StatusType,
    /// Remaining duration, permanent statuses count as infinite
    TimeRemaining,
    /// Statuses applied by the local player
    OwnStatusFirst,
    /// Party list priority (lower value = higher priority)
    PartyPriority,
    /// Hostile target letter, targets without a letter always last
    EnemyLetter,
    /// Permanent (no duration) statuses
    PermanentFlag,
}

impl SortCriterion {
    /// Get a user-friendly label for this criterion
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::StatusType => "Status Type",
            Self::TimeRemaining => "Time Remaining",
            Self::OwnStatusFirst => "Own Status First",
            Self::PartyPriority => "Party Priority",
            Self::EnemyLetter => "Enemy Letter",
            Self::PermanentFlag => "Permanent",
        }
    }

    /// All criteria, in dropdown order
    pub fn all() -> &'static [SortCriterion] {
        &[
            Self::None,
            Self::StatusType,
            Self::TimeRemaining,
            Self::OwnStatusFirst,
            Self::PartyPriority,
            Self::EnemyLetter,
            Self::PermanentFlag,
        ]
    }
}

/// Direction of a sort tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// One (criterion, direction) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortTier {
    #[serde(default)]
    pub criterion: SortCriterion,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortTier {
    pub fn new(criterion: SortCriterion, order: SortOrder) -> Self {
        Self { criterion, order }
    }

    pub fn ascending(criterion: SortCriterion) -> Self {
        Self::new(criterion, SortOrder::Ascending)
    }

    pub fn descending(criterion: SortCriterion) -> Self {
        Self::new(criterion, SortOrder::Descending)
    }
}

/// Three prioritized sort tiers.
///
/// A `None` criterion ends the chain: it and every later tier are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    #[serde(default)]
    pub primary: SortTier,
    #[serde(default)]
    pub secondary: SortTier,
    #[serde(default)]
    pub tertiary: SortTier,
}

impl SortSpec {
    pub fn new(primary: SortTier, secondary: SortTier, tertiary: SortTier) -> Self {
        Self {
            primary,
            secondary,
            tertiary,
        }
    }

    /// Tiers that contribute an ordering key, in priority order
    pub fn active_tiers(&self) -> impl Iterator<Item = SortTier> {
        [self.primary, self.secondary, self.tertiary]
            .into_iter()
            .take_while(|tier| tier.criterion != SortCriterion::None)
    }

    /// Returns true if no tier contributes ordering
    pub fn is_unsorted(&self) -> bool {
        self.primary.criterion == SortCriterion::None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Filtering
// ─────────────────────────────────────────────────────────────────────────────

/// Allow/deny list and category filters for one overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Apply `filter_list` at all
    #[serde(default)]
    pub filter_enabled: bool,
    /// true = drop listed ids, false = keep only listed ids
    #[serde(default = "default_true")]
    pub is_blacklist: bool,
    /// Status ids the list applies to
    #[serde(default)]
    pub filter_list: BTreeSet<u32>,
    /// Drop permanent statuses regardless of the list
    #[serde(default)]
    pub hide_permanent: bool,
    #[serde(default = "default_true")]
    pub show_buffs: bool,
    #[serde(default = "default_true")]
    pub show_debuffs: bool,
    /// Keep only statuses the local player applied
    #[serde(default)]
    pub self_applied_only: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            filter_enabled: false,
            is_blacklist: true,
            filter_list: BTreeSet::new(),
            hide_permanent: false,
            show_buffs: true,
            show_debuffs: true,
            self_applied_only: false,
        }
    }
}

impl FilterConfig {
    /// Blacklist the given ids
    pub fn blacklist(ids: impl IntoIterator<Item = u32>) -> Self {
        Self {
            filter_enabled: true,
            is_blacklist: true,
            filter_list: ids.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Whitelist the given ids
    pub fn whitelist(ids: impl IntoIterator<Item = u32>) -> Self {
        Self {
            filter_enabled: true,
            is_blacklist: false,
            filter_list: ids.into_iter().collect(),
            ..Self::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Grid Layout
// ─────────────────────────────────────────────────────────────────────────────

/// Screen-space quadrant the grid expands into as items are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowDirection {
    #[default]
    DownRight,
    DownLeft,
    UpRight,
    UpLeft,
}

impl GrowDirection {
    /// Columns are anchored to the right edge
    pub fn align_right(&self) -> bool {
        matches!(self, Self::DownLeft | Self::UpLeft)
    }

    /// Rows are anchored to the bottom edge
    pub fn align_bottom(&self) -> bool {
        matches!(self, Self::UpRight | Self::UpLeft)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::DownRight => "Down/Right",
            Self::DownLeft => "Down/Left",
            Self::UpRight => "Up/Right",
            Self::UpLeft => "Up/Left",
        }
    }
}

/// Upper bound on `GridSpec::max_items`
pub const MAX_ITEMS: u32 = 100;

/// Geometry of a status grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Items per row (rows-first) or per column (columns-first)
    #[serde(default = "default_items_per_line")]
    pub items_per_line: u32,
    /// Pool capacity and display cap, at most `MAX_ITEMS`
    #[serde(default = "default_max_items")]
    pub max_items: u32,
    #[serde(default = "default_true")]
    pub fill_rows_first: bool,
    #[serde(default)]
    pub grow_direction: GrowDirection,
    #[serde(default = "default_padding")]
    pub horizontal_padding: f32,
    #[serde(default = "default_padding")]
    pub vertical_padding: f32,
    #[serde(default = "default_slot_width")]
    pub slot_width: f32,
    #[serde(default = "default_slot_height")]
    pub slot_height: f32,
}

fn default_items_per_line() -> u32 {
    10
}
fn default_max_items() -> u32 {
    30
}
fn default_padding() -> f32 {
    4.0
}
fn default_slot_width() -> f32 {
    36.0
}
fn default_slot_height() -> f32 {
    48.0
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            items_per_line: default_items_per_line(),
            max_items: default_max_items(),
            fill_rows_first: true,
            grow_direction: GrowDirection::DownRight,
            horizontal_padding: default_padding(),
            vertical_padding: default_padding(),
            slot_width: default_slot_width(),
            slot_height: default_slot_height(),
        }
    }
}

impl GridSpec {
    /// Copy with `max_items` capped at `MAX_ITEMS`
    pub fn clamped(self) -> Self {
        Self {
            max_items: self.max_items.min(MAX_ITEMS),
            ..self
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlay Config
// ─────────────────────────────────────────────────────────────────────────────

/// How records are mapped onto pooled slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileStrategy {
    /// Slot i shows record i; no identity across ticks
    Positional,
    /// A status keeps its slot for as long as it stays displayed
    #[default]
    Keyed,
}

/// Which statuses an overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    /// Statuses on the local player
    #[default]
    Player,
    /// Statuses the local player has on hostile targets
    Target,
}

impl OverlayKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Player => "Player Statuses",
            Self::Target => "Target Statuses",
        }
    }

    /// Config key used for this overlay's section
    pub fn config_key(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Target => "target",
        }
    }
}

/// Complete configuration for one status overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub sort: SortSpec,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub grid: GridSpec,
    #[serde(default)]
    pub strategy: ReconcileStrategy,
    /// Show countdown text on each slot
    #[serde(default = "default_true")]
    pub show_countdown: bool,
    /// Show stack count on each slot
    #[serde(default = "default_true")]
    pub show_stacks: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sort: SortSpec::default(),
            filter: FilterConfig::default(),
            grid: GridSpec::default(),
            strategy: ReconcileStrategy::default(),
            show_countdown: true,
            show_stacks: true,
        }
    }
}

impl OverlayConfig {
    /// Defaults tuned for each overlay kind
    pub fn default_for(kind: OverlayKind) -> Self {
        match kind {
            OverlayKind::Player => Self::default(),
            OverlayKind::Target => Self {
                sort: SortSpec::new(
                    SortTier::ascending(SortCriterion::EnemyLetter),
                    SortTier::ascending(SortCriterion::TimeRemaining),
                    SortTier::default(),
                ),
                filter: FilterConfig {
                    self_applied_only: true,
                    ..FilterConfig::default()
                },
                grid: GridSpec {
                    items_per_line: 8,
                    max_items: 24,
                    fill_rows_first: false,
                    ..GridSpec::default()
                },
                ..Self::default()
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level persisted configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_player_overlay")]
    pub player: OverlayConfig,
    #[serde(default = "default_target_overlay")]
    pub target: OverlayConfig,
    /// Feed overlays generated preview data instead of live game state
    #[serde(default)]
    pub preview_mode: bool,
}

fn default_player_overlay() -> OverlayConfig {
    OverlayConfig::default_for(OverlayKind::Player)
}
fn default_target_overlay() -> OverlayConfig {
    OverlayConfig::default_for(OverlayKind::Target)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            player: default_player_overlay(),
            target: default_target_overlay(),
            preview_mode: false,
        }
    }
}

impl AppConfig {
    pub fn overlay(&self, kind: OverlayKind) -> &OverlayConfig {
        match kind {
            OverlayKind::Player => &self.player,
            OverlayKind::Target => &self.target,
        }
    }

    pub fn overlay_mut(&mut self, kind: OverlayKind) -> &mut OverlayConfig {
        match kind {
            OverlayKind::Player => &mut self.player,
            OverlayKind::Target => &mut self.target,
        }
    }
}

fn default_true() -> bool {
    true
}
