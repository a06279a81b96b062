//! Preview data
//!
//! Generates plausible statuses so overlays can be positioned and styled
//! without being in game. The data is deterministic: the same sequence of
//! fetches always produces the same records.

use auragrid_types::{FilterConfig, MAX_ITEMS, OverlayKind};

use super::{PERMANENT_REMAINING, SourceError, StatusCategory, StatusRecord, StatusSource};

/// Entity id used as the local player in preview data
pub const PREVIEW_PLAYER_ID: u64 = 0x1000_0001;
/// Entity id used for other party members in preview data
const PREVIEW_ALLY_ID: u64 = 0x1000_0002;
/// Number of hostile targets simulated by the target preview
const PREVIEW_TARGET_COUNT: usize = 3;

/// Default countdown step per fetch (one frame at 60 fps)
pub const DEFAULT_PREVIEW_STEP_SECS: f32 = 1.0 / 60.0;

struct PreviewStatus {
    id: u32,
    icon_id: u32,
    name: &'static str,
    category: StatusCategory,
    duration_secs: f32,
}

const fn preview_status(
    id: u32,
    name: &'static str,
    category: StatusCategory,
    duration_secs: f32,
) -> PreviewStatus {
    PreviewStatus {
        id,
        icon_id: 10_000 + id,
        name,
        category,
        duration_secs,
    }
}

const CATALOG: &[PreviewStatus] = &[
    preview_status(101, "Regen", StatusCategory::Buff, 18.0),
    preview_status(102, "Protect", StatusCategory::Buff, 30.0),
    preview_status(103, "Haste", StatusCategory::Buff, 15.0),
    preview_status(104, "Bleed", StatusCategory::Debuff, 21.0),
    preview_status(105, "Poison", StatusCategory::Debuff, 24.0),
    preview_status(106, "Slow", StatusCategory::Debuff, 9.0),
    preview_status(107, "Barrier", StatusCategory::Buff, 12.0),
    preview_status(108, "Vigor", StatusCategory::Buff, 60.0),
    preview_status(109, "Burn", StatusCategory::Debuff, 27.0),
    preview_status(110, "Weakness", StatusCategory::Debuff, 100.0),
    preview_status(111, "Focus", StatusCategory::Buff, 20.0),
    preview_status(112, "Aegis", StatusCategory::Buff, 10.0),
];

/// Deterministic generator of preview statuses
#[derive(Debug, Clone)]
pub struct PreviewSource {
    kind: OverlayKind,
    count: usize,
    step_secs: f32,
    records: Vec<StatusRecord>,
}

impl PreviewSource {
    /// Generator for `count` statuses, capped at `MAX_ITEMS`
    pub fn new(kind: OverlayKind, count: usize) -> Self {
        Self {
            kind,
            count: count.min(MAX_ITEMS as usize),
            step_secs: DEFAULT_PREVIEW_STEP_SECS,
            records: Vec::new(),
        }
    }

    /// Set how many seconds each fetch advances the countdowns
    pub fn with_step(mut self, step_secs: f32) -> Self {
        self.step_secs = step_secs.max(0.0);
        self
    }

    /// Change the number of generated statuses. Clears accumulated state.
    pub fn set_count(&mut self, count: usize) {
        let count = count.min(MAX_ITEMS as usize);
        if self.count != count {
            self.count = count;
            self.reset();
        }
    }

    /// Drop accumulated countdown state; the next fetch starts over
    pub fn reset(&mut self) {
        self.records.clear();
    }

    pub fn is_started(&self) -> bool {
        !self.records.is_empty()
    }

    fn generate(&self) -> Vec<StatusRecord> {
        (0..self.count).map(|i| self.make_record(i)).collect()
    }

    fn make_record(&self, i: usize) -> StatusRecord {
        let entry = &CATALOG[i % CATALOG.len()];
        let generation = (i / CATALOG.len()) as u32;
        let is_permanent = i % 5 == 4;
        let max_secs = if is_permanent { 0.0 } else { entry.duration_secs };
        let remaining_secs = if is_permanent {
            PERMANENT_REMAINING
        } else {
            // Spread start points so the preview is not in lockstep
            let spread = ((i * 37) % 100) as f32 / 100.0;
            max_secs * (0.25 + 0.75 * spread)
        };

        let mut record = StatusRecord {
            id: entry.id + generation * 1000,
            icon_id: entry.icon_id,
            name: entry.name.to_string(),
            description: format!("Preview {}", entry.category.label().to_lowercase()),
            remaining_secs,
            max_secs,
            is_permanent,
            source_entity_id: PREVIEW_PLAYER_ID,
            self_inflicted: true,
            stacks: if i % 3 == 0 { (i % 5) as u32 + 1 } else { 0 },
            party_priority: (i % 4) as u8,
            category: entry.category,
            actor_name: None,
            enemy_letter: None,
        };

        match self.kind {
            OverlayKind::Player => {
                if i % 2 == 1 {
                    record.source_entity_id = PREVIEW_ALLY_ID;
                    record.self_inflicted = false;
                }
            }
            OverlayKind::Target => {
                let target = i % PREVIEW_TARGET_COUNT;
                record.category = StatusCategory::Debuff;
                record.actor_name = Some(format!("Training Dummy {}", target + 1));
                record.enemy_letter = char::from_u32('A' as u32 + target as u32);
                // Same status on different targets must not collide on key
                record.id += (target as u32) * 100;
            }
        }
        record
    }

    fn advance(&mut self) {
        for record in self.records.iter_mut().filter(|r| !r.is_permanent) {
            record.remaining_secs -= self.step_secs;
            if record.remaining_secs <= 0.0 {
                record.remaining_secs = record.max_secs;
            }
        }
    }
}

impl StatusSource for PreviewSource {
    fn fetch(&mut self, _filter: &FilterConfig) -> Result<Vec<StatusRecord>, SourceError> {
        if self.records.is_empty() {
            self.records = self.generate();
        } else {
            self.advance();
        }
        Ok(self.records.clone())
    }
}
