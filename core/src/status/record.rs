//! Status snapshots
//!
//! A `StatusRecord` is an immutable snapshot of one active buff or debuff,
//! produced fresh on every poll. Records are never mutated in place; the
//! next tick simply brings a new set.

use serde::{Deserialize, Serialize};

/// Remaining time reported by statuses without a duration
pub const PERMANENT_REMAINING: f32 = f32::INFINITY;

/// Buff or debuff
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    #[default]
    Buff,
    Debuff,
}

impl StatusCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Buff => "Buff",
            Self::Debuff => "Debuff",
        }
    }
}

/// Stable identity of a status across ticks: who applied it and what it is.
///
/// The status id alone is not unique (two players can apply the same
/// debuff), so the source is part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StatusKey {
    pub source_entity_id: u64,
    pub status_id: u32,
}

impl StatusKey {
    pub fn new(source_entity_id: u64, status_id: u32) -> Self {
        Self {
            source_entity_id,
            status_id,
        }
    }
}

/// One active status effect.
///
/// Serializable so a host can ship snapshots across a process boundary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Status id (same for every instance of this status type)
    pub id: u32,
    pub icon_id: u32,
    pub name: String,
    pub description: String,

    // ─── Timing ─────────────────────────────────────────────────────────────
    /// Seconds left; `PERMANENT_REMAINING` for permanent statuses
    pub remaining_secs: f32,
    /// Full duration in seconds (0 for permanent statuses)
    pub max_secs: f32,
    pub is_permanent: bool,

    // ─── Source ─────────────────────────────────────────────────────────────
    /// Entity that applied the status
    pub source_entity_id: u64,
    /// Applied by the local player
    pub self_inflicted: bool,

    // ─── State ──────────────────────────────────────────────────────────────
    pub stacks: u32,
    /// Party list priority, lower is more important
    pub party_priority: u8,
    pub category: StatusCategory,

    // ─── Hostile target info (target overlay only) ──────────────────────────
    pub actor_name: Option<String>,
    pub enemy_letter: Option<char>,
}

impl StatusRecord {
    /// Identity used for slot reconciliation
    pub fn key(&self) -> StatusKey {
        StatusKey::new(self.source_entity_id, self.id)
    }

    /// Progress as 0.0 (expired) to 1.0 (full). Permanent statuses are always full.
    pub fn progress(&self) -> f32 {
        if self.is_permanent || self.max_secs <= 0.0 {
            return 1.0;
        }
        (self.remaining_secs / self.max_secs).clamp(0.0, 1.0)
    }

    /// Format remaining time for the countdown label
    pub fn format_remaining(&self) -> String {
        if self.is_permanent || !self.remaining_secs.is_finite() {
            return String::new();
        }
        if self.remaining_secs <= 0.0 {
            return "0".to_string();
        }
        let secs = self.remaining_secs;
        // Thresholds apply to the rounded value so 9.97 reads "10", not "10.0"
        let whole = secs.round();
        if whole >= 60.0 {
            let mins = (whole / 60.0).floor() as u32;
            format!("{}m", mins)
        } else if (secs * 10.0).round() >= 100.0 {
            format!("{:.0}", secs)
        } else {
            format!("{:.1}", secs)
        }
    }

    /// Name prefixed with the enemy letter when the status sits on a hostile target
    pub fn display_label(&self) -> String {
        match self.enemy_letter {
            Some(letter) => format!("{}: {}", letter, self.name),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(remaining: f32, max: f32) -> StatusRecord {
        StatusRecord {
            id: 1,
            name: "Regen".to_string(),
            remaining_secs: remaining,
            max_secs: max,
            ..Default::default()
        }
    }

    #[test]
    fn test_progress_clamped() {
        assert_eq!(timed(5.0, 10.0).progress(), 0.5);
        assert_eq!(timed(12.0, 10.0).progress(), 1.0);
        assert_eq!(timed(-1.0, 10.0).progress(), 0.0);
    }

    #[test]
    fn test_permanent_is_full_and_unlabeled() {
        let record = StatusRecord {
            is_permanent: true,
            remaining_secs: PERMANENT_REMAINING,
            ..Default::default()
        };
        assert_eq!(record.progress(), 1.0);
        assert_eq!(record.format_remaining(), "");
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(timed(125.0, 180.0).format_remaining(), "2m");
        assert_eq!(timed(12.4, 30.0).format_remaining(), "12");
        assert_eq!(timed(4.46, 30.0).format_remaining(), "4.5");
        assert_eq!(timed(0.0, 30.0).format_remaining(), "0");
    }

    #[test]
    fn test_format_remaining_rounds_before_choosing_format() {
        assert_eq!(timed(9.97, 30.0).format_remaining(), "10");
        assert_eq!(timed(9.94, 30.0).format_remaining(), "9.9");
        assert_eq!(timed(59.7, 90.0).format_remaining(), "1m");
        assert_eq!(timed(59.4, 90.0).format_remaining(), "59");
    }

    #[test]
    fn test_display_label_with_letter() {
        let mut record = timed(5.0, 10.0);
        assert_eq!(record.display_label(), "Regen");
        record.enemy_letter = Some('B');
        assert_eq!(record.display_label(), "B: Regen");
    }

    #[test]
    fn test_key_includes_source() {
        let mut a = timed(5.0, 10.0);
        let mut b = a.clone();
        a.source_entity_id = 1;
        b.source_entity_id = 2;
        assert_ne!(a.key(), b.key());
    }
}
