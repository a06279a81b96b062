//! Status ordering
//!
//! Builds a composite comparator from the three configured tiers. Each tier
//! compares one key; ties fall through to the next tier, and records that
//! tie on every tier keep their input order (the sort is stable).
//!
//! # Key conventions (Ascending)
//!
//! | Criterion      | First                         |
//! |----------------|-------------------------------|
//! | StatusType     | Buff                          |
//! | TimeRemaining  | Least time left (permanent last) |
//! | OwnStatusFirst | Statuses the player applied   |
//! | PartyPriority  | Lowest priority value         |
//! | EnemyLetter    | `A`; no letter is always last |
//! | PermanentFlag  | Timed statuses                |
//!
//! Descending reverses a tier, except that a missing enemy letter stays last.

use std::cmp::Ordering;

use auragrid_types::{SortCriterion, SortOrder, SortSpec, SortTier};

use crate::status::StatusRecord;

/// Compare two records on a single criterion, ascending
fn compare_key(criterion: SortCriterion, a: &StatusRecord, b: &StatusRecord) -> Ordering {
    match criterion {
        SortCriterion::None => Ordering::Equal,
        SortCriterion::StatusType => a.category.cmp(&b.category),
        SortCriterion::TimeRemaining => a.remaining_secs.total_cmp(&b.remaining_secs),
        // true sorts before false
        SortCriterion::OwnStatusFirst => b.self_inflicted.cmp(&a.self_inflicted),
        SortCriterion::PartyPriority => a.party_priority.cmp(&b.party_priority),
        SortCriterion::EnemyLetter => a.enemy_letter.cmp(&b.enemy_letter),
        SortCriterion::PermanentFlag => a.is_permanent.cmp(&b.is_permanent),
    }
}

/// Compare two records on one tier, honoring its direction
fn compare_tier(tier: SortTier, a: &StatusRecord, b: &StatusRecord) -> Ordering {
    if tier.criterion == SortCriterion::EnemyLetter {
        // Records without a letter go last in both directions
        match (a.enemy_letter, b.enemy_letter) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Greater,
            (Some(_), None) => return Ordering::Less,
            (Some(_), Some(_)) => {}
        }
    }

    let ordering = compare_key(tier.criterion, a, b);
    match tier.order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

/// Build the composite comparator for a sort spec.
///
/// Tiers after the first `None` criterion are ignored.
pub fn comparator(spec: &SortSpec) -> impl Fn(&StatusRecord, &StatusRecord) -> Ordering + use<> {
    let tiers: Vec<SortTier> = spec.active_tiers().collect();
    move |a, b| {
        tiers
            .iter()
            .map(|&tier| compare_tier(tier, a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// Sort records in place (stable)
pub fn sort_statuses(records: &mut [StatusRecord], spec: &SortSpec) {
    if spec.is_unsorted() {
        return;
    }
    records.sort_by(comparator(spec));
}
