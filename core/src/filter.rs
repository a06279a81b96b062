//! Status filtering
//!
//! Two independent layers:
//! - the allow/deny list, applied only when `filter_enabled` is set
//! - category flags (`hide_permanent`, buff/debuff visibility, self-applied only),
//!   applied regardless of the list
//!
//! Filtering is pure and keeps input order.

use auragrid_types::FilterConfig;

use crate::status::{StatusCategory, StatusRecord};

/// Returns true if the record survives the filter
pub fn passes(record: &StatusRecord, cfg: &FilterConfig) -> bool {
    if cfg.filter_enabled {
        let listed = cfg.filter_list.contains(&record.id);
        if listed == cfg.is_blacklist {
            return false;
        }
    }

    if cfg.hide_permanent && record.is_permanent {
        return false;
    }

    if cfg.self_applied_only && !record.self_inflicted {
        return false;
    }

    match record.category {
        StatusCategory::Buff => cfg.show_buffs,
        StatusCategory::Debuff => cfg.show_debuffs,
    }
}

/// Filter a status collection, preserving order
pub fn filter_statuses(records: Vec<StatusRecord>, cfg: &FilterConfig) -> Vec<StatusRecord> {
    records.into_iter().filter(|r| passes(r, cfg)).collect()
}

/// Keep only the first `max_items` records
pub fn truncate(records: &mut Vec<StatusRecord>, max_items: u32) {
    records.truncate(max_items as usize);
}
