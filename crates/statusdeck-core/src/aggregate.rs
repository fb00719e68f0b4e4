// ── Suppression-aware summary recomputation ──
//
// Derives the visible summary from the directory's raw counts plus the
// suppressed counts the filter reported for the down and warning lists.
// Pure integer arithmetic, total over its inputs, and deliberately
// unclamped: if the directory's aggregate counts disagree with its
// bounded entity lists, the derived `good` can go negative and must be
// emitted exactly as computed. `EquipmentSummary::is_consistent` is the
// detection hook for that case.

use crate::model::EquipmentSummary;

/// Derive the visible summary from raw counts and suppressed counts.
///
/// ```text
/// visible_total   = raw.total   - suppressed_down - suppressed_warning
/// visible_down    = raw.down    - suppressed_down
/// visible_warning = raw.warning - suppressed_warning
/// visible_good    = visible_total - visible_down - visible_warning - raw.uninventoried
/// ```
///
/// `uninventoried` passes through unchanged: suppression is not applied
/// to that category. That asymmetry mirrors how the directory derives
/// uninventoried figures and is preserved, not corrected.
pub fn recompute(
    raw: &EquipmentSummary,
    suppressed_down: i64,
    suppressed_warning: i64,
) -> EquipmentSummary {
    let total = raw.total - suppressed_down - suppressed_warning;
    let down = raw.down - suppressed_down;
    let warning = raw.warning - suppressed_warning;
    let good = total - down - warning - raw.uninventoried;

    EquipmentSummary {
        good,
        warning,
        down,
        uninventoried: raw.uninventoried,
        total,
    }
}
