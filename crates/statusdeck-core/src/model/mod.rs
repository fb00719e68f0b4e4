// ── Domain model ──
//
// Canonical types produced by the aggregation layer. All are transient:
// recomputed per refresh cycle, never persisted.

mod account;
mod summary;

pub use account::{AccountId, AccountRecord, AccountStatus};
pub use summary::{DataSource, EquipmentSummary, Sourced, SummaryReport, SuppressionMeta};
