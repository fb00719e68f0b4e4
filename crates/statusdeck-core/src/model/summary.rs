// ── Summary shapes ──
//
// EquipmentSummary carries the five category counts; SummaryReport is the
// consumer-facing bundle (infrastructure + customer + suppression meta).
// Counts are i64 throughout: derived values may legitimately go negative
// when the directory's aggregate counts disagree with its bounded entity
// lists, and that inconsistency must survive to the consumer unclamped.

use serde::{Deserialize, Serialize};

// ── EquipmentSummary ────────────────────────────────────────────────

/// Equipment counts by category.
///
/// For every summary this layer emits, two identities hold:
/// `good = total - down - warning - uninventoried`, and for
/// suppression-adjusted summaries
/// `total = raw_total - suppressed_down - suppressed_warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EquipmentSummary {
    pub good: i64,
    pub warning: i64,
    pub down: i64,
    pub uninventoried: i64,
    pub total: i64,
}

impl EquipmentSummary {
    /// Whether the internal identity holds and no category went negative.
    ///
    /// A `false` here signals disagreement between the directory's
    /// aggregate counts and its entity lists (the lists are bounded pages
    /// and may undercount). The summary is still emitted as computed —
    /// this is a validation hook, not a gate.
    pub fn is_consistent(&self) -> bool {
        self.good >= 0
            && self.warning >= 0
            && self.down >= 0
            && self.uninventoried >= 0
            && self.total >= 0
            && self.good + self.down + self.warning + self.uninventoried == self.total
    }
}

// ── SuppressionMeta ─────────────────────────────────────────────────

/// How many entries suppression removed from each list view, as used by
/// the recomputation that produced the accompanying summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SuppressionMeta {
    pub suppressed_down: i64,
    pub suppressed_warning: i64,
}

// ── SummaryReport ───────────────────────────────────────────────────

/// Consumer-facing summary bundle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Infrastructure equipment counts, passed through untouched —
    /// infrastructure accounts are outside the suppression set's domain.
    pub infrastructure: EquipmentSummary,
    /// Customer equipment counts, suppression-adjusted.
    pub customer: EquipmentSummary,
    pub meta: SuppressionMeta,
}

impl SummaryReport {
    /// Zero-valued report for the boundary layer to render on failure
    /// instead of surfacing raw transport errors to end users.
    pub fn zero() -> Self {
        Self::default()
    }
}

// ── Sourced ─────────────────────────────────────────────────────────

/// Where a successful read came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Freshly fetched from the directory this call.
    Upstream,
    /// Served from a fresh cache entry; no upstream call was made.
    Cache,
}

/// A successful read tagged with its provenance.
///
/// Every consumer-facing operation returns `Result<Sourced<T>, CoreError>`
/// so the boundary layer distinguishes success, cache-derived success, and
/// failure without matching on error types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sourced<T> {
    pub value: T,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    pub(crate) fn fresh(value: T) -> Self {
        Self {
            value,
            source: DataSource::Upstream,
        }
    }

    pub(crate) fn cached(value: T) -> Self {
        Self {
            value,
            source: DataSource::Cache,
        }
    }

    /// `true` if this value was served from cache.
    pub fn is_cached(&self) -> bool {
        self.source == DataSource::Cache
    }

    /// Unwrap to the inner value, discarding provenance.
    pub fn into_inner(self) -> T {
        self.value
    }
}
