//! Aggregation layer between a dashboard consumer and the upstream
//! account/inventory directory.
//!
//! This crate owns the business logic of the statusdeck workspace:
//!
//! - **[`StatusService`]** — Central facade owning the directory client,
//!   one [`TtlCache`] per query type, and the shared [`SuppressionSet`].
//!   Explicitly constructed and passed into request handlers — there is
//!   no process-wide singleton.
//!
//! - **[`TtlCache`]** — Generic time-bound cache, one instance per logical
//!   query type. Answers "is this fresh?" and "replace with this value";
//!   invalidation is per-instance and total.
//!
//! - **[`fetch_ordered`]** — Bounded-concurrency batch resolution of
//!   identifier lists. Output order matches input order regardless of
//!   completion order; per-identifier failures are absorbed.
//!
//! - **Suppression** ([`SuppressionSet`], [`partition_visible`]) — an
//!   operator-curated exclusion set applied to raw results before they
//!   reach any consumer.
//!
//! - **Recomputation** ([`aggregate::recompute`]) — derives the visible
//!   summary from raw counts and suppressed counts, keeping totals and
//!   filtered lists mutually consistent.
//!
//! - **Domain model** ([`model`]) — [`AccountRecord`], [`EquipmentSummary`],
//!   [`SummaryReport`], and the [`Sourced`] wrapper distinguishing
//!   upstream-derived from cache-derived success.

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod model;
pub mod service;
pub mod suppress;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::TtlCache;
pub use config::ServiceConfig;
pub use error::CoreError;
pub use fetch::{DEFAULT_CONCURRENCY, fetch_ordered};
pub use service::StatusService;
pub use suppress::{SuppressionSet, partition_visible};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AccountId, AccountRecord, AccountStatus, DataSource, EquipmentSummary, Sourced,
    SummaryReport, SuppressionMeta,
};
