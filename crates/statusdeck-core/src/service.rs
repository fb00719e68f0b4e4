// ── Service facade ──
//
// StatusService owns the directory client, one TTL cache per query type,
// and the shared suppression set. It is constructed explicitly and passed
// (cloned) into request handlers -- no process-wide singletons. All reads
// return Sourced values so the boundary layer can tell upstream-derived
// from cache-derived success.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use statusdeck_api::{CountsFilter, DirectoryClient, TransportConfig};

use crate::aggregate;
use crate::cache::TtlCache;
use crate::config::ServiceConfig;
use crate::convert;
use crate::error::CoreError;
use crate::fetch::fetch_ordered;
use crate::model::{
    AccountId, AccountRecord, AccountStatus, Sourced, SummaryReport, SuppressionMeta,
};
use crate::suppress::{SuppressionSet, partition_visible};

/// The aggregation layer's entry point for consumers.
///
/// Cheaply cloneable via `Arc` -- hand a clone to each request handler.
/// Reads go through the per-query-type caches; cache population is
/// unlocked, so concurrent cold readers may each refresh upstream
/// independently (accepted, see `cache` module notes).
#[derive(Clone)]
pub struct StatusService {
    inner: Arc<ServiceInner>,
}

impl std::fmt::Debug for StatusService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusService").finish_non_exhaustive()
    }
}

struct ServiceInner {
    config: ServiceConfig,
    client: DirectoryClient,
    summary_cache: TtlCache<SummaryReport>,
    down_cache: TtlCache<Vec<AccountRecord>>,
    warning_cache: TtlCache<Vec<AccountRecord>>,
    suppressions: Arc<SuppressionSet>,
    /// Watermark of the last successful upstream refresh.
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl StatusService {
    /// Create a service with an empty suppression set.
    ///
    /// Validates the configuration and builds the HTTP client up front:
    /// a missing credential fails here, before any upstream call or
    /// cache mutation.
    pub fn new(config: ServiceConfig) -> Result<Self, CoreError> {
        Self::with_suppressions(config, Arc::new(SuppressionSet::new()))
    }

    /// Create a service sharing an externally seeded suppression set
    /// (the persistence collaborator owns loading and storing it).
    pub fn with_suppressions(
        config: ServiceConfig,
        suppressions: Arc<SuppressionSet>,
    ) -> Result<Self, CoreError> {
        config.validate()?;

        let transport = TransportConfig {
            tls: config.tls.clone(),
            timeout: config.timeout,
        };
        let client = DirectoryClient::new(config.endpoint.as_str(), &config.credential, &transport)?;
        let (last_refresh, _) = watch::channel(None);

        Ok(Self {
            inner: Arc::new(ServiceInner {
                summary_cache: TtlCache::new(config.cache_ttl),
                down_cache: TtlCache::new(config.cache_ttl),
                warning_cache: TtlCache::new(config.cache_ttl),
                config,
                client,
                suppressions,
                last_refresh,
            }),
        })
    }

    /// The service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.inner.config
    }

    /// The shared suppression set.
    pub fn suppressions(&self) -> &Arc<SuppressionSet> {
        &self.inner.suppressions
    }

    // ── Summary ──────────────────────────────────────────────────────

    /// The equipment-status summary: infrastructure counts pass-through,
    /// customer counts suppression-adjusted, plus suppression meta.
    pub async fn summary(&self) -> Result<Sourced<SummaryReport>, CoreError> {
        if let Some(report) = self.inner.summary_cache.get() {
            return Ok(Sourced::cached(report));
        }
        let report = self.refresh_summary().await?;
        Ok(Sourced::fresh(report))
    }

    /// Fetch everything the summary needs, filter, recompute, and
    /// populate the caches.
    ///
    /// The down/warning list caches are written here too: all three views
    /// derive from the same raw data, which keeps counts and lists
    /// mutually consistent until the next invalidation. A failure leaves
    /// every cache exactly as it was.
    async fn refresh_summary(&self) -> Result<SummaryReport, CoreError> {
        let inner = &self.inner;

        let infrastructure_counts = inner
            .client
            .equipment_counts(&CountsFilter::company(
                inner.config.infrastructure_company.clone(),
            ))
            .await?;
        let customer_counts = inner
            .client
            .equipment_counts(&CountsFilter::company(inner.config.customer_company.clone()))
            .await?;
        let down_raw = inner.client.list_down_accounts(inner.config.page_size).await?;
        let warning_raw = inner
            .client
            .list_warning_accounts(inner.config.page_size)
            .await?;

        let (down_visible, suppressed_down) = partition_visible(
            convert::accounts_from_responses(down_raw, AccountStatus::Down),
            &inner.suppressions,
        );
        let (warning_visible, suppressed_warning) = partition_visible(
            convert::accounts_from_responses(warning_raw, AccountStatus::Warning),
            &inner.suppressions,
        );

        let suppressed_down = i64::try_from(suppressed_down).unwrap_or(i64::MAX);
        let suppressed_warning = i64::try_from(suppressed_warning).unwrap_or(i64::MAX);

        let raw_customer = convert::summary_from_counts(&customer_counts);
        let customer = aggregate::recompute(&raw_customer, suppressed_down, suppressed_warning);
        if !customer.is_consistent() {
            // Bounded list pages can undercount relative to the aggregate
            // query; emit the numbers as computed and flag the skew.
            warn!(
                good = customer.good,
                down = customer.down,
                warning = customer.warning,
                "customer summary inconsistent with raw counts"
            );
        }

        let report = SummaryReport {
            infrastructure: convert::summary_from_counts(&infrastructure_counts),
            customer,
            meta: SuppressionMeta {
                suppressed_down,
                suppressed_warning,
            },
        };

        inner.down_cache.set(down_visible);
        inner.warning_cache.set(warning_visible);
        inner.summary_cache.set(report.clone());
        let _ = inner.last_refresh.send(Some(Utc::now()));
        debug!(
            suppressed_down,
            suppressed_warning, "summary refreshed from directory"
        );

        Ok(report)
    }

    // ── List views ───────────────────────────────────────────────────

    /// Accounts with down equipment, suppression applied.
    pub async fn down_list(&self) -> Result<Sourced<Vec<AccountRecord>>, CoreError> {
        if let Some(list) = self.inner.down_cache.get() {
            return Ok(Sourced::cached(list));
        }

        let raw = self
            .inner
            .client
            .list_down_accounts(self.inner.config.page_size)
            .await?;
        let (visible, suppressed) = partition_visible(
            convert::accounts_from_responses(raw, AccountStatus::Down),
            &self.inner.suppressions,
        );
        debug!(suppressed, visible = visible.len(), "down list refreshed");

        self.inner.down_cache.set(visible.clone());
        let _ = self.inner.last_refresh.send(Some(Utc::now()));
        Ok(Sourced::fresh(visible))
    }

    /// Accounts with warning-state equipment, suppression applied.
    pub async fn warning_list(&self) -> Result<Sourced<Vec<AccountRecord>>, CoreError> {
        if let Some(list) = self.inner.warning_cache.get() {
            return Ok(Sourced::cached(list));
        }

        let raw = self
            .inner
            .client
            .list_warning_accounts(self.inner.config.page_size)
            .await?;
        let (visible, suppressed) = partition_visible(
            convert::accounts_from_responses(raw, AccountStatus::Warning),
            &self.inner.suppressions,
        );
        debug!(suppressed, visible = visible.len(), "warning list refreshed");

        self.inner.warning_cache.set(visible.clone());
        let _ = self.inner.last_refresh.send(Some(Utc::now()));
        Ok(Sourced::fresh(visible))
    }

    /// The suppressed accounts, resolved individually through the bounded
    /// fetcher. Never cached: suppression sets are small and operators
    /// editing them expect to see the effect immediately.
    ///
    /// Identifiers the directory no longer knows contribute nothing, as
    /// do per-identifier fetch failures.
    pub async fn suppressed_list(&self) -> Result<Sourced<Vec<AccountRecord>>, CoreError> {
        let ids = self.inner.suppressions.members();
        let client = &self.inner.client;

        let records = fetch_ordered(
            &ids,
            self.inner.config.fetch_concurrency,
            |id: AccountId| async move {
                let found = client.account_by_id(id.as_str()).await?;
                Ok::<_, statusdeck_api::Error>(match found {
                    Some(account) => {
                        vec![convert::account_from_response(account, AccountStatus::Suppressed)]
                    }
                    None => Vec::new(),
                })
            },
        )
        .await;

        Ok(Sourced::fresh(records))
    }

    // ── Suppression mutation ─────────────────────────────────────────

    /// Add an account to the suppression set. Returns `true` if it was
    /// not already suppressed.
    ///
    /// Every mutation is followed by invalidating all caches; mutation
    /// and invalidation are not atomic with in-flight reads — a request
    /// already past its cache check completes with the old set.
    pub fn suppress(&self, id: impl Into<AccountId>) -> bool {
        let added = self.inner.suppressions.add(id.into());
        self.invalidate_all();
        added
    }

    /// Remove an account from the suppression set. Returns `true` if it
    /// was present. Invalidates all caches, same contract as `suppress`.
    pub fn unsuppress(&self, id: &AccountId) -> bool {
        let removed = self.inner.suppressions.remove(id);
        self.invalidate_all();
        removed
    }

    /// Invalidate every cache instance. The next read of each query type
    /// refreshes from the directory.
    pub fn invalidate_all(&self) {
        self.inner.summary_cache.invalidate();
        self.inner.down_cache.invalidate();
        self.inner.warning_cache.invalidate();
    }

    // ── Fallbacks & metadata ─────────────────────────────────────────

    /// Zero-valued report for the boundary layer to render when the
    /// directory is unreachable, instead of a raw transport error.
    pub fn fallback_report(&self) -> SummaryReport {
        SummaryReport::zero()
    }

    /// Timestamp of the last successful upstream refresh, if any.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.inner.last_refresh.borrow()
    }

    /// Subscribe to refresh watermark changes.
    pub fn subscribe_refresh(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.inner.last_refresh.subscribe()
    }
}
