// ── Generic time-bound cache ──
//
// One TtlCache per logical query type. A cache holds at most one value;
// freshness is decided at read time, and invalidation is per-instance.
// Population is unlocked: two concurrent cold readers will both miss and
// both refresh upstream. Stampede prevention is out of scope here.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

struct CacheSlot<T> {
    value: Option<T>,
    fetched_at: Option<Instant>,
}

/// A single-slot cache with a fixed time-to-live.
///
/// `get` returns the stored value only while it is fresh:
/// `value` populated and `now - fetched_at < ttl` (strict). `set`
/// overwrites unconditionally and restamps; `invalidate` clears the slot
/// so the very next `get` misses regardless of age.
///
/// Uses `tokio::time::Instant`, so paused-clock tests can drive expiry.
pub struct TtlCache<T> {
    ttl: Duration,
    slot: Mutex<CacheSlot<T>>,
}

impl<T: Clone> TtlCache<T> {
    /// Create an empty cache. The TTL is fixed for the cache's lifetime.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(CacheSlot {
                value: None,
                fetched_at: None,
            }),
        }
    }

    /// The cached value, if still fresh.
    pub fn get(&self) -> Option<T> {
        let slot = self.slot.lock();
        match (&slot.value, slot.fetched_at) {
            (Some(value), Some(at)) if at.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        }
    }

    /// Store a value, stamping it with the current time. Overwrites any
    /// prior entry unconditionally.
    pub fn set(&self, value: T) {
        let mut slot = self.slot.lock();
        slot.value = Some(value);
        slot.fetched_at = Some(Instant::now());
    }

    /// Force the next `get` to miss, regardless of entry age.
    pub fn invalidate(&self) {
        let mut slot = self.slot.lock();
        slot.value = None;
        slot.fetched_at = None;
    }

    /// The freshness window this cache was constructed with.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio::time::advance;

    const TTL: Duration = Duration::from_millis(60_000);

    #[tokio::test(start_paused = true)]
    async fn set_then_get_returns_value() {
        let cache = TtlCache::new(TTL);
        cache.set(42);
        assert_eq!(cache.get(), Some(42));
        assert_eq!(cache.ttl(), TTL);
    }

    #[tokio::test(start_paused = true)]
    async fn get_misses_before_first_set() {
        let cache: TtlCache<u32> = TtlCache::new(TTL);
        assert_eq!(cache.get(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn entry_expires_at_ttl_boundary() {
        let cache = TtlCache::new(TTL);
        cache.set("v");

        advance(TTL - Duration::from_millis(1)).await;
        assert_eq!(cache.get(), Some("v"), "one tick before the boundary");

        advance(Duration::from_millis(1)).await;
        assert_eq!(cache.get(), None, "elapsed == ttl is stale");
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_misses_immediately_after_set() {
        let cache = TtlCache::new(TTL);
        cache.set(7);
        cache.invalidate();
        assert_eq!(cache.get(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn set_restamps_an_aging_entry() {
        let cache = TtlCache::new(TTL);
        cache.set(1);
        advance(TTL / 2).await;

        cache.set(2);
        advance(TTL - Duration::from_millis(1)).await;
        assert_eq!(cache.get(), Some(2), "second set restarted the clock");
    }
}
