//! Client-side request spacing for SearxNG servers.

use lru::LruCache;
use parking_lot::Mutex;
use std::{num::NonZeroUsize, time::Duration};
use tokio::time::Instant;

/// Minimum gap between any two SearxNG requests.
pub const GLOBAL_SPACING: Duration = Duration::from_secs(1);

/// Minimum gap between two requests to the same server.
pub const SERVER_SPACING: Duration = Duration::from_secs(2);

/// Number of servers whose last request time is remembered.
pub const TRACKED_SERVERS: usize = 64;

/// Two-layer rate limiter: a global spacing across every server plus a
/// per-server spacing kept in a bounded recency map.
///
/// Each caller reserves its slot under the lock and then sleeps outside it,
/// so concurrent callers queue up instead of firing together. Once more than
/// [`TRACKED_SERVERS`] servers have been seen, the least recently used one is
/// forgotten and its next request only waits on the global spacing.
#[derive(Debug)]
pub struct RateLimiter {
    global: Duration,
    per_server: Duration,
    state: Mutex<State>,
}

#[derive(Debug)]
struct State {
    last: Option<Instant>,
    servers: LruCache<String, Instant>,
}

impl RateLimiter {
    /// Create a limiter remembering at most `capacity` servers.
    pub fn new(global: Duration, per_server: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            global,
            per_server,
            state: Mutex::new(State {
                last: None,
                servers: LruCache::new(capacity),
            }),
        }
    }

    /// A limiter that never waits.
    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, TRACKED_SERVERS)
    }

    /// Wait until a request to `server` is allowed, and record it.
    pub async fn acquire(&self, server: &str) {
        let slot = self.reserve(server);
        if slot > Instant::now() {
            tracing::debug!(%server, wait_ms = (slot - Instant::now()).as_millis() as u64, "rate limiting searxng");
        }
        tokio::time::sleep_until(slot).await;
    }

    /// Number of servers currently remembered.
    pub fn tracked(&self) -> usize {
        self.state.lock().servers.len()
    }

    /// Whether `server` is still remembered.
    pub fn is_tracked(&self, server: &str) -> bool {
        self.state.lock().servers.contains(server)
    }

    fn reserve(&self, server: &str) -> Instant {
        let mut state = self.state.lock();
        let mut slot = Instant::now();
        if let Some(last) = state.last {
            slot = slot.max(last + self.global);
        }
        if let Some(last) = state.servers.get(server) {
            slot = slot.max(*last + self.per_server);
        }
        state.last = Some(slot);
        state.servers.put(server.to_owned(), slot);
        slot
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(GLOBAL_SPACING, SERVER_SPACING, TRACKED_SERVERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn same_server_waits_for_server_spacing() {
        let limiter = RateLimiter::default();
        let start = Instant::now();
        limiter.acquire("http://a").await;
        assert_eq!(start.elapsed(), Duration::ZERO);
        limiter.acquire("http://a").await;
        assert!(start.elapsed() >= SERVER_SPACING);
    }

    #[tokio::test(start_paused = true)]
    async fn other_server_waits_for_global_spacing_only() {
        let limiter = RateLimiter::default();
        let start = Instant::now();
        limiter.acquire("http://a").await;
        limiter.acquire("http://b").await;
        let elapsed = start.elapsed();
        assert!(elapsed >= GLOBAL_SPACING);
        assert!(elapsed < SERVER_SPACING);
    }

    #[tokio::test(start_paused = true)]
    async fn spacing_already_elapsed_does_not_wait() {
        let limiter = RateLimiter::default();
        limiter.acquire("http://a").await;
        tokio::time::advance(Duration::from_secs(5)).await;
        let start = Instant::now();
        limiter.acquire("http://a").await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_are_spaced() {
        let limiter = std::sync::Arc::new(RateLimiter::default());
        let start = Instant::now();
        let tasks: Vec<_> = (0..3)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move {
                    limiter.acquire("http://a").await;
                    start.elapsed()
                })
            })
            .collect();
        let mut waits = Vec::new();
        for task in tasks {
            waits.push(task.await.unwrap());
        }
        waits.sort();
        assert_eq!(waits[0], Duration::ZERO);
        assert!(waits[1] >= SERVER_SPACING);
        assert!(waits[2] >= SERVER_SPACING * 2);
    }

    #[test]
    fn evicts_least_recently_used_server() {
        let limiter = RateLimiter::new(Duration::ZERO, Duration::ZERO, 2);
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        rt.block_on(async {
            limiter.acquire("a").await;
            limiter.acquire("b").await;
            limiter.acquire("a").await;
            limiter.acquire("c").await;
        });
        assert_eq!(limiter.tracked(), 2);
        assert!(limiter.is_tracked("a"));
        assert!(!limiter.is_tracked("b"));
        assert!(limiter.is_tracked("c"));
    }

    #[tokio::test(start_paused = true)]
    async fn default_capacity_is_bounded() {
        let limiter = RateLimiter::new(Duration::ZERO, SERVER_SPACING, TRACKED_SERVERS);
        for i in 0..=TRACKED_SERVERS {
            limiter.acquire(&format!("http://s{i}")).await;
        }
        assert_eq!(limiter.tracked(), TRACKED_SERVERS);
        assert!(!limiter.is_tracked("http://s0"));

        // A forgotten server is not held to its old spacing.
        let start = Instant::now();
        limiter.acquire("http://s0").await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
