//! # Poll Cache
//!
//! Key-addressed cache entries with interval-gated background refresh,
//! in-flight deduplication, and watch-channel subscriber fan-out.

use crate::fetcher::Fetch;
use shared_types::ClientError;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior};

/// One cache slot: last-known value, refresh bookkeeping, and the in-flight
/// marker that enforces at most one fetch per key.
struct CacheEntry<V> {
    /// Last-known value, fanned out to subscribers. `None` until the first
    /// successful fetch.
    value: watch::Sender<Option<V>>,
    /// When the most recent fetch started; gates interval-based refresh.
    last_fetch_started: Option<Instant>,
    /// Present while a fetch is pending. Joiners subscribe here instead of
    /// issuing a duplicate fetch.
    inflight: Option<broadcast::Sender<Result<V, ClientError>>>,
}

impl<V> CacheEntry<V> {
    fn new() -> Self {
        Self {
            value: watch::channel(None).0,
            last_fetch_started: None,
            inflight: None,
        }
    }
}

fn lock_entries<'a, K, V>(
    entries: &'a Mutex<HashMap<K, CacheEntry<V>>>,
) -> MutexGuard<'a, HashMap<K, CacheEntry<V>>> {
    entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Clears the in-flight marker if the leading fetch future is dropped
/// before completing, releasing any joined waiters.
struct FlightGuard<'a, K: Eq + Hash, V> {
    entries: &'a Mutex<HashMap<K, CacheEntry<V>>>,
    key: &'a K,
    armed: bool,
}

impl<K: Eq + Hash, V> Drop for FlightGuard<'_, K, V> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut entries = lock_entries(self.entries);
        if let Some(entry) = entries.get_mut(self.key) {
            entry.inflight = None;
        }
    }
}

/// Role a `refresh` call takes once per-key arbitration is done.
enum Role<V> {
    /// This call issues the underlying fetch.
    Leader(broadcast::Sender<Result<V, ClientError>>),
    /// A fetch is already pending; this call awaits its result.
    Waiter(broadcast::Receiver<Result<V, ClientError>>),
}

/// Generic polling cache over a key type and a [`Fetch`] port.
pub struct PollCache<K, V, F> {
    fetcher: F,
    refresh_interval: Duration,
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
}

impl<K, V, F> PollCache<K, V, F>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    F: Fetch<K, V> + Send + Sync + 'static,
{
    /// Create a cache. `refresh_interval` gates how often `read` triggers a
    /// background refresh per key.
    pub fn new(fetcher: F, refresh_interval: Duration) -> Arc<Self> {
        Arc::new(Self {
            fetcher,
            refresh_interval,
            entries: Mutex::new(HashMap::new()),
        })
    }

    /// Return the last-known value immediately (possibly stale or absent)
    /// and trigger a background refresh if none is in flight and the
    /// refresh interval has elapsed.
    pub fn read(self: &Arc<Self>, key: &K) -> Option<V> {
        let (value, due) = {
            let mut entries = lock_entries(&self.entries);
            let entry = entries.entry(key.clone()).or_insert_with(CacheEntry::new);
            let value = entry.value.borrow().clone();
            let due = entry.inflight.is_none()
                && entry
                    .last_fetch_started
                    .map_or(true, |started| started.elapsed() >= self.refresh_interval);
            (value, due)
        };
        if due {
            self.spawn_refresh(key.clone());
        }
        value
    }

    /// Return the last-known value without triggering any refresh.
    pub fn peek(&self, key: &K) -> Option<V> {
        let entries = lock_entries(&self.entries);
        entries.get(key).and_then(|entry| entry.value.borrow().clone())
    }

    /// Force the next `read` to refetch regardless of the interval.
    pub fn invalidate(&self, key: &K) {
        let mut entries = lock_entries(&self.entries);
        if let Some(entry) = entries.get_mut(key) {
            entry.last_fetch_started = None;
        }
    }

    /// Overwrite the cached value synchronously (optimistic update) and
    /// notify subscribers. With `revalidate`, an immediate real refresh is
    /// scheduled to reconcile against the ledger.
    pub fn mutate_local(self: &Arc<Self>, key: &K, value: V, revalidate: bool) {
        {
            let mut entries = lock_entries(&self.entries);
            let entry = entries.entry(key.clone()).or_insert_with(CacheEntry::new);
            entry.value.send_replace(Some(value));
        }
        if revalidate {
            self.spawn_refresh(key.clone());
        }
    }

    /// Register interest in a key. The receiver observes every applied
    /// value change, including optimistic writes.
    pub fn subscribe(&self, key: &K) -> watch::Receiver<Option<V>> {
        let mut entries = lock_entries(&self.entries);
        entries
            .entry(key.clone())
            .or_insert_with(CacheEntry::new)
            .value
            .subscribe()
    }

    /// Refresh a key now, deduplicating against any fetch already in
    /// flight, and return the fetched value.
    ///
    /// # Errors
    ///
    /// Fetch failures are returned to the callers awaiting this refresh;
    /// the last-known value and all passive subscribers are untouched.
    pub async fn refresh(&self, key: &K) -> Result<V, ClientError> {
        let role = {
            let mut entries = lock_entries(&self.entries);
            let entry = entries.entry(key.clone()).or_insert_with(CacheEntry::new);
            if let Some(inflight) = &entry.inflight {
                Role::Waiter(inflight.subscribe())
            } else {
                let (tx, _) = broadcast::channel(1);
                entry.inflight = Some(tx.clone());
                entry.last_fetch_started = Some(Instant::now());
                Role::Leader(tx)
            }
        };

        match role {
            Role::Waiter(mut waiter) => waiter
                .recv()
                .await
                .map_err(|_| ClientError::NetworkFailure("refresh abandoned".to_string()))?,
            Role::Leader(tx) => {
                let mut guard = FlightGuard {
                    entries: &self.entries,
                    key,
                    armed: true,
                };
                let result = self.fetcher.fetch(key).await;
                {
                    let mut entries = lock_entries(&self.entries);
                    if let Some(entry) = entries.get_mut(key) {
                        entry.inflight = None;
                        if let Ok(value) = &result {
                            entry.value.send_replace(Some(value.clone()));
                        }
                    }
                }
                guard.armed = false;
                let _ = tx.send(result.clone());
                result
            }
        }
    }

    /// Kick off a refresh without awaiting it. Failures are logged and
    /// absorbed; passive readers keep the last-known value.
    pub fn spawn_refresh(self: &Arc<Self>, key: K) {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(error) = cache.refresh(&key).await {
                tracing::warn!(%error, "background refresh failed; serving last-known value");
            }
        });
    }

    /// Start interval-driven polling for a key. The first tick fires
    /// immediately. Dropping the returned handle cancels the timer task.
    pub fn spawn_poll(self: &Arc<Self>, key: K) -> PollHandle {
        let cache = Arc::clone(self);
        let period = self.refresh_interval;
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(error) = cache.refresh(&key).await {
                    tracing::warn!(%error, "interval refresh failed; serving last-known value");
                }
            }
        });
        PollHandle { task }
    }
}

/// Handle to an interval polling task. Dropping it cancels the scheduled
/// work; an in-flight fetch still completes and is cached for any future
/// reader.
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stop the polling task now.
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
