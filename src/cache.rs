//! Query Cache
//!
//! Client-side cache of fetched result sets. Writes never patch cached
//! data; they invalidate the affected key so the next read goes back to the
//! backend.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Identifies one cached result set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// All bookings visible to the session
    Bookings,
    /// The dentist directory
    Dentists,
    /// Unavailable slots of one dentist
    DentistUnavailable(String),
}

/// Cache configuration
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Age after which an entry is stale on its own.
    /// `None` keeps entries fresh until invalidated.
    pub stale_after: Option<Duration>,
}

/// Freshness of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Missing,
    Fresh,
    Stale,
}

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
}

struct Entry<V> {
    value: Arc<V>,
    fetched_at: Instant,
    invalidated: bool,
}

struct CacheState<V> {
    entries: HashMap<QueryKey, Entry<V>>,
    /// Bumped by every invalidation of a key, present or not
    generations: HashMap<QueryKey, u64>,
}

impl<V> Default for CacheState<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            generations: HashMap::new(),
        }
    }
}

impl<V> CacheState<V> {
    fn generation(&self, key: &QueryKey) -> u64 {
        self.generations.get(key).copied().unwrap_or(0)
    }
}

pub struct QueryCache<V> {
    inner: RwLock<CacheState<V>>,
    stale_after: Option<Duration>,
    hits: AtomicU64,
    misses: AtomicU64,
    invalidations: AtomicU64,
}

impl<V> QueryCache<V>
where
    V: Send + Sync + 'static,
{
    pub fn new(config: CacheConfig) -> Arc<Self> {
        Arc::new(Self {
            inner: Default::default(),
            stale_after: config.stale_after,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            invalidations: AtomicU64::new(0),
        })
    }

    fn is_fresh(&self, entry: &Entry<V>) -> bool {
        if entry.invalidated {
            return false;
        }
        match self.stale_after {
            Some(max_age) => entry.fetched_at.elapsed() < max_age,
            None => true,
        }
    }

    /// Fresh value for `key`, if any
    pub async fn get(&self, key: &QueryKey) -> Option<Arc<V>> {
        let inner = self.inner.read().await;
        match inner.entries.get(key) {
            Some(entry) if self.is_fresh(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(Arc::clone(&entry.value))
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a freshly fetched value, replacing whatever was there
    pub async fn insert(&self, key: QueryKey, value: V) -> Arc<V> {
        self.store(key, value, None).await
    }

    /// Store `value` fetched at `generation`. An invalidation of `key` that
    /// landed after the fetch started leaves the new entry stale.
    async fn store(&self, key: QueryKey, value: V, generation: Option<u64>) -> Arc<V> {
        let value = Arc::new(value);
        let mut inner = self.inner.write().await;
        let invalidated = generation.is_some_and(|seen| inner.generation(&key) != seen);
        if invalidated {
            tracing::debug!(?key, "Invalidated while fetching, storing as stale");
        }
        inner.entries.insert(
            key,
            Entry {
                value: Arc::clone(&value),
                fetched_at: Instant::now(),
                invalidated,
            },
        );
        value
    }

    /// Serve `key` from cache, or run `fetch` and cache its result.
    ///
    /// A failed fetch leaves the cache untouched.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: QueryKey, fetch: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            return Ok(value);
        }

        tracing::debug!(?key, "Cache miss, fetching");
        let generation = self.inner.read().await.generation(&key);
        let value = fetch().await?;
        Ok(self.store(key, value, Some(generation)).await)
    }

    /// Mark `key` stale so the next read re-fetches.
    ///
    /// Fetches already in flight for `key` store their result as stale.
    /// Returns whether an entry was present.
    pub async fn invalidate(&self, key: &QueryKey) -> bool {
        self.invalidations.fetch_add(1, Ordering::Relaxed);

        let mut inner = self.inner.write().await;
        *inner.generations.entry(key.clone()).or_insert(0) += 1;
        match inner.entries.get_mut(key) {
            Some(entry) => {
                entry.invalidated = true;
                tracing::debug!(?key, "Cache entry invalidated");
                true
            }
            None => false,
        }
    }

    pub async fn state(&self, key: &QueryKey) -> EntryState {
        match self.inner.read().await.entries.get(key) {
            None => EntryState::Missing,
            Some(entry) if self.is_fresh(entry) => EntryState::Fresh,
            Some(_) => EntryState::Stale,
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test]
    async fn test_get_or_fetch_caches() {
        let cache = QueryCache::<Vec<u32>>::new(CacheConfig::default());
        let fetches = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_fetch(QueryKey::Bookings, || async {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(vec![1, 2, 3])
                })
                .await
                .unwrap();
            assert_eq!(*value, vec![1, 2, 3]);
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().hits, 2);
        assert_eq!(cache.stats().misses, 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let cache = QueryCache::<u32>::new(CacheConfig::default());
        cache.insert(QueryKey::Bookings, 1).await;
        assert_eq!(cache.state(&QueryKey::Bookings).await, EntryState::Fresh);

        assert!(cache.invalidate(&QueryKey::Bookings).await);
        assert_eq!(cache.state(&QueryKey::Bookings).await, EntryState::Stale);
        assert!(cache.get(&QueryKey::Bookings).await.is_none());

        let value = cache
            .get_or_fetch(QueryKey::Bookings, || async { Ok::<_, ()>(2) })
            .await
            .unwrap();
        assert_eq!(*value, 2);
        assert_eq!(cache.state(&QueryKey::Bookings).await, EntryState::Fresh);
    }

    #[tokio::test]
    async fn test_invalidate_counts_missing_keys() {
        let cache = QueryCache::<u32>::new(CacheConfig::default());
        assert!(!cache.invalidate(&QueryKey::Bookings).await);
        assert_eq!(cache.stats().invalidations, 1);
        assert_eq!(cache.state(&QueryKey::Bookings).await, EntryState::Missing);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let cache = QueryCache::<u32>::new(CacheConfig::default());
        cache.insert(QueryKey::Bookings, 1).await;
        cache.insert(QueryKey::DentistUnavailable("d7".into()), 2).await;

        cache.invalidate(&QueryKey::Bookings).await;

        assert_eq!(
            cache.state(&QueryKey::DentistUnavailable("d7".into())).await,
            EntryState::Fresh
        );
        assert_eq!(
            cache.state(&QueryKey::DentistUnavailable("d8".into())).await,
            EntryState::Missing
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_cache_untouched() {
        let cache = QueryCache::<u32>::new(CacheConfig::default());
        let result = cache
            .get_or_fetch(QueryKey::Dentists, || async { Err::<u32, _>("down") })
            .await;

        assert_eq!(result.unwrap_err(), "down");
        assert_eq!(cache.state(&QueryKey::Dentists).await, EntryState::Missing);
    }

    #[tokio::test]
    async fn test_invalidate_during_fetch_stores_stale() {
        use tokio::sync::oneshot;

        let cache = QueryCache::<u32>::new(CacheConfig::default());
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel::<u32>();

        let fetching = tokio::spawn({
            let cache = Arc::clone(&cache);
            async move {
                cache
                    .get_or_fetch(QueryKey::Bookings, || async move {
                        let _ = started_tx.send(());
                        release_rx.await.map_err(|_| "dropped")
                    })
                    .await
            }
        });

        started_rx.await.unwrap();
        assert!(!cache.invalidate(&QueryKey::Bookings).await);
        release_tx.send(1).unwrap();

        let value = fetching.await.unwrap().unwrap();
        assert_eq!(*value, 1);
        assert_eq!(cache.state(&QueryKey::Bookings).await, EntryState::Stale);
        assert!(cache.get(&QueryKey::Bookings).await.is_none());

        let value = cache
            .get_or_fetch(QueryKey::Bookings, || async { Ok::<_, &str>(2) })
            .await
            .unwrap();
        assert_eq!(*value, 2);
        assert_eq!(cache.state(&QueryKey::Bookings).await, EntryState::Fresh);
    }

    #[tokio::test]
    async fn test_invalidating_other_key_keeps_fetch_fresh() {
        use tokio::sync::oneshot;

        let cache = QueryCache::<u32>::new(CacheConfig::default());
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel::<u32>();

        let fetching = tokio::spawn({
            let cache = Arc::clone(&cache);
            async move {
                cache
                    .get_or_fetch(QueryKey::Bookings, || async move {
                        let _ = started_tx.send(());
                        release_rx.await.map_err(|_| "dropped")
                    })
                    .await
            }
        });

        started_rx.await.unwrap();
        cache.invalidate(&QueryKey::Dentists).await;
        release_tx.send(1).unwrap();

        fetching.await.unwrap().unwrap();
        assert_eq!(cache.state(&QueryKey::Bookings).await, EntryState::Fresh);
    }

    #[tokio::test]
    async fn test_entries_age_out() {
        let cache = QueryCache::<u32>::new(CacheConfig {
            stale_after: Some(Duration::from_millis(20)),
        });
        cache.insert(QueryKey::Bookings, 1).await;
        assert_eq!(cache.state(&QueryKey::Bookings).await, EntryState::Fresh);

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(cache.state(&QueryKey::Bookings).await, EntryState::Stale);
    }
}
