//! Single-flight memo cell backing the catalog.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug)]
struct CachedEntry<T> {
    values: Arc<[T]>,
    filled_at: Instant,
}

impl<T> CachedEntry<T> {
    fn is_fresh(&self, ttl: Option<Duration>) -> bool {
        ttl.map_or(true, |ttl| self.filled_at.elapsed() < ttl)
    }
}

/// Memoized collection filled by the first successful fetch.
///
/// The lock is held across the fetch, so concurrent first callers wait for
/// one request instead of racing. A failed or abandoned fetch stores
/// nothing; the next caller fetches again.
#[derive(Debug)]
pub struct CatalogCell<T> {
    label: &'static str,
    ttl: Option<Duration>,
    slot: Mutex<Option<CachedEntry<T>>>,
}

impl<T> CatalogCell<T> {
    /// Creates an empty cell. `ttl = None` keeps values until
    /// [`refresh`](Self::refresh) or [`invalidate`](Self::invalidate).
    pub fn new(label: &'static str, ttl: Option<Duration>) -> Self {
        Self {
            label,
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub const fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Cached values, fetching them first when the cell is empty or expired.
    pub async fn get_or_try_fill<F, Fut, E>(&self, fetch: F) -> Result<Arc<[T]>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(entry) = slot.as_ref() {
            if entry.is_fresh(self.ttl) {
                debug!(catalog = self.label, "cache hit");
                return Ok(Arc::clone(&entry.values));
            }
            debug!(catalog = self.label, "cache entry expired");
        }

        debug!(catalog = self.label, "cache miss; fetching");
        let values: Arc<[T]> = fetch().await?.into();
        *slot = Some(CachedEntry {
            values: Arc::clone(&values),
            filled_at: Instant::now(),
        });
        Ok(values)
    }

    /// Fetches unconditionally and replaces the cached values on success.
    /// On failure the previous values stay in place.
    pub async fn refresh<F, Fut, E>(&self, fetch: F) -> Result<Arc<[T]>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        let mut slot = self.slot.lock().await;
        debug!(catalog = self.label, "refreshing");
        let values: Arc<[T]> = fetch().await?.into();
        *slot = Some(CachedEntry {
            values: Arc::clone(&values),
            filled_at: Instant::now(),
        });
        Ok(values)
    }

    /// Cached values without fetching. Expired entries are not returned.
    pub async fn peek(&self) -> Option<Arc<[T]>> {
        let slot = self.slot.lock().await;
        slot.as_ref()
            .filter(|entry| entry.is_fresh(self.ttl))
            .map(|entry| Arc::clone(&entry.values))
    }

    pub async fn is_filled(&self) -> bool {
        self.peek().await.is_some()
    }

    pub async fn invalidate(&self) {
        let mut slot = self.slot.lock().await;
        *slot = None;
    }
}
