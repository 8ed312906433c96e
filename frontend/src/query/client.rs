use chrono::{DateTime, Utc};
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use super::{QueryKey, QueryOptions, QueryState};
use crate::api::ApiError;

pub type Clock = Rc<dyn Fn() -> DateTime<Utc>>;

struct Entry {
    value: Rc<dyn Any>,
    updated_at: DateTime<Utc>,
    invalidated: bool,
}

#[derive(Default)]
struct Cache {
    entries: HashMap<QueryKey, Entry>,
    /// Generation of the newest fetch per key, present only while it runs.
    in_flight: HashMap<QueryKey, u64>,
    next_generation: u64,
}

/// Result of one [`QueryClient::fetch`]. `Superseded` means a newer fetch for
/// the same key started meanwhile, so this result must not be shown.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Settled(Result<T, ApiError>),
    Superseded,
}

#[derive(Clone)]
pub struct QueryClient {
    cache: Rc<RefCell<Cache>>,
    clock: Clock,
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryClient {
    pub fn new() -> Self {
        Self::with_clock(Rc::new(Utc::now))
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            cache: Rc::new(RefCell::new(Cache::default())),
            clock,
        }
    }

    /// Cached value regardless of age.
    pub fn peek<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        let cache = self.cache.borrow();
        let entry = cache.entries.get(key)?;
        let value = entry.value.downcast_ref::<T>().cloned();
        if value.is_none() {
            log::debug!("Cached value for {} has an unexpected type", key);
        }
        value
    }

    /// Cached value only while it is inside the staleness window.
    pub fn fresh<T: Clone + 'static>(
        &self,
        key: &QueryKey,
        stale_time: chrono::Duration,
    ) -> Option<T> {
        if self.is_stale(key, stale_time) {
            None
        } else {
            self.peek(key)
        }
    }

    pub fn is_stale(&self, key: &QueryKey, stale_time: chrono::Duration) -> bool {
        let now = (self.clock)();
        self.cache
            .borrow()
            .entries
            .get(key)
            .map(|entry| entry.invalidated || now - entry.updated_at >= stale_time)
            .unwrap_or(true)
    }

    pub fn set_data<T: 'static>(&self, key: QueryKey, value: T) {
        let updated_at = (self.clock)();
        self.cache.borrow_mut().entries.insert(
            key,
            Entry {
                value: Rc::new(value),
                updated_at,
                invalidated: false,
            },
        );
    }

    /// Marks the entry stale; the data stays available to [`Self::peek`].
    pub fn invalidate(&self, key: &QueryKey) {
        if let Some(entry) = self.cache.borrow_mut().entries.get_mut(key) {
            entry.invalidated = true;
        }
    }

    /// Drops every entry of one resource family, e.g. all salary pairs, and
    /// orphans their in-flight fetches.
    pub fn remove_scope(&self, scope: &str) {
        let mut cache = self.cache.borrow_mut();
        cache.entries.retain(|key, _| key.scope() != scope);
        cache.in_flight.retain(|key, _| key.scope() != scope);
    }

    /// Drops all data and orphans every in-flight fetch.
    pub fn clear(&self) {
        let mut cache = self.cache.borrow_mut();
        cache.entries.clear();
        cache.in_flight.clear();
    }

    fn begin(&self, key: &QueryKey) -> u64 {
        let mut cache = self.cache.borrow_mut();
        cache.next_generation += 1;
        let generation = cache.next_generation;
        cache.in_flight.insert(key.clone(), generation);
        generation
    }

    fn is_current(&self, key: &QueryKey, generation: u64) -> bool {
        self.cache.borrow().in_flight.get(key) == Some(&generation)
    }

    fn finish(&self, key: &QueryKey) {
        self.cache.borrow_mut().in_flight.remove(key);
    }

    /// Runs `fetcher` with the retry budget and stores the result if no newer
    /// fetch for `key` started while this one was in flight.
    pub async fn fetch<T, F, Fut>(
        &self,
        key: &QueryKey,
        options: &QueryOptions,
        fetcher: F,
    ) -> FetchOutcome<T>
    where
        T: Clone + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let generation = self.begin(key);
        let mut attempt = 0;
        let result = loop {
            attempt += 1;
            match fetcher().await {
                Ok(value) => break Ok(value),
                Err(err)
                    if err.is_retryable()
                        && attempt <= options.retry
                        && self.is_current(key, generation) =>
                {
                    log::debug!("Retrying {} after: {}", key, err);
                }
                Err(err) => break Err(err),
            }
        };

        if !self.is_current(key, generation) {
            log::debug!("Discarding superseded response for {}", key);
            return FetchOutcome::Superseded;
        }
        self.finish(key);
        if let Ok(value) = &result {
            self.set_data(key.clone(), value.clone());
        }
        FetchOutcome::Settled(result)
    }

    /// One observation of a query: `None` (disabled) is idle, fresh cache is
    /// served without a request, anything else goes to the network.
    pub async fn observe<T, F, Fut>(
        &self,
        key: Option<QueryKey>,
        options: &QueryOptions,
        fetcher: F,
    ) -> QueryState<T>
    where
        T: Clone + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        // A newer request for the same key is live.
        self.observe_current(key, options, fetcher)
            .await
            .unwrap_or(QueryState::Loading)
    }

    /// Like [`Self::observe`], but `None` when a newer fetch for the key
    /// superseded this one. Callers holding the result must not store it.
    pub async fn observe_current<T, F, Fut>(
        &self,
        key: Option<QueryKey>,
        options: &QueryOptions,
        fetcher: F,
    ) -> Option<QueryState<T>>
    where
        T: Clone + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let Some(key) = key else {
            return Some(QueryState::Idle);
        };
        if let Some(value) = self.fresh::<T>(&key, options.stale_time) {
            log::debug!("Serving {} from cache", key);
            return Some(QueryState::Data(value));
        }
        match self.fetch(&key, options, fetcher).await {
            FetchOutcome::Settled(result) => Some(result.into()),
            FetchOutcome::Superseded => None,
        }
    }
}
