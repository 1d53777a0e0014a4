// src/services/request_cache.rs
use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::oneshot;

use crate::errors::{AppError, Result};

type SharedFetch<V> = Shared<BoxFuture<'static, Result<V>>>;

/// Eviction knobs. Both default to off: entries then live until invalidated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CachePolicy {
    pub ttl: Option<Duration>,
    pub max_entries: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Pending,
    Ready,
}

#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub inserted_at: Instant,
}

enum Slot<V> {
    // `ticket` identifies the fetch that owns this marker, so a fetch that
    // outlives an invalidation cannot overwrite a newer one.
    Pending { ticket: u64, result: SharedFetch<V> },
    Ready(CacheEntry<V>),
}

enum Plan<V> {
    Hit(V),
    Join(SharedFetch<V>),
    Start {
        ticket: u64,
        result: SharedFetch<V>,
        done: oneshot::Sender<Result<V>>,
    },
}

/// Get-or-fetch cache with in-flight request deduplication.
///
/// Slots live in a sharded map; the pending/ready check for a key happens
/// under that key's shard lock only, and no lock is held across an await.
/// Each fetch runs on its own task, so callers that stop waiting do not
/// cancel it and its result is still stored.
pub struct RequestCache<K, V> {
    name: &'static str,
    slots: Arc<DashMap<K, Slot<V>>>,
    policy: CachePolicy,
    tickets: AtomicU64,
}

impl<K, V> RequestCache<K, V>
where
    K: Eq + Hash + Clone + Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str, policy: CachePolicy) -> Self {
        Self {
            name,
            slots: Arc::new(DashMap::new()),
            policy,
            tickets: AtomicU64::new(0),
        }
    }

    /// Ready, unexpired value for `key`, if any.
    pub fn get(&self, key: &K) -> Option<V> {
        let slot = self.slots.get(key)?;
        match slot.value() {
            Slot::Ready(entry) if !self.is_expired(entry) => Some(entry.value.clone()),
            _ => None,
        }
    }

    pub fn entry_state(&self, key: &K) -> Option<EntryState> {
        self.slots.get(key).map(|slot| match slot.value() {
            Slot::Pending { .. } => EntryState::Pending,
            Slot::Ready(_) => EntryState::Ready,
        })
    }

    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        self.get_or_fetch_with(key, false, fetch).await
    }

    /// Like [`get_or_fetch`](Self::get_or_fetch); `refresh` skips a ready
    /// entry but still joins a fetch that is already in flight.
    pub async fn get_or_fetch_with<F, Fut>(&self, key: K, refresh: bool, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        let plan = match self.slots.entry(key.clone()) {
            Entry::Occupied(mut occupied) => {
                let reusable = match occupied.get() {
                    Slot::Ready(entry) if !refresh && !self.is_expired(entry) => {
                        Some(Plan::Hit(entry.value.clone()))
                    }
                    Slot::Pending { result, .. } => Some(Plan::Join(result.clone())),
                    Slot::Ready(_) => None,
                };
                match reusable {
                    Some(plan) => plan,
                    None => {
                        let (slot, plan) = self.pending_slot();
                        occupied.insert(slot);
                        plan
                    }
                }
            }
            Entry::Vacant(vacant) => {
                let (slot, plan) = self.pending_slot();
                vacant.insert(slot);
                plan
            }
        };

        match plan {
            Plan::Hit(value) => {
                tracing::debug!("[{}] cache hit: {}", self.name, key);
                Ok(value)
            }
            Plan::Join(result) => {
                tracing::debug!("[{}] joining in-flight fetch: {}", self.name, key);
                result.await
            }
            Plan::Start { ticket, result, done } => {
                tracing::debug!("[{}] cache miss, fetching: {}", self.name, key);
                let slots = Arc::clone(&self.slots);
                let policy = self.policy;
                let name = self.name;
                // The pending slot is already in place, so a panic while
                // building the future must still settle it.
                let started = std::panic::catch_unwind(AssertUnwindSafe(fetch));

                tokio::spawn(async move {
                    let outcome = match started {
                        Ok(fetch) => AssertUnwindSafe(fetch)
                            .catch_unwind()
                            .await
                            .unwrap_or_else(|_| Err(AppError::service("record fetch panicked"))),
                        Err(_) => Err(AppError::service("record fetch panicked")),
                    };
                    settle(&slots, &key, ticket, &outcome, policy, name);
                    let _ = done.send(outcome);
                });

                result.await
            }
        }
    }

    /// Drops the ready entry for `key`. Returns whether one was removed.
    /// An in-flight fetch is left alone; its waiters still need the result.
    pub fn invalidate(&self, key: &K) -> bool {
        let removed = self
            .slots
            .remove_if(key, |_, slot| matches!(slot, Slot::Ready(_)))
            .is_some();
        if removed {
            tracing::debug!("[{}] invalidated: {}", self.name, key);
        }
        removed
    }

    /// Drops every ready entry whose key matches `predicate`.
    pub fn invalidate_matching(&self, predicate: impl Fn(&K) -> bool) -> usize {
        let before = self.slots.len();
        self.slots
            .retain(|key, slot| !(matches!(slot, Slot::Ready(_)) && predicate(key)));
        before.saturating_sub(self.slots.len())
    }

    /// Clears every entry and pending marker. Fetches still in flight
    /// resolve for their waiters but are not stored.
    pub fn invalidate_all(&self) {
        let dropped = self.slots.len();
        self.slots.clear();
        tracing::info!("[{}] cache cleared ({} entries)", self.name, dropped);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn pending_slot(&self) -> (Slot<V>, Plan<V>) {
        let ticket = self.tickets.fetch_add(1, Ordering::Relaxed);
        let (done, rx) = oneshot::channel::<Result<V>>();
        let result = rx
            .map(|received| {
                received.unwrap_or_else(|_| Err(AppError::service("record fetch was dropped")))
            })
            .boxed()
            .shared();

        let slot = Slot::Pending {
            ticket,
            result: result.clone(),
        };
        (slot, Plan::Start { ticket, result, done })
    }

    fn is_expired(&self, entry: &CacheEntry<V>) -> bool {
        self.policy
            .ttl
            .is_some_and(|ttl| entry.inserted_at.elapsed() >= ttl)
    }
}

fn settle<K, V>(
    slots: &DashMap<K, Slot<V>>,
    key: &K,
    ticket: u64,
    outcome: &Result<V>,
    policy: CachePolicy,
    name: &str,
) where
    K: Eq + Hash + Clone + Display,
    V: Clone,
{
    let owns = |slot: &Slot<V>| matches!(slot, Slot::Pending { ticket: t, .. } if *t == ticket);

    match outcome {
        Ok(value) => {
            let stored = match slots.get_mut(key) {
                Some(mut slot) if owns(slot.value()) => {
                    *slot = Slot::Ready(CacheEntry {
                        value: value.clone(),
                        inserted_at: Instant::now(),
                    });
                    true
                }
                _ => false,
            };
            if stored {
                if let Some(max) = policy.max_entries {
                    evict_oldest(slots, max, name);
                }
            } else {
                tracing::debug!("[{}] fetch for {} finished after invalidation, not stored", name, key);
            }
        }
        Err(err) => {
            slots.remove_if(key, |_, slot| owns(slot));
            tracing::warn!("[{}] fetch failed for {}: {}", name, key, err);
        }
    }
}

fn evict_oldest<K, V>(slots: &DashMap<K, Slot<V>>, max_entries: usize, name: &str)
where
    K: Eq + Hash + Clone + Display,
{
    let mut ready: Vec<(K, Instant)> = slots
        .iter()
        .filter_map(|slot| match slot.value() {
            Slot::Ready(entry) => Some((slot.key().clone(), entry.inserted_at)),
            Slot::Pending { .. } => None,
        })
        .collect();

    if ready.len() <= max_entries {
        return;
    }

    ready.sort_by_key(|(_, inserted_at)| *inserted_at);
    let excess = ready.len() - max_entries;
    for (key, inserted_at) in ready.into_iter().take(excess) {
        let evicted = slots.remove_if(&key, |_, slot| {
            matches!(slot, Slot::Ready(entry) if entry.inserted_at == inserted_at)
        });
        if evicted.is_some() {
            tracing::debug!("[{}] evicted oldest entry: {}", name, key);
        }
    }
}
