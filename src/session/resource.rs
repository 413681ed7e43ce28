//! Keyed result cache and the view derived from it.
//!
//! [`ResultCache`] is a memoized async lookup: one entry per [`QueryKey`],
//! created `Pending` when a fetch is issued and moved to `Settled` or `Failed`
//! when the matching ticket resolves. A key that already has an entry is never
//! fetched again, which gives at most one in-flight fetch per key.
//!
//! Settled entries are kept in recency order and capped at
//! [`MAX_SETTLED_ENTRIES`]; [`ResultCache::prune`] drops the least recently
//! used ones that the caller does not protect. Pending entries are never
//! pruned, so every issued ticket can still resolve.
//!
//! [`ResultView`] is what the presentation layer reads for the current key.

use std::collections::{HashMap, VecDeque};

use super::key::{FetchTicket, QueryKey};
use crate::domain::{FetchError, Movie, MoviePage};

/// Request to fetch one key, handed to the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOrder {
    pub key: QueryKey,
    pub ticket: FetchTicket,
}

/// Outcome of a fetch order, handed back by the catalog collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResolution {
    pub key: QueryKey,
    pub ticket: FetchTicket,
    pub outcome: Result<MoviePage, FetchError>,
}

/// Fetch lifecycle of a single key.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    Pending(FetchTicket),
    Settled(MoviePage),
    Failed(FetchError),
}

/// What [`ResultCache::store`] did with a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Settled,
    Failed,
    /// A failure for a key that is no longer current; dropped.
    DiscardedFailure,
    /// The key has no pending entry for this ticket.
    UnknownTicket,
}

/// Settled pages kept before the least recently used are pruned.
pub const MAX_SETTLED_ENTRIES: usize = 64;

#[derive(Debug, Clone)]
pub struct ResultCache {
    entries: HashMap<QueryKey, CacheEntry>,
    /// Settled keys, least recently used first.
    recency: VecDeque<QueryKey>,
    capacity: usize,
    next_ticket: u64,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MAX_SETTLED_ENTRIES)
    }

    /// A cache keeping at most `capacity` unprotected settled pages.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            recency: VecDeque::new(),
            capacity,
            next_ticket: 0,
        }
    }

    #[must_use]
    pub fn get(&self, key: &QueryKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn settled(&self, key: &QueryKey) -> Option<&MoviePage> {
        match self.entries.get(key) {
            Some(CacheEntry::Settled(page)) => Some(page),
            _ => None,
        }
    }

    /// Makes sure `key` has an entry, issuing a fetch order if it had none.
    pub fn ensure(&mut self, key: &QueryKey) -> Option<FetchOrder> {
        if self.entries.contains_key(key) {
            tracing::trace!(key = %key, "cache entry exists, no fetch issued");
            self.touch(key);
            return None;
        }

        self.next_ticket += 1;
        let ticket = FetchTicket::new(self.next_ticket);
        self.entries.insert(key.clone(), CacheEntry::Pending(ticket));
        tracing::debug!(key = %key, ticket = %ticket, "fetch issued");

        Some(FetchOrder {
            key: key.clone(),
            ticket,
        })
    }

    /// Removes the entry for `key` if it is `Failed`.
    pub fn evict_failed(&mut self, key: &QueryKey) -> bool {
        if matches!(self.entries.get(key), Some(CacheEntry::Failed(_))) {
            self.entries.remove(key);
            tracing::debug!(key = %key, "failed entry evicted");
            true
        } else {
            false
        }
    }

    /// Records a resolution against its pending entry.
    ///
    /// Successes are stored whether or not the key is current, so revisiting
    /// the key later is served from cache. Failures are only kept for the
    /// current key; a stale failure removes the entry instead.
    pub fn store(&mut self, resolution: FetchResolution, is_current: bool) -> StoreOutcome {
        let FetchResolution {
            key,
            ticket,
            outcome,
        } = resolution;

        match self.entries.get(&key) {
            Some(CacheEntry::Pending(pending)) if *pending == ticket => {}
            _ => {
                tracing::debug!(key = %key, ticket = %ticket, "resolution for unknown ticket ignored");
                return StoreOutcome::UnknownTicket;
            }
        }

        match outcome {
            Ok(page) => {
                tracing::debug!(
                    key = %key,
                    ticket = %ticket,
                    movies = page.movies.len(),
                    total_pages = page.total_pages,
                    is_current,
                    "fetch settled"
                );
                self.recency.push_back(key.clone());
                self.entries.insert(key, CacheEntry::Settled(page));
                StoreOutcome::Settled
            }
            Err(error) if is_current => {
                tracing::debug!(key = %key, ticket = %ticket, error = %error, "fetch failed");
                self.entries.insert(key, CacheEntry::Failed(error));
                StoreOutcome::Failed
            }
            Err(error) => {
                tracing::debug!(key = %key, ticket = %ticket, error = %error, "stale fetch failure discarded");
                self.entries.remove(&key);
                StoreOutcome::DiscardedFailure
            }
        }
    }

    /// Drops least recently used settled entries until at most `capacity`
    /// remain, skipping any key in `protected`. Returns how many were dropped.
    pub fn prune(&mut self, protected: &[&QueryKey]) -> usize {
        let mut evicted = 0;
        let mut index = 0;

        while self.recency.len() > self.capacity && index < self.recency.len() {
            if protected.contains(&&self.recency[index]) {
                index += 1;
                continue;
            }
            if let Some(key) = self.recency.remove(index) {
                self.entries.remove(&key);
                tracing::trace!(key = %key, "settled entry pruned");
                evicted += 1;
            }
        }

        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.entries.len(), "result cache pruned");
        }
        evicted
    }

    /// Marks a settled key as most recently used.
    fn touch(&mut self, key: &QueryKey) {
        if let Some(position) = self.recency.iter().position(|settled| settled == key) {
            if let Some(settled) = self.recency.remove(position) {
                self.recency.push_back(settled);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The result set visible for the current key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultView<'a> {
    /// The query is empty; nothing is fetched or shown.
    Disabled,
    /// The current key is being fetched. `retained` is the last displayed
    /// settled page, kept on screen until this fetch finishes.
    Pending { retained: Option<&'a MoviePage> },
    Settled(&'a MoviePage),
    Failed(&'a FetchError),
}

impl<'a> ResultView<'a> {
    /// Movies to display: the settled page, the retained page while loading,
    /// or nothing.
    #[must_use]
    pub fn movies(&self) -> &'a [Movie] {
        match self.page() {
            Some(page) => &page.movies,
            None => &[],
        }
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.page().map_or(0, |page| page.total_pages)
    }

    fn page(&self) -> Option<&'a MoviePage> {
        match *self {
            Self::Settled(page) => Some(page),
            Self::Pending { retained } => retained,
            Self::Disabled | Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Settled(_))
    }

    /// True while loading with a previous key's page still on screen.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Pending { retained: Some(_) })
    }

    #[must_use]
    pub const fn error(&self) -> Option<&'a FetchError> {
        match *self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::movie::sample_movie;

    fn page_of(count: u64, total_pages: u32) -> MoviePage {
        MoviePage {
            movies: (1..=count).map(|id| sample_movie(id, "m")).collect(),
            total_pages,
        }
    }

    #[test]
    fn ensure_issues_one_fetch_per_key() {
        let mut cache = ResultCache::new();
        let key = QueryKey::new("batman", 1);

        let order = cache.ensure(&key).unwrap();
        assert_eq!(order.key, key);
        assert!(cache.ensure(&key).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn tickets_increase_across_keys() {
        let mut cache = ResultCache::new();
        let first = cache.ensure(&QueryKey::new("a", 1)).unwrap();
        let second = cache.ensure(&QueryKey::new("a", 2)).unwrap();
        assert!(second.ticket > first.ticket);
    }

    #[test]
    fn stale_success_is_cached() {
        let mut cache = ResultCache::new();
        let key = QueryKey::new("batman", 2);
        let order = cache.ensure(&key).unwrap();

        let outcome = cache.store(
            FetchResolution {
                key: key.clone(),
                ticket: order.ticket,
                outcome: Ok(page_of(4, 3)),
            },
            false,
        );

        assert_eq!(outcome, StoreOutcome::Settled);
        assert_eq!(cache.settled(&key).map(|p| p.movies.len()), Some(4));
    }

    #[test]
    fn stale_failure_is_discarded() {
        let mut cache = ResultCache::new();
        let key = QueryKey::new("batman", 2);
        let order = cache.ensure(&key).unwrap();

        let outcome = cache.store(
            FetchResolution {
                key: key.clone(),
                ticket: order.ticket,
                outcome: Err(FetchError::Network("offline".to_string())),
            },
            false,
        );

        assert_eq!(outcome, StoreOutcome::DiscardedFailure);
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn mismatched_ticket_is_ignored() {
        let mut cache = ResultCache::new();
        let key = QueryKey::new("batman", 1);
        let order = cache.ensure(&key).unwrap();

        let outcome = cache.store(
            FetchResolution {
                key: key.clone(),
                ticket: FetchTicket::new(order.ticket.get() + 100),
                outcome: Ok(page_of(1, 1)),
            },
            true,
        );

        assert_eq!(outcome, StoreOutcome::UnknownTicket);
        assert_eq!(cache.get(&key), Some(&CacheEntry::Pending(order.ticket)));
    }

    #[test]
    fn evict_failed_leaves_settled_entries_alone() {
        let mut cache = ResultCache::new();
        let key = QueryKey::new("batman", 1);
        let order = cache.ensure(&key).unwrap();
        cache.store(
            FetchResolution {
                key: key.clone(),
                ticket: order.ticket,
                outcome: Ok(page_of(2, 1)),
            },
            true,
        );

        assert!(!cache.evict_failed(&key));
        assert!(cache.settled(&key).is_some());
    }

    fn settle(cache: &mut ResultCache, key: &QueryKey) {
        let order = cache.ensure(key).unwrap();
        cache.store(
            FetchResolution {
                key: key.clone(),
                ticket: order.ticket,
                outcome: Ok(page_of(1, 1)),
            },
            false,
        );
    }

    #[test]
    fn prune_drops_least_recently_used_settled_entries() {
        let mut cache = ResultCache::with_capacity(2);
        let keys: Vec<_> = ["a", "b", "c"].iter().map(|q| QueryKey::new(*q, 1)).collect();
        for key in &keys {
            settle(&mut cache, key);
        }

        // Revisiting "a" makes "b" the oldest.
        assert!(cache.ensure(&keys[0]).is_none());
        assert_eq!(cache.prune(&[]), 1);
        assert!(cache.settled(&keys[0]).is_some());
        assert!(cache.get(&keys[1]).is_none());
        assert!(cache.settled(&keys[2]).is_some());
    }

    #[test]
    fn prune_keeps_protected_and_pending_entries() {
        let mut cache = ResultCache::with_capacity(1);
        let old = QueryKey::new("old", 1);
        let shown = QueryKey::new("shown", 1);
        let newer = QueryKey::new("newer", 1);
        let loading = QueryKey::new("loading", 1);
        settle(&mut cache, &old);
        settle(&mut cache, &shown);
        settle(&mut cache, &newer);
        cache.ensure(&loading);

        assert_eq!(cache.prune(&[&old, &loading]), 2);
        assert!(cache.settled(&old).is_some());
        assert!(cache.get(&shown).is_none());
        assert!(cache.get(&newer).is_none());
        assert!(matches!(cache.get(&loading), Some(CacheEntry::Pending(_))));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn view_flags_follow_variant() {
        let page = page_of(5, 3);
        let error = FetchError::Network("offline".to_string());

        assert!(ResultView::Disabled.is_disabled());
        assert!(ResultView::Disabled.movies().is_empty());

        let loading = ResultView::Pending {
            retained: Some(&page),
        };
        assert!(loading.is_loading());
        assert!(loading.is_placeholder());
        assert!(!loading.is_success());
        assert_eq!(loading.movies().len(), 5);
        assert_eq!(loading.total_pages(), 3);

        let failed = ResultView::Failed(&error);
        assert!(failed.is_error());
        assert!(!failed.is_loading());
        assert!(failed.movies().is_empty());
        assert_eq!(failed.error(), Some(&error));
    }
}
