//! The search session controller.
//!
//! [`SearchSession`] is the single source of truth for the query, the page,
//! the selected movie and the result set derived from (query, page). Events
//! never fetch directly: they change the key, and the controller asks the
//! [`ResultCache`] for a [`FetchOrder`] whenever the new key has no entry yet.
//! The caller turns that order into a catalog request and later feeds the
//! answer back through [`SearchSession::resolve`].
//!
//! # Visibility rules
//!
//! - Empty query: [`ResultView::Disabled`], nothing fetched.
//! - Current key pending: the last displayed settled page stays visible
//!   ([`ResultView::Pending`] with `retained`), so paging never flashes empty.
//! - Current key settled or failed: the view snaps to that outcome.
//! - Answers for any other key never touch the view.

use super::empty_notice::EmptyResultNotice;
use super::key::QueryKey;
use super::resource::{
    CacheEntry, FetchOrder, FetchResolution, ResultCache, ResultView, StoreOutcome,
};
use crate::domain::Movie;
use crate::notify::Notify;

#[derive(Debug, Clone)]
pub struct SearchSession {
    query: String,
    page: u32,
    selection: Option<Movie>,
    cache: ResultCache,
    /// Key whose settled page is currently on screen, if any.
    displayed: Option<QueryKey>,
    notice: EmptyResultNotice,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
            selection: None,
            cache: ResultCache::new(),
            displayed: None,
            notice: EmptyResultNotice::default(),
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn selection(&self) -> Option<&Movie> {
        self.selection.as_ref()
    }

    /// The key the result set is derived from, or `None` for an empty query.
    #[must_use]
    pub fn current_key(&self) -> Option<QueryKey> {
        if self.query.is_empty() {
            None
        } else {
            Some(QueryKey::new(self.query.clone(), self.page))
        }
    }

    /// Replaces the query and resets the page to 1.
    ///
    /// Always counts as a fresh activation, so resubmitting a query whose
    /// first page is cached empty notifies again. Resubmitting over a failed
    /// first page retries it.
    pub fn submit_search(
        &mut self,
        text: impl Into<String>,
        notifier: &mut impl Notify,
    ) -> Option<FetchOrder> {
        let text = text.into();
        let _span = tracing::debug_span!("submit_search", query = %text, previous_page = self.page).entered();

        let previous = self.current_key();
        self.query = text;
        self.page = 1;

        if let Some(key) = self.current_key() {
            if previous.as_ref() == Some(&key) {
                self.cache.evict_failed(&key);
            }
        }

        self.notice.arm();
        self.activate(previous, notifier)
    }

    /// Moves to page `n`, leaving the query unchanged.
    ///
    /// `n` is clamped to `[1, total_pages]` of the visible result set when the
    /// total is known. Going to the page that is already current is a no-op.
    pub fn go_to_page(&mut self, n: u32, notifier: &mut impl Notify) -> Option<FetchOrder> {
        let target = self.clamp_page(n);
        let _span = tracing::debug_span!("go_to_page", requested = n, target, current = self.page).entered();

        if target == self.page {
            tracing::trace!("page unchanged");
            return None;
        }

        let previous = self.current_key();
        self.page = target;
        self.notice.arm();
        self.activate(previous, notifier)
    }

    pub fn select(&mut self, movie: Movie) {
        tracing::debug!(movie_id = movie.id, title = %movie.title, "movie selected");
        self.selection = Some(movie);
    }

    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            tracing::debug!("selection cleared");
        }
    }

    /// The result set for the current key, following the visibility rules.
    #[must_use]
    pub fn current_result_set(&self) -> ResultView<'_> {
        let Some(key) = self.current_key() else {
            return ResultView::Disabled;
        };

        match self.cache.get(&key) {
            Some(CacheEntry::Settled(page)) => ResultView::Settled(page),
            Some(CacheEntry::Failed(error)) => ResultView::Failed(error),
            Some(CacheEntry::Pending(_)) | None => ResultView::Pending {
                retained: self
                    .displayed
                    .as_ref()
                    .filter(|displayed| **displayed != key)
                    .and_then(|displayed| self.cache.settled(displayed)),
            },
        }
    }

    /// Applies a fetch outcome. Returns whether the visible result set changed.
    ///
    /// Only outcomes for the key that is current right now reach the view;
    /// anything else is cached (successes) or dropped (failures, unknown
    /// tickets).
    pub fn resolve(&mut self, resolution: FetchResolution, notifier: &mut impl Notify) -> bool {
        let is_current = self.current_key().as_ref() == Some(&resolution.key);
        let _span = tracing::debug_span!(
            "resolve",
            key = %resolution.key,
            ticket = %resolution.ticket,
            is_current
        )
        .entered();

        let outcome = self.cache.store(resolution, is_current);
        self.prune_cache();
        if !is_current {
            tracing::debug!(?outcome, "stale resolution suppressed");
            return false;
        }
        if outcome == StoreOutcome::UnknownTicket {
            return false;
        }

        self.refresh_display();
        self.observe_outcome(notifier);
        true
    }

    /// Makes the current key live after a query or page change.
    fn activate(&mut self, previous: Option<QueryKey>, notifier: &mut impl Notify) -> Option<FetchOrder> {
        let current = self.current_key();

        if let Some(previous) = previous.filter(|previous| Some(previous) != current.as_ref()) {
            self.cache.evict_failed(&previous);
        }

        let order = current.as_ref().and_then(|key| self.cache.ensure(key));
        self.refresh_display();
        self.prune_cache();
        self.observe_outcome(notifier);
        order
    }

    /// Bounds the cache, keeping the current key and the page on screen.
    fn prune_cache(&mut self) {
        let current = self.current_key();
        let protected: Vec<&QueryKey> = current.iter().chain(self.displayed.iter()).collect();
        self.cache.prune(&protected);
    }

    fn refresh_display(&mut self) {
        let Some(key) = self.current_key() else {
            self.displayed = None;
            return;
        };

        match self.cache.get(&key) {
            Some(CacheEntry::Settled(_)) => self.displayed = Some(key),
            Some(CacheEntry::Failed(_)) => self.displayed = None,
            Some(CacheEntry::Pending(_)) | None => {}
        }
    }

    fn observe_outcome(&mut self, notifier: &mut impl Notify) {
        let settled_empty = matches!(self.current_result_set(), ResultView::Settled(page) if page.is_empty());
        self.notice.observe(settled_empty, notifier);
    }

    fn clamp_page(&self, n: u32) -> u32 {
        let n = n.max(1);
        match self.current_result_set().total_pages() {
            0 => n,
            total => n.min(total),
        }
    }
}
