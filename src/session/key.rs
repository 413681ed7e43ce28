//! Identity of a fetchable result set and of a single fetch cycle.

use std::fmt;

/// The (query, page) pair a result set is keyed on.
///
/// Pages are 1-based; construction clamps `0` up to `1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    query: String,
    page: u32,
}

impl QueryKey {
    #[must_use]
    pub fn new(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page: page.max(1),
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
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.query, self.page)
    }
}

/// Identifier of one fetch cycle, unique for the lifetime of a session.
///
/// A response is only applied when its ticket matches the ticket the cache
/// recorded for that key, so a late answer from an abandoned cycle can never
/// overwrite a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
