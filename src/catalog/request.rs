//! Building catalog search requests.
//!
//! The plugin cannot perform I/O itself; it describes a request and the host
//! executes it. [`CatalogRequest`] is that description: URL, headers, and a
//! context map the host hands back untouched with the response. The context
//! carries the key and ticket the request was issued for, which is how an
//! answer is matched to its key when it arrives.

use std::collections::BTreeMap;

use url::Url;

use super::trace::TraceContext;
use crate::domain::{CinefindError, Result};
use crate::session::FetchOrder;
use crate::Config;

pub(crate) const QUERY_FIELD: &str = "cinefind.query";
pub(crate) const PAGE_FIELD: &str = "cinefind.page";
pub(crate) const TICKET_FIELD: &str = "cinefind.ticket";

/// A GET request for the host to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub context: BTreeMap<String, String>,
}

/// Builds search requests against the catalog's `search/movie` endpoint.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    search_url: Url,
    api_token: Option<String>,
    language: String,
    include_adult: bool,
}

impl CatalogClient {
    /// Creates a client from plugin configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CinefindError::Catalog`] if `api_base_url` is not an absolute
    /// URL that can carry path segments.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut search_url = Url::parse(&config.api_base_url).map_err(|e| {
            CinefindError::Catalog(format!("invalid api_base_url {:?}: {e}", config.api_base_url))
        })?;

        {
            let mut segments = search_url.path_segments_mut().map_err(|()| {
                CinefindError::Catalog(format!(
                    "api_base_url {:?} cannot carry a path",
                    config.api_base_url
                ))
            })?;
            segments.pop_if_empty().extend(["search", "movie"]);
        }

        Ok(Self {
            search_url,
            api_token: config.api_token.clone(),
            language: config.language.clone(),
            include_adult: config.include_adult,
        })
    }

    /// Describes the request that fetches `order.key`.
    #[must_use]
    pub fn search_request(&self, order: &FetchOrder) -> CatalogRequest {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("query", order.key.query())
            .append_pair("include_adult", if self.include_adult { "true" } else { "false" })
            .append_pair("language", &self.language)
            .append_pair("page", &order.key.page().to_string());

        let mut headers = BTreeMap::new();
        headers.insert("accept".to_string(), "application/json".to_string());
        if let Some(token) = &self.api_token {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }

        let mut context = BTreeMap::new();
        context.insert(QUERY_FIELD.to_string(), order.key.query().to_string());
        context.insert(PAGE_FIELD.to_string(), order.key.page().to_string());
        context.insert(TICKET_FIELD.to_string(), order.ticket.get().to_string());
        if let Some(trace) = TraceContext::from_current() {
            trace.write_to(&mut context);
        }

        tracing::debug!(key = %order.key, ticket = %order.ticket, url = %url, "catalog request built");

        CatalogRequest {
            url: url.into(),
            headers,
            context,
        }
    }
}
