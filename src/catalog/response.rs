//! Decoding host web-request results into fetch resolutions.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::request::{PAGE_FIELD, QUERY_FIELD, TICKET_FIELD};
use super::trace::TraceContext;
use crate::domain::{CinefindError, FetchError, Movie, MoviePage, Result};
use crate::session::{FetchResolution, FetchTicket, QueryKey};

/// Highest page the catalog will serve for a search.
pub const MAX_CATALOG_PAGE: u32 = 500;

#[derive(Debug, Deserialize)]
struct SearchPayload {
    results: Vec<Movie>,
    #[serde(default)]
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    status_message: String,
}

/// A catalog answer matched back to the key and ticket that requested it.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogResponse {
    pub resolution: FetchResolution,
    /// Trace of the span that issued the request, when tracing was active.
    pub trace: Option<TraceContext>,
}

impl CatalogResponse {
    /// Decodes a host web-request result.
    ///
    /// The HTTP outcome never makes this fail: transport and HTTP problems
    /// become the `Err` side of the resolution's outcome.
    ///
    /// # Errors
    ///
    /// Returns [`CinefindError::Protocol`] if `context` does not identify the
    /// key and ticket of the request.
    pub fn from_web_result(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Result<Self> {
        let query = context
            .get(QUERY_FIELD)
            .ok_or_else(|| CinefindError::Protocol(format!("missing {QUERY_FIELD} in response context")))?;
        let page = parse_field::<u32>(context, PAGE_FIELD)?;
        let ticket = parse_field::<u64>(context, TICKET_FIELD)?;

        let key = QueryKey::new(query.clone(), page);
        let outcome = decode_outcome(status, body);

        tracing::debug!(
            key = %key,
            ticket,
            status,
            body_len = body.len(),
            ok = outcome.is_ok(),
            "catalog response decoded"
        );

        Ok(Self {
            resolution: FetchResolution {
                key,
                ticket: FetchTicket::new(ticket),
                outcome,
            },
            trace: TraceContext::read_from(context),
        })
    }
}

fn parse_field<T: std::str::FromStr>(context: &BTreeMap<String, String>, field: &str) -> Result<T> {
    context
        .get(field)
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| CinefindError::Protocol(format!("missing or invalid {field} in response context")))
}

fn decode_outcome(status: u16, body: &[u8]) -> std::result::Result<MoviePage, FetchError> {
    match status {
        0 => Err(FetchError::Network(body_text(body))),
        200..=299 => serde_json::from_slice::<SearchPayload>(body)
            .map(|payload| MoviePage {
                movies: payload.results,
                total_pages: payload.total_pages.min(MAX_CATALOG_PAGE),
            })
            .map_err(|e| FetchError::Decode(e.to_string())),
        _ => {
            let message = serde_json::from_slice::<ErrorPayload>(body)
                .map_or_else(|_| body_text(body), |payload| payload.status_message);
            Err(FetchError::Http { status, message })
        }
    }
}

fn body_text(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        "no response body".to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(query: &str, page: &str, ticket: &str) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(QUERY_FIELD.to_string(), query.to_string());
        context.insert(PAGE_FIELD.to_string(), page.to_string());
        context.insert(TICKET_FIELD.to_string(), ticket.to_string());
        context
    }

    const SEARCH_BODY: &str = r#"{
        "page": 1,
        "results": [
            {
                "adult": false,
                "backdrop_path": "/bd.jpg",
                "id": 268,
                "title": "Batman",
                "overview": "Batman must face his most ruthless nemesis.",
                "poster_path": "/p.jpg",
                "release_date": "1989-06-21",
                "vote_average": 7.2,
                "genre_ids": [14, 28]
            },
            {
                "id": 364,
                "title": "Batman Returns",
                "overview": "",
                "poster_path": null,
                "backdrop_path": null,
                "release_date": "",
                "vote_average": 6.9
            }
        ],
        "total_pages": 3,
        "total_results": 58
    }"#;

    #[test]
    fn decodes_a_successful_search_page() {
        let response =
            CatalogResponse::from_web_result(200, SEARCH_BODY.as_bytes(), &context("batman", "1", "4"))
                .unwrap();

        assert_eq!(response.resolution.key, QueryKey::new("batman", 1));
        assert_eq!(response.resolution.ticket, FetchTicket::new(4));
        assert!(response.trace.is_none());

        let page = response.resolution.outcome.unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.movies.len(), 2);
        assert_eq!(page.movies[0].title, "Batman");
        assert_eq!(page.movies[1].poster_path, None);
    }

    #[test]
    fn empty_result_pages_decode_as_empty() {
        let body = br#"{"page":1,"results":[],"total_pages":0,"total_results":0}"#;
        let response =
            CatalogResponse::from_web_result(200, body, &context("zzzzznotfound", "1", "1")).unwrap();

        let page = response.resolution.outcome.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn total_pages_are_capped_at_the_catalog_ceiling() {
        let body = br#"{"results":[],"total_pages":2048}"#;
        let response = CatalogResponse::from_web_result(200, body, &context("a", "1", "1")).unwrap();
        assert_eq!(response.resolution.outcome.unwrap().total_pages, MAX_CATALOG_PAGE);
    }

    #[test]
    fn http_errors_use_the_catalog_status_message() {
        let body = br#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;
        let response = CatalogResponse::from_web_result(401, body, &context("batman", "1", "2")).unwrap();

        assert_eq!(
            response.resolution.outcome,
            Err(FetchError::Http {
                status: 401,
                message: "Invalid API key: You must be granted a valid key.".to_string(),
            })
        );
    }

    #[test]
    fn non_json_error_bodies_are_kept_as_text() {
        let response =
            CatalogResponse::from_web_result(502, b" Bad Gateway \n", &context("batman", "1", "2")).unwrap();
        assert_eq!(
            response.resolution.outcome,
            Err(FetchError::Http {
                status: 502,
                message: "Bad Gateway".to_string(),
            })
        );
    }

    #[test]
    fn status_zero_is_a_network_error() {
        let response = CatalogResponse::from_web_result(0, b"", &context("batman", "1", "2")).unwrap();
        assert_eq!(
            response.resolution.outcome,
            Err(FetchError::Network("no response body".to_string()))
        );
    }

    #[test]
    fn garbage_success_bodies_are_decode_errors() {
        let response =
            CatalogResponse::from_web_result(200, b"<html>", &context("batman", "1", "2")).unwrap();
        assert!(matches!(response.resolution.outcome, Err(FetchError::Decode(_))));
    }

    #[test]
    fn missing_context_is_a_protocol_error() {
        let mut incomplete = context("batman", "1", "2");
        incomplete.remove(TICKET_FIELD);
        assert!(matches!(
            CatalogResponse::from_web_result(200, SEARCH_BODY.as_bytes(), &incomplete),
            Err(CinefindError::Protocol(_))
        ));

        assert!(matches!(
            CatalogResponse::from_web_result(200, SEARCH_BODY.as_bytes(), &context("batman", "two", "2")),
            Err(CinefindError::Protocol(_))
        ));
    }
}
