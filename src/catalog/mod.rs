//! Catalog lookup collaborator.
//!
//! Bridges the session controller's fetch orders and the host's web-request
//! API. Nothing in here decides *when* to fetch or *whether* an answer is
//! still wanted; that belongs to [`crate::session`].
//!
//! ```text
//! FetchOrder ──search_request──▶ CatalogRequest ──host web_request──▶ network
//!                                                                        │
//! FetchResolution ◀──from_web_result── (status, body, context) ◀─────────┘
//! ```
//!
//! # Modules
//!
//! - [`request`]: [`CatalogClient`] and the [`CatalogRequest`] description
//! - [`response`]: [`CatalogResponse`] decoding and error mapping
//! - [`trace`]: trace-context propagation through the request context map

pub mod request;
pub mod response;
pub mod trace;

pub use request::{CatalogClient, CatalogRequest};
pub use response::{CatalogResponse, MAX_CATALOG_PAGE};
pub use trace::TraceContext;
