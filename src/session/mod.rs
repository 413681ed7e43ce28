//! Query-driven view state: the search session controller and its resource
//! policy.
//!
//! # Modules
//!
//! - [`controller`]: [`SearchSession`], owner of query, page, selection and
//!   the visible result set
//! - [`resource`]: keyed result cache, fetch orders/resolutions, [`ResultView`]
//! - [`empty_notice`]: edge-triggered "no results" notification
//! - [`key`]: [`QueryKey`] and [`FetchTicket`]
//!
//! # Example
//!
//! ```rust
//! use cinefind::notify::ToastHost;
//! use cinefind::session::SearchSession;
//!
//! let mut toasts = ToastHost::default();
//! let mut session = SearchSession::new();
//!
//! let order = session.submit_search("batman", &mut toasts);
//! assert!(order.is_some());
//! assert!(session.current_result_set().is_loading());
//! ```

pub mod controller;
pub mod empty_notice;
pub mod key;
pub mod resource;

pub use controller::SearchSession;
pub use empty_notice::EMPTY_RESULT_MESSAGE;
pub use key::{FetchTicket, QueryKey};
pub use resource::{FetchOrder, FetchResolution, ResultView};
