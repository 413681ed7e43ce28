//! Domain layer for the cinefind plugin.
//!
//! Core types independent of Zellij APIs and of the catalog wire format.
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie summaries and result pages

pub mod error;
pub mod movie;

pub use error::{CinefindError, FetchError, Result};
pub use movie::{Movie, MoviePage};
