//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the session,
//! catalog and UI layers.
//!
//! # Architecture
//!
//! ```text
//! Host Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Catalog Responses ───────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode type
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use cinefind::app::{handle_event, AppState, Event};
//! use cinefind::{Config, Theme};
//!
//! let mut state = AppState::new(&Config::default(), Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::CursorDown)?;
//! assert!(actions.is_empty());
//! # let _ = should_render;
//! # Ok::<(), cinefind::CinefindError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::{AppState, SearchInput};
