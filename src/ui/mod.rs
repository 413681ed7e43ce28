//! User interface rendering layer with component-based architecture.
//!
//! Transforms view models into ANSI-styled output through composable
//! rendering components.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, wrapping)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation
//!
//! # Example
//!
//! ```rust
//! use cinefind::app::AppState;
//! use cinefind::ui::{render, Theme};
//! use cinefind::Config;
//!
//! let state = AppState::new(&Config::default(), Theme::default());
//! render(&state, 24, 80);
//! ```

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DetailInfo, EmptyState, FooterInfo, GridItem, HeaderInfo, PageItem, PaginationInfo,
    SearchBarInfo, StatusInfo, UIViewModel,
};
