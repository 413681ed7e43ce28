//! Input mode state type for the application.
//!
//! The mode decides how keystrokes are interpreted and which footer hints
//! are shown:
//! - **Browsing**: navigate results and pages
//! - **Typing**: edit the search query
//! - **Inspecting**: the detail overlay is open
//!
//! # Example
//!
//! ```rust
//! use cinefind::app::InputMode;
//!
//! let mode = InputMode::default();
//! assert_eq!(mode, InputMode::Browsing);
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default mode.
    ///
    /// Available keybindings: j/k (move), h/l (page), g/G (first/last page),
    /// enter (details), / (search), q (quit).
    #[default]
    Browsing,

    /// The search bar has focus and characters edit the query.
    ///
    /// Enter submits, Esc abandons the edit.
    Typing,

    /// The detail overlay for the selected movie is open.
    ///
    /// Esc, q or Enter close it.
    Inspecting,
}

impl InputMode {
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Typing)
    }
}
