//! Empty state component renderer.
//!
//! Shown in the grid area before the first search and when a search
//! settles with no movies.

use crate::ui::helpers::print_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered message with a dimmed subtitle starting at `row`.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print_centered(row, &empty.message, cols);
    print!("{}", Theme::reset());

    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered(row + 1, &empty.subtitle, cols);
    print!("{}", Theme::reset());
}
