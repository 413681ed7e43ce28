//! Composable UI component renderers.
//!
//! Each component draws one part of the screen at a given row and returns
//! the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with the active query and page
//! - [`search`]: Search input box
//! - [`status`]: Loader and error line
//! - [`pagination`]: Page strip
//! - [`grid`]: Result grid (TITLE, YEAR, RATING)
//! - [`empty`]: Message shown instead of the grid
//! - [`footer`]: Keybinding hints
//! - [`detail`]: Overlay for the selected movie
//! - [`toast`]: Transient notifications
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Status]
//! [Pagination]
//! [Grid Headers]
//! [Grid Rows | Empty State]
//! [Border]
//! [Footer]
//! ```
//!
//! The detail overlay and toasts are drawn last, over this layout.

mod detail;
mod empty;
mod footer;
mod grid;
mod header;
mod pagination;
mod search;
mod status;
mod toast;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

pub use detail::render_detail;
pub use toast::render_toasts;

use empty::render_empty_state;
use footer::render_footer;
use grid::{render_grid_headers, render_grid_rows};
use header::render_header;
use pagination::render_pagination;
use search::render_search_bar;
use status::render_status;

/// Renders a horizontal border line and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders everything below the overlays.
///
/// Reserves 11 rows for chrome; the rest goes to the grid.
pub fn render_main_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = render_status(current_row, vm.status.as_ref(), theme, cols);
    current_row = render_pagination(current_row, vm.pagination.as_ref(), theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + 2, empty, theme, cols);
    } else if !vm.grid_items.is_empty() {
        current_row = render_grid_headers(current_row, theme, cols);
        render_grid_rows(current_row, &vm.grid_items, theme, cols);
    }

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
