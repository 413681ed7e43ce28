//! Result grid component renderer.
//!
//! Renders the visible movies as a three-column table (TITLE, YEAR, RATING)
//! with selection and fuzzy match highlighting.

use crate::ui::helpers::{self, char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::GridItem;

const YEAR_COLUMN: usize = 6;

/// Width of the TITLE column, including the gap before YEAR.
#[must_use]
pub fn title_column(cols: usize) -> usize {
    cols.saturating_sub(18).clamp(10, 50)
}

/// Renders the column headers and returns the next free row.
pub fn render_grid_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let title_width = title_column(cols);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("  {:<title_width$}{:<YEAR_COLUMN$}{}", "TITLE", "YEAR", "RATING");
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all grid rows starting at `row` and returns the next free row.
pub fn render_grid_rows(row: usize, items: &[GridItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_grid_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one movie row.
///
/// ```text
/// ▸ TITLE (padded)                               YEAR  RATING [padding]
/// ```
///
/// Selection colors span the whole line; match highlights are skipped on the
/// selected row.
fn render_grid_row(row: usize, item: &GridItem, theme: &Theme, cols: usize) -> usize {
    let title_width = title_column(cols);
    let base_fg = if item.is_selected {
        &theme.colors.selection_fg
    } else {
        &theme.colors.text_normal
    };

    position_cursor(row, 1);
    if item.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    }
    print!("{}", Theme::fg(base_fg));
    print!("{}", if item.is_selected { "▸ " } else { "  " });

    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(title_width.saturating_sub(char_width(&item.title))));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{:<YEAR_COLUMN$}", item.year);

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.rating_fg));
    }
    print!("{}", item.rating);

    let line_len = 2 + title_width + YEAR_COLUMN + char_width(&item.rating);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_column_fits_terminal() {
        assert_eq!(title_column(120), 50);
        assert_eq!(title_column(40), 22);
        assert_eq!(title_column(12), 10);
    }
}
