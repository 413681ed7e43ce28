//! Search bar component renderer.
//!
//! A three-line framed box holding the query. While focused the frame uses
//! the accent color and a block cursor trails the text; otherwise it shows
//! the active query, or a dimmed placeholder before the first search.

use crate::ui::helpers::{char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

const PLACEHOLDER: &str = "Search movies";

/// Renders the search input box at `row` and returns the row after it.
///
/// ```text
/// [margin] ┌─────────────────┐ [margin]
/// [margin] │ Search: alien█  │ [margin]
/// [margin] └─────────────────┘ [margin]
/// ```
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let (text, placeholder) = search_text(search, inner_width);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    if placeholder {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{text}");
    print!("{}", " ".repeat(inner_width.saturating_sub(char_width(&text))));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Text inside the frame and whether it is the placeholder.
///
/// A long query keeps its tail visible, since that is where typing happens.
fn search_text(search: &SearchBarInfo, inner_width: usize) -> (String, bool) {
    if !search.is_focused && search.query.is_empty() {
        return (format!(" {PLACEHOLDER}"), true);
    }

    let prefix = " Search: ";
    let cursor = if search.is_focused { "█" } else { "" };
    let room = inner_width.saturating_sub(char_width(prefix) + char_width(cursor));

    let query_len = char_width(&search.query);
    let visible: String = search.query.chars().skip(query_len.saturating_sub(room)).collect();

    (format!("{prefix}{visible}{cursor}"), false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(query: &str, is_focused: bool) -> SearchBarInfo {
        SearchBarInfo {
            query: query.to_string(),
            is_focused,
        }
    }

    #[test]
    fn unfocused_blank_bar_shows_placeholder() {
        assert_eq!(search_text(&bar("", false), 40), (" Search movies".to_string(), true));
    }

    #[test]
    fn focused_bar_shows_cursor() {
        assert_eq!(search_text(&bar("alien", true), 40).0, " Search: alien█");
        assert_eq!(search_text(&bar("alien", false), 40).0, " Search: alien");
    }

    #[test]
    fn long_query_keeps_its_tail() {
        let (text, _) = search_text(&bar("the lord of the rings", true), 16);
        assert_eq!(text, " Search:  rings█");
    }
}
