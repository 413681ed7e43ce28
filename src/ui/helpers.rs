//! Shared rendering utilities and helpers.
//!
//! Low-level pieces used by several components: cursor positioning, match
//! highlighting and plain-text layout. Widths are counted in characters, not
//! bytes, so titles like "Amélie" line up.
//!
//! # Example
//!
//! ```rust
//! use cinefind::ui::helpers::{render_highlighted_text, wrap_text};
//! use cinefind::ui::Theme;
//!
//! let theme = Theme::default();
//! render_highlighted_text("Alien", &[(0, 2)], &theme, false);
//!
//! assert_eq!(wrap_text("a quiet place", 7), vec!["a quiet", "place"]);
//! ```

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_width(text: &str) -> usize {
    text.chars().count()
}

/// Left padding that centers `text_width` columns inside `cols`.
#[must_use]
pub const fn center_padding(cols: usize, text_width: usize) -> usize {
    cols.saturating_sub(text_width) / 2
}

/// Prints `text` centered on `row`, padded to the full width.
pub fn print_centered(row: usize, text: &str, cols: usize) {
    let width = char_width(text).min(cols);
    let padding = center_padding(cols, width);
    let shown: String = text.chars().take(cols).collect();

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    print!("{shown}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + width)));
}

/// Renders text with highlighted character ranges for fuzzy matches.
///
/// Ranges are `(start, end)` character indices with exclusive ends. The
/// selected row keeps its selection colors and is printed unhighlighted.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Greedy word wrap to lines of at most `width` characters.
///
/// Words longer than `width` are split. Runs of whitespace collapse to one
/// space; an empty or blank input gives no lines.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if line_width > 0 {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        if word.is_empty() {
            continue;
        }

        let needed = if line_width == 0 { word.len() } else { line_width + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if line_width > 0 {
            line.push(' ');
            line_width += 1;
        }
        line_width += word.len();
        line.extend(word);
    }

    if line_width > 0 {
        lines.push(line);
    }
    lines
}
