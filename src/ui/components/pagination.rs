//! Page strip renderer.
//!
//! ```text
//!   ‹ prev  1 2 3 4 5 … 48 49 [50] 51 52 53 … 96 97 98 99 100  next ›
//! ```

use crate::ui::helpers::{center_padding, char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PageItem, PaginationInfo};

/// One printable piece of the strip.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Plain(String),
    Current(String),
    Dim(String),
}

impl Segment {
    fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Current(text) | Self::Dim(text) => text,
        }
    }
}

/// Renders the strip centered on `row`, or blanks the row without one.
pub fn render_pagination(row: usize, pagination: Option<&PaginationInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(pagination) = pagination else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let segments = segments(pagination);
    let width: usize = segments.iter().map(|s| char_width(s.text())).sum();
    let padding = center_padding(cols, width);

    print!("{}", " ".repeat(padding));
    for segment in &segments {
        match segment {
            Segment::Plain(text) => {
                print!("{}{text}", Theme::fg(&theme.colors.text_normal));
            }
            Segment::Current(text) => {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.selection_fg));
                print!("{}", Theme::bg(&theme.colors.selection_bg));
                print!("{text}");
                print!("{}", Theme::reset());
            }
            Segment::Dim(text) => {
                print!("{}{text}", Theme::fg(&theme.colors.text_dim));
            }
        }
    }
    print!("{}", " ".repeat(cols.saturating_sub(padding + width)));
    print!("{}", Theme::reset());
    row + 1
}

fn segments(pagination: &PaginationInfo) -> Vec<Segment> {
    let arrow = |enabled: bool, text: &str| {
        if enabled {
            Segment::Plain(text.to_string())
        } else {
            Segment::Dim(text.to_string())
        }
    };

    let mut segments = vec![arrow(pagination.has_previous, "‹ prev "), Segment::Plain(" ".to_string())];
    for item in &pagination.items {
        match item {
            PageItem::Page { number, is_current: true } => segments.push(Segment::Current(format!("[{number}]"))),
            PageItem::Page { number, .. } => segments.push(Segment::Plain(number.to_string())),
            PageItem::Break => segments.push(Segment::Dim("…".to_string())),
        }
        segments.push(Segment::Plain(" ".to_string()));
    }
    segments.push(Segment::Plain(" ".to_string()));
    segments.push(arrow(pagination.has_next, "next ›"));
    segments
}
