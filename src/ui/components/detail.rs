//! Detail overlay renderer.
//!
//! Draws a framed box over the centre of the screen for the selected movie.
//! The overview is word-wrapped and cut to the space available; image URLs
//! follow it so they can be opened from the terminal.

use crate::ui::helpers::{char_width, position_cursor, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

const MAX_BOX_WIDTH: usize = 72;
const MIN_BOX_WIDTH: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Title(String),
    Field { label: &'static str, value: String },
    Text(String),
    Dim(String),
    Blank,
}

/// Renders the overlay on top of whatever is already drawn.
pub fn render_detail(detail: &DetailInfo, theme: &Theme, rows: usize, cols: usize) {
    let box_width = cols.saturating_sub(4).min(MAX_BOX_WIDTH);
    if box_width < MIN_BOX_WIDTH || rows < 6 {
        return;
    }
    let inner_width = box_width - 4;
    let max_body = rows.saturating_sub(4);

    let lines = body_lines(detail, inner_width, max_body);
    let box_height = lines.len() + 2;
    let top = (rows.saturating_sub(box_height)) / 2 + 1;
    let left = (cols.saturating_sub(box_width)) / 2 + 1;

    position_cursor(top, left);
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("╭{}╮", "─".repeat(box_width - 2));

    for (offset, line) in lines.iter().enumerate() {
        position_cursor(top + 1 + offset, left);
        print!("{}│ ", Theme::fg(&theme.colors.search_bar_border));
        let width = render_line(line, theme);
        print!("{}", Theme::reset());
        print!("{}", " ".repeat(inner_width.saturating_sub(width)));
        print!("{} │", Theme::fg(&theme.colors.search_bar_border));
    }

    position_cursor(top + box_height - 1, left);
    print!("╰{}╯", "─".repeat(box_width - 2));
    print!("{}", Theme::reset());
}

/// Prints one body line and returns its width.
fn render_line(line: &Line, theme: &Theme) -> usize {
    match line {
        Line::Title(text) => {
            print!("{}{}{text}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
            char_width(text)
        }
        Line::Field { label, value } => {
            print!("{}{label}", Theme::fg(&theme.colors.text_dim));
            print!("{}{value}", Theme::fg(&theme.colors.rating_fg));
            char_width(label) + char_width(value)
        }
        Line::Text(text) => {
            print!("{}{text}", Theme::fg(&theme.colors.text_normal));
            char_width(text)
        }
        Line::Dim(text) => {
            print!("{}{}{text}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
            char_width(text)
        }
        Line::Blank => 0,
    }
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Lays out the body in at most `max_lines` lines of `width` characters.
fn body_lines(detail: &DetailInfo, width: usize, max_lines: usize) -> Vec<Line> {
    let mut head = vec![
        Line::Title(clip(&detail.title, width)),
        Line::Blank,
        Line::Field {
            label: "Release date: ",
            value: clip(&detail.release_date, width.saturating_sub(14)),
        },
        Line::Field {
            label: "Rating:       ",
            value: clip(&detail.rating, width.saturating_sub(14)),
        },
        Line::Blank,
    ];

    let mut tail = vec![Line::Blank];
    match &detail.backdrop_url {
        Some(url) => tail.push(Line::Dim(clip(&format!("Backdrop: {url}"), width))),
        None => tail.push(Line::Dim("No backdrop available".to_string())),
    }
    if let Some(url) = &detail.poster_url {
        tail.push(Line::Dim(clip(&format!("Poster:   {url}"), width)));
    }
    tail.push(Line::Dim("Esc to close".to_string()));

    let overview = if detail.overview.trim().is_empty() {
        vec!["No overview available.".to_string()]
    } else {
        wrap_text(&detail.overview, width)
    };
    let room = max_lines.saturating_sub(head.len() + tail.len());
    let truncated = overview.len() > room;

    let mut lines: Vec<Line> = overview.into_iter().take(room).map(Line::Text).collect();
    if truncated {
        if let Some(Line::Text(last)) = lines.last_mut() {
            let kept: String = last.chars().take(width.saturating_sub(1)).collect();
            *last = format!("{kept}…");
        }
    }

    head.append(&mut lines);
    head.append(&mut tail);
    head.truncate(max_lines);
    head
}
