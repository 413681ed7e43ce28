//! Status line renderer: the loader and the error message.

use crate::ui::helpers::{char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusInfo;

/// Renders the status line at `row`, or blanks it when there is no status.
pub fn render_status(row: usize, status: Option<&StatusInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let written = match status {
        None => 0,
        Some(StatusInfo::Loading { retained }) => {
            let text = loading_text(*retained);
            print!("{}", Theme::fg(&theme.colors.loading_fg));
            print!("{text}");
            char_width(text)
        }
        Some(StatusInfo::Error { message, detail }) => {
            let head = format!("  {message}");
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.error_fg));
            print!("{head}");
            print!("{}", Theme::reset());

            let room = cols.saturating_sub(char_width(&head) + 2);
            let tail: String = detail.chars().take(room).collect();
            print!("{}", Theme::fg(&theme.colors.text_dim));
            print!("  {tail}");
            char_width(&head) + 2 + char_width(&tail)
        }
    };

    print!("{}", " ".repeat(cols.saturating_sub(written)));
    print!("{}", Theme::reset());
    row + 1
}

const fn loading_text(retained: bool) -> &'static str {
    if retained {
        "  Loading page... (showing previous results)"
    } else {
        "  Loading movies..."
    }
}
