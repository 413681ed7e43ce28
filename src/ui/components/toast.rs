//! Toast renderer.
//!
//! Toasts stack upward from just above the bottom border, right-aligned,
//! newest at the bottom.

use crate::ui::helpers::{char_width, position_cursor};
use crate::ui::theme::Theme;

/// Renders `toasts` (oldest first) above `bottom_row`.
pub fn render_toasts(bottom_row: usize, toasts: &[String], theme: &Theme, cols: usize) {
    let max_text = cols.saturating_sub(6);
    if max_text == 0 {
        return;
    }

    for (offset, message) in toasts.iter().rev().enumerate() {
        let Some(row) = bottom_row.checked_sub(offset) else {
            break;
        };
        if row == 0 {
            break;
        }

        let text = fit(message, max_text);
        let width = char_width(&text) + 4;
        let col = cols.saturating_sub(width) + 1;

        position_cursor(row, col);
        print!("{}", Theme::fg(&theme.colors.toast_border));
        print!("▌ ");
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{text}");
        print!("{}", Theme::reset());
        print!("  ");
    }
}

fn fit(message: &str, max_chars: usize) -> String {
    if char_width(message) <= max_chars {
        return message.to_string();
    }
    let kept: String = message.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}
