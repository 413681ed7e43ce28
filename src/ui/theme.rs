//! Theme management and ANSI escape sequence generation.
//!
//! Built-in themes are the four Catppuccin flavours; custom themes are read
//! from TOML files with the same layout.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//! - `catppuccin-frappe`: Cool dark theme
//! - `catppuccin-macchiato`: Warm dark theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! rating_fg = "#f9e2af"
//! loading_fg = "#94e2d5"
//! error_fg = "#f38ba8"
//! toast_border = "#fab387"
//! ```
//!
//! # Example
//!
//! ```rust
//! use cinefind::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! print!("{}{}Bold{}", Theme::fg(&theme.colors.header_fg), Theme::bold(), Theme::reset());
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::CinefindError;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings like `"#cdd6f4"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Cursor row.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, year column and secondary text.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Vote average in the grid and detail overlay.
    pub rating_fg: String,

    pub loading_fg: String,

    /// Failed fetches.
    pub error_fg: String,

    pub toast_border: String,
}

impl Theme {
    /// Loads a built-in theme by name, or `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CinefindError::Theme`] if the file cannot be read or does not
    /// describe a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CinefindError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CinefindError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| CinefindError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Parses `#rrggbb` (the `#` is optional). Malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape sequence for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape sequence for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    /// Mocha palette spelled out, used if the embedded file ever fails to parse.
    fn builtin_mocha() -> Self {
        let c = |hex: &str| hex.to_string();
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                header_fg: c("#cdd6f4"),
                header_bg: None,
                selection_fg: c("#1e1e2e"),
                selection_bg: c("#f5c2e7"),
                text_normal: c("#cdd6f4"),
                text_dim: c("#6c7086"),
                border: c("#45475a"),
                search_bar_border: c("#f5c2e7"),
                match_highlight_fg: c("#1e1e2e"),
                match_highlight_bg: c("#f9e2af"),
                empty_state_fg: c("#89b4fa"),
                rating_fg: c("#f9e2af"),
                loading_fg: c("#94e2d5"),
                error_fg: c("#f38ba8"),
                toast_border: c("#fab387"),
            },
        }
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::builtin_mocha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn all_builtin_themes_parse() {
        for name in [
            "catppuccin-mocha",
            "catppuccin-latte",
            "catppuccin-frappe",
            "catppuccin-macchiato",
        ] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn embedded_mocha_matches_fallback() {
        assert_eq!(Theme::default(), Theme::builtin_mocha());
    }

    #[test]
    fn from_file_reads_custom_theme() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let custom = include_str!("../../themes/catppuccin-frappe.toml").replace(
            "name = \"catppuccin-frappe\"",
            "name = \"custom\"",
        );
        file.write_all(custom.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "custom");
        assert_eq!(theme.colors.error_fg, "#e78284");
    }

    #[test]
    fn from_file_rejects_incomplete_theme() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"broken\"\n[colors]\nheader_fg = \"#000000\"\n").unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, CinefindError::Theme(ref msg) if msg.contains("parse")));
    }

    #[test]
    fn from_file_reports_missing_file() {
        let err = Theme::from_file("/nonexistent/cinefind-theme.toml").unwrap_err();
        assert!(err.to_string().contains("read"));
    }

    #[test]
    fn escape_sequences() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("102030"), "\u{1b}[48;2;16;32;48m");
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }
}
