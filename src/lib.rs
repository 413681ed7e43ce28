//! cinefind: a Zellij plugin for searching a movie catalog.
//!
//! cinefind searches a remote movie catalog by free-text query, pages through
//! the results and shows a single movie in a detail overlay:
//! - Results stay on screen while the next page loads
//! - Answers that arrive for a superseded query or page are never shown
//! - A toast reports a search that found nothing, once per search
//! - Catalog requests run on the host's web-request API
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Event handling
//! │  - Input modes and search input buffer              │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Session Layer │   │ Catalog Layer │
//! │ (ui/)         │   │ (session/)    │   │ (catalog/)    │
//! │ - Rendering   │   │ - Query/page  │   │ - Requests    │
//! │ - Theming     │   │ - Result cache│   │ - Responses   │
//! │ - Components  │   │ - Empty notice│   │ - Trace ctx   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure, Notify & Domain Layers             │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Toast host (notify/)                             │
//! │  - Movie model and error types (domain/)            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`session`]: Search session controller and its result cache
//! - [`catalog`]: Catalog request building and response decoding
//! - [`notify`]: Toast queue and the notification capability
//! - [`domain`]: Core domain types (Movie, errors)
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing with file export
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/cinefind.wasm" {
//!         api_token "eyJhbGciOi..."
//!         language "en-US"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, initialize tracing,
//!    create `AppState`, request web access, subscribe to events
//! 2. **Submit**: the search input hands the query to the session, which
//!    returns a fetch order for the new key
//! 3. **Fetch**: the order becomes a `web_request` carrying the key and ticket
//!    in its context
//! 4. **Resolve**: the `WebRequestResult` is decoded and fed back to the
//!    session, which shows it only if its key is still current
//!
//! # Examples
//!
//! ```rust
//! use cinefind::{handle_event, initialize, Action, Config, Event};
//!
//! let config = Config {
//!     api_token: Some("token".to_string()),
//!     ..Config::default()
//! };
//! let mut state = initialize(&config);
//!
//! handle_event(&mut state, &Event::FocusSearch)?;
//! for c in "alien".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::SubmitSearch)?;
//! assert!(matches!(actions.as_slice(), [Action::FetchCatalog(_)]));
//! # Ok::<(), cinefind::CinefindError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod notify;
pub mod session;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{CinefindError, Movie, MoviePage, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
const DEFAULT_LANGUAGE: &str = "en-US";
const DEFAULT_TOAST_SECONDS: f64 = 4.0;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/cinefind.wasm" {
///     api_token "eyJhbGciOi..."
///     api_base_url "https://api.themoviedb.org/3"
///     image_base_url "https://image.tmdb.org/t/p"
///     language "de-DE"
///     include_adult "false"
///     toast_seconds "4"
///     theme "catppuccin-mocha"
///     theme_file "~/.config/cinefind/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Catalog read access token, sent as a bearer token.
    pub api_token: Option<String>,

    /// Base URL of the catalog API. `search/movie` is appended to it.
    pub api_base_url: String,

    /// Base URL for poster and backdrop images.
    pub image_base_url: String,

    /// Language tag passed to the catalog. Default: `"en-US"`
    pub language: String,

    /// Whether adult titles are included in results.
    pub include_adult: bool,

    /// Seconds a toast stays on screen. Default: `4.0`
    pub toast_seconds: f64,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            include_adult: false,
            toast_seconds: DEFAULT_TOAST_SECONDS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored. Blank values and values that fail to parse
    /// fall back to their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use cinefind::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_token".to_string(), "abc".to_string());
    /// map.insert("include_adult".to_string(), "true".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_token.as_deref(), Some("abc"));
    /// assert!(config.include_adult);
    /// assert_eq!(config.language, "en-US");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let include_adult = text("include_adult")
            .and_then(|value| value.parse::<bool>().ok())
            .unwrap_or(false);

        let toast_seconds = text("toast_seconds")
            .and_then(|value| value.parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .unwrap_or(DEFAULT_TOAST_SECONDS);

        Self {
            api_token: text("api_token"),
            api_base_url: text("api_base_url").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            image_base_url: text("image_base_url")
                .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string()),
            language: text("language").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            include_adult,
            toast_seconds,
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    /// Checks that the configuration can reach the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CinefindError::Config`] if no `api_token` is configured.
    pub fn validate(&self) -> Result<()> {
        if self.api_token.is_none() {
            return Err(CinefindError::Config(
                "api_token is not set; catalog requests will be rejected".to_string(),
            ));
        }
        Ok(())
    }

    fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Initializes the plugin state from configuration.
///
/// Loads the theme (file, then name, then default) and builds the catalog
/// client. A configuration problem never prevents start-up: it is logged and
/// reported as a toast, and searches fail visibly until it is fixed.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing cinefind plugin");

    let theme = config.load_theme();
    let mut state = AppState::new(config, theme);

    if let Err(e) = config.validate() {
        tracing::warn!(error = %e, "configuration incomplete");
        state.report(&e.to_string());
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("api_token", " abc "),
            ("api_base_url", "http://localhost:8080/3"),
            ("image_base_url", "http://localhost:8080/img"),
            ("language", "de-DE"),
            ("include_adult", "true"),
            ("toast_seconds", "2.5"),
            ("theme", "catppuccin-latte"),
            ("theme_file", "~/theme.toml"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.api_token.as_deref(), Some("abc"));
        assert_eq!(config.api_base_url, "http://localhost:8080/3");
        assert_eq!(config.image_base_url, "http://localhost:8080/img");
        assert_eq!(config.language, "de-DE");
        assert!(config.include_adult);
        assert!((config.toast_seconds - 2.5).abs() < f64::EPSILON);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.theme_file.as_deref(), Some("~/theme.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn unparseable_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("api_token", "   "),
            ("include_adult", "yes please"),
            ("toast_seconds", "-1"),
        ]));

        assert_eq!(config.api_token, None);
        assert!(!config.include_adult);
        assert!((config.toast_seconds - DEFAULT_TOAST_SECONDS).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_token_fails_validation() {
        assert!(matches!(
            Config::default().validate(),
            Err(CinefindError::Config(_))
        ));

        let config = Config {
            api_token: Some("abc".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn initialize_reports_missing_token() {
        let state = initialize(&Config::default());
        assert_eq!(state.toasts.len(), 1);

        let state = initialize(&Config {
            api_token: Some("abc".to_string()),
            ..Config::default()
        });
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("solarized".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "catppuccin-mocha");

        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "catppuccin-latte");
    }
}
