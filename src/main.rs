//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the cinefind library and the Zellij plugin
//! system. Everything host-specific lives here: key mapping, web requests,
//! timers and pane control. The library never calls the host directly.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Key, `WebRequestResult`, `Timer`, `PermissionRequestResult`
//! 3. **Update**: Translate host events, delegate to `handle_event`, execute actions
//! 4. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key` → navigation, paging, search input (per input mode)
//! - `WebRequestResult` → `Event::CatalogResponse`
//! - `Timer` → `Event::ToastExpired`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! Browsing:
//! - `j`/`Down`, `k`/`Up`: Move
//! - `Enter`: Open details
//! - `l`/`Right`, `h`/`Left`: Next / previous page
//! - `g`, `G`: First / last page
//! - `/`: Edit the query
//! - `q`/`Esc`: Close plugin
//!
//! Typing:
//! - Characters edit the query, `Enter` searches, `Esc` cancels
//!
//! Inspecting:
//! - `Esc`, `q`, `Enter`: Close details

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use cinefind::catalog::CatalogResponse;
use cinefind::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: cinefind::app::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: cinefind::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes state and asks for web access.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        cinefind::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            api_base_url = %config.api_base_url,
            language = %config.language,
            has_token = config.api_token.is_some(),
            "parsed configuration"
        );
        self.app = cinefind::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        // Configuration problems are reported as toasts during initialize.
        for action in self.app.take_timer_actions() {
            self.execute_action(&action);
        }

        tracing::debug!("plugin load complete");
    }

    /// Translates a host event, runs it through the library and executes the
    /// resulting actions. Returns whether to re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match CatalogResponse::from_web_result(status, &body, &context) {
                    Ok(response) => Event::CatalogResponse(response),
                    Err(e) => {
                        tracing::warn!(error = %e, status, "dropping unrecognized web response");
                        return false;
                    }
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::ToastExpired,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                return self.handle_permission_result(status);
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        cinefind::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::CursorDown),
                BareKey::Char('p') => Some(Event::CursorUp),
                _ => None,
            };
        }

        match self.app.input_mode {
            InputMode::Typing => Some(match key.bare_key {
                BareKey::Enter => Event::SubmitSearch,
                BareKey::Esc => Event::CancelSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Inspecting => match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Some(Event::CloseDetail),
                _ => None,
            },
            InputMode::Browsing => Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::CursorDown,
                BareKey::Up | BareKey::Char('k') => Event::CursorUp,
                BareKey::Enter => Event::OpenDetail,
                BareKey::Right | BareKey::Char('l') => Event::NextPage,
                BareKey::Left | BareKey::Char('h') => Event::PrevPage,
                BareKey::Char('g') => Event::PageSelected(0),
                BareKey::Char('G') => {
                    let total = self.app.session.current_result_set().total_pages();
                    Event::PageSelected(total.saturating_sub(1))
                }
                BareKey::Char('/') => Event::FocusSearch,
                BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
                _ => return None,
            }),
        }
    }

    /// Reports a denied web-access permission; searches cannot work without it.
    fn handle_permission_result(&mut self, status: PermissionStatus) -> bool {
        match status {
            PermissionStatus::Granted => {
                tracing::debug!("web access granted");
                false
            }
            PermissionStatus::Denied => {
                tracing::warn!("web access denied");
                self.app
                    .report("Web access was denied; searches will fail until it is granted.");
                for action in self.app.take_timer_actions() {
                    self.execute_action(&action);
                }
                true
            }
        }
    }

    /// Executes an action returned from event handling against the host API.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("hiding plugin");
                hide_self();
            }
            Action::FetchCatalog(request) => {
                tracing::debug!(url = %request.url, "issuing catalog request");
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    request.headers.clone(),
                    vec![],
                    request.context.clone(),
                );
            }
            Action::ScheduleToastExpiry { seconds } => {
                set_timeout(*seconds);
            }
        }
    }
}
