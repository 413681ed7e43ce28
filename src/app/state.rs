//! Application state management and view model computation.
//!
//! [`AppState`] ties the search session to everything around it: the search
//! input buffer, the toast host, the grid cursor, the input mode, the theme
//! and the catalog client. The session stays the single source of truth for
//! query, page, selection and results; everything here is presentation state
//! or plumbing.
//!
//! # View Model Computation
//!
//! `compute_viewmodel` turns a state snapshot into a [`UIViewModel`],
//! handling windowing of the result grid, fuzzy match highlighting of titles
//! against the query, and the gating of loader, error, pagination and detail
//! overlay.

use fuzzy_matcher::skim::SkimMatcherV2;

use super::actions::Action;
use super::modes::InputMode;
use crate::catalog::CatalogClient;
use crate::domain::{FetchError, Movie};
use crate::notify::{Notify, ToastHost};
use crate::session::{FetchOrder, FetchResolution, ResultView, SearchSession};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    pagination_items, DetailInfo, EmptyState, FooterInfo, GridItem, HeaderInfo, PaginationInfo,
    SearchBarInfo, StatusInfo, UIViewModel,
};
use crate::Config;

/// Message shown in place of the grid when the current page failed to load.
pub const ERROR_MESSAGE: &str = "There was an error, please try again...";

/// Toast shown when the search bar is submitted blank.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter your search query.";

/// Rows taken by everything except the result grid.
const CHROME_ROWS: usize = 11;

const TITLE_COLUMN_WIDTH: usize = 48;

/// Keystroke buffer behind the search bar.
///
/// Edits stay local until submitted; the session only ever sees whole,
/// trimmed queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    buffer: String,
}

impl SearchInput {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn pop(&mut self) {
        self.buffer.pop();
    }

    /// Replaces the buffer, e.g. with the active query when editing resumes.
    pub fn reset_to(&mut self, text: &str) {
        self.buffer.clear();
        self.buffer.push_str(text);
    }

    /// The query to submit, or `None` if the buffer is blank.
    #[must_use]
    pub fn submission(&self) -> Option<String> {
        let trimmed = self.buffer.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Query, page, selection and result set.
    pub session: SearchSession,

    /// Process-wide toast queue; also the session's notifier.
    pub toasts: ToastHost,

    /// Search bar contents while typing.
    pub input: SearchInput,

    pub input_mode: InputMode,

    /// Zero-based index into the visible movies.
    ///
    /// Reset when the key changes, clamped when the visible movies change.
    pub cursor: usize,

    pub theme: Theme,

    /// Base URL for poster and backdrop images.
    pub image_base_url: String,

    /// Request builder, or the reason none could be built from configuration.
    catalog: std::result::Result<CatalogClient, String>,
}

impl AppState {
    /// Creates the state for a freshly loaded plugin.
    ///
    /// A catalog base URL that cannot be used is reported as a toast; every
    /// fetch then fails immediately and shows the error message.
    #[must_use]
    pub fn new(config: &Config, theme: Theme) -> Self {
        let catalog = CatalogClient::from_config(config).map_err(|e| e.to_string());

        let mut state = Self {
            session: SearchSession::new(),
            toasts: ToastHost::new(config.toast_seconds),
            input: SearchInput::default(),
            input_mode: InputMode::Browsing,
            cursor: 0,
            theme,
            image_base_url: config.image_base_url.clone(),
            catalog,
        };

        if let Err(reason) = &state.catalog {
            tracing::warn!(reason = %reason, "catalog client unavailable");
            let message = reason.clone();
            state.report(&message);
        }

        state
    }

    /// Shows a message as a toast.
    pub fn report(&mut self, message: &str) {
        self.toasts.notify(message);
    }

    /// Turns a fetch order from the session into a catalog request.
    ///
    /// Without a usable catalog client the order is resolved as failed right
    /// away, so the key shows the error state instead of loading forever.
    pub fn dispatch(&mut self, order: Option<FetchOrder>) -> Option<Action> {
        let order = order?;

        match &self.catalog {
            Ok(client) => Some(Action::FetchCatalog(client.search_request(&order))),
            Err(reason) => {
                tracing::debug!(key = %order.key, reason = %reason, "no catalog client, failing fetch");
                let resolution = FetchResolution {
                    key: order.key,
                    ticket: order.ticket,
                    outcome: Err(FetchError::Network(format!("catalog unavailable: {reason}"))),
                };
                self.session.resolve(resolution, &mut self.toasts);
                None
            }
        }
    }

    /// Expiry timers owed for toasts pushed since the last call.
    pub fn take_timer_actions(&mut self) -> Vec<Action> {
        self.toasts
            .take_timer_requests()
            .into_iter()
            .map(|seconds| Action::ScheduleToastExpiry { seconds })
            .collect()
    }

    /// The movie under the grid cursor, if any is visible.
    #[must_use]
    pub fn movie_under_cursor(&self) -> Option<&Movie> {
        self.session.current_result_set().movies().get(self.cursor)
    }

    /// Moves the cursor down by one, wrapping to the top.
    pub fn move_cursor_down(&mut self) {
        let len = self.session.current_result_set().movies().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Moves the cursor up by one, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) {
        let len = self.session.current_result_set().movies().len();
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }

    /// Keeps the cursor inside the visible movies.
    pub fn clamp_cursor(&mut self) {
        let len = self.session.current_result_set().movies().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Whether pagination controls are shown and accept input.
    ///
    /// Only a successful (or retained) result set spanning more than one
    /// page can be paged.
    #[must_use]
    pub fn pagination_available(&self) -> bool {
        let view = self.session.current_result_set();
        (view.is_success() || view.is_placeholder()) && view.total_pages() > 1
    }

    /// Computes a renderable UI view model from current state and terminal
    /// dimensions.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Subtract chrome rows (header, search box, status, pagination, footer)
    /// 2. Center the window on the cursor
    /// 3. Shift the window back if it runs past the end of the list
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let view = self.session.current_result_set();
        let movies = view.movies();

        let available_rows = rows.saturating_sub(CHROME_ROWS);
        let mut visible_start = self.cursor.min(movies.len()).saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(movies.len());
        if visible_end - visible_start < available_rows && movies.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = (!self.session.query().is_empty()).then(SkimMatcherV2::default);

        let grid_items = movies[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, movie)| {
                self.compute_grid_item(movie, visible_start + relative_idx, cols, matcher.as_ref())
            })
            .collect();

        UIViewModel {
            header: self.compute_header(view),
            search_bar: self.compute_search_bar(),
            status: Self::compute_status(view),
            pagination: self.compute_pagination(view),
            grid_items,
            selected_index: self.cursor.saturating_sub(visible_start),
            empty_state: Self::compute_empty_state(view),
            detail: self.compute_detail(),
            toasts: self.toasts.visible().map(|toast| toast.message.clone()).collect(),
            footer: self.compute_footer(!movies.is_empty()),
        }
    }

    fn compute_grid_item(
        &self,
        movie: &Movie,
        absolute_idx: usize,
        cols: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> GridItem {
        let title_width = TITLE_COLUMN_WIDTH.min(cols.saturating_sub(20)).max(8);
        let title = truncate(&movie.title, title_width);

        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            compute_highlight_ranges(&title, self.session.query(), m)
        });

        GridItem {
            title,
            year: movie.release_year().unwrap_or_else(|| "----".to_string()),
            rating: movie.rating_label(),
            is_selected: absolute_idx == self.cursor,
            highlight_ranges,
        }
    }

    fn compute_header(&self, view: ResultView<'_>) -> HeaderInfo {
        let query = self.session.query();
        let title = if query.is_empty() {
            " cinefind ".to_string()
        } else if view.total_pages() > 0 {
            format!(
                " cinefind · \"{query}\" · page {} of {} ",
                self.session.page(),
                view.total_pages()
            )
        } else {
            format!(" cinefind · \"{query}\" ")
        };
        HeaderInfo { title }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        if self.input_mode.is_typing() {
            SearchBarInfo {
                query: self.input.text().to_string(),
                is_focused: true,
            }
        } else {
            SearchBarInfo {
                query: self.session.query().to_string(),
                is_focused: false,
            }
        }
    }

    fn compute_status(view: ResultView<'_>) -> Option<StatusInfo> {
        if view.is_loading() {
            return Some(StatusInfo::Loading {
                retained: view.is_placeholder(),
            });
        }

        view.error().map(|error| {
            let detail = if error.is_unauthorized() {
                format!("{error} (check api_token)")
            } else {
                error.to_string()
            };
            StatusInfo::Error {
                message: ERROR_MESSAGE.to_string(),
                detail,
            }
        })
    }

    fn compute_pagination(&self, view: ResultView<'_>) -> Option<PaginationInfo> {
        if !self.pagination_available() {
            return None;
        }

        let current = self.session.page();
        let total = view.total_pages();
        Some(PaginationInfo {
            items: pagination_items(current, total),
            has_previous: current > 1,
            has_next: current < total,
        })
    }

    fn compute_empty_state(view: ResultView<'_>) -> Option<EmptyState> {
        match view {
            ResultView::Disabled => Some(EmptyState {
                message: "Search the movie catalog".to_string(),
                subtitle: "Press / and type a title".to_string(),
            }),
            ResultView::Settled(page) if page.is_empty() => Some(EmptyState {
                message: "Nothing to show".to_string(),
                subtitle: "Try a different title".to_string(),
            }),
            _ => None,
        }
    }

    fn compute_detail(&self) -> Option<DetailInfo> {
        self.session.selection().map(|movie| DetailInfo {
            title: movie.title.clone(),
            release_date: movie.formatted_release_date(),
            rating: movie.rating_label(),
            overview: movie.overview.clone(),
            backdrop_url: movie.backdrop_url(&self.image_base_url),
            poster_url: movie.poster_url(&self.image_base_url),
        })
    }

    fn compute_footer(&self, has_movies: bool) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Typing => "Enter: search  Esc: cancel  Type to edit query",
            InputMode::Inspecting => "Esc/q/Enter: close details",
            InputMode::Browsing if has_movies && self.pagination_available() => {
                "j/k: move  Enter: details  h/l: page  g/G: first/last  /: search  q: quit"
            }
            InputMode::Browsing if has_movies => "j/k: move  Enter: details  /: search  q: quit",
            InputMode::Browsing => "/: search  q: quit",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Shortens `text` to at most `max_chars` characters, marking the cut.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Character ranges of `text` matched by `query`, merged into runs.
///
/// Returns `(start, end)` pairs with exclusive ends, in character indices.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
