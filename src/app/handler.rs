//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where plugin state changes. It runs one
//! event to completion, then reports whether the screen needs redrawing and
//! which side effects the shim must perform.
//!
//! # Event Types
//!
//! - **Typing**: `FocusSearch`, `Char`, `Backspace`, `SubmitSearch`, `CancelSearch`
//! - **Grid**: `CursorDown`, `CursorUp`, `OpenDetail`
//! - **Pagination**: `NextPage`, `PrevPage`, `PageSelected`
//! - **Overlay**: `CloseDetail`
//! - **Host**: `CatalogResponse`, `ToastExpired`, `CloseFocus`
//!
//! Every change of key (submit or page change) resets the grid cursor, and
//! every pushed toast yields one `ScheduleToastExpiry` action.

use crate::app::modes::InputMode;
use crate::app::state::EMPTY_QUERY_MESSAGE;
use crate::app::{Action, AppState};
use crate::catalog::CatalogResponse;
use crate::domain::error::Result;
use crate::session::FetchOrder;

/// Events triggered by user input or host callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Gives the search bar focus, starting from the active query.
    FocusSearch,
    /// Appends a character to the search input.
    Char(char),
    /// Removes the last character from the search input.
    Backspace,
    /// Submits the search input as the new query.
    SubmitSearch,
    /// Leaves the search bar without submitting.
    CancelSearch,

    /// Moves the grid cursor down (wraps to top).
    CursorDown,
    /// Moves the grid cursor up (wraps to bottom).
    CursorUp,
    /// Selects the movie under the cursor and opens the detail overlay.
    OpenDetail,
    /// Closes the detail overlay and clears the selection.
    CloseDetail,

    NextPage,
    PrevPage,
    /// A page picked from the pagination control, zero-based.
    PageSelected(u32),

    /// A decoded answer to a catalog request.
    CatalogResponse(CatalogResponse),
    /// A toast expiry timer fired.
    ToastExpired,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
}

/// Processes an event, mutates application state, and returns actions to
/// execute.
///
/// Returns whether the UI should re-render together with the actions, in the
/// order they must run.
///
/// # Errors
///
/// No event currently fails.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _trace = match event {
        Event::CatalogResponse(response) => response.trace.as_ref().and_then(|trace| trace.attach()),
        _ => None,
    };
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let (should_render, mut actions) = match event {
        Event::FocusSearch => {
            let query = state.session.query().to_string();
            state.input.reset_to(&query);
            state.input_mode = InputMode::Typing;
            (true, vec![])
        }
        Event::Char(c) => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            state.input.push(*c);
            tracing::trace!(input = %state.input.text(), "search input updated");
            (true, vec![])
        }
        Event::Backspace => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            state.input.pop();
            (true, vec![])
        }
        Event::CancelSearch => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Browsing;
            (true, vec![])
        }
        Event::SubmitSearch => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            match state.input.submission() {
                Some(query) => {
                    tracing::debug!(query = %query, "search submitted");
                    state.input_mode = InputMode::Browsing;
                    let order = state.session.submit_search(query, &mut state.toasts);
                    (true, change_key(state, order))
                }
                None => {
                    tracing::debug!("blank search rejected");
                    state.report(EMPTY_QUERY_MESSAGE);
                    (true, vec![])
                }
            }
        }
        Event::CursorDown => {
            state.move_cursor_down();
            (true, vec![])
        }
        Event::CursorUp => {
            state.move_cursor_up();
            (true, vec![])
        }
        Event::OpenDetail => {
            let Some(movie) = state.movie_under_cursor().cloned() else {
                tracing::debug!("no movie under cursor");
                return Ok((false, vec![]));
            };
            state.session.select(movie);
            state.input_mode = InputMode::Inspecting;
            (true, vec![])
        }
        Event::CloseDetail => {
            state.session.clear_selection();
            state.input_mode = InputMode::Browsing;
            (true, vec![])
        }
        Event::NextPage => {
            let target = state.session.page().saturating_add(1);
            go_to_page(state, target)
        }
        Event::PrevPage => {
            let target = state.session.page().saturating_sub(1);
            go_to_page(state, target)
        }
        Event::PageSelected(index) => go_to_page(state, index.saturating_add(1)),
        Event::CatalogResponse(response) => {
            let changed = state
                .session
                .resolve(response.resolution.clone(), &mut state.toasts);
            if changed {
                state.clamp_cursor();
            }
            (changed, vec![])
        }
        Event::ToastExpired => (state.toasts.expire_oldest(), vec![]),
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
    };

    let timers = state.take_timer_actions();
    let should_render = should_render || !timers.is_empty();
    actions.extend(timers);

    Ok((should_render, actions))
}

fn go_to_page(state: &mut AppState, target: u32) -> (bool, Vec<Action>) {
    if !state.pagination_available() {
        tracing::debug!(target, "pagination unavailable, page change ignored");
        return (false, vec![]);
    }

    let before = state.session.page();
    let order = state.session.go_to_page(target, &mut state.toasts);
    if state.session.page() == before {
        return (false, vec![]);
    }

    (true, change_key(state, order))
}

/// Resets the cursor for a new key and issues the fetch it needs, if any.
fn change_key(state: &mut AppState, order: Option<FetchOrder>) -> Vec<Action> {
    state.cursor = 0;
    state.dispatch(order).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogRequest;
    use crate::domain::movie::sample_movie;
    use crate::domain::{FetchError, MoviePage};
    use crate::session::{FetchResolution, FetchTicket, QueryKey, EMPTY_RESULT_MESSAGE};
    use crate::ui::Theme;
    use crate::Config;

    fn state() -> AppState {
        let config = Config {
            api_token: Some("token".to_string()),
            ..Config::default()
        };
        AppState::new(&config, Theme::default())
    }

    fn run(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    fn search(state: &mut AppState, query: &str) -> Vec<Action> {
        run(state, Event::FocusSearch);
        state.input.reset_to("");
        for c in query.chars() {
            run(state, Event::Char(c));
        }
        run(state, Event::SubmitSearch).1
    }

    fn only_request(actions: &[Action]) -> &CatalogRequest {
        match actions {
            [Action::FetchCatalog(request)] => request,
            other => panic!("expected a single catalog request, got {other:?}"),
        }
    }

    fn respond(request: &CatalogRequest, count: u64, total_pages: u32) -> Event {
        let body = serde_json::json!({
            "page": 1,
            "results": (1..=count)
                .map(|id| serde_json::json!({ "id": id, "title": format!("Movie {id}") }))
                .collect::<Vec<_>>(),
            "total_pages": total_pages,
        });
        let response =
            CatalogResponse::from_web_result(200, body.to_string().as_bytes(), &request.context).unwrap();
        Event::CatalogResponse(response)
    }

    fn fail(request: &CatalogRequest) -> Event {
        let response = CatalogResponse::from_web_result(500, b"", &request.context).unwrap();
        Event::CatalogResponse(response)
    }

    #[test]
    fn typing_is_ignored_outside_the_search_bar() {
        let mut state = state();
        assert_eq!(run(&mut state, Event::Char('a')), (false, vec![]));
        assert_eq!(state.input.text(), "");
    }

    #[test]
    fn submitting_issues_one_request_and_returns_to_browsing() {
        let mut state = state();
        let actions = search(&mut state, "  alien  ");

        let request = only_request(&actions);
        assert!(request.url.contains("query=alien"));
        assert!(request.url.contains("page=1"));
        assert_eq!(state.input_mode, InputMode::Browsing);
        assert_eq!(state.session.query(), "alien");
        assert!(state.session.current_result_set().is_loading());
    }

    #[test]
    fn blank_submission_toasts_and_keeps_typing() {
        let mut state = state();
        let actions = search(&mut state, "   ");

        assert_eq!(actions, vec![Action::ScheduleToastExpiry { seconds: 4.0 }]);
        assert_eq!(state.input_mode, InputMode::Typing);
        assert!(state.session.current_result_set().is_disabled());
        assert_eq!(state.toasts.visible().next().map(|t| t.message.as_str()), Some(EMPTY_QUERY_MESSAGE));
    }

    #[test]
    fn focus_search_starts_from_the_active_query() {
        let mut state = state();
        search(&mut state, "alien");
        run(&mut state, Event::FocusSearch);
        assert_eq!(state.input.text(), "alien");

        run(&mut state, Event::Backspace);
        run(&mut state, Event::CancelSearch);
        assert_eq!(state.input_mode, InputMode::Browsing);
        assert_eq!(state.session.query(), "alien");
    }

    #[test]
    fn cancel_is_ignored_outside_the_search_bar() {
        let mut state = state();
        assert_eq!(run(&mut state, Event::CancelSearch), (false, vec![]));
        assert_eq!(state.input_mode, InputMode::Browsing);
    }

    #[test]
    fn response_for_current_key_renders_results() {
        let mut state = state();
        let actions = search(&mut state, "movie");
        let request = only_request(&actions).clone();

        let (render, actions) = run(&mut state, respond(&request, 5, 3));
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.session.current_result_set().movies().len(), 5);
    }

    #[test]
    fn paging_keeps_results_and_requests_next_page() {
        let mut state = state();
        let first = only_request(&search(&mut state, "movie")).clone();
        run(&mut state, respond(&first, 5, 3));
        run(&mut state, Event::CursorDown);
        assert_eq!(state.cursor, 1);

        let (render, actions) = run(&mut state, Event::NextPage);
        assert!(render);
        assert!(only_request(&actions).url.contains("page=2"));
        assert_eq!(state.cursor, 0);
        assert!(state.session.current_result_set().is_placeholder());
        assert_eq!(state.session.current_result_set().movies().len(), 5);
    }

    #[test]
    fn page_selection_is_zero_based() {
        let mut state = state();
        let first = only_request(&search(&mut state, "movie")).clone();
        run(&mut state, respond(&first, 5, 3));

        let (_, actions) = run(&mut state, Event::PageSelected(2));
        assert!(only_request(&actions).url.contains("page=3"));
        assert_eq!(state.session.page(), 3);
    }

    #[test]
    fn paging_is_ignored_without_pagination() {
        let mut state = state();
        assert_eq!(run(&mut state, Event::NextPage), (false, vec![]));

        let first = only_request(&search(&mut state, "movie")).clone();
        assert_eq!(run(&mut state, Event::NextPage), (false, vec![]));

        run(&mut state, respond(&first, 2, 1));
        assert_eq!(run(&mut state, Event::NextPage), (false, vec![]));
        assert_eq!(run(&mut state, Event::PrevPage), (false, vec![]));
        assert_eq!(state.session.page(), 1);
    }

    #[test]
    fn prev_page_on_first_page_is_a_no_op() {
        let mut state = state();
        let first = only_request(&search(&mut state, "movie")).clone();
        run(&mut state, respond(&first, 5, 3));

        assert_eq!(run(&mut state, Event::PrevPage), (false, vec![]));
        assert_eq!(state.session.page(), 1);
    }

    #[test]
    fn late_response_for_previous_page_is_ignored() {
        let mut state = state();
        let first = only_request(&search(&mut state, "movie")).clone();
        run(&mut state, respond(&first, 5, 3));
        let second = only_request(&run(&mut state, Event::NextPage).1).clone();
        let third = only_request(&run(&mut state, Event::NextPage).1).clone();

        run(&mut state, respond(&third, 2, 3));
        let (render, _) = run(&mut state, respond(&second, 4, 3));

        assert!(!render);
        assert_eq!(state.session.current_result_set().movies().len(), 2);
    }

    #[test]
    fn empty_results_toast_once_with_an_expiry_timer() {
        let mut state = state();
        let request = only_request(&search(&mut state, "zzzzznotfound")).clone();

        let (render, actions) = run(&mut state, respond(&request, 0, 0));
        assert!(render);
        assert_eq!(actions, vec![Action::ScheduleToastExpiry { seconds: 4.0 }]);
        assert_eq!(
            state.toasts.visible().map(|t| t.message.as_str()).collect::<Vec<_>>(),
            vec![EMPTY_RESULT_MESSAGE]
        );

        let (_, actions) = run(&mut state, Event::CursorDown);
        assert!(actions.is_empty());
        assert_eq!(state.toasts.len(), 1);

        assert_eq!(run(&mut state, Event::ToastExpired), (true, vec![]));
        assert!(state.toasts.is_empty());
        assert_eq!(run(&mut state, Event::ToastExpired), (false, vec![]));
    }

    #[test]
    fn failure_shows_error_and_resubmit_retries() {
        let mut state = state();
        let request = only_request(&search(&mut state, "alien")).clone();
        run(&mut state, fail(&request));

        assert!(state.session.current_result_set().is_error());
        assert!(state.toasts.is_empty());

        let retry = search(&mut state, "alien");
        assert_ne!(
            only_request(&retry).context.get("cinefind.ticket"),
            request.context.get("cinefind.ticket")
        );
    }

    #[test]
    fn detail_overlay_round_trip() {
        let mut state = state();
        let request = only_request(&search(&mut state, "movie")).clone();
        run(&mut state, respond(&request, 3, 1));
        run(&mut state, Event::CursorDown);

        run(&mut state, Event::OpenDetail);
        assert_eq!(state.input_mode, InputMode::Inspecting);
        assert_eq!(state.session.selection().map(|m| m.id), Some(2));

        run(&mut state, Event::CloseDetail);
        assert_eq!(state.input_mode, InputMode::Browsing);
        assert!(state.session.selection().is_none());
    }

    #[test]
    fn open_detail_without_results_does_nothing() {
        let mut state = state();
        assert_eq!(run(&mut state, Event::OpenDetail), (false, vec![]));
        assert_eq!(state.input_mode, InputMode::Browsing);
    }

    #[test]
    fn shorter_page_clamps_the_cursor() {
        let mut state = state();
        let first = only_request(&search(&mut state, "movie")).clone();
        run(&mut state, respond(&first, 5, 2));

        // An answer with an unknown ticket leaves the cursor alone.
        state.cursor = 4;
        let resolution = FetchResolution {
            key: QueryKey::new("movie", 1),
            ticket: FetchTicket::new(999),
            outcome: Ok(MoviePage {
                movies: vec![sample_movie(1, "x")],
                total_pages: 1,
            }),
        };
        let event = Event::CatalogResponse(CatalogResponse {
            resolution,
            trace: None,
        });
        assert_eq!(run(&mut state, event), (false, vec![]));
        assert_eq!(state.cursor, 4);

        let second = only_request(&run(&mut state, Event::NextPage).1).clone();
        state.cursor = 4;
        run(&mut state, respond(&second, 2, 2));
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn close_focus_hides_the_plugin() {
        let mut state = state();
        assert_eq!(run(&mut state, Event::CloseFocus), (false, vec![Action::CloseFocus]));
    }

    #[test]
    fn unauthorized_failures_keep_query_and_page() {
        let mut state = state();
        let request = only_request(&search(&mut state, "alien")).clone();
        let response = CatalogResponse::from_web_result(
            401,
            br#"{"status_message":"Invalid API key"}"#,
            &request.context,
        )
        .unwrap();
        run(&mut state, Event::CatalogResponse(response));

        let view = state.session.current_result_set();
        assert!(matches!(view.error(), Some(FetchError::Http { status: 401, .. })));
        assert_eq!(state.session.query(), "alien");
        assert_eq!(state.session.page(), 1);
    }
}
