//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process: compute the [`UIViewModel`] from the
//! application state, then hand it to the components. The main layout is
//! drawn first; the detail overlay and toasts are drawn over it.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout for a `rows` x `cols` pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    components::render_main_layout(vm, theme, cols, rows);

    if let Some(detail) = &vm.detail {
        components::render_detail(detail, theme, rows, cols);
    }

    if !vm.toasts.is_empty() {
        components::render_toasts(rows.saturating_sub(2), &vm.toasts, theme, cols);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::movie::sample_movie;
    use crate::domain::MoviePage;
    use crate::notify::Notify;
    use crate::session::FetchResolution;
    use crate::Config;

    fn populated_state() -> AppState {
        let config = Config {
            api_token: Some("token".to_string()),
            ..Config::default()
        };
        let mut state = AppState::new(&config, Theme::default());
        let Some(order) = state.session.submit_search("movie", &mut state.toasts) else {
            panic!("first search must fetch");
        };
        state.session.resolve(
            FetchResolution {
                key: order.key,
                ticket: order.ticket,
                outcome: Ok(MoviePage {
                    movies: (1..=30).map(|id| sample_movie(id, &format!("Movie {id}"))).collect(),
                    total_pages: 40,
                }),
            },
            &mut state.toasts,
        );
        state.session.select(sample_movie(3, "Movie 3"));
        state.toasts.notify("hello");
        state
    }

    #[test]
    fn renders_every_component_at_any_size() {
        let state = populated_state();
        for (rows, cols) in [(40, 120), (24, 80), (12, 30), (3, 5), (0, 0)] {
            render(&state, rows, cols);
        }
    }
}
