//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed
//! by the renderer. They carry display-ready data only: truncated titles,
//! highlight ranges, the page strip, and which of loader, error, grid and
//! overlay are visible.

/// Pages shown around the current one in the page strip.
pub const PAGE_RANGE_DISPLAYED: u32 = 5;

/// Pages always shown at each end of the page strip.
pub const MARGIN_PAGES_DISPLAYED: u32 = 5;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    pub search_bar: SearchBarInfo,

    /// Loader or error line, if either applies.
    pub status: Option<StatusInfo>,

    /// Page strip; `None` when there is at most one page or no success.
    pub pagination: Option<PaginationInfo>,

    /// Visible window of the result grid.
    pub grid_items: Vec<GridItem>,

    /// Index of the cursor row within `grid_items`.
    pub selected_index: usize,

    /// Message shown instead of the grid.
    pub empty_state: Option<EmptyState>,

    /// Detail overlay for the selected movie.
    pub detail: Option<DetailInfo>,

    /// Toast messages to draw, oldest first.
    pub toasts: Vec<String>,

    pub footer: FooterInfo,
}

/// One row of the result grid.
#[derive(Debug, Clone)]
pub struct GridItem {
    pub title: String,

    /// Release year, or a placeholder when unknown.
    pub year: String,

    pub rating: String,

    pub is_selected: bool,

    /// Character ranges of `title` matched by the query, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Message displayed when there is no grid to show.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search box contents.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// The input buffer while typing, the active query otherwise.
    pub query: String,

    /// Whether keystrokes currently edit the query.
    pub is_focused: bool,
}

/// Fetch progress of the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusInfo {
    /// The current page is being fetched. `retained` is true when the
    /// previous results stay on screen meanwhile.
    Loading { retained: bool },

    /// The current page failed.
    Error {
        /// User-facing message.
        message: String,
        /// Underlying failure, shown dimmed.
        detail: String,
    },
}

/// Page strip state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    pub items: Vec<PageItem>,
    pub has_previous: bool,
    pub has_next: bool,
}

/// One slot of the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: u32, is_current: bool },
    /// Elided run of pages.
    Break,
}

/// Content of the detail overlay.
#[derive(Debug, Clone)]
pub struct DetailInfo {
    pub title: String,
    pub release_date: String,
    pub rating: String,
    pub overview: String,
    pub backdrop_url: Option<String>,
    pub poster_url: Option<String>,
}

/// Lays out the page strip for `current` of `total` pages (both 1-based).
///
/// Keeps [`MARGIN_PAGES_DISPLAYED`] pages at each end and a window of
/// [`PAGE_RANGE_DISPLAYED`] pages around `current`, shifted inward near the
/// ends so it keeps its width. Gaps become a single [`PageItem::Break`],
/// except a gap of exactly one page, which is shown as that page.
#[must_use]
pub fn pagination_items(current: u32, total: u32) -> Vec<PageItem> {
    let page = |number: u32| PageItem::Page {
        number,
        is_current: number == current,
    };

    if total <= PAGE_RANGE_DISPLAYED {
        return (1..=total).map(page).collect();
    }

    let total = i64::from(total);
    let selected = i64::from(current.max(1)) - 1;
    let range = i64::from(PAGE_RANGE_DISPLAYED);
    let margin = i64::from(MARGIN_PAGES_DISPLAYED);

    let mut left = range / 2;
    let mut right = range - left;
    if selected > total - right {
        right = total - selected;
        left = range - right;
    } else if selected < left {
        left = selected;
        right = range - left;
    }

    let mut items = Vec::new();
    let mut last_shown: Option<i64> = None;

    for index in 0..total {
        let shown = index < margin
            || index >= total - margin
            || (index >= selected - left && index <= selected + right);
        if !shown {
            continue;
        }

        if let Some(last) = last_shown {
            match index - last {
                1 => {}
                2 => items.push(page(to_page_number(last + 1))),
                _ => items.push(PageItem::Break),
            }
        }
        items.push(page(to_page_number(index)));
        last_shown = Some(index);
    }

    items
}

fn to_page_number(index: i64) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(items: &[PageItem]) -> Vec<Option<u32>> {
        items
            .iter()
            .map(|item| match item {
                PageItem::Page { number, .. } => Some(*number),
                PageItem::Break => None,
            })
            .collect()
    }

    #[test]
    fn few_pages_are_all_shown() {
        let items = pagination_items(2, 3);
        assert_eq!(numbers(&items), vec![Some(1), Some(2), Some(3)]);
        assert_eq!(
            items[1],
            PageItem::Page {
                number: 2,
                is_current: true
            }
        );
    }

    #[test]
    fn middle_page_has_breaks_on_both_sides() {
        let items = numbers(&pagination_items(50, 100));
        let mut expected: Vec<Option<u32>> = (1..=5).map(Some).collect();
        expected.push(None);
        expected.extend((48..=53).map(Some));
        expected.push(None);
        expected.extend((96..=100).map(Some));
        assert_eq!(items, expected);
    }

    #[test]
    fn single_page_gaps_are_filled() {
        let items = numbers(&pagination_items(1, 12));
        assert_eq!(items, (1..=12).map(Some).collect::<Vec<_>>());
    }

    #[test]
    fn exactly_one_page_is_current() {
        let items = pagination_items(500, 500);
        let current: Vec<_> = items
            .iter()
            .filter(|item| matches!(item, PageItem::Page { is_current: true, .. }))
            .collect();
        assert_eq!(current, vec![&PageItem::Page { number: 500, is_current: true }]);
        assert_eq!(items.last(), Some(&PageItem::Page { number: 500, is_current: true }));
    }
}
