//! This modules defines the common functionality for showing a growing window
//! of grouped data ("show more").

use serde::Serialize;

/// The config for the display window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The number of items to show when a window size is not specified in a request.
    pub default_window: usize,
    /// How many more items each "show more" adds.
    pub window_step: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_window: 5,
            window_step: 5,
        }
    }
}

/// The first `size` items of a list, and whether the list goes on.
#[derive(Debug, PartialEq, Serialize)]
pub struct Window<'a, T> {
    /// The visible items.
    pub items: &'a [T],
    /// Whether there are items past the window.
    pub has_more: bool,
    /// The window size to ask for to see more, if there is more to see.
    pub next_window: Option<usize>,
}

/// Take the first `size` items of `items`.
///
/// Windows are always prefixes of the same list, so growing `size` never
/// repeats or skips an item. A `size` past the end shows everything.
pub fn window<'a, T>(items: &'a [T], size: usize, config: &PaginationConfig) -> Window<'a, T> {
    let end = size.min(items.len());
    let has_more = items.len() > size;

    Window {
        items: &items[..end],
        has_more,
        next_window: has_more.then(|| size.saturating_add(config.window_step.max(1))),
    }
}
