//! Results view — the scrollable list of ranked hits.
//!
//! Each result takes two rows: the URL styled as a link, then
//! `Score: 0.1234`. Rows appear in the order the service returned them.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Select previous result |
//! | `↓` / `j` | Select next result |
//! | `PageUp` / `Ctrl+u` | Move selection up one page |
//! | `PageDown` / `Ctrl+d` | Move selection down one page |
//! | `Enter` / `o` | Open the selected URL in the system browser |

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use scout_core::{ResultItem, Status};

/// Terminal rows per result.
const ROWS_PER_ITEM: usize = 2;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Selection and scroll position. The results themselves live in the
/// controller; this only indexes into them.
#[derive(Debug)]
pub struct ResultsViewState {
    /// Index of the highlighted result.
    pub selected: usize,
    /// Index of the first visible result.
    pub offset: usize,
    /// Cached from the last render so `handle()` can page by screenfuls.
    last_capacity: Cell<usize>,
}

impl Default for ResultsViewState {
    fn default() -> Self {
        Self { selected: 0, offset: 0, last_capacity: Cell::new(10) }
    }
}

impl ResultsViewState {
    /// Back to the top; called whenever a new result set is applied.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    fn capacity(&self) -> usize {
        self.last_capacity.get().max(1)
    }

    /// Handle a navigation event against a list of `len` results.
    pub fn handle(&mut self, event: &AppEvent, len: usize) {
        if len == 0 {
            self.reset();
            return;
        }
        let last = len - 1;
        match event {
            AppEvent::Nav(Direction::Up) => self.selected = self.selected.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.selected = (self.selected + 1).min(last),
            AppEvent::ScrollUp => {
                self.selected = self.selected.saturating_sub(self.capacity());
            }
            AppEvent::ScrollDown => {
                self.selected = (self.selected + self.capacity()).min(last);
            }
            _ => return,
        }
        self.follow_selection();
        tracing::debug!(selected = self.selected, offset = self.offset, "results: moved");
    }

    /// Keep the selection inside the visible window.
    fn follow_selection(&mut self) {
        let cap = self.capacity();
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + cap {
            self.offset = self.selected + 1 - cap;
        }
    }

    /// The selected result, if any.
    pub fn selected_item<'r>(&self, results: &'r [ResultItem]) -> Option<&'r ResultItem> {
        results.get(self.selected)
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultsView<'a> {
    results: &'a [ResultItem],
    status: Status,
    state: &'a ResultsViewState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResultsView<'a> {
    pub fn new(
        results: &'a [ResultItem],
        status: Status,
        state: &'a ResultsViewState,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { results, status, state, focused, theme }
    }
}

impl Widget for ResultsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.results.is_empty() {
            "Results".to_string()
        } else {
            format!("Results ({})", self.results.len())
        };
        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let capacity = (inner.height as usize / ROWS_PER_ITEM).max(1);
        self.state.last_capacity.set(capacity);

        if self.results.is_empty() {
            let msg = match self.status {
                Status::Success => "No matching documents found.",
                Status::Idle => "Type a query and press Enter.",
                Status::Loading | Status::Error => "",
            };
            Paragraph::new(Line::from(Span::styled(
                msg,
                Style::default().add_modifier(Modifier::DIM),
            )))
            .render(inner, buf);
            return;
        }

        let total = self.results.len();
        let start = self.state.offset.min(total.saturating_sub(1));
        let end = (start + capacity).min(total);

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect { x: inner.right().saturating_sub(1), width: 1, ..inner };

        let lines: Vec<Line> = self.results[start..end]
            .iter()
            .enumerate()
            .flat_map(|(row, item)| {
                let selected = self.focused && start + row == self.state.selected;
                render_item(item, selected, self.theme)
            })
            .collect();
        Paragraph::new(lines).render(text_area, buf);

        if total > capacity {
            let mut sb_state = ScrollbarState::new(total)
                .position(start)
                .viewport_content_length(capacity);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Item rendering
// ---------------------------------------------------------------------------

fn render_item<'r>(item: &'r ResultItem, selected: bool, theme: &Theme) -> [Line<'r>; 2] {
    let mut url = Line::from(Span::styled(item.url.as_str(), theme.link));
    let mut score = Line::from(Span::styled(format!("  Score: {}", item.score_label()), theme.score));
    if selected {
        url = url.patch_style(theme.selected);
        score = score.patch_style(theme.selected);
    }
    [url, score]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
