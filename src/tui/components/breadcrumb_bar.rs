//! # Location Breadcrumb Bar
//!
//! One-line trail of the current route's navigatable steps, e.g.
//! `home › items › 42 › details`.
//!
//! When the trail is wider than the bar, leading items collapse into an
//! ellipsis item. The last item (the current location) is always shown and is
//! truncated when even it doesn't fit:
//!
//! ```text
//! width 40: home › items › 42 › details
//! width 20: … › 42 › details
//! width  8: … › det…
//! ```
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `LocationBreadcrumbBarState` lives in `TuiState` and caches the last
//!   layout so clicks and focus moves can be resolved between frames
//! - `LocationBreadcrumbBar` is created each frame with borrowed state

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Something in the bar that can hold focus or be clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreadcrumbFocus {
    Ellipsis,
    Item(usize),
}

/// Events emitted by the breadcrumb bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreadcrumbEvent {
    /// Index into the labels the bar was given.
    ItemClicked(usize),
    /// The collapsed items, in trail order.
    EllipsisClicked { hidden: Vec<usize> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    target: BreadcrumbFocus,
    start: u16,
    width: u16,
    text: String,
}

/// Column positions of a trail laid out into a fixed width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreadcrumbLayout {
    item_count: usize,
    first_visible: usize,
    ellipsis: bool,
    slots: Vec<Slot>,
}

impl BreadcrumbLayout {
    pub fn compute<S: AsRef<str>>(labels: &[S], width: u16, separator: &str, ellipsis: &str) -> Self {
        let count = labels.len();
        if count == 0 {
            return Self::default();
        }

        let width = usize::from(width);
        let separator_width = separator.width();
        let widths: Vec<usize> = labels.iter().map(|l| l.as_ref().width()).collect();
        let full = widths.iter().sum::<usize>() + separator_width * (count - 1);

        let (first_visible, ellipsis_rendered) = if full <= width || count == 1 {
            (0, false)
        } else {
            // Walk back from the last item while "… › " plus the tail still fits.
            // The whole trail doesn't fit, so at least item 0 stays hidden.
            let mut used = ellipsis.width() + separator_width + widths[count - 1];
            let mut first = count - 1;
            while first > 1 {
                let next = used + widths[first - 1] + separator_width;
                if next > width {
                    break;
                }
                used = next;
                first -= 1;
            }
            (first, true)
        };

        let mut slots = Vec::with_capacity(count - first_visible + 1);
        let mut column = 0usize;
        if ellipsis_rendered {
            let text = truncate_to_width(ellipsis, width, "");
            let text_width = text.width();
            slots.push(Slot {
                target: BreadcrumbFocus::Ellipsis,
                start: to_column(column),
                width: to_column(text_width),
                text,
            });
            column += text_width + separator_width;
        }
        for (index, label) in labels.iter().enumerate().skip(first_visible) {
            if index > first_visible {
                column += separator_width;
            }
            let label = label.as_ref();
            let text = if index == count - 1 {
                truncate_to_width(label, width.saturating_sub(column), ellipsis)
            } else {
                label.to_string()
            };
            let text_width = text.width();
            slots.push(Slot {
                target: BreadcrumbFocus::Item(index),
                start: to_column(column),
                width: to_column(text_width),
                text,
            });
            column += text_width;
        }

        Self {
            item_count: count,
            first_visible,
            ellipsis: ellipsis_rendered,
            slots,
        }
    }

    pub fn ellipsis_rendered(&self) -> bool {
        self.ellipsis
    }

    /// Index of the first item drawn after the ellipsis (0 without one).
    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    pub fn hidden_items(&self) -> Range<usize> {
        0..self.first_visible
    }

    pub fn visible_count(&self) -> usize {
        self.item_count - self.first_visible
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// What sits at `column` (relative to the bar's left edge). Separators
    /// and trailing space hit nothing.
    pub fn hit_test(&self, column: u16) -> Option<BreadcrumbFocus> {
        self.slots
            .iter()
            .find(|slot| column >= slot.start && column < slot.start.saturating_add(slot.width))
            .map(|slot| slot.target)
    }

    fn is_visible(&self, target: BreadcrumbFocus) -> bool {
        match target {
            BreadcrumbFocus::Ellipsis => self.ellipsis,
            BreadcrumbFocus::Item(index) => index >= self.first_visible && index < self.item_count,
        }
    }
}

fn to_column(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Cut `text` to at most `max` display columns, ending in `marker` when cut.
fn truncate_to_width(text: &str, max: usize, marker: &str) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let marker_width = marker.width();
    let (budget, marker) = if marker_width < max {
        (max - marker_width, marker)
    } else {
        (max, "")
    };

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(marker);
    out
}

/// Persistent state for the breadcrumb bar.
#[derive(Debug, Clone)]
pub struct LocationBreadcrumbBarState {
    labels: Vec<String>,
    separator: String,
    ellipsis: String,
    focus: Option<BreadcrumbFocus>,
    layout: BreadcrumbLayout,
    area: Rect,
}

impl LocationBreadcrumbBarState {
    pub fn new(separator: impl Into<String>, ellipsis: impl Into<String>) -> Self {
        Self {
            labels: Vec::new(),
            separator: separator.into(),
            ellipsis: ellipsis.into(),
            focus: None,
            layout: BreadcrumbLayout::default(),
            area: Rect::default(),
        }
    }

    /// Replace the trail. Focus is dropped when the trail changes.
    pub fn set_labels(&mut self, labels: Vec<String>) {
        if labels == self.labels {
            return;
        }
        self.labels = labels;
        self.focus = None;
        self.relayout(self.area.width);
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn focus(&self) -> Option<BreadcrumbFocus> {
        self.focus
    }

    pub fn layout(&self) -> &BreadcrumbLayout {
        &self.layout
    }

    pub fn relayout(&mut self, width: u16) {
        self.layout = BreadcrumbLayout::compute(self.labels.as_slice(), width, &self.separator, &self.ellipsis);
        // A resize may hide the focused item
        if let Some(focus) = self.focus
            && !self.layout.is_visible(focus)
        {
            self.focus = Some(BreadcrumbFocus::Item(self.layout.first_visible()));
        }
    }

    pub fn move_focus_previous(&mut self) {
        let Some(focus) = self.focus else {
            self.focus_last();
            return;
        };
        self.focus = Some(match focus {
            BreadcrumbFocus::Item(index)
                if self.layout.ellipsis_rendered() && index == self.layout.first_visible() =>
            {
                BreadcrumbFocus::Ellipsis
            }
            BreadcrumbFocus::Item(index) if index > self.layout.first_visible() => {
                BreadcrumbFocus::Item(index - 1)
            }
            other => other,
        });
    }

    pub fn move_focus_next(&mut self) {
        let Some(focus) = self.focus else {
            self.focus_last();
            return;
        };
        self.focus = Some(match focus {
            // Skip the collapsed items
            BreadcrumbFocus::Ellipsis => BreadcrumbFocus::Item(self.layout.first_visible()),
            BreadcrumbFocus::Item(index) if index + 1 < self.labels.len() => {
                BreadcrumbFocus::Item(index + 1)
            }
            other => other,
        });
    }

    fn focus_last(&mut self) {
        self.focus = self.labels.len().checked_sub(1).map(BreadcrumbFocus::Item);
    }

    /// Raise the event for the focused element (Enter).
    pub fn activate(&self) -> Option<BreadcrumbEvent> {
        self.focus.map(|focus| self.event_for(focus))
    }

    /// Resolve a click at screen coordinates; focuses what was hit.
    pub fn click(&mut self, column: u16, row: u16) -> Option<BreadcrumbEvent> {
        if !self.area.contains(Position::new(column, row)) {
            return None;
        }
        let hit = self.layout.hit_test(column - self.area.x)?;
        self.focus = Some(hit);
        Some(self.event_for(hit))
    }

    fn event_for(&self, target: BreadcrumbFocus) -> BreadcrumbEvent {
        match target {
            BreadcrumbFocus::Item(index) => BreadcrumbEvent::ItemClicked(index),
            BreadcrumbFocus::Ellipsis => BreadcrumbEvent::EllipsisClicked {
                hidden: self.layout.hidden_items().collect(),
            },
        }
    }
}

impl EventHandler for LocationBreadcrumbBarState {
    type Event = BreadcrumbEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<BreadcrumbEvent> {
        match event {
            TuiEvent::FocusLeft => {
                self.move_focus_previous();
                None
            }
            TuiEvent::FocusRight => {
                self.move_focus_next();
                None
            }
            TuiEvent::Submit => self.activate(),
            TuiEvent::MouseClick(column, row) => self.click(*column, *row),
            _ => None,
        }
    }
}

/// Transient render wrapper for the breadcrumb bar.
pub struct LocationBreadcrumbBar<'a> {
    state: &'a mut LocationBreadcrumbBarState,
    /// Whether keyboard focus is in the bar (shows the focus highlight)
    focused: bool,
}

impl<'a> LocationBreadcrumbBar<'a> {
    pub fn new(state: &'a mut LocationBreadcrumbBarState, focused: bool) -> Self {
        Self { state, focused }
    }
}

impl Component for LocationBreadcrumbBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.area = area;
        self.state.relayout(area.width);

        let muted = Style::default().fg(Color::DarkGray);
        let last = self.state.labels.len().saturating_sub(1);
        let mut spans = Vec::with_capacity(self.state.layout.slots.len() * 2);

        for (i, slot) in self.state.layout.slots.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.state.separator.as_str(), muted));
            }
            let mut style = match slot.target {
                BreadcrumbFocus::Ellipsis => Style::default().fg(Color::Gray),
                BreadcrumbFocus::Item(index) if index == last => Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
                BreadcrumbFocus::Item(_) => Style::default().fg(Color::Cyan),
            };
            if self.focused && self.state.focus == Some(slot.target) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(slot.text.as_str(), style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    const TRAIL: [&str; 4] = ["home", "items", "42", "details"];

    fn state_with_trail(width: u16) -> LocationBreadcrumbBarState {
        let mut state = LocationBreadcrumbBarState::new(" › ", "…");
        state.area = Rect::new(0, 0, width, 1);
        state.set_labels(TRAIL.iter().map(|s| s.to_string()).collect());
        state
    }

    fn render_text(state: &mut LocationBreadcrumbBarState, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                LocationBreadcrumbBar::new(state, true).render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_layout_fits_without_ellipsis() {
        let layout = BreadcrumbLayout::compute(&TRAIL, 40, " › ", "…");
        assert!(!layout.ellipsis_rendered());
        assert_eq!(layout.first_visible(), 0);
        assert_eq!(layout.visible_count(), 4);
        assert!(layout.hidden_items().is_empty());
    }

    #[test]
    fn test_layout_collapses_leading_items() {
        // "… › 42 › details"
        let layout = BreadcrumbLayout::compute(&TRAIL, 20, " › ", "…");
        assert!(layout.ellipsis_rendered());
        assert_eq!(layout.first_visible(), 2);
        assert_eq!(layout.visible_count(), 2);
        assert_eq!(layout.hidden_items(), 0..2);
    }

    #[test]
    fn test_layout_hit_test() {
        let layout = BreadcrumbLayout::compute(&TRAIL, 20, " › ", "…");
        assert_eq!(layout.hit_test(0), Some(BreadcrumbFocus::Ellipsis));
        assert_eq!(layout.hit_test(2), None); // separator
        assert_eq!(layout.hit_test(4), Some(BreadcrumbFocus::Item(2)));
        assert_eq!(layout.hit_test(10), Some(BreadcrumbFocus::Item(3)));
        assert_eq!(layout.hit_test(16), None);
    }

    #[test]
    fn test_last_item_is_truncated_when_alone() {
        let layout = BreadcrumbLayout::compute(&TRAIL, 8, " › ", "…");
        assert_eq!(layout.first_visible(), 3);
        assert_eq!(layout.slots.last().map(|s| s.text.as_str()), Some("det…"));

        let single = BreadcrumbLayout::compute(&["settings"], 4, " › ", "…");
        assert!(!single.ellipsis_rendered());
        assert_eq!(single.slots[0].text, "set…");
    }

    #[test]
    fn test_empty_trail() {
        let layout = BreadcrumbLayout::compute::<&str>(&[], 20, " › ", "…");
        assert_eq!(layout.visible_count(), 0);
        assert_eq!(layout.hit_test(0), None);
    }

    #[test]
    fn test_render_full_trail() {
        let mut state = state_with_trail(40);
        let text = render_text(&mut state, 40);
        assert!(text.starts_with("home › items › 42 › details"));
    }

    #[test]
    fn test_render_collapsed_trail() {
        let mut state = state_with_trail(20);
        let text = render_text(&mut state, 20);
        assert!(text.starts_with("… › 42 › details"));
        assert!(!text.contains("home"));
    }

    #[test]
    fn test_focus_moves_skip_hidden_items() {
        let mut state = state_with_trail(20);
        state.handle_event(&TuiEvent::FocusLeft);
        assert_eq!(state.focus(), Some(BreadcrumbFocus::Item(3)));

        state.handle_event(&TuiEvent::FocusLeft);
        assert_eq!(state.focus(), Some(BreadcrumbFocus::Item(2)));
        state.handle_event(&TuiEvent::FocusLeft);
        assert_eq!(state.focus(), Some(BreadcrumbFocus::Ellipsis));
        state.handle_event(&TuiEvent::FocusLeft);
        assert_eq!(state.focus(), Some(BreadcrumbFocus::Ellipsis));

        state.handle_event(&TuiEvent::FocusRight);
        assert_eq!(state.focus(), Some(BreadcrumbFocus::Item(2)));
    }

    #[test]
    fn test_submit_raises_item_and_ellipsis_events() {
        let mut state = state_with_trail(20);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);

        state.move_focus_previous();
        state.move_focus_previous();
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(BreadcrumbEvent::ItemClicked(2))
        );

        state.move_focus_previous();
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(BreadcrumbEvent::EllipsisClicked { hidden: vec![0, 1] })
        );
    }

    #[test]
    fn test_click_maps_screen_columns() {
        let mut state = state_with_trail(20);
        state.area = Rect::new(5, 2, 20, 1);

        assert_eq!(state.click(5 + 10, 2), Some(BreadcrumbEvent::ItemClicked(3)));
        assert_eq!(state.focus(), Some(BreadcrumbFocus::Item(3)));
        assert_eq!(state.click(5 + 10, 3), None); // wrong row
        assert_eq!(state.click(1, 2), None); // left of the bar
    }

    #[test]
    fn test_resize_refocuses_hidden_item() {
        let mut state = state_with_trail(40);
        state.move_focus_previous();
        state.move_focus_previous();
        state.move_focus_previous();
        assert_eq!(state.focus(), Some(BreadcrumbFocus::Item(1)));

        state.relayout(20);
        assert_eq!(state.focus(), Some(BreadcrumbFocus::Item(2)));
    }

    #[test]
    fn test_new_trail_drops_focus() {
        let mut state = state_with_trail(40);
        state.move_focus_previous();
        state.set_labels(vec!["home".to_string()]);
        assert_eq!(state.focus(), None);
        assert_eq!(state.layout().visible_count(), 1);
    }
}
