//! # Segment List Component
//!
//! The segments reachable from the route's leaf, one row per choice. A data
//! segment expands into one row per sample value from the route table and is
//! offered right after its anchor name, one level above it: `home` offers
//! `items`, `item 1`, `item 2`, `item 42`. Opening `item 42` from `home`
//! yields `/home/items/42`, because adding a data segment appends its anchor.
//!
//! Same persistent state + transient wrapper split as the breadcrumb bar.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::routing::{Route, RouteTable, SegmentInstance, SegmentKind};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// One row of the list: a route expression plus the data value, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentChoice {
    pub segment: String,
    pub primitive: Option<String>,
}

impl SegmentChoice {
    pub fn label(&self) -> String {
        match &self.primitive {
            Some(value) => format!("{} {}", self.segment, value),
            None => self.segment.clone(),
        }
    }
}

/// Name children of the route's leaf definition (the table's roots for an
/// empty route), each followed by the values of the data segments it
/// anchors. Dialog leaves offer nothing.
pub fn next_segments(table: &RouteTable, route: &Route) -> Vec<SegmentChoice> {
    let entries = match route.last() {
        None => table.roots(),
        Some(SegmentInstance::Name(leaf)) => table.children(&leaf.segment.name),
        Some(SegmentInstance::Data(leaf)) => table.children(&leaf.segment.name),
        Some(SegmentInstance::Dialog(_)) => Vec::new(),
    };

    let mut choices = Vec::new();
    // Data children of the leaf itself are skipped: the leaf is already
    // their anchor and adding them would append it a second time.
    for entry in entries.into_iter().filter(|e| e.kind == SegmentKind::Name) {
        choices.push(SegmentChoice {
            segment: entry.name.clone(),
            primitive: None,
        });
        for data in table.children(&entry.name) {
            if data.kind == SegmentKind::Data {
                choices.extend(data.values.iter().map(|value| SegmentChoice {
                    segment: data.name.clone(),
                    primitive: Some(value.clone()),
                }));
            }
        }
    }
    choices
}

/// Events emitted by the segment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentListEvent {
    Open(SegmentChoice),
}

/// Persistent state for the segment list.
pub struct SegmentListState {
    pub choices: Vec<SegmentChoice>,
    pub list_state: ListState,
}

impl SegmentListState {
    pub fn new() -> Self {
        Self {
            choices: Vec::new(),
            list_state: ListState::default(),
        }
    }

    /// Replace the choices, selecting the first one.
    pub fn set_choices(&mut self, choices: Vec<SegmentChoice>) {
        self.list_state = ListState::default();
        if !choices.is_empty() {
            self.list_state.select(Some(0));
        }
        self.choices = choices;
    }

    pub fn selected(&self) -> Option<&SegmentChoice> {
        self.list_state.selected().and_then(|i| self.choices.get(i))
    }

    pub fn select(&mut self, index: usize) {
        if index < self.choices.len() {
            self.list_state.select(Some(index));
        }
    }
}

impl Default for SegmentListState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for SegmentListState {
    type Event = SegmentListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SegmentListEvent> {
        match event {
            TuiEvent::CursorUp => {
                if let Some(selected) = self.list_state.selected() {
                    self.list_state.select(Some(selected.saturating_sub(1)));
                }
                None
            }
            TuiEvent::CursorDown => {
                if let Some(selected) = self.list_state.selected() {
                    let last = self.choices.len().saturating_sub(1);
                    self.list_state.select(Some((selected + 1).min(last)));
                }
                None
            }
            TuiEvent::Submit => self.selected().cloned().map(SegmentListEvent::Open),
            _ => None,
        }
    }
}

/// Transient render wrapper for the segment list.
pub struct SegmentList<'a> {
    state: &'a mut SegmentListState,
    focused: bool,
}

impl<'a> SegmentList<'a> {
    pub fn new(state: &'a mut SegmentListState, focused: bool) -> Self {
        Self { state, focused }
    }
}

impl Component for SegmentList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border = if self.focused { Color::Gray } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Go to ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Open  Backspace Back  ←→ Trail  q Quit ").centered())
            .padding(Padding::horizontal(1));

        if self.state.choices.is_empty() {
            let empty = Paragraph::new("Nothing below this location.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .choices
            .iter()
            .map(|choice| ListItem::new(choice.label()))
            .collect();

        let highlight = if self.focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let list = List::new(items)
            .block(block)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(highlight);

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
