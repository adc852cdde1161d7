//! # TUI Adapter
//!
//! The ratatui-specific layer: a small route browser over the configured
//! route table. Handles terminal I/O, renders the UI, and translates
//! keyboard and mouse events into navigation calls.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Navigation
//!
//! The browser owns one [`RouteNavigator`] registered as the root navigator
//! of a single [`NavigationRegion`]. Every "go to" from the segment list is a
//! [`NavigateLocalRouteAction`] fired with that region as sender; Backspace
//! and breadcrumb clicks edit the navigator's route directly.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 250ms per poll and only
//! redraws after an event (resize included).

pub mod component;
pub mod components;
pub mod event;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::config::ResolvedConfig;
use crate::navigation::{
    NavigateLocalRouteAction, NavigateRootRouteAction, NavigationRegion, NavigationResponse,
    RouteAction, RouteActionArgs, RouteNavigator,
};
use crate::routing::{
    AsyncData, DataValue, NavigationDataMap, Route, RouteTable, SegmentInstance,
};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    BreadcrumbEvent, LocationBreadcrumbBarState, SegmentChoice, SegmentListEvent,
    SegmentListState, next_segments,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which component receives Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    List,
    Breadcrumbs,
}

/// TUI-specific presentation state
pub struct TuiState {
    pub breadcrumbs: LocationBreadcrumbBarState,
    pub segments: SegmentListState,
    pub pane: Pane,
    pub status: String,
}

impl TuiState {
    pub fn new(separator: &str, ellipsis: &str) -> Self {
        Self {
            breadcrumbs: LocationBreadcrumbBarState::new(separator, ellipsis),
            segments: SegmentListState::new(),
            pane: Pane::List, // User expects to pick a segment immediately
            status: String::new(),
        }
    }

    /// Push the route into both components.
    pub fn sync(&mut self, route: &Route, table: &RouteTable) {
        let labels = route
            .navigatable_segments()
            .iter()
            .map(|segment| segment.label().to_string())
            .collect();
        self.breadcrumbs.set_labels(labels);
        self.segments.set_choices(next_segments(table, route));
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub async fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let navigator = Arc::new(RouteNavigator::new("main", config.table.clone()));
    let region = NavigationRegion::new("main", navigator.clone());

    // Seed the empty route with the root segment
    let seed = NavigateRootRouteAction::new(RouteActionArgs::new(config.root_segment.clone()));
    if !seed.execute("startup", Some(&region)).await.is_success() {
        warn!("Could not start at '{}'", config.root_segment);
    }

    let mut tui = TuiState::new(&config.separator, &config.ellipsis);
    let mut shown = navigator.current();
    tui.sync(&shown, &config.table);
    tui.status = shown.to_string();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Failed to enable mouse capture: {}", e))
        .ok();

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                // Resize just needs a redraw (already flagged above)
                TuiEvent::Resize => continue,
                TuiEvent::Quit => {
                    should_quit = true;
                    break;
                }
                TuiEvent::Back => {
                    tui.status = match navigator.go_back() {
                        Ok(route) => route.to_string(),
                        Err(e) => format!("Can't go back: {e}"),
                    };
                }
                TuiEvent::FocusLeft | TuiEvent::FocusRight => {
                    tui.pane = Pane::Breadcrumbs;
                    tui.breadcrumbs.handle_event(&event);
                }
                TuiEvent::CursorUp | TuiEvent::CursorDown => {
                    tui.pane = Pane::List;
                    tui.segments.handle_event(&event);
                }
                TuiEvent::Submit => match tui.pane {
                    Pane::List => {
                        if let Some(SegmentListEvent::Open(choice)) =
                            tui.segments.handle_event(&event)
                        {
                            tui.status = open_choice(&region, &choice).await;
                        }
                    }
                    Pane::Breadcrumbs => {
                        if let Some(crumb) = tui.breadcrumbs.handle_event(&event) {
                            tui.status = on_breadcrumb(&navigator, &tui.breadcrumbs, crumb);
                        }
                    }
                },
                TuiEvent::MouseClick(_col, row) => {
                    if let Some(crumb) = tui.breadcrumbs.handle_event(&event) {
                        tui.pane = Pane::Breadcrumbs;
                        tui.status = on_breadcrumb(&navigator, &tui.breadcrumbs, crumb);
                    } else {
                        let frame_area = terminal.get_frame().area();
                        let hit = ui::hit_test_segment(
                            row,
                            frame_area,
                            tui.segments.list_state.offset(),
                            tui.segments.choices.len(),
                        );
                        if let Some(index) = hit {
                            tui.pane = Pane::List;
                            tui.segments.select(index);
                            if let Some(choice) = tui.segments.selected().cloned() {
                                tui.status = open_choice(&region, &choice).await;
                            }
                        }
                    }
                }
            }

            // Only a route change resets the list selection
            let current = navigator.current();
            if current != shown {
                tui.sync(&current, &config.table);
                shown = current;
            }
        }

        if should_quit {
            break;
        }
    }

    info!("Leaving at {}", navigator.current());
    ratatui::restore();
    Ok(())
}

/// Navigate into a list choice. Returns the status line text.
async fn open_choice(region: &NavigationRegion, choice: &SegmentChoice) -> String {
    let mut args = RouteActionArgs::new(choice.segment.clone());
    if let Some(primitive) = &choice.primitive {
        let bag = NavigationDataMap::with_entries([(
            choice.segment.clone(),
            load_value(&choice.segment, primitive),
        )]);
        args = args
            .with_primitive(primitive.clone())
            .with_data(bag.into_shared());
    }

    let action = NavigateLocalRouteAction::new(args);
    match action.execute("segment-list", Some(region)).await {
        NavigationResponse::Navigated(route) => match describe_leaf(&route).await {
            Some(value) => format!("{route}  ({value})"),
            None => route.to_string(),
        },
        NavigationResponse::Failed => format!("Could not open {}", choice.label()),
    }
}

/// Stand-in for fetching the record behind a data segment's key.
fn load_value(segment: &str, primitive: &str) -> AsyncData {
    let record = format!("{segment} #{primitive}");
    AsyncData::new(async move {
        let value: DataValue = Arc::new(record);
        value
    })
}

async fn describe_leaf(route: &Route) -> Option<String> {
    let Some(SegmentInstance::Data(leaf)) = route.last() else {
        return None;
    };
    let value = leaf.value.as_ref()?.resolve().await;
    value.downcast_ref::<String>().cloned()
}

fn on_breadcrumb(
    navigator: &RouteNavigator,
    breadcrumbs: &LocationBreadcrumbBarState,
    event: BreadcrumbEvent,
) -> String {
    match event {
        BreadcrumbEvent::ItemClicked(index) => match navigator.navigate_to_breadcrumb(index) {
            Ok(route) => route.to_string(),
            Err(e) => format!("Can't go there: {e}"),
        },
        BreadcrumbEvent::EllipsisClicked { hidden } => {
            let labels: Vec<&str> = hidden
                .iter()
                .filter_map(|&i| breadcrumbs.labels().get(i).map(String::as_str))
                .collect();
            format!("Hidden: {}", labels.join(" › "))
        }
    }
}
