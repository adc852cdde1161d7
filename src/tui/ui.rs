use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::tui::component::Component;
use crate::tui::components::{LocationBreadcrumbBar, SegmentList};
use crate::tui::{Pane, TuiState};

/// Breadcrumb bar, segment list, status line.
fn layout(area: Rect) -> [Rect; 3] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(1)]).areas(area)
}

pub fn draw_ui(frame: &mut Frame, tui: &mut TuiState) {
    let [bar_area, list_area, status_area] = layout(frame.area());

    LocationBreadcrumbBar::new(&mut tui.breadcrumbs, tui.pane == Pane::Breadcrumbs)
        .render(frame, bar_area);
    SegmentList::new(&mut tui.segments, tui.pane == Pane::List).render(frame, list_area);

    frame.render_widget(
        Span::styled(tui.status.as_str(), Style::default().fg(Color::DarkGray)),
        status_area,
    );
}

/// Hit test: given a screen Y coordinate, find which segment list row (if
/// any) is at that position.
pub fn hit_test_segment(
    screen_y: u16,
    frame_area: Rect,
    scroll_offset: usize,
    choice_count: usize,
) -> Option<usize> {
    let [_bar_area, list_area, _status_area] = layout(frame_area);

    // Rows inside the list's border
    let first_row = list_area.y + 1;
    let end_row = (list_area.y + list_area.height).saturating_sub(1);
    if screen_y < first_row || screen_y >= end_row {
        return None;
    }

    let index = usize::from(screen_y - first_row) + scroll_offset;
    (index < choice_count).then_some(index)
}
