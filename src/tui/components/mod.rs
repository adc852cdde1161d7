//! # TUI Components
//!
//! All UI components of the route browser.
//!
//! Both components follow the persistent state + transient wrapper pattern:
//! the `...State` struct lives in `TuiState` across frames and implements
//! [`EventHandler`](crate::tui::component::EventHandler); the wrapper borrows
//! it for one frame and implements
//! [`Component`](crate::tui::component::Component).
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── breadcrumb_bar.rs  (trail of the current route, ellipsis overflow)
//! └── segment_list.rs    (segments reachable from the current location)
//! ```
//!
//! Components receive external data as props (the wrapper's fields or
//! `set_*` calls on the state), never by reaching into the navigator.

pub mod breadcrumb_bar;
pub mod segment_list;

pub use breadcrumb_bar::{
    BreadcrumbEvent, BreadcrumbFocus, BreadcrumbLayout, LocationBreadcrumbBar,
    LocationBreadcrumbBarState,
};
pub use segment_list::{
    SegmentChoice, SegmentList, SegmentListEvent, SegmentListState, next_segments,
};
