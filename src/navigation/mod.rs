//! # Navigation
//!
//! Dispatch from UI triggers to navigators. Scopes are explicit
//! [`NavigationRegion`] handles rather than something discovered from the UI
//! tree.
//!
//! ```text
//! UI gesture ──► RouteAction::execute(origin, region)
//!                    │
//!                    ▼
//!             Navigator::navigate_route ──► NavigationResponse
//!                    │
//!                    └── RouteNavigator: edits the scope's current Route
//! ```

pub mod action;
pub mod navigator;
pub mod region;
pub mod route_navigator;

pub use action::{
    NavigateLocalRouteAction, NavigateNestedRouteAction, NavigateRootRouteAction, RouteAction,
    RouteActionArgs,
};
pub use navigator::{NavigateRequest, NavigationResponse, Navigator};
pub use region::NavigationRegion;
pub use route_navigator::RouteNavigator;
