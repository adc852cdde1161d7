//! # Routing
//!
//! The route model. Pure values, no I/O, no UI.
//!
//! ```text
//!   segment definitions (config, shared by Arc)
//!            │
//!            ▼
//!   Route ── add_name / add_data / remove / go_back ──► new Route
//!     │
//!     └── navigatable_segments() ──► breadcrumb trail
//! ```
//!
//! ## Modules
//!
//! - [`segment`]: `NameSegment`, `DataSegment`, `RouteSegment`
//! - [`instance`]: `SegmentInstance` and the `AsyncData` handle
//! - [`data`]: the `NavigationData` bag
//! - [`route`]: `Route` and its edits
//! - [`table`]: segment lookups built from config

pub mod data;
pub mod error;
pub mod instance;
pub mod route;
pub mod segment;
pub mod table;

pub use data::{NavigationData, NavigationDataMap};
pub use error::RouteError;
pub use instance::{
    AsyncData, DataSegmentInstance, DataValue, DialogSegmentInstance, NameSegmentInstance,
    SegmentInstance,
};
pub use route::Route;
pub use segment::{DataSegment, NameSegment, RouteSegment};
pub use table::{RouteTable, SegmentEntry, SegmentKind, TableError};
