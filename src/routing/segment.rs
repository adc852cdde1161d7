//! # Segment Definitions
//!
//! The static shape a route may take. Definitions are configuration: built
//! once (usually by [`RouteTable`](super::table::RouteTable)), shared through
//! `Arc`, and never mutated while navigating.
//!
//! ```text
//! home ─► items ─► {item} ─► details
//!  name    name     data      name (parent data: item)
//! ```

use std::fmt;
use std::sync::Arc;

/// A static path component.
///
/// A name segment may itself be the anchor of a following data segment, and
/// may sit below a data segment (e.g. `details` under `{item}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameSegment {
    pub name: String,
    pub parent_data_segment: Option<Arc<DataSegment>>,
}

impl NameSegment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_data_segment: None,
        }
    }

    /// A name segment nested under a data segment.
    pub fn under(name: impl Into<String>, parent: Arc<DataSegment>) -> Self {
        Self {
            name: name.into(),
            parent_data_segment: Some(parent),
        }
    }
}

/// A parameterized path component, always bound to exactly one anchoring
/// name segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataSegment {
    pub name: String,
    pub parent_name_segment: Arc<NameSegment>,
}

impl DataSegment {
    pub fn new(name: impl Into<String>, parent_name_segment: Arc<NameSegment>) -> Self {
        Self {
            name: name.into(),
            parent_name_segment,
        }
    }
}

/// Closed set of segment definition kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteSegment {
    Name(Arc<NameSegment>),
    Data(Arc<DataSegment>),
    /// Reserved for modal steps. Carries no definition yet.
    Dialog,
}

impl RouteSegment {
    /// The definition's key, `None` for dialogs.
    pub fn name(&self) -> Option<&str> {
        match self {
            RouteSegment::Name(segment) => Some(&segment.name),
            RouteSegment::Data(segment) => Some(&segment.name),
            RouteSegment::Dialog => None,
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self, RouteSegment::Data(_))
    }
}

impl fmt::Display for RouteSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteSegment::Name(segment) => write!(f, "{}", segment.name),
            RouteSegment::Data(segment) => write!(f, "{{{}}}", segment.name),
            RouteSegment::Dialog => write!(f, "<dialog>"),
        }
    }
}
