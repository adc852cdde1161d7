//! # Route Table
//!
//! Segment-definition lookups: given a name, return its configured
//! definition. Built once from config entries, then shared read-only.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use super::segment::{DataSegment, NameSegment, RouteSegment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    #[default]
    Name,
    Data,
}

/// One `[[segments]]` entry of the config file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SegmentEntry {
    pub name: String,
    #[serde(default)]
    pub kind: SegmentKind,
    pub parent: Option<String>,
    /// Sample primitive values offered for a data segment.
    #[serde(default)]
    pub values: Vec<String>,
}

impl SegmentEntry {
    pub fn name(name: &str, parent: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            kind: SegmentKind::Name,
            parent: parent.map(str::to_string),
            values: Vec::new(),
        }
    }

    pub fn data(name: &str, parent: &str, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: SegmentKind::Data,
            parent: Some(parent.to_string()),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    DuplicateSegment(String),
    UnknownParent { segment: String, parent: String },
    /// A data segment whose parent is not a name segment.
    ParentKindMismatch { segment: String, parent: String },
    /// A data segment without a parent.
    MissingParent(String),
    Cycle(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::DuplicateSegment(name) => write!(f, "segment '{name}' defined twice"),
            TableError::UnknownParent { segment, parent } => {
                write!(f, "segment '{segment}' has unknown parent '{parent}'")
            }
            TableError::ParentKindMismatch { segment, parent } => write!(
                f,
                "data segment '{segment}' must have a name segment parent, '{parent}' is data"
            ),
            TableError::MissingParent(name) => {
                write!(f, "data segment '{name}' needs a parent name segment")
            }
            TableError::Cycle(name) => write!(f, "segment '{name}' is its own ancestor"),
        }
    }
}

impl std::error::Error for TableError {}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<SegmentEntry>,
    segments: HashMap<String, RouteSegment>,
}

impl RouteTable {
    pub fn from_entries(entries: &[SegmentEntry]) -> Result<Self, TableError> {
        let mut by_name: HashMap<&str, &SegmentEntry> = HashMap::new();
        for entry in entries {
            if by_name.insert(&entry.name, entry).is_some() {
                return Err(TableError::DuplicateSegment(entry.name.clone()));
            }
        }

        let mut segments = HashMap::new();
        for entry in entries {
            let mut visiting = HashSet::new();
            build(&entry.name, &by_name, &mut segments, &mut visiting)?;
        }

        debug!("Route table built with {} segments", segments.len());
        Ok(Self {
            entries: entries.to_vec(),
            segments,
        })
    }

    pub fn segment(&self, name: &str) -> Option<&RouteSegment> {
        self.segments.get(name)
    }

    pub fn name_segment(&self, name: &str) -> Option<Arc<NameSegment>> {
        match self.segments.get(name)? {
            RouteSegment::Name(segment) => Some(segment.clone()),
            _ => None,
        }
    }

    pub fn data_segment(&self, name: &str) -> Option<Arc<DataSegment>> {
        match self.segments.get(name)? {
            RouteSegment::Data(segment) => Some(segment.clone()),
            _ => None,
        }
    }

    /// Entries whose parent is `name`, in declaration order.
    pub fn children(&self, name: &str) -> Vec<&SegmentEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.parent.as_deref() == Some(name))
            .collect()
    }

    pub fn roots(&self) -> Vec<&SegmentEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.parent.is_none())
            .collect()
    }

    pub fn entry(&self, name: &str) -> Option<&SegmentEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Builds `name` after its ancestors, memoizing into `segments`.
fn build(
    name: &str,
    by_name: &HashMap<&str, &SegmentEntry>,
    segments: &mut HashMap<String, RouteSegment>,
    visiting: &mut HashSet<String>,
) -> Result<RouteSegment, TableError> {
    if let Some(segment) = segments.get(name) {
        return Ok(segment.clone());
    }
    if !visiting.insert(name.to_string()) {
        return Err(TableError::Cycle(name.to_string()));
    }
    // Callers only pass names that exist in the table
    let Some(entry) = by_name.get(name) else {
        return Err(TableError::UnknownParent {
            segment: name.to_string(),
            parent: name.to_string(),
        });
    };

    let parent = match &entry.parent {
        Some(parent) => {
            if !by_name.contains_key(parent.as_str()) {
                return Err(TableError::UnknownParent {
                    segment: name.to_string(),
                    parent: parent.clone(),
                });
            }
            Some(build(parent, by_name, segments, visiting)?)
        }
        None => None,
    };

    let segment = match (entry.kind, parent) {
        (SegmentKind::Name, Some(RouteSegment::Data(data))) => {
            RouteSegment::Name(Arc::new(NameSegment::under(name, data)))
        }
        (SegmentKind::Name, _) => RouteSegment::Name(Arc::new(NameSegment::new(name))),
        (SegmentKind::Data, Some(RouteSegment::Name(anchor))) => {
            RouteSegment::Data(Arc::new(DataSegment::new(name, anchor)))
        }
        (SegmentKind::Data, Some(_)) => {
            return Err(TableError::ParentKindMismatch {
                segment: name.to_string(),
                parent: entry.parent.clone().unwrap_or_default(),
            });
        }
        (SegmentKind::Data, None) => return Err(TableError::MissingParent(name.to_string())),
    };

    segments.insert(name.to_string(), segment.clone());
    Ok(segment)
}
