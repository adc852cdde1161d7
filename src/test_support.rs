//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::navigation::{NavigateRequest, NavigationResponse, Navigator};
use crate::routing::{DataSegment, NameSegment, Route, RouteTable, SegmentEntry};

/// A navigator that records what it was asked to do and always succeeds.
pub struct RecordingNavigator {
    name: String,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl RecordingNavigator {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn routes(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(r, _)| r.clone()).collect()
    }

    pub fn primitives(&self) -> Vec<Option<String>> {
        self.calls.lock().unwrap().iter().map(|(_, p)| p.clone()).collect()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn navigate_route(&self, request: NavigateRequest<'_>) -> NavigationResponse {
        self.calls.lock().unwrap().push((
            request.route.to_string(),
            request.primitive.map(str::to_string),
        ));
        NavigationResponse::Navigated(Route::empty())
    }
}

/// Unrelated top-level name segments.
pub fn names<const N: usize>(labels: [&str; N]) -> [Arc<NameSegment>; N] {
    labels.map(|name| Arc::new(NameSegment::new(name)))
}

/// `item` data segment anchored at `items`.
pub fn item_data() -> Arc<DataSegment> {
    Arc::new(DataSegment::new("item", Arc::new(NameSegment::new("items"))))
}

/// home → items → {item} → details, home → settings
pub fn demo_entries() -> Vec<SegmentEntry> {
    crate::core::config::default_segments()
}

pub fn demo_table() -> Arc<RouteTable> {
    Arc::new(RouteTable::from_entries(&demo_entries()).unwrap())
}
