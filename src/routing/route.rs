//! # Route
//!
//! An immutable path of segment instances plus the navigation data that goes
//! with it. Every edit returns a new `Route`; the receiver is never touched,
//! so older routes (history, other scopes) stay valid.
//!
//! ```text
//! Route
//! ├── segments: Arc<[SegmentInstance]>        // shared, never mutated
//! ├── data: Option<Arc<dyn NavigationData>>   // key → eventual value
//! └── refresh: bool                            // forwarded, never read here
//! ```
//!
//! Structural rule: a data instance is always directly preceded by the name
//! instance that anchors it. `add_data` inserts the pair together, so a route
//! built through this API can't break the rule.

use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use super::data::{NavigationData, without_keys};
use super::error::RouteError;
use super::instance::{AsyncData, SegmentInstance};
use super::segment::{DataSegment, NameSegment};

#[derive(Clone)]
pub struct Route {
    segments: Arc<[SegmentInstance]>,
    data: Option<Arc<dyn NavigationData>>,
    refresh: bool,
}

impl Default for Route {
    fn default() -> Self {
        Self::empty()
    }
}

impl Route {
    /// The seed every navigation scope starts from.
    pub fn empty() -> Self {
        Self {
            segments: Arc::from(Vec::new()),
            data: None,
            refresh: false,
        }
    }

    /// Builds a route from raw parts without checking anchors.
    pub fn new(
        segments: impl Into<Arc<[SegmentInstance]>>,
        data: Option<Arc<dyn NavigationData>>,
        refresh: bool,
    ) -> Self {
        Self {
            segments: segments.into(),
            data,
            refresh,
        }
    }

    /// Like [`Route::new`], but rejects a data instance that isn't directly
    /// preceded by the name instance its definition points at.
    pub fn try_from_segments(
        segments: Vec<SegmentInstance>,
        data: Option<Arc<dyn NavigationData>>,
        refresh: bool,
    ) -> Result<Self, RouteError> {
        for (index, instance) in segments.iter().enumerate() {
            let SegmentInstance::Data(data_instance) = instance else {
                continue;
            };
            let anchored = index
                .checked_sub(1)
                .and_then(|prev| segments.get(prev))
                .is_some_and(|prev| match prev {
                    SegmentInstance::Name(name) => {
                        name.segment == data_instance.segment.parent_name_segment
                    }
                    _ => false,
                });
            if !anchored {
                return Err(RouteError::MisplacedDataSegment { index });
            }
        }
        Ok(Self::new(segments, data, refresh))
    }

    pub fn segments(&self) -> &[SegmentInstance] {
        &self.segments
    }

    pub fn data(&self) -> Option<&Arc<dyn NavigationData>> {
        self.data.as_ref()
    }

    pub fn refresh(&self) -> bool {
        self.refresh
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&SegmentInstance> {
        self.segments.last()
    }

    pub fn with_data(&self, data: Option<Arc<dyn NavigationData>>) -> Self {
        Self {
            segments: self.segments.clone(),
            data,
            refresh: self.refresh,
        }
    }

    pub fn with_refresh(&self, refresh: bool) -> Self {
        Self {
            segments: self.segments.clone(),
            data: self.data.clone(),
            refresh,
        }
    }

    /// Route with the first `len` segments and the given bag.
    fn truncated(&self, len: usize, data: Option<Arc<dyn NavigationData>>) -> Self {
        Self {
            segments: Arc::from(&self.segments[..len]),
            data,
            refresh: self.refresh,
        }
    }

    fn appended(&self, tail: &[SegmentInstance]) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + tail.len());
        segments.extend_from_slice(&self.segments);
        segments.extend_from_slice(tail);
        Self {
            segments: Arc::from(segments),
            data: self.data.clone(),
            refresh: self.refresh,
        }
    }

    fn data_without(&self, keys: &[&str]) -> Option<Arc<dyn NavigationData>> {
        if keys.is_empty() {
            return self.data.clone();
        }
        self.data.as_ref().map(|bag| without_keys(bag, keys))
    }

    /// One logical step back.
    ///
    /// - empty route: returned unchanged
    /// - trailing name: drops it
    /// - trailing data: drops it together with its anchor and removes its
    ///   entry from the navigation data
    /// - trailing dialog: `UnsupportedOperation`
    pub fn go_back(&self) -> Result<Route, RouteError> {
        let Some(last) = self.segments.last() else {
            return Ok(self.clone());
        };

        match last {
            SegmentInstance::Name(instance) => {
                debug!("go_back: dropping name segment '{}'", instance.segment.name);
                Ok(self.truncated(self.segments.len() - 1, self.data.clone()))
            }
            SegmentInstance::Data(instance) => {
                debug!(
                    "go_back: dropping data segment '{}' ({}) and its anchor",
                    instance.segment.name, instance.primitive
                );
                // The returned route carries the pruned bag. Keeping the old
                // bag here would leave a stale entry for the dropped segment.
                let data = self.data_without(&[instance.segment.name.as_str()]);
                let keep = self.segments.len().saturating_sub(2);
                Ok(self.truncated(keep, data))
            }
            SegmentInstance::Dialog(_) => Err(RouteError::UnsupportedOperation(
                "dialog segments must not be last".to_string(),
            )),
        }
    }

    /// Drops the last `count` segments and removes every data key among them
    /// from the navigation data in one batch.
    pub fn remove(&self, count: usize) -> Result<Route, RouteError> {
        let len = self.segments.len();
        if count > len {
            return Err(RouteError::OutOfRange { count, len });
        }
        if count == 0 {
            return Ok(self.clone());
        }

        let keep = len - count;
        let mut keys: Vec<&str> = self.segments[keep..]
            .iter()
            .filter_map(SegmentInstance::data_key)
            .collect();
        keys.sort_unstable();
        keys.dedup();

        debug!("remove: dropping {count} of {len} segments (data keys: {keys:?})");
        Ok(self.truncated(keep, self.data_without(&keys)))
    }

    /// Appends a single name instance. Navigation data is untouched.
    pub fn add_name(&self, segment: Arc<NameSegment>) -> Route {
        debug!("add: name segment '{}'", segment.name);
        self.appended(&[SegmentInstance::name(segment)])
    }

    /// Appends the data segment's anchoring name instance followed by the
    /// data instance itself.
    ///
    /// The anchor comes from the definition, never from the caller. The
    /// navigation data is *not* updated: callers insert `value` into the bag
    /// under the segment's name themselves.
    pub fn add_data(
        &self,
        segment: Arc<DataSegment>,
        primitive: impl Into<String>,
        value: Option<AsyncData>,
    ) -> Route {
        let primitive = primitive.into();
        debug!(
            "add: data segment '{}' = {} (anchor '{}')",
            segment.name, primitive, segment.parent_name_segment.name
        );
        let anchor = SegmentInstance::name(segment.parent_name_segment.clone());
        self.appended(&[anchor, SegmentInstance::data(segment, primitive, value)])
    }

    /// Raw indices of the segments that count as separate navigation steps.
    ///
    /// Walks adjacent pairs `(current, next)`: `current` is kept unless `next`
    /// is a data instance (then `current` is just that data's anchor). The
    /// last segment is always appended, whatever its kind.
    pub fn navigatable_indices(&self) -> Vec<usize> {
        let len = self.segments.len();
        if len < 2 {
            return (0..len).collect();
        }

        let mut indices: Vec<usize> = self
            .segments
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| !pair[1].is_data())
            .map(|(index, _)| index)
            .collect();
        indices.push(len - 1);
        trace!("navigatable indices of {len} segments: {indices:?}");
        indices
    }

    /// Segments shown as breadcrumb steps: `(name, data)` anchor pairs
    /// collapse into their data instance.
    pub fn navigatable_segments(&self) -> Vec<SegmentInstance> {
        if self.segments.len() < 2 {
            return self.segments.to_vec();
        }
        self.navigatable_indices()
            .into_iter()
            .map(|index| self.segments[index].clone())
            .collect()
    }

    /// Route ending at navigatable step `index`, for "breadcrumb item N
    /// clicked". Everything after that step is removed via [`Route::remove`].
    pub fn truncate_to_navigatable(&self, index: usize) -> Result<Route, RouteError> {
        let indices = self.navigatable_indices();
        let raw = *indices
            .get(index)
            .ok_or(RouteError::NavigatableIndexOutOfRange {
                index,
                len: indices.len(),
            })?;
        self.remove(self.segments.len() - raw - 1)
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        let same_data = match (&self.data, &other.data) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.refresh == other.refresh && same_data && self.segments == other.segments
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("segments", &self.segments)
            .field("data", &self.data)
            .field("refresh", &self.refresh)
            .finish()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in self.segments.iter() {
            write!(f, "/{}", segment.label())?;
        }
        Ok(())
    }
}
