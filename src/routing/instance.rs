//! Segment instances: one per navigation step, owned by the route that
//! contains them.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};

use super::error::RouteError;
use super::segment::{DataSegment, NameSegment, RouteSegment};

/// A richly typed navigation value, type-erased.
pub type DataValue = Arc<dyn Any + Send + Sync>;

/// Handle to a data value that may still be resolving.
///
/// Cloning shares the same underlying future, so every holder can await it
/// independently. The route model only stores and forwards the handle; whoever
/// supplied it owns the resolution (and can cancel it by dropping its task).
/// Two handles are equal when they share the same future.
#[derive(Clone)]
pub struct AsyncData(Shared<BoxFuture<'static, DataValue>>);

impl AsyncData {
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = DataValue> + Send + 'static,
    {
        Self(future.boxed().shared())
    }

    /// A handle that resolves immediately to `value`.
    pub fn ready<T: Any + Send + Sync>(value: T) -> Self {
        let value: DataValue = Arc::new(value);
        Self::new(futures::future::ready(value))
    }

    /// Waits for the value. Does not consume the handle.
    pub async fn resolve(&self) -> DataValue {
        self.0.clone().await
    }

    /// The value, if some holder already drove the future to completion.
    pub fn peek(&self) -> Option<DataValue> {
        self.0.peek().cloned()
    }

    pub fn ptr_eq(&self, other: &AsyncData) -> bool {
        Shared::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for AsyncData {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for AsyncData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncData")
            .field("resolved", &self.0.peek().is_some())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NameSegmentInstance {
    pub segment: Arc<NameSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataSegmentInstance {
    pub segment: Arc<DataSegment>,
    /// Raw key used for matching and lookup (e.g. `"42"`).
    pub primitive: String,
    pub value: Option<AsyncData>,
}

/// Placeholder for modal steps. Has no backing definition yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DialogSegmentInstance;

/// One step of a [`Route`](super::route::Route).
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentInstance {
    Name(NameSegmentInstance),
    Data(DataSegmentInstance),
    Dialog(DialogSegmentInstance),
}

impl SegmentInstance {
    pub fn name(segment: Arc<NameSegment>) -> Self {
        SegmentInstance::Name(NameSegmentInstance { segment })
    }

    pub fn data(
        segment: Arc<DataSegment>,
        primitive: impl Into<String>,
        value: Option<AsyncData>,
    ) -> Self {
        SegmentInstance::Data(DataSegmentInstance {
            segment,
            primitive: primitive.into(),
            value,
        })
    }

    pub fn dialog() -> Self {
        SegmentInstance::Dialog(DialogSegmentInstance)
    }

    /// The definition this instance was created from.
    ///
    /// Dialog instances have no definition and fail with `NotImplemented`.
    pub fn segment(&self) -> Result<RouteSegment, RouteError> {
        match self {
            SegmentInstance::Name(instance) => Ok(RouteSegment::Name(instance.segment.clone())),
            SegmentInstance::Data(instance) => Ok(RouteSegment::Data(instance.segment.clone())),
            SegmentInstance::Dialog(_) => {
                Err(RouteError::NotImplemented("dialog segments have no definition"))
            }
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self, SegmentInstance::Data(_))
    }

    /// Navigation-data key of a data instance (its segment's name).
    pub fn data_key(&self) -> Option<&str> {
        match self {
            SegmentInstance::Data(instance) => Some(&instance.segment.name),
            _ => None,
        }
    }

    /// Text shown for this step in a breadcrumb trail.
    pub fn label(&self) -> &str {
        match self {
            SegmentInstance::Name(instance) => &instance.segment.name,
            SegmentInstance::Data(instance) => &instance.primitive,
            SegmentInstance::Dialog(_) => "dialog",
        }
    }
}
