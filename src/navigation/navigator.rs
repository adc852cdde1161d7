use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::routing::{NavigationData, Route};

/// Everything a navigator needs to perform one navigation.
pub struct NavigateRequest<'a> {
    /// Who asked (a UI element id, a test name). Only used for logging.
    pub origin: &'a str,
    /// Route expression, resolved by the navigator.
    pub route: &'a str,
    /// Raw key for a data segment, e.g. `"42"`.
    pub primitive: Option<&'a str>,
    pub data: Option<Arc<dyn NavigationData>>,
}

impl fmt::Debug for NavigateRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigateRequest")
            .field("origin", &self.origin)
            .field("route", &self.route)
            .field("primitive", &self.primitive)
            .field("data_keys", &self.data.as_ref().map(|d| d.keys()))
            .finish()
    }
}

/// Outcome of a navigation. Dispatch failures are a sentinel, not an error:
/// the triggering layer only needs to know whether it worked.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationResponse {
    Navigated(Route),
    Failed,
}

impl NavigationResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, NavigationResponse::Navigated(_))
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            NavigationResponse::Navigated(route) => Some(route),
            NavigationResponse::Failed => None,
        }
    }
}

#[async_trait]
pub trait Navigator: Send + Sync {
    /// Returns the name of the navigator.
    fn name(&self) -> &str;

    /// Navigates to `request.route`, returning the resulting route or `Failed`.
    async fn navigate_route(&self, request: NavigateRequest<'_>) -> NavigationResponse;
}
