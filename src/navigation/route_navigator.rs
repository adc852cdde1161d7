//! # Route Navigator
//!
//! A concrete [`Navigator`] that owns the current route of one navigation
//! scope. Route expressions are segment names looked up in a
//! [`RouteTable`]:
//!
//! - name segment → `Route::add_name`
//! - data segment → `Route::add_data` with the request's primitive
//!
//! `add_data` never touches the bag, so the navigator inserts the data
//! segment's value under the segment's name. That is the only key it takes
//! from a request's bag: every bag entry belongs to a data segment of the
//! route, so `go_back` and `remove` can prune it. Edits are synchronous; the
//! lock is never held across an await.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use log::{info, warn};

use super::navigator::{NavigateRequest, NavigationResponse, Navigator};
use crate::routing::{
    AsyncData, NavigationData, NavigationDataMap, Route, RouteError, RouteSegment, RouteTable,
};

pub struct RouteNavigator {
    name: String,
    table: Arc<RouteTable>,
    current: Mutex<Route>,
}

impl RouteNavigator {
    pub fn new(name: impl Into<String>, table: Arc<RouteTable>) -> Self {
        Self::with_route(name, table, Route::empty())
    }

    pub fn with_route(name: impl Into<String>, table: Arc<RouteTable>, route: Route) -> Self {
        Self {
            name: name.into(),
            table,
            current: Mutex::new(route),
        }
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    pub fn current(&self) -> Route {
        self.lock().clone()
    }

    /// One step back. The current route is kept when the step fails.
    pub fn go_back(&self) -> Result<Route, RouteError> {
        let mut current = self.lock();
        let route = current.go_back()?;
        info!("[{}] back to {}", self.name, route);
        *current = route.clone();
        Ok(route)
    }

    /// Truncates the current route to the given breadcrumb step.
    pub fn navigate_to_breadcrumb(&self, index: usize) -> Result<Route, RouteError> {
        let mut current = self.lock();
        let route = current.truncate_to_navigatable(index)?;
        info!("[{}] breadcrumb {} → {}", self.name, index, route);
        *current = route.clone();
        Ok(route)
    }

    pub fn reset(&self, route: Route) {
        *self.lock() = route;
    }

    fn lock(&self) -> MutexGuard<'_, Route> {
        // A panic mid-edit can't leave a half-written route: edits build a new
        // value and swap it in.
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, request: &NavigateRequest<'_>) -> NavigationResponse {
        let Some(segment) = self.table.segment(request.route) else {
            warn!(
                "[{}] navigation from '{}' failed: unknown segment '{}'",
                self.name, request.origin, request.route
            );
            return NavigationResponse::Failed;
        };

        let mut current = self.lock();
        let next = match segment {
            RouteSegment::Name(name) => {
                self.ignore_unowned_keys(request, None);
                current.add_name(name.clone())
            }
            RouteSegment::Data(data) => {
                let Some(primitive) = request.primitive else {
                    warn!(
                        "[{}] navigation from '{}' failed: data segment '{}' needs a value",
                        self.name, request.origin, data.name
                    );
                    return NavigationResponse::Failed;
                };
                self.ignore_unowned_keys(request, Some(data.name.as_str()));
                let value = request.data.as_ref().and_then(|bag| bag.get(&data.name));
                let next = current.add_data(data.clone(), primitive, value.clone());
                match value {
                    Some(value) => with_entry(&next, &data.name, value),
                    None => next,
                }
            }
            RouteSegment::Dialog => {
                warn!("[{}] dialog navigation is not supported", self.name);
                return NavigationResponse::Failed;
            }
        };

        info!(
            "[{}] '{}' navigated to {} (from '{}')",
            self.name, request.route, next, request.origin
        );
        *current = next.clone();
        NavigationResponse::Navigated(next)
    }

    /// Request keys other than `owner` have no segment to prune them with.
    fn ignore_unowned_keys(&self, request: &NavigateRequest<'_>, owner: Option<&str>) {
        let Some(incoming) = &request.data else {
            return;
        };
        let ignored: Vec<String> = incoming
            .keys()
            .into_iter()
            .filter(|key| Some(key.as_str()) != owner)
            .collect();
        if !ignored.is_empty() {
            warn!(
                "[{}] navigation from '{}' to '{}' ignores data keys {:?}",
                self.name, request.origin, request.route, ignored
            );
        }
    }
}

/// `route` with `key → value` added to its bag, starting a bag if it has none.
fn with_entry(route: &Route, key: &str, value: AsyncData) -> Route {
    let bag = route
        .data()
        .cloned()
        .unwrap_or_else(|| NavigationDataMap::new().into_shared());
    route.with_data(Some(bag.insert(key, value)))
}

#[async_trait]
impl Navigator for RouteNavigator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn navigate_route(&self, request: NavigateRequest<'_>) -> NavigationResponse {
        self.apply(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::demo_table;

    fn request<'a>(route: &'a str, primitive: Option<&'a str>) -> NavigateRequest<'a> {
        NavigateRequest {
            origin: "test",
            route,
            primitive,
            data: None,
        }
    }

    #[tokio::test]
    async fn test_navigates_name_segments() {
        let navigator = RouteNavigator::new("main", demo_table());
        assert!(navigator.navigate_route(request("home", None)).await.is_success());
        let response = navigator.navigate_route(request("items", None)).await;

        let route = response.route().unwrap();
        assert_eq!(route.to_string(), "/home/items");
        assert_eq!(navigator.current(), *route);
    }

    #[tokio::test]
    async fn test_unknown_segment_fails_and_keeps_route() {
        let navigator = RouteNavigator::new("main", demo_table());
        navigator.navigate_route(request("home", None)).await;
        let before = navigator.current();

        let response = navigator.navigate_route(request("nowhere", None)).await;
        assert_eq!(response, NavigationResponse::Failed);
        assert_eq!(navigator.current(), before);
    }

    #[tokio::test]
    async fn test_data_segment_needs_primitive() {
        let navigator = RouteNavigator::new("main", demo_table());
        let response = navigator.navigate_route(request("item", None)).await;
        assert_eq!(response, NavigationResponse::Failed);
        assert!(navigator.current().is_empty());
    }

    #[tokio::test]
    async fn test_data_value_lands_in_bag() {
        let navigator = RouteNavigator::new("main", demo_table());
        navigator.navigate_route(request("home", None)).await;

        let value = AsyncData::ready(42u32);
        let bag = NavigationDataMap::with_entries([("item", value.clone())]).into_shared();
        let response = navigator
            .navigate_route(NavigateRequest {
                origin: "test",
                route: "item",
                primitive: Some("42"),
                data: Some(bag),
            })
            .await;

        let route = response.route().unwrap();
        assert_eq!(route.to_string(), "/home/items/42");
        assert_eq!(route.data().unwrap().get("item"), Some(value));

        let back = navigator.go_back().unwrap();
        assert_eq!(back.to_string(), "/home");
        assert!(back.data().unwrap().get("item").is_none());
    }

    #[tokio::test]
    async fn test_name_navigation_leaves_bag_alone() {
        let navigator = RouteNavigator::new("main", demo_table());
        let bag = NavigationDataMap::with_entries([("stray", AsyncData::ready(1u32))]).into_shared();
        let response = navigator
            .navigate_route(NavigateRequest {
                origin: "test",
                route: "home",
                primitive: None,
                data: Some(bag),
            })
            .await;

        assert!(response.route().unwrap().data().is_none());
        let back = navigator.go_back().unwrap();
        assert!(back.is_empty());
        assert!(back.data().is_none());
    }

    #[tokio::test]
    async fn test_data_navigation_keeps_only_its_own_key() {
        let navigator = RouteNavigator::new("main", demo_table());
        navigator.navigate_route(request("home", None)).await;

        let bag = NavigationDataMap::with_entries([
            ("item", AsyncData::ready(1u32)),
            ("user", AsyncData::ready(2u32)),
        ])
        .into_shared();
        let response = navigator
            .navigate_route(NavigateRequest {
                origin: "test",
                route: "item",
                primitive: Some("1"),
                data: Some(bag),
            })
            .await;
        assert_eq!(response.route().unwrap().data().unwrap().keys(), ["item"]);

        let back = navigator.go_back().unwrap();
        assert_eq!(back.len(), 1);
        assert!(back.data().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_navigate_to_breadcrumb() {
        let navigator = RouteNavigator::new("main", demo_table());
        for name in ["home", "items"] {
            navigator.navigate_route(request(name, None)).await;
        }
        navigator.navigate_route(request("item", Some("7"))).await;
        navigator.navigate_route(request("details", None)).await;

        // home, items, 7, details
        let route = navigator.navigate_to_breadcrumb(1).unwrap();
        assert_eq!(route.to_string(), "/home/items");
        assert!(navigator.navigate_to_breadcrumb(5).is_err());
        assert_eq!(navigator.current(), route);
    }

    #[test]
    fn test_go_back_on_empty_route() {
        let navigator = RouteNavigator::new("main", demo_table());
        assert!(navigator.go_back().unwrap().is_empty());
    }
}
