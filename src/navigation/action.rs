//! # Route Actions
//!
//! Triggers that a UI gesture fires to navigate. They never edit a `Route`
//! themselves: they pick a navigator from a region and hand it the route
//! expression, returning its response verbatim.
//!
//! ```text
//! NavigateRootRouteAction    sender region ──► root navigator
//! NavigateLocalRouteAction   target or sender region ──► root navigator
//! NavigateNestedRouteAction  target or sender region ──► child navigator
//! ```
//!
//! A missing region, missing child navigator or missing route expression
//! yields `NavigationResponse::Failed`.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use super::navigator::{NavigateRequest, NavigationResponse, Navigator};
use super::region::NavigationRegion;
use crate::routing::NavigationData;

/// What to navigate to. Shared by every action variant.
#[derive(Clone, Default)]
pub struct RouteActionArgs {
    pub route: Option<String>,
    pub primitive: Option<String>,
    pub navigation_data: Option<Arc<dyn NavigationData>>,
}

impl RouteActionArgs {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: Some(route.into()),
            ..Default::default()
        }
    }

    pub fn with_primitive(mut self, primitive: impl Into<String>) -> Self {
        self.primitive = Some(primitive.into());
        self
    }

    pub fn with_data(mut self, data: Arc<dyn NavigationData>) -> Self {
        self.navigation_data = Some(data);
        self
    }
}

impl fmt::Debug for RouteActionArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteActionArgs")
            .field("route", &self.route)
            .field("primitive", &self.primitive)
            .field("navigation_data", &self.navigation_data)
            .finish()
    }
}

#[async_trait]
pub trait RouteAction: Send + Sync {
    /// Runs the action on behalf of `origin`, whose own region (if any) is
    /// `sender`.
    async fn execute(&self, origin: &str, sender: Option<&NavigationRegion>)
    -> NavigationResponse;
}

async fn dispatch(
    navigator: &Arc<dyn Navigator>,
    origin: &str,
    args: &RouteActionArgs,
) -> NavigationResponse {
    let Some(route) = args.route.as_deref() else {
        warn!("Navigation from '{origin}' failed: no route set");
        return NavigationResponse::Failed;
    };
    debug!(
        "Dispatching '{route}' from '{origin}' to navigator '{}'",
        navigator.name()
    );
    navigator
        .navigate_route(NavigateRequest {
            origin,
            route,
            primitive: args.primitive.as_deref(),
            data: args.navigation_data.clone(),
        })
        .await
}

/// Navigates with the sender region's root navigator.
#[derive(Debug, Clone, Default)]
pub struct NavigateRootRouteAction {
    pub args: RouteActionArgs,
}

impl NavigateRootRouteAction {
    pub fn new(args: RouteActionArgs) -> Self {
        Self { args }
    }
}

#[async_trait]
impl RouteAction for NavigateRootRouteAction {
    async fn execute(
        &self,
        origin: &str,
        sender: Option<&NavigationRegion>,
    ) -> NavigationResponse {
        let Some(region) = sender else {
            warn!("Navigation from '{origin}' failed: no navigation region");
            return NavigationResponse::Failed;
        };
        dispatch(region.root_navigator(), origin, &self.args).await
    }
}

/// Navigates within a target region (the sender's own if none is set) using
/// its root navigator.
#[derive(Debug, Clone, Default)]
pub struct NavigateLocalRouteAction {
    pub args: RouteActionArgs,
    pub target: Option<NavigationRegion>,
}

impl NavigateLocalRouteAction {
    pub fn new(args: RouteActionArgs) -> Self {
        Self { args, target: None }
    }

    pub fn with_target(mut self, target: NavigationRegion) -> Self {
        self.target = Some(target);
        self
    }
}

#[async_trait]
impl RouteAction for NavigateLocalRouteAction {
    async fn execute(
        &self,
        origin: &str,
        sender: Option<&NavigationRegion>,
    ) -> NavigationResponse {
        let Some(region) = self.target.as_ref().or(sender) else {
            warn!("Local navigation from '{origin}' failed: no navigation region");
            return NavigationResponse::Failed;
        };
        dispatch(region.root_navigator(), origin, &self.args).await
    }
}

/// Navigates within a target region's child navigator.
#[derive(Debug, Clone, Default)]
pub struct NavigateNestedRouteAction {
    pub args: RouteActionArgs,
    pub target: Option<NavigationRegion>,
}

impl NavigateNestedRouteAction {
    pub fn new(args: RouteActionArgs) -> Self {
        Self { args, target: None }
    }

    pub fn with_target(mut self, target: NavigationRegion) -> Self {
        self.target = Some(target);
        self
    }
}

#[async_trait]
impl RouteAction for NavigateNestedRouteAction {
    async fn execute(
        &self,
        origin: &str,
        sender: Option<&NavigationRegion>,
    ) -> NavigationResponse {
        let Some(region) = self.target.as_ref().or(sender) else {
            warn!("Nested navigation from '{origin}' failed: no navigation region");
            return NavigationResponse::Failed;
        };
        let Some(child) = region.child_navigator() else {
            warn!(
                "Nested navigation from '{origin}' failed: region '{}' has no child navigator",
                region.name()
            );
            return NavigationResponse::Failed;
        };
        dispatch(child, origin, &self.args).await
    }
}
