//! # Navigation Region
//!
//! A navigation scope, passed explicitly to whoever dispatches a navigation.
//! Each region has a root navigator and, for nested scopes, a child navigator.

use std::fmt;
use std::sync::Arc;

use super::navigator::Navigator;

#[derive(Clone)]
pub struct NavigationRegion {
    name: String,
    root: Arc<dyn Navigator>,
    child: Option<Arc<dyn Navigator>>,
}

impl NavigationRegion {
    pub fn new(name: impl Into<String>, root: Arc<dyn Navigator>) -> Self {
        Self {
            name: name.into(),
            root,
            child: None,
        }
    }

    pub fn with_child(mut self, child: Arc<dyn Navigator>) -> Self {
        self.child = Some(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root_navigator(&self) -> &Arc<dyn Navigator> {
        &self.root
    }

    pub fn child_navigator(&self) -> Option<&Arc<dyn Navigator>> {
        self.child.as_ref()
    }
}

impl fmt::Debug for NavigationRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationRegion")
            .field("name", &self.name)
            .field("root", &self.root.name())
            .field("child", &self.child.as_ref().map(|c| c.name()))
            .finish()
    }
}
