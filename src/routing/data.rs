//! # Navigation Data
//!
//! The key → eventual-value bag that travels with a route. Every data
//! instance in a route should have an entry keyed by its segment's name; the
//! route removes entries when it drops data instances, but never inserts
//! them (see [`RouteNavigator`](crate::navigation::RouteNavigator)).
//!
//! Bags have value semantics: every edit returns a new bag, so two routes can
//! share one bag instance safely.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use super::instance::AsyncData;

pub trait NavigationData: Send + Sync + Debug {
    fn get(&self, key: &str) -> Option<AsyncData>;

    fn remove(&self, key: &str) -> Arc<dyn NavigationData>;

    fn remove_range(&self, keys: &[&str]) -> Arc<dyn NavigationData>;

    fn insert(&self, key: &str, value: AsyncData) -> Arc<dyn NavigationData>;

    /// Keys in unspecified order.
    fn keys(&self) -> Vec<String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Copy-on-write [`NavigationData`] over a shared hash map.
#[derive(Debug, Clone, Default)]
pub struct NavigationDataMap {
    entries: Arc<HashMap<String, AsyncData>>,
}

impl NavigationDataMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, AsyncData)>,
        K: Into<String>,
    {
        Self {
            entries: Arc::new(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.into(), value))
                    .collect(),
            ),
        }
    }

    pub fn into_shared(self) -> Arc<dyn NavigationData> {
        Arc::new(self)
    }

    fn edited(&self, edit: impl FnOnce(&mut HashMap<String, AsyncData>)) -> Arc<dyn NavigationData> {
        let mut entries = self.entries.clone();
        edit(Arc::make_mut(&mut entries));
        Arc::new(NavigationDataMap { entries })
    }
}

impl NavigationData for NavigationDataMap {
    fn get(&self, key: &str) -> Option<AsyncData> {
        self.entries.get(key).cloned()
    }

    fn remove(&self, key: &str) -> Arc<dyn NavigationData> {
        self.remove_range(&[key])
    }

    fn remove_range(&self, keys: &[&str]) -> Arc<dyn NavigationData> {
        self.edited(|entries| {
            for key in keys {
                entries.remove(*key);
            }
        })
    }

    fn insert(&self, key: &str, value: AsyncData) -> Arc<dyn NavigationData> {
        self.edited(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Removes `keys` from `bag`, handing back the same `Arc` when none of them
/// is present so unchanged routes keep sharing one bag.
pub(crate) fn without_keys(
    bag: &Arc<dyn NavigationData>,
    keys: &[&str],
) -> Arc<dyn NavigationData> {
    if keys.iter().any(|key| bag.get(key).is_some()) {
        bag.remove_range(keys)
    } else {
        bag.clone()
    }
}
