//! Registry of live map surfaces.
//!
//! A host usually has several maps on screen and needs to route a request to
//! the right one. The registry is an explicit value the host owns and passes
//! around; there is no process-wide map.

use rustc_hash::FxHashMap;
use tracing::debug;

/// Name of a map surface within the host.
pub type SurfaceId = String;

/// Surfaces, or per-surface state such as a
/// [`DrawSessionManager`](crate::draw::DrawSessionManager), keyed by id.
#[derive(Debug)]
pub struct SurfaceRegistry<T> {
    entries: FxHashMap<SurfaceId, T>,
}

impl<T> Default for SurfaceRegistry<T> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<T> SurfaceRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` under `id`. Returns the value it replaced.
    pub fn register(&mut self, id: impl Into<SurfaceId>, value: T) -> Option<T> {
        let id = id.into();
        debug!(surface = %id, "surface registered");
        self.entries.insert(id, value)
    }

    /// Removes and returns the value under `id` so the caller can tear it down.
    pub fn unregister(&mut self, id: &str) -> Option<T> {
        let removed = self.entries.remove(id);
        if removed.is_some() {
            debug!(surface = %id, "surface unregistered");
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.entries.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the first of `candidates` that is registered.
    ///
    /// Hosts use this to find the surface a widget belongs to by walking its
    /// ancestors' ids from the innermost outwards.
    pub fn find_first<'a>(&self, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
        candidates.into_iter().find(|id| self.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_unregister() {
        let mut registry = SurfaceRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.register("main", 1), None);
        assert_eq!(registry.register("main", 2), Some(1));
        registry.register("inset", 3);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("main"), Some(&2));

        *registry.get_mut("inset").unwrap() += 1;
        assert_eq!(registry.unregister("inset"), Some(4));
        assert_eq!(registry.unregister("inset"), None);
        assert!(!registry.contains("inset"));

        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(ids, ["main"]);
    }

    #[test]
    fn test_find_first() {
        let mut registry = SurfaceRegistry::new();
        registry.register("map-2", ());
        registry.register("map-1", ());
        assert_eq!(registry.find_first(["panel", "map-1", "map-2"]), Some("map-1"));
        assert_eq!(registry.find_first(["panel", "page"]), None);
    }
}
