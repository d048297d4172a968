//! The hierarchy slice: whether rows nest under their parents.

use std::sync::Arc;

use wt_hal::QueryResource;

use crate::slice::QueryStateSlice;
use crate::space::QuerySpace;

/// Drives the query's `showHierarchies` flag.
///
/// Hierarchy and group-by are mutually exclusive; the coordinator
/// enforces that, this service only owns the flag itself.
pub struct HierarchyService {
    space: Arc<QuerySpace>,
}

impl HierarchyService {
    #[must_use]
    pub const fn new(space: Arc<QuerySpace>) -> Self {
        Self { space }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.space.hierarchy.value_or(true)
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&self) -> bool {
        let enabled = !self.is_enabled();
        self.update(enabled);
        enabled
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.update(enabled);
    }
}

impl QueryStateSlice for HierarchyService {
    type Value = bool;

    fn value_from_query(&self, query: &QueryResource) -> Self::Value {
        query.show_hierarchies()
    }

    fn has_changed(&self, query: &QueryResource) -> bool {
        self.value_from_query(query) != self.is_enabled()
    }

    fn apply_to_query(&self, query: &QueryResource) -> bool {
        query.set_show_hierarchies(self.is_enabled());
        true
    }

    fn update(&self, value: Self::Value) {
        self.space.hierarchy.put(value);
    }
}
