//! The uniform contract shared by all state-slice services.

use wt_hal::QueryResource;

/// One named, independently updatable piece of per-table UI state.
///
/// Comparisons against the query are structural, never by instance:
/// resources are routinely re-fetched into new objects carrying the same
/// semantic identity, so implementations compare links and ids.
pub trait QueryStateSlice {
    /// The slice's value type.
    type Value: Clone;

    /// Pure extraction of this slice's value from a query resource,
    /// defaults applied.
    fn value_from_query(&self, query: &QueryResource) -> Self::Value;

    /// Whether the live value differs from what the query currently
    /// persists.
    fn has_changed(&self, query: &QueryResource) -> bool;

    /// Write the live value onto the query in preparation for a save.
    ///
    /// Returns whether the table needs a full re-render as a consequence:
    /// reordering/regrouping slices answer `true`, purely visual slices
    /// answer `false`.
    fn apply_to_query(&self, query: &QueryResource) -> bool;

    /// Mutate the live slice and publish to all subscribers
    /// synchronously.
    fn update(&self, value: Self::Value);

    /// Seed the slice from a freshly opened query.
    fn initialize(&self, query: &QueryResource) {
        self.update(self.value_from_query(query));
    }
}
