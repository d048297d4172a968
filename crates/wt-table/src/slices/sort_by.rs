//! The sort-by slice: the query's ordered sort criteria.

use std::sync::Arc;

use wt_core::enums::SortDirection;
use wt_hal::{QueryColumn, QueryResource, SortByCriterion};

use crate::slice::QueryStateSlice;
use crate::space::QuerySpace;

/// The backend accepts at most this many sort criteria per query.
pub const MAX_SORT_CRITERIA: usize = 3;

/// Drives the query's `sortBy` criteria list.
///
/// Criteria compare by column link and direction, never by instance.
/// Columns outside the schema's sortable set are silently ignored.
pub struct SortByService {
    space: Arc<QuerySpace>,
}

impl SortByService {
    #[must_use]
    pub const fn new(space: Arc<QuerySpace>) -> Self {
        Self { space }
    }

    #[must_use]
    pub fn current(&self) -> Vec<SortByCriterion> {
        self.space.sort_by.value_or(Vec::new())
    }

    /// Columns the backend accepts as sort criteria.
    #[must_use]
    pub fn available(&self) -> Vec<QueryColumn> {
        self.space.sortable_columns.value_or(Vec::new())
    }

    #[must_use]
    pub fn is_sortable(&self, column: &QueryColumn) -> bool {
        self.available()
            .iter()
            .any(|candidate| candidate.id == column.id)
    }

    /// The active direction for `column`, when it is the primary
    /// criterion.
    #[must_use]
    pub fn primary_direction_of(&self, column: &QueryColumn) -> Option<SortDirection> {
        let current = self.current();
        let first = current.first()?;
        (first.column == *column).then_some(first.direction)
    }

    /// Replace the whole criteria list, truncated to
    /// [`MAX_SORT_CRITERIA`].
    pub fn set(&self, mut criteria: Vec<SortByCriterion>) {
        criteria.truncate(MAX_SORT_CRITERIA);
        self.update(criteria);
    }

    /// Sort by exactly this column, dropping every other criterion.
    pub fn set_as_single(&self, column: &QueryColumn, direction: SortDirection) {
        let Some(column) = self.resolve(column) else {
            return;
        };
        self.set(vec![SortByCriterion::new(column, direction)]);
    }

    /// Prepend a criterion, deduplicating by column and truncating to
    /// [`MAX_SORT_CRITERIA`].
    pub fn add(&self, column: &QueryColumn, direction: SortDirection) {
        let Some(column) = self.resolve(column) else {
            return;
        };
        let mut criteria = self.current();
        criteria.retain(|criterion| criterion.column != column);
        criteria.insert(0, SortByCriterion::new(column, direction));
        self.set(criteria);
    }

    /// The advertised column instance matching `column`, carrying the
    /// schema's href. Criteria always store that instance so they
    /// serialize back into resolvable links.
    fn resolve(&self, column: &QueryColumn) -> Option<QueryColumn> {
        let resolved = self
            .available()
            .into_iter()
            .find(|candidate| candidate.id == column.id);
        if resolved.is_none() {
            tracing::debug!(column = %column.id, "ignoring sort on non-sortable column");
        }
        resolved
    }

    /// Make `column` the primary criterion: descending when it was not
    /// sorted on, reversed when it already was.
    pub fn toggle(&self, column: &QueryColumn) {
        let direction = self
            .primary_direction_of(column)
            .map_or(SortDirection::Desc, SortDirection::reversed);
        self.add(column, direction);
    }
}

impl QueryStateSlice for SortByService {
    type Value = Vec<SortByCriterion>;

    fn value_from_query(&self, query: &QueryResource) -> Self::Value {
        query.sort_by()
    }

    fn has_changed(&self, query: &QueryResource) -> bool {
        query.sort_by() != self.current()
    }

    fn apply_to_query(&self, query: &QueryResource) -> bool {
        query.set_sort_by(&self.current());
        true
    }

    fn update(&self, value: Self::Value) {
        self.space.sort_by.put(value);
    }
}
