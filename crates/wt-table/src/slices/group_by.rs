//! The group-by slice: which column rows are grouped under.

use std::sync::Arc;

use wt_hal::{QueryColumn, QueryResource};

use crate::slice::QueryStateSlice;
use crate::space::QuerySpace;

/// Drives the query's `groupBy` criterion.
///
/// "No grouping" is a defined absent state (`None`), not an error.
/// Attempts to group by a column the backend does not advertise as
/// groupable are silently ignored.
pub struct GroupByService {
    space: Arc<QuerySpace>,
}

impl GroupByService {
    #[must_use]
    pub const fn new(space: Arc<QuerySpace>) -> Self {
        Self { space }
    }

    #[must_use]
    pub fn current(&self) -> Option<QueryColumn> {
        self.space.group_by.value_or(None)
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.current().is_some()
    }

    /// Columns the backend accepts for grouping.
    #[must_use]
    pub fn available(&self) -> Vec<QueryColumn> {
        self.space.groupable_columns.value_or(Vec::new())
    }

    #[must_use]
    pub fn is_groupable(&self, column: &QueryColumn) -> bool {
        self.available()
            .iter()
            .any(|candidate| candidate.id == column.id)
    }

    #[must_use]
    pub fn is_currently_grouped_by(&self, column: &QueryColumn) -> bool {
        self.current().is_some_and(|current| current.id == column.id)
    }

    /// Group by `column`, provided the backend advertises it as
    /// groupable. Otherwise nothing happens.
    pub fn set_by(&self, column: &QueryColumn) {
        let Some(group_by) = self
            .available()
            .into_iter()
            .find(|candidate| candidate.id == column.id)
        else {
            tracing::debug!(column = %column.id, "ignoring group-by on non-groupable column");
            return;
        };
        self.update(Some(group_by));
    }

    /// Switch grouping off.
    pub fn disable(&self) {
        self.update(None);
    }
}

impl QueryStateSlice for GroupByService {
    type Value = Option<QueryColumn>;

    fn value_from_query(&self, query: &QueryResource) -> Self::Value {
        query.group_by()
    }

    fn has_changed(&self, query: &QueryResource) -> bool {
        query.group_by() != self.current()
    }

    fn apply_to_query(&self, query: &QueryResource) -> bool {
        query.set_group_by(self.current().as_ref());
        true
    }

    fn update(&self, value: Self::Value) {
        self.space.group_by.put(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{query_fixture, seeded_space};
    use pretty_assertions::assert_eq;

    fn service() -> GroupByService {
        GroupByService::new(seeded_space())
    }

    #[test]
    fn value_from_query_reads_the_group_by_link() {
        let service = service();
        let value = service.value_from_query(&query_fixture());
        assert_eq!(value.unwrap().id, "status");
    }

    #[test]
    fn has_changed_is_false_right_after_initialize() {
        let service = service();
        let query = query_fixture();
        service.initialize(&query);
        assert!(!service.has_changed(&query));
    }

    #[test]
    fn set_by_only_accepts_groupable_columns() {
        let service = service();

        service.set_by(&QueryColumn::new("subject"));
        assert_eq!(service.current(), None);

        service.set_by(&QueryColumn::new("assignee"));
        assert_eq!(service.current().unwrap().id, "assignee");
        assert!(service.is_enabled());
    }

    #[test]
    fn disable_is_a_defined_absent_state() {
        let service = service();
        service.set_by(&QueryColumn::new("status"));
        service.disable();
        assert_eq!(service.current(), None);
        assert!(!service.is_enabled());
    }

    #[test]
    fn apply_writes_back_and_requires_rerender() {
        let service = service();
        let query = query_fixture();
        service.initialize(&query);
        service.disable();

        assert!(service.has_changed(&query));
        assert!(service.apply_to_query(&query));
        assert_eq!(query.group_by(), None);
        assert!(!service.has_changed(&query));
    }

    #[test]
    fn is_currently_grouped_by_compares_ids() {
        let service = service();
        service.set_by(&QueryColumn::new("status"));
        assert!(service.is_currently_grouped_by(&QueryColumn::new("status")));
        assert!(!service.is_currently_grouped_by(&QueryColumn::new("assignee")));
    }
}
