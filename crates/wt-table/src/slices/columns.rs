//! The columns slice: which columns the table shows, in which order.

use std::sync::Arc;

use wt_hal::{QueryColumn, QueryResource};

use crate::slice::QueryStateSlice;
use crate::space::QuerySpace;

/// Drives the ordered list of visible columns.
///
/// Column identity is the link: two lists differ when their ordered id
/// sequences differ, regardless of display names. Any column change
/// rebuilds the table, so `apply_to_query` always requests a re-render.
pub struct ColumnsService {
    space: Arc<QuerySpace>,
}

impl ColumnsService {
    #[must_use]
    pub const fn new(space: Arc<QuerySpace>) -> Self {
        Self { space }
    }

    /// The currently visible columns, in render order.
    #[must_use]
    pub fn current(&self) -> Vec<QueryColumn> {
        self.space.columns.value_or(Vec::new())
    }

    /// Every column the schema offers for this query.
    #[must_use]
    pub fn all(&self) -> Vec<QueryColumn> {
        self.space.available_columns.value_or(Vec::new())
    }

    /// Replace the visible set wholesale.
    pub fn set_columns(&self, columns: Vec<QueryColumn>) {
        self.update(columns);
    }

    /// Replace the visible set by id, resolving each against the
    /// available columns. Ids the schema does not advertise are skipped.
    pub fn set_columns_by_id(&self, ids: &[&str]) {
        let available = self.all();
        let columns = ids
            .iter()
            .filter_map(|id| {
                let found = available.iter().find(|column| column.id == *id).cloned();
                if found.is_none() {
                    tracing::debug!(id, "ignoring unknown column id");
                }
                found
            })
            .collect();
        self.update(columns);
    }

    /// Append a column at the end, or move it to `position` when given.
    /// No-op if the column is already visible.
    pub fn add_column(&self, column: QueryColumn, position: Option<usize>) {
        let mut columns = self.current();
        if columns.iter().any(|existing| *existing == column) {
            return;
        }
        let index = position.map_or(columns.len(), |at| at.min(columns.len()));
        columns.insert(index, column);
        self.update(columns);
    }

    pub fn remove_column(&self, column: &QueryColumn) {
        let mut columns = self.current();
        let before = columns.len();
        columns.retain(|existing| existing != column);
        if columns.len() != before {
            self.update(columns);
        }
    }

    /// Move an already visible column to a new position.
    pub fn move_column(&self, column: &QueryColumn, position: usize) {
        let mut columns = self.current();
        let Some(index) = columns.iter().position(|existing| existing == column) else {
            return;
        };
        let moved = columns.remove(index);
        let target = position.min(columns.len());
        columns.insert(target, moved);
        self.update(columns);
    }

    #[must_use]
    pub fn is_visible(&self, column: &QueryColumn) -> bool {
        self.current().iter().any(|existing| existing == column)
    }
}

impl QueryStateSlice for ColumnsService {
    type Value = Vec<QueryColumn>;

    fn value_from_query(&self, query: &QueryResource) -> Self::Value {
        query.columns()
    }

    fn has_changed(&self, query: &QueryResource) -> bool {
        let ids = |columns: &[QueryColumn]| -> Vec<String> {
            columns.iter().map(|column| column.id.clone()).collect()
        };
        ids(&self.value_from_query(query)) != ids(&self.current())
    }

    fn apply_to_query(&self, query: &QueryResource) -> bool {
        query.set_columns(&self.current());
        true
    }

    fn update(&self, value: Self::Value) {
        self.space.columns.put(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{query_fixture, seeded_space};
    use pretty_assertions::assert_eq;

    fn service() -> ColumnsService {
        ColumnsService::new(seeded_space())
    }

    fn ids(service: &ColumnsService) -> Vec<String> {
        service
            .current()
            .iter()
            .map(|column| column.id.clone())
            .collect()
    }

    #[test]
    fn initialize_reads_the_query_columns_in_order() {
        let service = service();
        service.initialize(&query_fixture());
        assert_eq!(ids(&service), vec!["id", "subject"]);
    }

    #[test]
    fn set_columns_by_id_resolves_against_available_and_skips_unknown() {
        let service = service();
        service.set_columns_by_id(&["status", "bogus", "subject"]);
        assert_eq!(ids(&service), vec!["status", "subject"]);
    }

    #[test]
    fn add_column_appends_or_inserts_and_dedupes() {
        let service = service();
        service.initialize(&query_fixture());
        let available = service.all();
        let status = available.iter().find(|c| c.id == "status").unwrap().clone();

        service.add_column(status.clone(), None);
        assert_eq!(ids(&service), vec!["id", "subject", "status"]);

        // Already visible, nothing happens.
        service.add_column(status, Some(0));
        assert_eq!(ids(&service), vec!["id", "subject", "status"]);

        let priority = available
            .iter()
            .find(|c| c.id == "priority")
            .unwrap()
            .clone();
        service.add_column(priority, Some(1));
        assert_eq!(ids(&service), vec!["id", "priority", "subject", "status"]);
    }

    #[test]
    fn move_column_reorders_within_bounds() {
        let service = service();
        service.set_columns_by_id(&["id", "subject", "status"]);
        let status = service.current()[2].clone();

        service.move_column(&status, 0);
        assert_eq!(ids(&service), vec!["status", "id", "subject"]);

        let id = service.current()[1].clone();
        service.move_column(&id, 99);
        assert_eq!(ids(&service), vec!["status", "subject", "id"]);
    }

    #[test]
    fn remove_column_drops_only_matches() {
        let service = service();
        service.initialize(&query_fixture());
        let subject = service.current()[1].clone();

        service.remove_column(&subject);
        assert_eq!(ids(&service), vec!["id"]);

        service.remove_column(&subject);
        assert_eq!(ids(&service), vec!["id"]);
    }

    #[test]
    fn diff_is_by_ordered_ids_and_apply_rerenders() {
        let service = service();
        let query = query_fixture();
        service.initialize(&query);
        assert!(!service.has_changed(&query));

        service.set_columns_by_id(&["subject", "id"]);
        assert!(service.has_changed(&query));

        assert!(service.apply_to_query(&query));
        assert!(!service.has_changed(&query));
        assert_eq!(
            query
                .columns()
                .iter()
                .map(|c| c.id.clone())
                .collect::<Vec<_>>(),
            vec!["subject", "id"]
        );
    }
}
