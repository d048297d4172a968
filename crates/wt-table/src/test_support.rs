//! Shared fixtures for slice service tests.

use std::sync::Arc;

use serde_json::json;
use wt_hal::{QueryResource, QuerySchemaResource};

use crate::space::QuerySpace;

/// A loaded query document with every display option set.
pub fn query_fixture() -> QueryResource {
    QueryResource::from_value(
        json!({
            "_type": "Query",
            "id": 5,
            "name": "Open work packages",
            "timelineVisible": true,
            "timelineZoomLevel": "weeks",
            "timelineLabels": { "left": null, "right": "startDate", "farRight": "subject" },
            "highlightingMode": "inline",
            "showHierarchies": false,
            "sortBy": [
                {
                    "column": { "href": "/api/v3/queries/columns/priority", "title": "Priority" },
                    "direction": { "href": "urn:worktable:api:queries:directions:desc" }
                }
            ],
            "_links": {
                "self": { "href": "/api/v3/queries/5" },
                "groupBy": { "href": "/api/v3/queries/columns/status", "title": "Status" },
                "columns": [
                    { "href": "/api/v3/queries/columns/id", "title": "ID" },
                    { "href": "/api/v3/queries/columns/subject", "title": "Subject" }
                ]
            }
        }),
        None,
    )
}

/// A schema advertising groupable/sortable/available columns.
pub fn schema_fixture() -> QuerySchemaResource {
    QuerySchemaResource::from_value(
        json!({
            "_type": "QuerySchema",
            "_links": {
                "self": { "href": "/api/v3/queries/schema" },
                "availableColumns": [
                    { "href": "/api/v3/queries/columns/id", "title": "ID" },
                    { "href": "/api/v3/queries/columns/subject", "title": "Subject" },
                    { "href": "/api/v3/queries/columns/status", "title": "Status" },
                    { "href": "/api/v3/queries/columns/priority", "title": "Priority" },
                    { "href": "/api/v3/queries/columns/assignee", "title": "Assignee" }
                ],
                "groupableColumns": [
                    { "href": "/api/v3/queries/columns/status", "title": "Status" },
                    { "href": "/api/v3/queries/columns/assignee", "title": "Assignee" }
                ],
                "sortableColumns": [
                    { "href": "/api/v3/queries/columns/id", "title": "ID" },
                    { "href": "/api/v3/queries/columns/status", "title": "Status" },
                    { "href": "/api/v3/queries/columns/priority", "title": "Priority" }
                ]
            }
        }),
        None,
    )
}

/// A space with the schema's capability lists already seeded.
pub fn seeded_space() -> Arc<QuerySpace> {
    let space = Arc::new(QuerySpace::new());
    let schema = schema_fixture();
    space.available_columns.put(schema.available_columns());
    space.groupable_columns.put(schema.groupable_columns());
    space.sortable_columns.put(schema.sortable_columns());
    space
}
