//! The state-slice services, one per display concern.

pub mod columns;
pub mod group_by;
pub mod hierarchy;
pub mod highlighting;
pub mod sort_by;
pub mod timeline;
