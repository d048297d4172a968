//! # wt-hal
//!
//! Typed HAL resource proxies for Worktable.
//!
//! Wraps raw hypermedia documents so that linked and embedded
//! sub-resources resolve as typed values, and exposes a uniform lazy-load
//! contract:
//! - identifier derivation (embedded `id` field, else numeric self-link
//!   trailer)
//! - `load(force)` with at most one in-flight fetch per resource instance
//! - `copy_with(overrides)` deep-merge copies that never touch the
//!   original
//! - self-link equality (reloads and copies produce distinct instances of
//!   the same logical resource)
//!
//! Concrete resource kinds (query, query schema, work package) are
//! constructed through [`ResourceFactory`], keyed on the document's
//! `_type` tag.

pub mod columns;
pub mod factory;
pub mod fetch;
pub mod link;
pub mod query;
pub mod resource;
pub mod schema;
pub mod work_package;

mod error;

pub use columns::{QueryColumn, SortByCriterion};
pub use error::HalError;
pub use factory::{ResourceFactory, ResourceKind, TypedResource};
pub use fetch::{FetchBackend, HttpFetch};
pub use link::HalLink;
pub use query::QueryResource;
pub use resource::HalResource;
pub use schema::QuerySchemaResource;
pub use work_package::WorkPackageResource;
