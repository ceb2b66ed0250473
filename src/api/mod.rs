//! Endpoint descriptors for the tenant REST API
//!
//! Each endpoint is a unit struct carrying its base path. Endpoints that
//! allow searching implement [`Searchable`], which composes the query
//! builder into a full search URL.

mod endpoints;

pub use endpoints::{Endpoint, MonitoredService, Policy, PolicyAssessment, Searchable};
