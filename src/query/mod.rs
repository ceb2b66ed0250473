//! Search query construction
//!
//! Builds the query-parameter mapping for search requests by layering
//! shared defaults, endpoint defaults, endpoint-fixed base parameters,
//! and caller-supplied overrides, then URL-encodes the result.

mod builder;

pub use builder::{encode_query, shared_default_params, QueryBuilder, SearchOptions};
