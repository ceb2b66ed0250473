//! # Aegis Client
//!
//! API client and end-to-end test support for the Aegis multi-tenant SaaS
//! security platform.
//!
//! The crate drives a tenant's REST API as an authenticated client: it logs
//! in, builds search URLs from layered query parameters, walks cursor-paged
//! list endpoints, and exposes the endpoint descriptors the test suites
//! exercise.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use aegis_client::api::{Policy, Searchable};
//! use aegis_client::query::SearchOptions;
//! use aegis_client::{ApiSession, Result, TenantConfig, UNLIMITED_PAGES};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = TenantConfig::from_env()?;
//!     let mut session = ApiSession::new(&config.base_url)?;
//!
//!     session.healthcheck().await?;
//!     let login = session.login(&config.username, &config.password).await?;
//!     assert!(login.is_success());
//!
//!     let url = Policy.search_url(
//!         &SearchOptions::new().query_params(serde_json::json!({"search": "baseline"})),
//!     )?;
//!     let policies = session.fetch_all_results(&url, UNLIMITED_PAGES).await?;
//!     println!("{} policies", policies.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and domain enumerations
pub mod types;

/// Tenant connection configuration
pub mod config;

/// Logging initialization
pub mod logging;

/// Search query construction
pub mod query;

/// Authenticated HTTP session
pub mod http;

/// Cursor pagination over list endpoints
pub mod pagination;

/// Endpoint descriptors
pub mod api;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::TenantConfig;
pub use error::{Error, Result};
pub use http::{ApiSession, LoginResponse, SessionConfig};
pub use pagination::{Page, UNLIMITED_PAGES};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
