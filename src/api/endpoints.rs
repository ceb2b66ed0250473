//! Endpoint descriptors and the search capability

use crate::error::Result;
use crate::query::{encode_query, shared_default_params, QueryBuilder, SearchOptions};
use crate::types::{JsonObject, JsonValue};
use std::fmt::Display;
use tracing::debug;

/// An API endpoint rooted below the tenant base URL
pub trait Endpoint {
    /// Path below the tenant base URL, e.g. `api/v1/core/monitoredservice/`
    fn base_path(&self) -> &'static str;
}

/// Capability for endpoints that allow searching with query strings,
/// e.g. GET insights that are open and from one service type
pub trait Searchable: Endpoint {
    /// Endpoint-level defaults merged on top of the shared ones
    fn default_query_params(&self) -> JsonObject {
        JsonObject::new()
    }

    /// Build the relative search URL for this endpoint.
    ///
    /// Layers the shared defaults, this endpoint's defaults, and the
    /// options' base and caller parameters, then appends the encoded query
    /// string to the base path (plus any path suffix).
    fn search_url(&self, options: &SearchOptions) -> Result<String> {
        let builder = QueryBuilder::new(
            shared_default_params().clone(),
            self.default_query_params(),
        );
        let params = builder.build(
            options.base_params.as_ref(),
            options.query_params.as_ref(),
            options.skip_defaults,
        )?;
        let query_string = encode_query(&params);
        let suffix = options.path_suffix.as_deref().unwrap_or("");
        debug!("search query for {}: {query_string}", self.base_path());
        Ok(format!("{}{suffix}?{query_string}", self.base_path()))
    }
}

// ============================================================================
// Policy
// ============================================================================

/// Security policies
pub struct Policy;

impl Endpoint for Policy {
    fn base_path(&self) -> &'static str {
        "api/v1/core/policy/"
    }
}

impl Searchable for Policy {}

impl Policy {
    /// URL for fetching a single policy
    pub fn item_url(&self, policy_id: impl Display) -> String {
        format!("{}{policy_id}/", self.base_path())
    }

    /// URL for the tenant's baseline policy for one service type
    pub fn baseline_url(&self, service_type: &str) -> String {
        format!(
            "{}?limit=1&offset=0&baseline_policy_for_tenant=true&policy_type={service_type}",
            self.base_path()
        )
    }

    /// URL for the rule options available to a policy
    pub fn rule_options_url(&self, policy_id: u64) -> String {
        format!("{}{policy_id}/new_rule_options/", self.base_path())
    }
}

// ============================================================================
// Policy Assessment
// ============================================================================

/// Scan assessments triggered from policies
pub struct PolicyAssessment;

impl Endpoint for PolicyAssessment {
    fn base_path(&self) -> &'static str {
        "api/v1/core/policyassessment/"
    }
}

impl PolicyAssessment {
    /// URL for polling whether an assessment has finished
    pub fn done_check_url(&self, assessment_id: u64) -> String {
        format!("{}{assessment_id}/check_done/", self.base_path())
    }

    /// URL for checking assessment status by external id
    pub fn status_url(&self, external_id: &str) -> String {
        format!("{}check_status/?external_id={external_id}", self.base_path())
    }
}

// ============================================================================
// Monitored Service
// ============================================================================

/// Services a tenant has under monitoring
pub struct MonitoredService;

impl Endpoint for MonitoredService {
    fn base_path(&self) -> &'static str {
        "api/v1/core/monitoredservice/"
    }
}

impl Searchable for MonitoredService {
    fn default_query_params(&self) -> JsonObject {
        let mut params = JsonObject::new();
        params.insert(
            "include_decommissioned".to_string(),
            JsonValue::Bool(false),
        );
        params
    }
}

impl MonitoredService {
    /// URL for fetching a single monitored service
    pub fn item_url(&self, service_id: impl Display) -> String {
        format!("{}{service_id}/", self.base_path())
    }
}
