//! Tenant connection configuration
//!
//! Stores the connection settings for one tenant deployment, read from the
//! environment. The test runner exports these before the suite starts.

use crate::error::{Error, Result};
use crate::types::{IntegrationDomain, ProductionDomain, StringEnum};
use std::collections::HashMap;
use std::env;
use std::fmt;

/// Required: base URL of the tenant deployment
pub const ENV_BASE_URL: &str = "AEGIS_BASE_URL";
/// Required: login username
pub const ENV_USERNAME: &str = "AEGIS_USERNAME";
/// Required: login password
pub const ENV_PASSWORD: &str = "AEGIS_PASSWORD";
/// Optional: admin contact for the tenant
pub const ENV_ADMIN_EMAIL: &str = "ADMIN_EMAIL";
/// Optional: organization key
pub const ENV_ORG_KEY: &str = "ORG_KEY";
/// Optional: JSON list of monitored services the suite prefers to target
pub const ENV_PREFERRED_MONITORED_SERVICES: &str = "PREFERRED_MONITORED_SERVICES";
/// Optional: TLS verification toggle, defaults to true
pub const ENV_VERIFY_TLS: &str = "VERIFY_TLS";

/// Connection configuration for one tenant deployment
#[derive(Clone)]
pub struct TenantConfig {
    /// Base URL of the tenant deployment
    pub base_url: String,
    /// Login username
    pub username: String,
    /// Login password
    pub password: String,
    /// Admin contact for the tenant
    pub admin_email: Option<String>,
    /// Organization key
    pub org_key: Option<String>,
    /// Monitored services the suite prefers to target
    pub preferred_monitored_services: Vec<String>,
    /// Verify TLS certificates
    pub verify_tls: bool,
}

impl TenantConfig {
    /// Load the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        let vars: HashMap<String, String> = env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build the configuration from an explicit variable map
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let base_url = required(vars, ENV_BASE_URL)?;
        let username = required(vars, ENV_USERNAME)?;
        let password = required(vars, ENV_PASSWORD)?;

        let preferred_monitored_services = match vars.get(ENV_PREFERRED_MONITORED_SERVICES) {
            Some(raw) => serde_json::from_str(raw).map_err(|e| {
                Error::config(format!(
                    "{ENV_PREFERRED_MONITORED_SERVICES} is not a JSON list of strings: {e}"
                ))
            })?,
            None => Vec::new(),
        };

        // CI exports booleans as strings
        let verify_tls = match vars.get(ENV_VERIFY_TLS) {
            Some(raw) => parse_bool(raw).ok_or_else(|| {
                Error::config(format!("{ENV_VERIFY_TLS} must be a boolean, got '{raw}'"))
            })?,
            None => true,
        };

        Ok(Self {
            base_url,
            username,
            password,
            admin_email: vars.get(ENV_ADMIN_EMAIL).cloned(),
            org_key: vars.get(ENV_ORG_KEY).cloned(),
            preferred_monitored_services,
            verify_tls,
        })
    }

    /// Leading host label when the tenant is a known production deployment,
    /// empty string otherwise
    pub fn production_environment_name(&self) -> &str {
        if ProductionDomain::from_value(&self.base_url).is_some() {
            host_label(&self.base_url)
        } else {
            ""
        }
    }

    /// Leading host label when the tenant is a known integration deployment,
    /// empty string otherwise
    pub fn integration_environment_name(&self) -> &str {
        if IntegrationDomain::from_value(&self.base_url).is_some() {
            host_label(&self.base_url)
        } else {
            ""
        }
    }
}

impl fmt::Debug for TenantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"********")
            .field("admin_email", &self.admin_email)
            .field("org_key", &self.org_key)
            .field(
                "preferred_monitored_services",
                &self.preferred_monitored_services,
            )
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

fn required(vars: &HashMap<String, String>, name: &str) -> Result<String> {
    match vars.get(name) {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(Error::missing_env_var(name)),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Host label up to the first dot, e.g. `coretest` for
/// `https://coretest.aegisops.com/`
fn host_label(base_url: &str) -> &str {
    base_url
        .split("//")
        .nth(1)
        .and_then(|host| host.split('.').next())
        .unwrap_or("")
}
