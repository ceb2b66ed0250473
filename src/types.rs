//! Common types used throughout the Aegis client
//!
//! This module contains shared type aliases and the domain enumerations
//! used when talking to tenant deployments.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// String Enumerations
// ============================================================================

/// String-backed enumeration with a symbolic name and an underlying value.
///
/// Matching goes through [`StringEnum::matches`] rather than a `PartialEq<str>`
/// impl, so call sites state whether they compare names, values, or either.
pub trait StringEnum: Sized + Copy + PartialEq + 'static {
    /// Every member, in declaration order
    const ALL: &'static [Self];

    /// Symbolic member name
    fn name(self) -> &'static str;

    /// Underlying string value
    fn value(self) -> &'static str;

    /// True when `other` equals either the member name or the underlying value
    fn matches(self, other: &str) -> bool {
        self.name() == other || self.value() == other
    }

    /// Names of all members
    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|member| member.name()).collect()
    }

    /// Underlying values of all members
    fn values() -> Vec<&'static str> {
        Self::ALL.iter().map(|member| member.value()).collect()
    }

    /// Look up a member by its underlying value
    fn from_value(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.value() == value)
    }
}

// ============================================================================
// Polarity
// ============================================================================

/// Policy-rule matching mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Matching items must not be present
    Blacklist,
    /// Matching items must be present
    Whitelist,
}

impl StringEnum for Polarity {
    const ALL: &'static [Self] = &[Self::Blacklist, Self::Whitelist];

    fn name(self) -> &'static str {
        match self {
            Self::Blacklist => "Blacklist",
            Self::Whitelist => "Whitelist",
        }
    }

    fn value(self) -> &'static str {
        match self {
            Self::Blacklist => "blacklist",
            Self::Whitelist => "whitelist",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

// ============================================================================
// Tenant Domains
// ============================================================================

/// Known production tenant deployments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductionDomain {
    CoretestUs1,
    CoretestUs2,
    CoretestUs3,
    CoretestAus1,
    CoretestEu1,
}

impl StringEnum for ProductionDomain {
    const ALL: &'static [Self] = &[
        Self::CoretestUs1,
        Self::CoretestUs2,
        Self::CoretestUs3,
        Self::CoretestAus1,
        Self::CoretestEu1,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::CoretestUs1 => "CoretestUs1",
            Self::CoretestUs2 => "CoretestUs2",
            Self::CoretestUs3 => "CoretestUs3",
            Self::CoretestAus1 => "CoretestAus1",
            Self::CoretestEu1 => "CoretestEu1",
        }
    }

    fn value(self) -> &'static str {
        match self {
            Self::CoretestUs1 => "https://coretest.aegisops.com/",
            Self::CoretestUs2 => "https://coretest-us2.aegisops.com/",
            Self::CoretestUs3 => "https://coretest-us3.aegisops.com/",
            Self::CoretestAus1 => "https://coretest-aus1.aegisops.com/",
            Self::CoretestEu1 => "https://coretest-eu1.aegisops.com/",
        }
    }
}

impl fmt::Display for ProductionDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Known integration tenant deployments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationDomain {
    Coretest,
    Smoketest,
}

impl StringEnum for IntegrationDomain {
    const ALL: &'static [Self] = &[Self::Coretest, Self::Smoketest];

    fn name(self) -> &'static str {
        match self {
            Self::Coretest => "Coretest",
            Self::Smoketest => "Smoketest",
        }
    }

    fn value(self) -> &'static str {
        match self {
            Self::Coretest => "https://coretest.int.aegisops.com/",
            Self::Smoketest => "https://smoketest.int.aegisops.com/",
        }
    }
}

impl fmt::Display for IntegrationDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_matches_name_or_value() {
        assert!(Polarity::Blacklist.matches("Blacklist"));
        assert!(Polarity::Blacklist.matches("blacklist"));
        assert!(!Polarity::Blacklist.matches("whitelist"));
        assert!(!Polarity::Blacklist.matches("BLACKLIST"));
    }

    #[test]
    fn test_polarity_serde() {
        let json = serde_json::to_string(&Polarity::Whitelist).unwrap();
        assert_eq!(json, "\"whitelist\"");

        let polarity: Polarity = serde_json::from_str("\"blacklist\"").unwrap();
        assert_eq!(polarity, Polarity::Blacklist);
    }

    #[test]
    fn test_polarity_display() {
        assert_eq!(Polarity::Blacklist.to_string(), "blacklist");
    }

    #[test]
    fn test_names_and_values() {
        assert_eq!(Polarity::names(), vec!["Blacklist", "Whitelist"]);
        assert_eq!(Polarity::values(), vec!["blacklist", "whitelist"]);
        assert_eq!(IntegrationDomain::names(), vec!["Coretest", "Smoketest"]);
    }

    #[test]
    fn test_from_value() {
        assert_eq!(
            ProductionDomain::from_value("https://coretest-eu1.aegisops.com/"),
            Some(ProductionDomain::CoretestEu1)
        );
        assert_eq!(ProductionDomain::from_value("https://unknown.example.com/"), None);
    }

    #[test]
    fn test_domain_display_is_url() {
        assert_eq!(
            IntegrationDomain::Smoketest.to_string(),
            "https://smoketest.int.aegisops.com/"
        );
    }
}
