use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// SPDX identifier returned when a raw license string matches nothing known
pub const UNKNOWN_LICENSE: &str = "UNKNOWN";

/// Policy category a license is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LicenseCategory {
    Permissive,
    WeakCopyleft,
    StrongCopyleft,
    Proprietary,
    PublicDomain,
}

impl LicenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseCategory::Permissive => "permissive",
            LicenseCategory::WeakCopyleft => "weak-copyleft",
            LicenseCategory::StrongCopyleft => "strong-copyleft",
            LicenseCategory::Proprietary => "proprietary",
            LicenseCategory::PublicDomain => "public-domain",
        }
    }
}

impl fmt::Display for LicenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the license classification table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseEntry {
    pub id: String,
    pub name: String,
    pub category: LicenseCategory,
    pub risk_level: RiskLevel,
}

impl LicenseEntry {
    pub fn new(id: &str, name: &str, category: LicenseCategory, risk_level: RiskLevel) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            risk_level,
        }
    }
}

/// Lookup result for a single SPDX id; unknown ids get a medium-risk placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseInfo {
    pub id: String,
    pub name: String,
    pub category: Option<LicenseCategory>,
    pub risk_level: RiskLevel,
    pub is_known: bool,
}

/// Category allow-flags plus optional explicit block/allow lists.
///
/// Missing flags deserialize as `false`, so a config-defined policy only
/// allows what it names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PolicyRules {
    pub allow_permissive: bool,
    pub allow_weak_copyleft: bool,
    pub allow_strong_copyleft: bool,
    pub allow_proprietary: bool,
    pub allow_public_domain: bool,
    pub blocked_licenses: Option<Vec<String>>,
    pub allowed_licenses: Option<Vec<String>>,
}

impl PolicyRules {
    pub fn allows_category(&self, category: LicenseCategory) -> bool {
        match category {
            LicenseCategory::Permissive => self.allow_permissive,
            LicenseCategory::WeakCopyleft => self.allow_weak_copyleft,
            LicenseCategory::StrongCopyleft => self.allow_strong_copyleft,
            LicenseCategory::Proprietary => self.allow_proprietary,
            LicenseCategory::PublicDomain => self.allow_public_domain,
        }
    }

    pub fn blocks(&self, spdx_id: &str) -> bool {
        self.blocked_licenses
            .as_ref()
            .is_some_and(|list| list.iter().any(|id| id == spdx_id))
    }

    /// `None` when no allow-list is configured (or it is empty)
    pub fn allow_list(&self) -> Option<&[String]> {
        self.allowed_licenses
            .as_deref()
            .filter(|list| !list.is_empty())
    }
}

/// A named rule set licenses are evaluated against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicensePolicy {
    pub key: String,
    pub name: String,
    pub description: String,
    pub rules: PolicyRules,
}

/// Outcome of evaluating one license against one policy. Never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub risk_level: RiskLevel,
}

impl PolicyDecision {
    pub fn allow(risk_level: RiskLevel) -> Self {
        Self {
            allowed: true,
            reason: None,
            risk_level,
        }
    }

    pub fn deny(reason: impl Into<String>, risk_level: RiskLevel) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
            risk_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compatibility {
    pub compatible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Component whose license a policy rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyViolation {
    pub component: String,
    pub license: String,
    pub reason: String,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl RiskDistribution {
    pub fn record(&mut self, risk_level: RiskLevel) {
        match risk_level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
        }
    }
}

/// License overview of one SBOM under one policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseSummary {
    pub policy: String,
    pub total_components: usize,
    /// Count per normalized SPDX id, unknown licenses excluded
    pub license_counts: BTreeMap<String, usize>,
    pub unknown_licenses: usize,
    pub violations: Vec<PolicyViolation>,
    pub risk_distribution: RiskDistribution,
}

impl LicenseSummary {
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}
