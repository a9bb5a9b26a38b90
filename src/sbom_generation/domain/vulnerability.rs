use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VulnerabilityStatus {
    #[default]
    Open,
    Mitigated,
    FalsePositive,
}

impl VulnerabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VulnerabilityStatus::Open => "open",
            VulnerabilityStatus::Mitigated => "mitigated",
            VulnerabilityStatus::FalsePositive => "false_positive",
        }
    }
}

/// A vulnerability attached to a component by an external lookup.
///
/// The core never produces these; it only carries them into exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityRecord {
    pub cve_id: String,
    pub severity: Severity,
    #[serde(default)]
    pub cvss_score: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fixed_version: Option<String>,
    #[serde(default)]
    pub status: VulnerabilityStatus,
}

/// Vulnerability records keyed by component identity (`name@version`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VulnerabilityIndex {
    records: BTreeMap<String, Vec<VulnerabilityRecord>>,
}

impl VulnerabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identity_key: impl Into<String>, record: VulnerabilityRecord) {
        self.records
            .entry(identity_key.into())
            .or_default()
            .push(record);
    }

    pub fn for_component(&self, identity_key: &str) -> &[VulnerabilityRecord] {
        self.records
            .get(identity_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
