use crate::sbom_generation::domain::{Component, VulnerabilityIndex, VulnerabilityRecord};
use serde::Serialize;

/// Column headers of every tabular export, in order
pub const TABULAR_COLUMNS: [&str; 12] = [
    "Component Name",
    "Version",
    "License",
    "Supplier",
    "PURL",
    "Description",
    "CVE ID",
    "Severity",
    "CVSS Score",
    "Vulnerability Description",
    "Fixed Version",
    "Status",
];

/// One flattened (component, vulnerability) row. Absent values are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TabularRow {
    #[serde(rename = "Component Name")]
    pub component_name: String,
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "License")]
    pub license: String,
    #[serde(rename = "Supplier")]
    pub supplier: String,
    #[serde(rename = "PURL")]
    pub purl: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "CVE ID")]
    pub cve_id: String,
    #[serde(rename = "Severity")]
    pub severity: String,
    #[serde(rename = "CVSS Score")]
    pub cvss_score: String,
    #[serde(rename = "Vulnerability Description")]
    pub vulnerability_description: String,
    #[serde(rename = "Fixed Version")]
    pub fixed_version: String,
    #[serde(rename = "Status")]
    pub status: String,
}

impl TabularRow {
    /// Cells in `TABULAR_COLUMNS` order
    pub fn cells(&self) -> [&str; 12] {
        [
            self.component_name.as_str(),
            self.version.as_str(),
            self.license.as_str(),
            self.supplier.as_str(),
            self.purl.as_str(),
            self.description.as_str(),
            self.cve_id.as_str(),
            self.severity.as_str(),
            self.cvss_score.as_str(),
            self.vulnerability_description.as_str(),
            self.fixed_version.as_str(),
            self.status.as_str(),
        ]
    }

    fn for_component(component: &Component) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            component_name: component.name.clone(),
            version: component.version.clone(),
            license: text(&component.license),
            supplier: text(&component.supplier),
            purl: text(&component.purl),
            description: text(&component.description),
            ..Self::default()
        }
    }

    fn with_vulnerability(mut self, record: &VulnerabilityRecord) -> Self {
        self.cve_id = record.cve_id.clone();
        self.severity = record.severity.to_string();
        self.cvss_score = record
            .cvss_score
            .map(|score| score.to_string())
            .unwrap_or_default();
        self.vulnerability_description = record.description.clone().unwrap_or_default();
        self.fixed_version = record.fixed_version.clone().unwrap_or_default();
        self.status = record.status.as_str().to_string();
        self
    }
}

/// TabularExporter flattens components and their vulnerabilities into rows.
///
/// A component without vulnerabilities yields one row with the six
/// vulnerability columns blank; otherwise it yields one row per record.
pub struct TabularExporter;

impl TabularExporter {
    pub fn rows(components: &[Component], vulnerabilities: &VulnerabilityIndex) -> Vec<TabularRow> {
        components
            .iter()
            .flat_map(|component| {
                let base = TabularRow::for_component(component);
                let records = vulnerabilities.for_component(&component.identity_key());
                if records.is_empty() {
                    vec![base]
                } else {
                    records
                        .iter()
                        .map(|record| base.clone().with_vulnerability(record))
                        .collect()
                }
            })
            .collect()
    }
}
