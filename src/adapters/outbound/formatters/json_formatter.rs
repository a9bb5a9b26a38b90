use crate::application::read_models::SbomReadModel;
use crate::ports::outbound::SbomFormatter;
use crate::sbom_generation::services::{TabularExporter, TabularRow};
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    sbom: SbomSection<'a>,
    project: ProjectSection<'a>,
    rows: Vec<TabularRow>,
    metadata: ExportMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SbomSection<'a> {
    id: &'a str,
    version: &'a str,
    format: &'static str,
    created_at: &'a str,
    author: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ProjectSection<'a> {
    id: &'a str,
    name: &'a str,
    description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportMetadata {
    total_components: usize,
    total_vulnerabilities: usize,
    exported_at: String,
}

/// JsonFormatter adapter wrapping the tabular rows in an SBOM envelope
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for JsonFormatter {
    fn format(&self, model: &SbomReadModel) -> Result<String> {
        let export = JsonExport {
            sbom: SbomSection {
                id: model.document_id(),
                version: &model.project.version,
                format: model.stored_format.as_str(),
                created_at: model.metadata.timestamp(),
                author: model.project.author.as_deref(),
            },
            project: ProjectSection {
                id: &model.project.id,
                name: &model.project.name,
                description: model.project.description.as_deref(),
            },
            rows: TabularExporter::rows(&model.components, &model.vulnerabilities),
            metadata: ExportMetadata {
                total_components: model.components.len(),
                total_vulnerabilities: attached_vulnerabilities(model),
                exported_at: chrono::Utc::now().to_rfc3339(),
            },
        };

        serde_json::to_string_pretty(&export).map_err(Into::into)
    }
}

/// Records that attach to an exported component
fn attached_vulnerabilities(model: &SbomReadModel) -> usize {
    model
        .components
        .iter()
        .map(|c| model.vulnerabilities.for_component(&c.identity_key()).len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::formatters::test_fixtures::{sample_read_model, sample_record};
    use serde_json::Value;

    #[test]
    fn test_envelope() {
        let json = JsonFormatter::new().format(&sample_read_model()).unwrap();
        let export: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(export["sbom"]["id"], "sbom-1");
        assert_eq!(export["sbom"]["version"], "2.0.0");
        assert_eq!(export["sbom"]["format"], "spdx");
        assert_eq!(export["sbom"]["createdAt"], "2024-05-01T12:00:00Z");
        assert_eq!(export["sbom"]["author"], "Dana");
        assert_eq!(export["project"]["id"], "p-1");
        assert_eq!(export["project"]["description"], "Storefront");
        assert_eq!(export["metadata"]["totalComponents"], 3);
        assert_eq!(export["metadata"]["totalVulnerabilities"], 0);
        assert!(export["metadata"]["exportedAt"].is_string());
    }

    #[test]
    fn test_rows_use_column_names() {
        let mut model = sample_read_model();
        model
            .vulnerabilities
            .insert("express@4.18.2", sample_record("CVE-2024-29041"));

        let json = JsonFormatter::new().format(&model).unwrap();
        let export: Value = serde_json::from_str(&json).unwrap();
        let rows = export["rows"].as_array().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["Component Name"], "express");
        assert_eq!(rows[0]["CVE ID"], "CVE-2024-29041");
        assert_eq!(rows[0]["CVSS Score"], "7.5");
        assert_eq!(rows[2]["Component Name"], "requests");
        assert_eq!(rows[2]["Severity"], "");
        assert_eq!(export["metadata"]["totalVulnerabilities"], 1);
    }

    #[test]
    fn test_unpersisted_model_uses_serial_uuid() {
        let mut model = sample_read_model();
        model.sbom_id = None;
        let json = JsonFormatter::new().format(&model).unwrap();
        let export: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(export["sbom"]["id"], "6f1c2a3b-4d5e-4f60-8a7b-9c0d1e2f3a4b");
    }
}
