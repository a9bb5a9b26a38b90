use crate::application::read_models::SbomReadModel;
use crate::ports::outbound::SbomFormatter;
use crate::sbom_generation::domain::{
    Component as CanonicalComponent, VulnerabilityRecord, UNKNOWN_LICENSE,
};
use crate::sbom_generation::policies::LicenseCatalog;
use crate::sbom_generation::services::LicenseNormalizer;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Bom {
    #[serde(rename = "bomFormat")]
    bom_format: String,
    #[serde(rename = "specVersion")]
    spec_version: String,
    version: u32,
    #[serde(rename = "serialNumber")]
    serial_number: String,
    metadata: Metadata,
    components: Vec<Component>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<Dependency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vulnerabilities: Option<Vec<Vulnerability>>,
}

#[derive(Debug, Serialize)]
struct Dependency {
    #[serde(rename = "ref")]
    bom_ref: String,
    #[serde(rename = "dependsOn")]
    depends_on: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Vulnerability {
    #[serde(rename = "bom-ref")]
    bom_ref: String,
    id: String,
    source: VulnerabilitySource,
    ratings: Vec<Rating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendation: Option<String>,
    affects: Vec<Affect>,
}

#[derive(Debug, Serialize)]
struct VulnerabilitySource {
    name: String,
    url: String,
}

#[derive(Debug, Serialize)]
struct Rating {
    severity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
}

#[derive(Debug, Serialize)]
struct Affect {
    #[serde(rename = "ref")]
    bom_ref: String,
}

#[derive(Debug, Serialize)]
struct Metadata {
    timestamp: String,
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    authors: Option<Vec<Author>>,
    component: RootComponent,
}

#[derive(Debug, Serialize)]
struct Tool {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct Author {
    name: String,
}

#[derive(Debug, Serialize)]
struct RootComponent {
    #[serde(rename = "type")]
    component_type: String,
    name: String,
    version: String,
    description: String,
}

#[derive(Debug, Serialize)]
struct Component {
    #[serde(rename = "type")]
    component_type: String,
    #[serde(rename = "bom-ref")]
    bom_ref: String,
    name: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    supplier: Option<Supplier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    licenses: Option<Vec<License>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hashes: Option<Vec<Hash>>,
}

#[derive(Debug, Serialize)]
struct Supplier {
    name: String,
}

/// One `licenses[]` entry: a single license or an SPDX expression
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum License {
    Single { license: LicenseContent },
    Expression { expression: String },
}

/// `id` must be a listed SPDX id; anything else goes into `name`
#[derive(Debug, Serialize)]
struct LicenseContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

const EXPRESSION_OPERATORS: [&str; 3] = [" OR ", " AND ", " WITH "];

#[derive(Debug, Serialize)]
struct Hash {
    alg: String,
    content: String,
}

/// CycloneDxFormatter adapter for generating CycloneDX 1.5 JSON format
///
/// This adapter implements the SbomFormatter port for CycloneDX format.
/// Optional component fields are emitted only when the source value is
/// non-empty. Licenses are normalized against the built-in catalog.
pub struct CycloneDxFormatter {
    catalog: LicenseCatalog,
}

impl CycloneDxFormatter {
    pub fn new() -> Self {
        Self {
            catalog: LicenseCatalog::builtin(),
        }
    }
}

impl Default for CycloneDxFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for CycloneDxFormatter {
    fn format(&self, model: &SbomReadModel) -> Result<String> {
        let bom = Bom {
            bom_format: "CycloneDX".to_string(),
            spec_version: "1.5".to_string(),
            version: 1,
            serial_number: model.metadata.serial_number().to_string(),
            metadata: self.build_metadata(model),
            components: self.build_components(&model.components),
            dependencies: self.build_dependencies(&model.components),
            vulnerabilities: model
                .has_vulnerabilities()
                .then(|| self.build_vulnerabilities(model)),
        };

        serde_json::to_string_pretty(&bom).map_err(Into::into)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}

impl CycloneDxFormatter {
    fn build_metadata(&self, model: &SbomReadModel) -> Metadata {
        Metadata {
            timestamp: model.metadata.timestamp().to_string(),
            tools: vec![Tool {
                name: model.metadata.tool_name().to_string(),
                version: model.metadata.tool_version().to_string(),
            }],
            authors: model
                .project
                .author
                .as_ref()
                .map(|name| vec![Author { name: name.clone() }]),
            component: RootComponent {
                component_type: "application".to_string(),
                name: model.project.name.clone(),
                version: model.project.version.clone(),
                description: model.project.description.clone().unwrap_or_default(),
            },
        }
    }

    fn build_components(&self, components: &[CanonicalComponent]) -> Vec<Component> {
        components
            .iter()
            .map(|c| Component {
                component_type: "library".to_string(),
                bom_ref: c.identity_key(),
                name: c.name.clone(),
                version: c.version.clone(),
                supplier: non_empty(&c.supplier).map(|name| Supplier { name }),
                purl: non_empty(&c.purl),
                description: non_empty(&c.description),
                licenses: non_empty(&c.license).map(|raw| vec![self.build_license(&raw)]),
                hashes: non_empty(&c.checksum_sha256).map(|content| {
                    vec![Hash {
                        alg: "SHA-256".to_string(),
                        content,
                    }]
                }),
            })
            .collect()
    }

    fn build_license(&self, raw: &str) -> License {
        let raw = raw.trim();
        if EXPRESSION_OPERATORS.iter().any(|op| raw.contains(op)) {
            return License::Expression {
                expression: raw.to_string(),
            };
        }

        let spdx_id = LicenseNormalizer::new(&self.catalog).normalize(raw);
        let content = if spdx_id != UNKNOWN_LICENSE && self.catalog.license(&spdx_id).is_some() {
            LicenseContent {
                id: Some(spdx_id),
                name: None,
            }
        } else {
            LicenseContent {
                id: None,
                name: Some(raw.to_string()),
            }
        };
        License::Single { license: content }
    }

    /// Declared dependencies resolved to the first component named `<dep>@…`
    fn build_dependencies(&self, components: &[CanonicalComponent]) -> Vec<Dependency> {
        let keys: Vec<String> = components.iter().map(|c| c.identity_key()).collect();
        components
            .iter()
            .zip(&keys)
            .filter_map(|(component, key)| {
                let depends_on: Vec<String> = component
                    .dependencies
                    .iter()
                    .filter_map(|dep| {
                        let prefix = format!("{}@", dep);
                        keys.iter().find(|k| k.starts_with(&prefix)).cloned()
                    })
                    .collect();
                (!depends_on.is_empty()).then(|| Dependency {
                    bom_ref: key.clone(),
                    depends_on,
                })
            })
            .collect()
    }

    fn build_vulnerabilities(&self, model: &SbomReadModel) -> Vec<Vulnerability> {
        model
            .components
            .iter()
            .flat_map(|component| {
                let key = component.identity_key();
                model
                    .vulnerabilities
                    .for_component(&key)
                    .iter()
                    .map(move |record| self.build_vulnerability(&key, record))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn build_vulnerability(&self, component_ref: &str, record: &VulnerabilityRecord) -> Vulnerability {
        Vulnerability {
            bom_ref: format!("{}:{}", record.cve_id, component_ref),
            id: record.cve_id.clone(),
            source: VulnerabilitySource {
                name: "NVD".to_string(),
                url: format!("https://nvd.nist.gov/vuln/detail/{}", record.cve_id),
            },
            ratings: vec![Rating {
                severity: record.severity.as_str().to_string(),
                score: record.cvss_score,
            }],
            description: record.description.clone(),
            recommendation: record
                .fixed_version
                .as_ref()
                .map(|v| format!("Upgrade to version {}", v)),
            affects: vec![Affect {
                bom_ref: component_ref.to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::formatters::test_fixtures::{sample_read_model, sample_record};
    use serde_json::Value;

    fn render(model: &SbomReadModel) -> Value {
        let json = CycloneDxFormatter::new().format(model).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_format_basic() {
        let bom = render(&sample_read_model());

        assert_eq!(bom["bomFormat"], "CycloneDX");
        assert_eq!(bom["specVersion"], "1.5");
        assert_eq!(
            bom["serialNumber"],
            "urn:uuid:6f1c2a3b-4d5e-4f60-8a7b-9c0d1e2f3a4b"
        );
        assert_eq!(bom["metadata"]["tools"][0]["name"], "manifest-sbom");
        assert_eq!(bom["metadata"]["component"]["type"], "application");
        assert_eq!(bom["metadata"]["component"]["name"], "shop");
        assert_eq!(bom["metadata"]["authors"][0]["name"], "Dana");
        assert_eq!(bom["components"].as_array().unwrap().len(), 3);
        assert!(bom.get("vulnerabilities").is_none());
    }

    #[test]
    fn test_optional_component_fields() {
        let bom = render(&sample_read_model());
        let express = &bom["components"][0];
        assert_eq!(express["type"], "library");
        assert_eq!(express["bom-ref"], "express@4.18.2");
        assert_eq!(express["supplier"]["name"], "npm");
        assert_eq!(express["licenses"][0]["license"]["id"], "MIT");
        assert!(express.get("hashes").is_none());

        let qs = &bom["components"][1];
        assert_eq!(qs["hashes"][0]["alg"], "SHA-256");
        assert!(qs.get("licenses").is_none());
        assert!(qs.get("description").is_none());
    }

    #[test]
    fn test_dependencies_resolve_by_name() {
        let bom = render(&sample_read_model());
        let deps = bom["dependencies"].as_array().unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0]["ref"], "express@4.18.2");
        assert_eq!(deps[0]["dependsOn"][0], "qs@6.11.0");
    }

    #[test]
    fn test_format_with_vulnerabilities() {
        let mut model = sample_read_model();
        model
            .vulnerabilities
            .insert("qs@6.11.0", sample_record("CVE-2022-24999"));

        let bom = render(&model);
        let vuln = &bom["vulnerabilities"][0];
        assert_eq!(vuln["id"], "CVE-2022-24999");
        assert_eq!(vuln["source"]["name"], "NVD");
        assert_eq!(
            vuln["source"]["url"],
            "https://nvd.nist.gov/vuln/detail/CVE-2022-24999"
        );
        assert_eq!(vuln["ratings"][0]["severity"], "high");
        assert_eq!(vuln["ratings"][0]["score"], 7.5);
        assert_eq!(vuln["recommendation"], "Upgrade to version 6.11.1");
        assert_eq!(vuln["affects"][0]["ref"], "qs@6.11.0");
    }

    fn licenses_of(raw: &str) -> Value {
        let mut model = sample_read_model();
        model.components.truncate(1);
        model.components[0].license = Some(raw.to_string());
        render(&model)["components"][0]["licenses"].clone()
    }

    #[test]
    fn test_license_alias_is_normalized_to_spdx_id() {
        let licenses = licenses_of("Apache 2.0");
        assert_eq!(licenses[0]["license"]["id"], "Apache-2.0");
        assert!(licenses[0]["license"].get("name").is_none());
    }

    #[test]
    fn test_compound_license_becomes_expression() {
        let licenses = licenses_of("(MIT OR Apache-2.0)");
        assert_eq!(licenses.as_array().unwrap().len(), 1);
        assert_eq!(licenses[0]["expression"], "(MIT OR Apache-2.0)");
        assert!(licenses[0].get("license").is_none());
    }

    #[test]
    fn test_unrecognized_license_uses_name() {
        let licenses = licenses_of("Custom EULA");
        assert_eq!(licenses[0]["license"]["name"], "Custom EULA");
        assert!(licenses[0]["license"].get("id").is_none());
    }
}
