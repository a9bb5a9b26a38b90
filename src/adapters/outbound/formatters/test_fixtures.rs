use crate::application::read_models::{SbomReadModel, SbomReadModelBuilder};
use crate::sbom_generation::domain::{
    Component, Ecosystem, ProjectInfo, SbomMetadata, Severity, VulnerabilityRecord,
    VulnerabilityStatus,
};

pub(crate) fn sample_metadata() -> SbomMetadata {
    SbomMetadata::new(
        "2024-05-01T12:00:00Z".to_string(),
        "manifest-sbom".to_string(),
        "0.4.0".to_string(),
        "urn:uuid:6f1c2a3b-4d5e-4f60-8a7b-9c0d1e2f3a4b".to_string(),
    )
}

pub(crate) fn sample_components() -> Vec<Component> {
    vec![
        Component::new(Ecosystem::Npm, "express", "4.18.2")
            .with_license(Some("MIT".to_string()))
            .with_description(Some("Fast web framework".to_string()))
            .with_dependencies(vec!["qs".to_string(), "missing".to_string()]),
        Component::new(Ecosystem::Npm, "qs", "6.11.0").with_checksum(Some(
            "6c0b3a6b5e14a5e1a3d77c1c0a8f5d4e3b2a1908f7e6d5c4b3a291807f6e5d4c".to_string(),
        )),
        Component::new(Ecosystem::Python, "requests", "2.31.0")
            .with_license(Some("Apache-2.0".to_string())),
    ]
}

pub(crate) fn sample_read_model() -> SbomReadModel {
    let project = ProjectInfo::new("shop", "2.0.0")
        .with_id("p-1")
        .with_author(Some("Dana".to_string()))
        .with_description(Some("Storefront".to_string()));

    SbomReadModelBuilder::new(project, sample_components(), sample_metadata())
        .sbom_id("sbom-1")
        .ecosystem(Some(Ecosystem::Npm))
        .build()
}

pub(crate) fn sample_record(cve_id: &str) -> VulnerabilityRecord {
    VulnerabilityRecord {
        cve_id: cve_id.to_string(),
        severity: Severity::High,
        cvss_score: Some(7.5),
        description: Some("Prototype pollution".to_string()),
        fixed_version: Some("6.11.1".to_string()),
        status: VulnerabilityStatus::Open,
    }
}
