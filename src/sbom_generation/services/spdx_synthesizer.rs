use crate::sbom_generation::domain::spdx_document::{
    NOASSERTION, SPDX_DATA_LICENSE, SPDX_DOCUMENT_ID, SPDX_LICENSE_LIST_VERSION,
    SPDX_ROOT_PACKAGE_ID, SPDX_VERSION,
};
use crate::sbom_generation::domain::{
    Component, Ecosystem, ProjectInfo, SbomMetadata, SpdxChecksum, SpdxCreationInfo,
    SpdxDocument, SpdxExternalRef, SpdxPackage, SpdxRelationship,
};
use crate::shared::error::SbomError;

/// Namespace prefix used when none is configured
pub const DEFAULT_NAMESPACE_BASE: &str = "https://sbom-manager.local";

/// SpdxSynthesizer builds SPDX 2.3 documents from a canonical component set.
///
/// The project becomes `SPDXRef-RootPackage`; each component becomes
/// `SPDXRef-Package-<sanitized-name>-<index>` and gets a `DEPENDS_ON` edge
/// from the root. Declared dependencies are then resolved best-effort to
/// the first package whose identity key starts with `<name>@`.
#[derive(Debug, Clone)]
pub struct SpdxSynthesizer {
    namespace_base: String,
}

impl SpdxSynthesizer {
    pub fn new(namespace_base: impl Into<String>) -> Self {
        Self {
            namespace_base: namespace_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Synthesizes and validates a document.
    ///
    /// # Errors
    /// `SbomError::Validation` when a required field is missing; no partial
    /// document is returned.
    pub fn synthesize(
        &self,
        project: &ProjectInfo,
        components: &[Component],
        ecosystem: Option<Ecosystem>,
        metadata: &SbomMetadata,
    ) -> Result<SpdxDocument, SbomError> {
        let mut packages = Vec::with_capacity(components.len() + 1);
        let mut relationships = Vec::with_capacity(components.len());

        packages.push(root_package(project));

        let package_ids: Vec<(String, String)> = components
            .iter()
            .enumerate()
            .map(|(index, c)| (c.identity_key(), package_id(&c.name, index)))
            .collect();

        for (component, (_, spdx_id)) in components.iter().zip(&package_ids) {
            packages.push(component_package(component, spdx_id, ecosystem));
            relationships.push(SpdxRelationship::depends_on(SPDX_ROOT_PACKAGE_ID, spdx_id));
        }

        for (component, (_, spdx_id)) in components.iter().zip(&package_ids) {
            for dependency in &component.dependencies {
                let prefix = format!("{}@", dependency);
                if let Some((_, target)) = package_ids.iter().find(|(key, _)| key.starts_with(&prefix))
                {
                    relationships.push(SpdxRelationship::depends_on(spdx_id, target));
                }
            }
        }

        let mut creators = vec![metadata.tool_creator()];
        creators.push(match &project.author {
            Some(author) => format!("Person: {}", author),
            None => "Organization: Unknown".to_string(),
        });

        let document = SpdxDocument {
            spdx_version: SPDX_VERSION.to_string(),
            data_license: SPDX_DATA_LICENSE.to_string(),
            spdx_id: SPDX_DOCUMENT_ID.to_string(),
            name: format!("{}-{}-sbom", project.name, project.version),
            document_namespace: format!(
                "{}/{}/{}",
                self.namespace_base,
                project.name,
                metadata.uuid()
            ),
            creation_info: SpdxCreationInfo {
                created: metadata.timestamp().to_string(),
                creators,
                license_list_version: SPDX_LICENSE_LIST_VERSION.to_string(),
            },
            packages,
            relationships,
            document_describes: vec![SPDX_ROOT_PACKAGE_ID.to_string()],
        };

        Self::validate(&document)?;
        Ok(document)
    }

    /// Required-field check over a whole document, reporting every problem
    pub fn validate(document: &SpdxDocument) -> Result<(), SbomError> {
        let mut errors = Vec::new();
        let mut require = |value: &str, message: String| {
            if value.trim().is_empty() {
                errors.push(message);
            }
        };

        require(&document.spdx_version, "Missing spdxVersion".to_string());
        require(&document.data_license, "Missing dataLicense".to_string());
        require(&document.spdx_id, "Missing SPDXID".to_string());
        require(&document.name, "Missing name".to_string());
        require(
            &document.document_namespace,
            "Missing documentNamespace".to_string(),
        );
        require(
            &document.creation_info.created,
            "Missing creationInfo.created".to_string(),
        );

        for (index, package) in document.packages.iter().enumerate() {
            require(&package.spdx_id, format!("Package {}: Missing SPDXID", index));
            require(&package.name, format!("Package {}: Missing name", index));
            require(
                &package.version_info,
                format!("Package {}: Missing versionInfo", index),
            );
            require(
                &package.download_location,
                format!("Package {}: Missing downloadLocation", index),
            );
        }

        if document.creation_info.creators.is_empty() {
            errors.push("Missing creationInfo.creators".to_string());
        }
        if document.packages.is_empty() {
            errors.push("No packages defined".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SbomError::Validation { errors })
        }
    }
}

impl Default for SpdxSynthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE_BASE)
    }
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `-`
fn sanitize_id(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

fn package_id(name: &str, index: usize) -> String {
    format!("SPDXRef-Package-{}-{}", sanitize_id(name), index)
}

fn root_package(project: &ProjectInfo) -> SpdxPackage {
    SpdxPackage {
        spdx_id: SPDX_ROOT_PACKAGE_ID.to_string(),
        name: project.name.clone(),
        version_info: project.version.clone(),
        download_location: NOASSERTION.to_string(),
        files_analyzed: false,
        supplier: Some(format!(
            "Organization: {}",
            project.author.as_deref().unwrap_or("Unknown")
        )),
        license_concluded: None,
        license_declared: None,
        copyright_text: Some(NOASSERTION.to_string()),
        description: Some(format!("SBOM for {}", project.name)),
        external_refs: Vec::new(),
        checksums: Vec::new(),
        comment: None,
    }
}

fn component_package(
    component: &Component,
    spdx_id: &str,
    ecosystem: Option<Ecosystem>,
) -> SpdxPackage {
    let license = component
        .license
        .clone()
        .unwrap_or_else(|| NOASSERTION.to_string());

    let external_refs = component
        .purl
        .iter()
        .map(|purl| SpdxExternalRef {
            reference_category: "PACKAGE-MANAGER".to_string(),
            reference_type: "purl".to_string(),
            reference_locator: purl.clone(),
        })
        .collect();

    let checksums = component
        .checksum_sha256
        .iter()
        .map(|value| SpdxChecksum {
            algorithm: "SHA256".to_string(),
            checksum_value: value.clone(),
        })
        .collect();

    let mut notes = vec![format!("Origin: {}", component.origin)];
    if let Some(criticality) = component.metadata_str("criticality") {
        notes.push(format!("Criticality: {}", criticality));
    }
    if let Some(restrictions) = component.metadata_str("usageRestrictions") {
        notes.push(format!("Usage Restrictions: {}", restrictions));
    }
    if let Some(ecosystem) = ecosystem {
        notes.push(format!("Ecosystem: {}", ecosystem));
    }

    SpdxPackage {
        spdx_id: spdx_id.to_string(),
        name: component.name.clone(),
        version_info: component.version.clone(),
        download_location: component
            .purl
            .clone()
            .unwrap_or_else(|| NOASSERTION.to_string()),
        files_analyzed: false,
        supplier: Some(
            component
                .supplier
                .as_ref()
                .map(|s| format!("Organization: {}", s))
                .unwrap_or_else(|| NOASSERTION.to_string()),
        ),
        license_concluded: Some(license.clone()),
        license_declared: Some(license),
        copyright_text: Some(NOASSERTION.to_string()),
        description: component.description.clone(),
        external_refs,
        checksums,
        comment: Some(notes.join(" | ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::RelationshipType;

    fn metadata() -> SbomMetadata {
        SbomMetadata::new(
            "2024-05-01T10:00:00Z".to_string(),
            "manifest-sbom".to_string(),
            "0.4.0".to_string(),
            "urn:uuid:0b7e8d5c-2f3a-4c1e-9a6b-1d2e3f4a5b6c".to_string(),
        )
    }

    fn components() -> Vec<Component> {
        vec![
            Component::new(Ecosystem::Npm, "express", "4.18.2")
                .with_license(Some("MIT".to_string()))
                .with_dependencies(vec!["body-parser".to_string(), "missing".to_string()]),
            Component::new(Ecosystem::Npm, "body-parser", "1.20.1")
                .with_checksum(Some("abc123".to_string())),
            Component::new(Ecosystem::Npm, "@types/node", "20.11.0"),
        ]
    }

    #[test]
    fn test_package_and_root_edge_counts() {
        let project = ProjectInfo::new("shop", "2.0.0");
        let components: Vec<_> = components()
            .into_iter()
            .map(|c| c.with_dependencies(Vec::new()))
            .collect();

        let document = SpdxSynthesizer::default()
            .synthesize(&project, &components, None, &metadata())
            .unwrap();

        assert_eq!(document.packages.len(), components.len() + 1);
        assert_eq!(document.root_dependency_count(), components.len());
        assert_eq!(document.relationships.len(), components.len());
    }

    #[test]
    fn test_colliding_sanitized_names_get_distinct_ids() {
        let project = ProjectInfo::new("shop", "2.0.0");
        let components = vec![
            Component::new(Ecosystem::Go, "a/b", "1.0.0"),
            Component::new(Ecosystem::Java, "a:b", "1.0.0"),
            Component::new(Ecosystem::Npm, "lodash", "4.17.20"),
            Component::new(Ecosystem::Npm, "lodash", "4.17.21"),
        ];

        let document = SpdxSynthesizer::default()
            .synthesize(&project, &components, None, &metadata())
            .unwrap();

        let ids: Vec<&str> = document.packages[1..]
            .iter()
            .map(|p| p.spdx_id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "SPDXRef-Package-a-b-0",
                "SPDXRef-Package-a-b-1",
                "SPDXRef-Package-lodash-2",
                "SPDXRef-Package-lodash-3",
            ]
        );
        let targets: std::collections::BTreeSet<_> = document
            .relationships
            .iter()
            .map(|r| r.related_spdx_element.as_str())
            .collect();
        assert_eq!(targets.len(), 4);
    }

    #[test]
    fn test_dependency_edges_resolve_by_name_prefix() {
        let project = ProjectInfo::new("shop", "2.0.0");
        let document = SpdxSynthesizer::default()
            .synthesize(&project, &components(), Some(Ecosystem::Npm), &metadata())
            .unwrap();

        let edges: Vec<_> = document
            .relationships
            .iter()
            .filter(|r| r.spdx_element_id != SPDX_ROOT_PACKAGE_ID)
            .collect();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].spdx_element_id, "SPDXRef-Package-express-0");
        assert_eq!(edges[0].related_spdx_element, "SPDXRef-Package-body-parser-1");
        assert_eq!(edges[0].relationship_type, RelationshipType::DependsOn);
    }

    #[test]
    fn test_document_fields() {
        let project = ProjectInfo::new("shop", "2.0.0").with_author(Some("Jo".to_string()));
        let document = SpdxSynthesizer::new("https://sbom.example.com/")
            .synthesize(&project, &components(), Some(Ecosystem::Npm), &metadata())
            .unwrap();

        assert_eq!(document.spdx_version, "SPDX-2.3");
        assert_eq!(document.data_license, "CC0-1.0");
        assert_eq!(document.name, "shop-2.0.0-sbom");
        assert_eq!(
            document.document_namespace,
            "https://sbom.example.com/shop/0b7e8d5c-2f3a-4c1e-9a6b-1d2e3f4a5b6c"
        );
        assert_eq!(
            document.creation_info.creators,
            vec!["Tool: manifest-sbom-0.4.0", "Person: Jo"]
        );
        assert_eq!(document.document_describes, vec![SPDX_ROOT_PACKAGE_ID]);

        let root = &document.packages[0];
        assert_eq!(root.supplier.as_deref(), Some("Organization: Jo"));
        assert_eq!(root.description.as_deref(), Some("SBOM for shop"));
    }

    #[test]
    fn test_package_enrichment() {
        let project = ProjectInfo::new("shop", "2.0.0");
        let document = SpdxSynthesizer::default()
            .synthesize(&project, &components(), Some(Ecosystem::Npm), &metadata())
            .unwrap();

        let express = &document.packages[1];
        assert_eq!(express.license_declared.as_deref(), Some("MIT"));
        assert_eq!(express.download_location, "pkg:npm/express@4.18.2");
        assert_eq!(express.external_refs[0].reference_type, "purl");
        assert_eq!(express.supplier.as_deref(), Some("Organization: npm"));
        assert_eq!(express.comment.as_deref(), Some("Origin: npm | Ecosystem: npm"));

        let body_parser = &document.packages[2];
        assert_eq!(body_parser.license_concluded.as_deref(), Some(NOASSERTION));
        assert_eq!(body_parser.checksums[0].algorithm, "SHA256");

        let types_node = &document.packages[3];
        assert_eq!(types_node.spdx_id, "SPDXRef-Package--types-node-2");
        assert!(types_node.checksums.is_empty());
    }

    #[test]
    fn test_anonymous_author() {
        let project = ProjectInfo::new("shop", "2.0.0");
        let document = SpdxSynthesizer::default()
            .synthesize(&project, &components(), None, &metadata())
            .unwrap();
        assert_eq!(document.creation_info.creators[1], "Organization: Unknown");
        assert_eq!(
            document.packages[0].supplier.as_deref(),
            Some("Organization: Unknown")
        );
    }

    #[test]
    fn test_missing_component_name_rejects_document() {
        let project = ProjectInfo::new("shop", "2.0.0");
        let mut components = components();
        components[1].name = String::new();

        let result =
            SpdxSynthesizer::default().synthesize(&project, &components, None, &metadata());

        match result {
            Err(SbomError::Validation { errors }) => {
                assert_eq!(errors, vec!["Package 2: Missing name"]);
            }
            other => panic!("expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_project_name_is_reported() {
        let project = ProjectInfo::new("", "2.0.0");
        let result = SpdxSynthesizer::default().synthesize(&project, &[], None, &metadata());
        let Err(SbomError::Validation { errors }) = result else {
            panic!("expected Validation error");
        };
        assert!(errors.contains(&"Package 0: Missing name".to_string()));
    }
}
