//! Builder for constructing SbomReadModel from domain objects

use super::sbom_read_model::SbomReadModel;
use crate::sbom_generation::domain::{
    Component, Ecosystem, ProjectInfo, SbomFormat, SbomMetadata, VulnerabilityIndex,
};
use crate::sbom_generation::services::DEFAULT_NAMESPACE_BASE;

/// Builder for constructing SbomReadModel from domain objects
///
/// Required parts go to `new`; the optional ones default to "not persisted",
/// no ecosystem, no vulnerabilities and the default namespace.
#[derive(Debug, Clone)]
pub struct SbomReadModelBuilder {
    project: ProjectInfo,
    components: Vec<Component>,
    metadata: SbomMetadata,
    sbom_id: Option<String>,
    ecosystem: Option<Ecosystem>,
    vulnerabilities: VulnerabilityIndex,
    namespace_base: String,
}

impl SbomReadModelBuilder {
    pub fn new(project: ProjectInfo, components: Vec<Component>, metadata: SbomMetadata) -> Self {
        Self {
            project,
            components,
            metadata,
            sbom_id: None,
            ecosystem: None,
            vulnerabilities: VulnerabilityIndex::new(),
            namespace_base: DEFAULT_NAMESPACE_BASE.to_string(),
        }
    }

    pub fn sbom_id(mut self, sbom_id: impl Into<String>) -> Self {
        self.sbom_id = Some(sbom_id.into());
        self
    }

    pub fn ecosystem(mut self, ecosystem: Option<Ecosystem>) -> Self {
        self.ecosystem = ecosystem;
        self
    }

    pub fn vulnerabilities(mut self, vulnerabilities: VulnerabilityIndex) -> Self {
        self.vulnerabilities = vulnerabilities;
        self
    }

    pub fn namespace_base(mut self, namespace_base: impl Into<String>) -> Self {
        self.namespace_base = namespace_base.into();
        self
    }

    /// Builds the read model
    ///
    /// Vulnerability records whose key matches no component are dropped so
    /// that totals only count records that reach an export.
    pub fn build(self) -> SbomReadModel {
        let vulnerabilities = Self::build_vulnerabilities(&self.components, &self.vulnerabilities);

        SbomReadModel {
            project: self.project,
            metadata: self.metadata,
            sbom_id: self.sbom_id,
            stored_format: SbomFormat::Spdx,
            ecosystem: self.ecosystem,
            components: self.components,
            vulnerabilities,
            namespace_base: self.namespace_base,
        }
    }

    fn build_vulnerabilities(
        components: &[Component],
        index: &VulnerabilityIndex,
    ) -> VulnerabilityIndex {
        let mut attached = VulnerabilityIndex::new();
        for component in components {
            let key = component.identity_key();
            for record in index.for_component(&key) {
                attached.insert(key.clone(), record.clone());
            }
        }
        attached
    }
}
