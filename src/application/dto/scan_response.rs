use crate::application::read_models::SbomReadModelBuilder;
use crate::sbom_generation::domain::{
    Component, Ecosystem, ProcessedFile, ProjectInfo, SbomMetadata, SpdxDocument,
};
use std::collections::BTreeSet;

/// ScanResponse - Internal response DTO from the manifest scan use case
#[derive(Debug, Clone)]
pub struct ScanResponse {
    /// Id the repository assigned to the persisted SBOM
    pub sbom_id: String,
    pub project: ProjectInfo,
    /// Metadata shared by every document of this SBOM
    pub metadata: SbomMetadata,
    /// Ecosystem of the last parsed file
    pub ecosystem: Option<Ecosystem>,
    /// Every ecosystem that contributed a file
    pub ecosystems: BTreeSet<Ecosystem>,
    pub files_processed: Vec<ProcessedFile>,
    /// Component count before deduplication
    pub total_parsed: usize,
    /// Canonical, deduplicated components in file order
    pub components: Vec<Component>,
    /// The persisted SPDX document
    pub document: SpdxDocument,
    /// Namespace prefix the document was synthesized with
    pub namespace_base: String,
}

impl ScanResponse {
    /// Starts a read model for exporting this scan
    pub fn read_model_builder(&self) -> SbomReadModelBuilder {
        SbomReadModelBuilder::new(
            self.project.clone(),
            self.components.clone(),
            self.metadata.clone(),
        )
        .sbom_id(self.sbom_id.clone())
        .ecosystem(self.ecosystem)
        .namespace_base(self.namespace_base.clone())
    }

    pub fn duplicates_removed(&self) -> usize {
        self.total_parsed - self.components.len()
    }
}
