//! SBOM read model for export operations
//!
//! This module provides the read model that aggregates everything an export
//! formatter needs: the project, the canonical components, generation
//! metadata and any externally supplied vulnerability records.

use crate::sbom_generation::domain::{
    Component, Ecosystem, ProjectInfo, SbomFormat, SbomMetadata, VulnerabilityIndex,
};

/// Main read model for SBOM data
///
/// Documents are derived views: every formatter recomputes its output from
/// `components`, so the same model always renders the same documents.
#[derive(Debug, Clone)]
pub struct SbomReadModel {
    /// The scanned project (root of every document)
    pub project: ProjectInfo,
    /// Generation timestamp, tool, and serial number
    pub metadata: SbomMetadata,
    /// Storage id, once the SBOM has been persisted
    pub sbom_id: Option<String>,
    /// Format the SBOM was persisted in
    pub stored_format: SbomFormat,
    /// Dominant ecosystem of the scan
    pub ecosystem: Option<Ecosystem>,
    /// Canonical, deduplicated components
    pub components: Vec<Component>,
    pub vulnerabilities: VulnerabilityIndex,
    /// Prefix of SPDX document namespaces
    pub namespace_base: String,
}

impl SbomReadModel {
    /// SBOM id, falling back to the serial number's UUID when not persisted
    pub fn document_id(&self) -> &str {
        self.sbom_id
            .as_deref()
            .unwrap_or_else(|| self.metadata.uuid())
    }

    pub fn has_vulnerabilities(&self) -> bool {
        !self.vulnerabilities.is_empty()
    }
}
