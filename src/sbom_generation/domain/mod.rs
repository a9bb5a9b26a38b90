pub mod component;
pub mod ingestion;
pub mod license;
pub mod parse_result;
pub mod project;
pub mod sbom_metadata;
pub mod spdx_document;
pub mod vulnerability;

pub use component::{is_unresolved_version, Component, Ecosystem};
pub use ingestion::{IngestionOutcome, ProcessedFile};
pub use license::{
    Compatibility, LicenseCategory, LicenseEntry, LicenseInfo, LicensePolicy, LicenseSummary,
    PolicyDecision, PolicyRules, PolicyViolation, RiskDistribution, RiskLevel, UNKNOWN_LICENSE,
};
pub use parse_result::{ManifestFile, ParseResult};
pub use project::{ProjectInfo, SbomFormat};
pub use sbom_metadata::{SbomMetadata, TOOL_NAME};
pub use spdx_document::{
    RelationshipType, SpdxChecksum, SpdxCreationInfo, SpdxDocument, SpdxExternalRef, SpdxPackage,
    SpdxRelationship,
};
pub use vulnerability::{Severity, VulnerabilityIndex, VulnerabilityRecord, VulnerabilityStatus};
