/// Use cases module containing application business logic orchestration
mod audit_licenses;
mod export_sbom;
mod scan_manifests;

pub use audit_licenses::AuditLicensesUseCase;
pub use export_sbom::{ExportArtifact, ExportSbomUseCase};
pub use scan_manifests::ScanManifestsUseCase;
