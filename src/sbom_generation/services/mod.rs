mod deduplicator;
mod ingestion;
mod license_auditor;
mod license_normalizer;
mod policy_engine;
mod spdx_synthesizer;
mod tabular_exporter;

pub use deduplicator::ComponentDeduplicator;
pub use ingestion::ManifestIngestionPipeline;
pub use license_auditor::LicenseAuditor;
pub use license_normalizer::LicenseNormalizer;
pub use policy_engine::PolicyEngine;
pub use spdx_synthesizer::{SpdxSynthesizer, DEFAULT_NAMESPACE_BASE};
pub use tabular_exporter::{TabularExporter, TabularRow, TABULAR_COLUMNS};
