use crate::application::read_models::SbomReadModel;
use crate::ports::outbound::SbomFormatter;
use crate::sbom_generation::services::SpdxSynthesizer;
use crate::shared::Result;

/// SpdxFormatter adapter for generating SPDX 2.3 JSON format
///
/// The document is synthesized from the canonical components with the
/// model's own metadata and namespace, so an export of a persisted SBOM is
/// identical to the stored document.
pub struct SpdxFormatter;

impl SpdxFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpdxFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for SpdxFormatter {
    fn format(&self, model: &SbomReadModel) -> Result<String> {
        let document = SpdxSynthesizer::new(model.namespace_base.clone()).synthesize(
            &model.project,
            &model.components,
            model.ecosystem,
            &model.metadata,
        )?;

        serde_json::to_string_pretty(&document).map_err(Into::into)
    }
}
