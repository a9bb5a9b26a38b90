use crate::sbom_generation::domain::{Component, SbomFormat};
use crate::shared::Result;

/// SbomRepository port for storing synthesized SBOMs
///
/// Storage is an external collaborator: the scan persists the raw document
/// first, then stores the canonical components under the returned id.
pub trait SbomRepository {
    /// Persists a raw document and returns its SBOM id
    ///
    /// # Arguments
    /// * `project_id` - Identifier of the scanned project
    /// * `version` - SBOM version label
    /// * `format` - Format of `raw_content`
    /// * `raw_content` - The serialized document
    fn persist_document(
        &self,
        project_id: &str,
        version: &str,
        format: SbomFormat,
        raw_content: &str,
    ) -> Result<String>;

    /// Stores the canonical component set under an SBOM id
    ///
    /// # Errors
    /// Returns an error if the id is unknown or the write fails
    fn persist_components(&self, sbom_id: &str, components: &[Component]) -> Result<()>;
}
