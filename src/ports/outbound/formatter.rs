use crate::application::read_models::SbomReadModel;
use crate::shared::Result;

/// SbomFormatter port for formatting SBOM output
///
/// This port abstracts the formatting logic for the export formats
/// (SPDX, CycloneDX, CSV, JSON, SpreadsheetML).
pub trait SbomFormatter {
    /// Formats SBOM output using the unified read model
    ///
    /// # Arguments
    /// * `model` - The unified SBOM read model containing project, metadata,
    ///   components, and vulnerability information
    ///
    /// # Returns
    /// Formatted SBOM content as a string
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, model: &SbomReadModel) -> Result<String>;
}
