use crate::adapters::outbound::formatters::{
    CsvFormatter, CycloneDxFormatter, JsonFormatter, SpdxFormatter, SpreadsheetFormatter,
};
use crate::application::dto::ExportFormat;
use crate::ports::outbound::SbomFormatter;

/// Factory for creating SBOM formatters
///
/// This factory encapsulates the selection of formatter adapters for each
/// export format. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified export format
    ///
    /// # Examples
    /// ```
    /// use manifest_sbom::application::dto::ExportFormat;
    /// use manifest_sbom::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(ExportFormat::CycloneDx);
    /// ```
    pub fn create(format: ExportFormat) -> Box<dyn SbomFormatter> {
        match format {
            ExportFormat::Spdx => Box::new(SpdxFormatter::new()),
            ExportFormat::CycloneDx => Box::new(CycloneDxFormatter::new()),
            ExportFormat::Csv => Box::new(CsvFormatter::new()),
            ExportFormat::Json => Box::new(JsonFormatter::new()),
            ExportFormat::Spreadsheet => Box::new(SpreadsheetFormatter::new()),
        }
    }

    /// Returns the progress message for the specified export format
    ///
    /// # Examples
    /// ```
    /// use manifest_sbom::application::dto::ExportFormat;
    /// use manifest_sbom::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(ExportFormat::Csv);
    /// assert_eq!(message, "📝 Generating CSV output...");
    /// ```
    pub fn progress_message(format: ExportFormat) -> &'static str {
        match format {
            ExportFormat::Spdx => "📝 Generating SPDX 2.3 JSON output...",
            ExportFormat::CycloneDx => "📝 Generating CycloneDX 1.5 JSON output...",
            ExportFormat::Csv => "📝 Generating CSV output...",
            ExportFormat::Json => "📝 Generating JSON output...",
            ExportFormat::Spreadsheet => "📝 Generating spreadsheet output...",
        }
    }
}
