use crate::application::read_models::SbomReadModel;
use crate::ports::outbound::SbomFormatter;
use crate::sbom_generation::services::{TabularExporter, TABULAR_COLUMNS};
use crate::shared::Result;
use anyhow::Context;
use csv::{QuoteStyle, WriterBuilder};

/// CsvFormatter adapter for the 12-column tabular export
///
/// Every field is quoted; embedded quotes are doubled per RFC 4180.
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for CsvFormatter {
    fn format(&self, model: &SbomReadModel) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_writer(Vec::new());

        writer.write_record(TABULAR_COLUMNS)?;
        for row in TabularExporter::rows(&model.components, &model.vulnerabilities) {
            writer.write_record(row.cells())?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))?;
        String::from_utf8(bytes).context("CSV output is not valid UTF-8")
    }
}
