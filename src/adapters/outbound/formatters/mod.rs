/// Formatter adapters for different SBOM output formats
mod csv_formatter;
mod cyclonedx_formatter;
mod json_formatter;
mod spdx_formatter;
mod spreadsheet_formatter;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use csv_formatter::CsvFormatter;
pub use cyclonedx_formatter::CycloneDxFormatter;
pub use json_formatter::JsonFormatter;
pub use spdx_formatter::SpdxFormatter;
pub use spreadsheet_formatter::SpreadsheetFormatter;
