/// Export format enumeration
///
/// Every canonical component set can be rendered into any of these formats.
/// It belongs in the application layer as both the CLI (inbound adapter)
/// and the formatters (outbound adapters) need to understand it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// SPDX 2.3 JSON (default)
    #[default]
    Spdx,
    /// CycloneDX 1.5 JSON
    CycloneDx,
    /// Flat 12-column CSV
    Csv,
    /// JSON envelope around the flat rows
    Json,
    /// SpreadsheetML 2003 workbook
    Spreadsheet,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Spdx,
        ExportFormat::CycloneDx,
        ExportFormat::Csv,
        ExportFormat::Json,
        ExportFormat::Spreadsheet,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Spdx | ExportFormat::CycloneDx | ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Spreadsheet => "xml",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Spdx | ExportFormat::CycloneDx | ExportFormat::Json => {
                "application/json"
            }
            ExportFormat::Csv => "text/csv",
            ExportFormat::Spreadsheet => "application/vnd.ms-excel",
        }
    }

    /// Deterministic download name: `sbom-<project>-v<version>[-spdx|-cdx].<ext>`
    ///
    /// Path separators in the project name become `-`.
    pub fn export_filename(&self, project: &str, version: &str) -> String {
        let project: String = project
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
            .collect();
        let suffix = match self {
            ExportFormat::Spdx => "-spdx",
            ExportFormat::CycloneDx => "-cdx",
            _ => "",
        };
        format!("sbom-{}-v{}{}.{}", project, version, suffix, self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spdx" => Ok(ExportFormat::Spdx),
            "cyclonedx" | "cdx" => Ok(ExportFormat::CycloneDx),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "spreadsheet" | "excel" | "xls" => Ok(ExportFormat::Spreadsheet),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'spdx', 'cyclonedx', 'csv', 'json' or 'spreadsheet'",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Spdx => write!(f, "spdx"),
            ExportFormat::CycloneDx => write!(f, "cyclonedx"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Spreadsheet => write!(f, "spreadsheet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!(ExportFormat::from_str("SPDX").unwrap(), ExportFormat::Spdx);
        assert_eq!(ExportFormat::from_str("cdx").unwrap(), ExportFormat::CycloneDx);
        assert_eq!(
            ExportFormat::from_str("Excel").unwrap(),
            ExportFormat::Spreadsheet
        );
    }

    #[test]
    fn test_export_format_from_str_invalid() {
        let error = ExportFormat::from_str("markdown").unwrap_err();
        assert!(error.contains("Invalid format"));
        assert!(error.contains("markdown"));
        assert!(error.contains("cyclonedx"));
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for format in ExportFormat::ALL {
            assert_eq!(ExportFormat::from_str(&format.to_string()).unwrap(), format);
        }
    }

    #[test]
    fn test_export_filenames() {
        let cases = [
            (ExportFormat::Spdx, "sbom-shop-v1.2.0-spdx.json"),
            (ExportFormat::CycloneDx, "sbom-shop-v1.2.0-cdx.json"),
            (ExportFormat::Csv, "sbom-shop-v1.2.0.csv"),
            (ExportFormat::Json, "sbom-shop-v1.2.0.json"),
            (ExportFormat::Spreadsheet, "sbom-shop-v1.2.0.xml"),
        ];
        for (format, expected) in cases {
            assert_eq!(format.export_filename("shop", "1.2.0"), expected);
        }
    }

    #[test]
    fn test_export_filename_replaces_path_separators() {
        assert_eq!(
            ExportFormat::Csv.export_filename("@acme/shop", "1.0.0"),
            "sbom-@acme-shop-v1.0.0.csv"
        );
    }

    #[test]
    fn test_default_is_spdx() {
        assert_eq!(ExportFormat::default(), ExportFormat::Spdx);
    }
}
