use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Tool name recorded in every generated document
pub const TOOL_NAME: &str = "manifest-sbom";

/// Generation facts shared by every rendered document of one SBOM.
///
/// The serial number doubles as the SPDX namespace suffix and the CycloneDX
/// `serialNumber`, so both documents of a scan point at the same SBOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
    serial_number: String,
}

impl SbomMetadata {
    pub fn new(
        timestamp: String,
        tool_name: String,
        tool_version: String,
        serial_number: String,
    ) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
            serial_number,
        }
    }

    /// Fresh metadata stamped now, with a random v4 serial
    pub fn generate(tool_name: impl Into<String>, tool_version: impl Into<String>) -> Self {
        Self::new(
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            tool_name.into(),
            tool_version.into(),
            Uuid::new_v4().urn().to_string(),
        )
    }

    /// `generate` for this build of manifest-sbom
    pub fn for_current_tool() -> Self {
        Self::generate(TOOL_NAME, env!("CARGO_PKG_VERSION"))
    }

    /// RFC3339 creation time
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    /// `urn:uuid:<uuid>` form, as CycloneDX expects
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Bare UUID, used as the unique segment of SPDX namespaces
    pub fn uuid(&self) -> &str {
        self.serial_number
            .strip_prefix("urn:uuid:")
            .unwrap_or(&self.serial_number)
    }

    /// SPDX creator label, e.g. `Tool: manifest-sbom-0.4.0`
    pub fn tool_creator(&self) -> String {
        format!("Tool: {}-{}", self.tool_name, self.tool_version)
    }
}
