use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Package-manager universe a component was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Npm,
    Python,
    Java,
    Go,
    Rust,
}

impl Ecosystem {
    /// Package URL type for this ecosystem
    pub fn purl_type(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Python => "pypi",
            Ecosystem::Java => "maven",
            Ecosystem::Go => "golang",
            Ecosystem::Rust => "cargo",
        }
    }

    /// Registry recorded as supplier when the manifest names none
    pub fn default_supplier(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Python => "PyPI",
            Ecosystem::Java => "Maven Central",
            Ecosystem::Go => "Go Modules",
            Ecosystem::Rust => "crates.io",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Python => "python",
            Ecosystem::Java => "java",
            Ecosystem::Go => "go",
            Ecosystem::Rust => "rust",
        }
    }

    /// Accepts the display name or the purl type, case-insensitively
    pub fn from_str_loose(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "npm" => Some(Ecosystem::Npm),
            "python" | "pypi" => Some(Ecosystem::Python),
            "java" | "maven" => Some(Ecosystem::Java),
            "go" | "golang" => Some(Ecosystem::Go),
            "rust" | "cargo" => Some(Ecosystem::Rust),
            _ => None,
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical, ecosystem-agnostic representation of one dependency.
///
/// Fields are public: components are plain data produced by the parsers,
/// deduplicated once and then treated as immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    /// Raw license string as declared; normalization happens at policy time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum_sha256: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub origin: Ecosystem,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Component {
    /// Creates a component with the ecosystem's default supplier and derived purl
    pub fn new(origin: Ecosystem, name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        let version = version.into();
        let purl = Self::make_purl(origin, &name, &version);
        Self {
            name,
            version,
            supplier: Some(origin.default_supplier().to_string()),
            license: None,
            purl,
            checksum_sha256: None,
            dependencies: Vec::new(),
            origin,
            metadata: BTreeMap::new(),
            description: None,
        }
    }

    /// Builds `pkg:<scheme>/<name>@<version>`.
    ///
    /// Returns `None` for placeholder versions, which identify no concrete release.
    pub fn make_purl(origin: Ecosystem, name: &str, version: &str) -> Option<String> {
        if is_unresolved_version(version) {
            return None;
        }
        Some(format!("pkg:{}/{}@{}", origin.purl_type(), name, version))
    }

    /// Identity key used for deduplication and dependency edge resolution
    pub fn identity_key(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn with_license(mut self, license: Option<String>) -> Self {
        self.license = license.filter(|l| !l.trim().is_empty());
        self
    }

    pub fn with_checksum(mut self, checksum: Option<String>) -> Self {
        self.checksum_sha256 = checksum;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn metadata_flag(&self, key: &str) -> bool {
        self.metadata
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }
}

/// Versions that name no concrete release
pub fn is_unresolved_version(version: &str) -> bool {
    matches!(version.trim(), "" | "*" | "unknown" | "latest")
}
