use crate::sbom_generation::domain::ProjectInfo;
use crate::sbom_generation::services::DEFAULT_NAMESPACE_BASE;
use std::path::PathBuf;

/// ScanRequest - Internal request DTO for the manifest scan use case
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Directory the manifests are discovered in
    pub project_path: PathBuf,
    /// Explicit manifest list; discovery is skipped when present.
    /// Relative paths are resolved against `project_path`.
    pub files: Option<Vec<PathBuf>>,
    /// Project the resulting SBOM describes
    pub project: ProjectInfo,
    /// Prefix of the SPDX document namespace
    pub namespace_base: String,
}

impl ScanRequest {
    pub fn new(project_path: PathBuf, project: ProjectInfo) -> Self {
        Self {
            project_path,
            files: None,
            project,
            namespace_base: DEFAULT_NAMESPACE_BASE.to_string(),
        }
    }

    pub fn with_files(mut self, files: Vec<PathBuf>) -> Self {
        self.files = Some(files);
        self
    }

    pub fn with_namespace_base(mut self, namespace_base: impl Into<String>) -> Self {
        self.namespace_base = namespace_base.into();
        self
    }
}
