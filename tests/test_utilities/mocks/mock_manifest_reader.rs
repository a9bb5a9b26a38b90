use manifest_sbom::prelude::*;
use std::path::{Path, PathBuf};

/// Mock ManifestReader serving in-memory files under a fake project root
pub struct MockManifestReader {
    pub root: PathBuf,
    pub files: Vec<(String, String)>,
    pub should_fail: bool,
}

impl MockManifestReader {
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self {
            root: PathBuf::from("/mock-project"),
            files: files
                .iter()
                .map(|(name, content)| (name.to_string(), content.to_string()))
                .collect(),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new(&[])
        }
    }
}

impl ManifestReader for MockManifestReader {
    fn discover_manifests(&self, _project_dir: &Path) -> Result<Vec<PathBuf>> {
        if self.should_fail {
            anyhow::bail!("Mock manifest discovery failure");
        }
        Ok(self
            .files
            .iter()
            .map(|(name, _)| self.root.join(name))
            .collect())
    }

    fn read_manifest(&self, path: &Path) -> Result<String> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.files
            .iter()
            .find(|(file, _)| *file == name)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| anyhow::anyhow!("Mock file not found: {}", path.display()))
    }
}
