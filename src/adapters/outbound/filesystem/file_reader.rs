use crate::ports::outbound::ManifestReader;
use crate::sbom_generation::parsers::ParserRegistry;
use crate::shared::security::{read_guarded, validate_project_directory, MAX_FILE_SIZE};
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// FileSystemReader adapter for reading manifests from the file system
///
/// Discovery is non-recursive: it checks the project directory for each
/// recognized basename, in the parser registry's order.
pub struct FileSystemReader {
    registry: ParserRegistry,
    max_file_size: u64,
}

impl FileSystemReader {
    pub fn new() -> Self {
        Self {
            registry: ParserRegistry::new(),
            max_file_size: MAX_FILE_SIZE,
        }
    }

    /// Manifests larger than `max_file_size` bytes are rejected on read
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestReader for FileSystemReader {
    fn discover_manifests(&self, project_dir: &Path) -> Result<Vec<PathBuf>> {
        validate_project_directory(project_dir)?;

        let found: Vec<PathBuf> = self
            .registry
            .known_file_names()
            .into_iter()
            .map(|name| project_dir.join(name))
            .filter(|path| path.is_file())
            .collect();

        tracing::debug!(
            dir = %project_dir.display(),
            count = found.len(),
            "discovered manifests"
        );
        Ok(found)
    }

    fn read_manifest(&self, path: &Path) -> Result<String> {
        read_guarded(path, self.max_file_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn file_names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_discover_in_registry_order() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["Cargo.lock", "go.mod", "package.json", "README.md", "pom.xml"] {
            fs::write(temp_dir.path().join(name), "").unwrap();
        }

        let found = FileSystemReader::new()
            .discover_manifests(temp_dir.path())
            .unwrap();

        assert_eq!(
            file_names(&found),
            vec!["package.json", "pom.xml", "go.mod", "Cargo.lock"]
        );
    }

    #[test]
    fn test_discover_is_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("web");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("package.json"), "{}").unwrap();

        let found = FileSystemReader::new()
            .discover_manifests(temp_dir.path())
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_discover_missing_directory() {
        let result = FileSystemReader::new().discover_manifests(Path::new("/nonexistent/project"));
        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("Directory does not exist"));
    }

    #[test]
    fn test_read_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("go.sum");
        fs::write(&path, "mod v1.0.0 h1:abc=\n").unwrap();

        let content = FileSystemReader::new().read_manifest(&path).unwrap();
        assert_eq!(content, "mod v1.0.0 h1:abc=\n");
    }

    #[test]
    fn test_read_manifest_too_large() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("requirements.txt");
        fs::write(&path, "requests==2.31.0\n").unwrap();

        let result = FileSystemReader::new()
            .with_max_file_size(4)
            .read_manifest(&path);
        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("too large"));
    }
}
