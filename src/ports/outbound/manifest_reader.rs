use crate::shared::Result;
use std::path::{Path, PathBuf};

/// ManifestReader port for locating and reading dependency manifests
///
/// This port abstracts the file system operations needed to find the
/// recognized manifest files of a project and load their content.
pub trait ManifestReader {
    /// Lists the recognized manifests directly inside `project_dir`
    ///
    /// # Returns
    /// Paths in discovery order, which is the fixed order of recognized
    /// basenames. Files that do not exist are simply absent.
    ///
    /// # Errors
    /// Returns an error if the directory is missing or is not a directory
    fn discover_manifests(&self, project_dir: &Path) -> Result<Vec<PathBuf>>;

    /// Reads one manifest as text
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read due to permissions or I/O errors
    /// - The file is a symlink or exceeds the size limit
    fn read_manifest(&self, path: &Path) -> Result<String>;
}
