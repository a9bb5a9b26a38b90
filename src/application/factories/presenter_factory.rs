use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::{Path, PathBuf};

/// Where an export is delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

impl PresenterType {
    /// Resolves the `--output` argument.
    ///
    /// No path means stdout; an existing directory receives `export_filename`.
    pub fn resolve(output: Option<&Path>, export_filename: &str) -> Self {
        match output {
            None => PresenterType::Stdout,
            Some(path) if path.is_dir() => PresenterType::File(path.join(export_filename)),
            Some(path) => PresenterType::File(path.to_path_buf()),
        }
    }
}

/// Factory for creating output presenters
pub struct PresenterFactory;

impl PresenterFactory {
    /// Creates a presenter instance for the specified type
    ///
    /// # Examples
    /// ```
    /// use manifest_sbom::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::Stdout);
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_stdout() {
        assert_eq!(
            PresenterType::resolve(None, "sbom-shop-v1.0.0-spdx.json"),
            PresenterType::Stdout
        );
    }

    #[test]
    fn test_resolve_directory_uses_export_filename() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            PresenterType::resolve(Some(dir.path()), "sbom-shop-v1.0.0.csv"),
            PresenterType::File(dir.path().join("sbom-shop-v1.0.0.csv"))
        );
    }

    #[test]
    fn test_resolve_file_path_is_kept() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.json");
        assert_eq!(
            PresenterType::resolve(Some(&target), "ignored.json"),
            PresenterType::File(target.clone())
        );
    }

    #[test]
    fn test_create_file_presenter_writes() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.csv");
        PresenterFactory::create(PresenterType::File(target.clone()))
            .present("\"a\"")
            .unwrap();
        assert_eq!(std::fs::read_to_string(target).unwrap(), "\"a\"");
    }
}
