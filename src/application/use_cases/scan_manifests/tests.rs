use super::*;
use crate::adapters::outbound::persistence::InMemorySbomRepository;
use crate::sbom_generation::domain::{Component, Ecosystem, ProjectInfo};
use std::cell::RefCell;
use std::collections::HashMap;

// Mock implementations for testing
struct MockManifestReader {
    files: Vec<(PathBuf, String)>,
}

impl MockManifestReader {
    fn new(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(name, content)| (PathBuf::from("/project").join(name), content.to_string()))
                .collect(),
        }
    }
}

impl ManifestReader for MockManifestReader {
    fn discover_manifests(&self, _project_dir: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.files.iter().map(|(path, _)| path.clone()).collect())
    }

    fn read_manifest(&self, path: &Path) -> Result<String> {
        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| anyhow::anyhow!("not found: {}", path.display()))
    }
}

#[derive(Default)]
struct RecordingRepository {
    documents: RefCell<Vec<String>>,
    components: RefCell<HashMap<String, Vec<Component>>>,
}

impl SbomRepository for RecordingRepository {
    fn persist_document(
        &self,
        project_id: &str,
        _version: &str,
        _format: SbomFormat,
        raw_content: &str,
    ) -> Result<String> {
        self.documents.borrow_mut().push(raw_content.to_string());
        Ok(format!("{}-{}", project_id, self.documents.borrow().len()))
    }

    fn persist_components(&self, sbom_id: &str, components: &[Component]) -> Result<()> {
        self.components
            .borrow_mut()
            .insert(sbom_id.to_string(), components.to_vec());
        Ok(())
    }
}

struct MockProgressReporter;

impl ProgressReporter for MockProgressReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, _message: &str) {}
    fn report_completion(&self, _message: &str) {}
}

fn request() -> ScanRequest {
    ScanRequest::new(PathBuf::from("/project"), ProjectInfo::new("shop", "2.0.0"))
}

const PACKAGE_JSON: &str = r#"{
  "dependencies": { "express": "^4.18.2", "lodash": "4.17.21" },
  "devDependencies": { "jest": "~29.7.0" }
}"#;

const PACKAGE_LOCK: &str = r#"{
  "lockfileVersion": 3,
  "packages": {
    "": { "name": "shop" },
    "node_modules/lodash": { "version": "4.17.21", "license": "MIT" },
    "node_modules/qs": { "version": "6.11.0" }
  }
}"#;

#[tokio::test]
async fn test_execute_scans_and_persists() {
    let reader = MockManifestReader::new(&[
        ("package.json", PACKAGE_JSON),
        ("requirements.txt", "requests==2.31.0\n"),
    ]);
    let use_case = ScanManifestsUseCase::new(reader, RecordingRepository::default(), MockProgressReporter);

    let response = use_case.execute(request()).await.unwrap();

    let names: Vec<&str> = response.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["express", "lodash", "jest", "requests"]);
    assert_eq!(response.ecosystem, Some(Ecosystem::Python));
    assert_eq!(response.ecosystems.len(), 2);
    assert_eq!(response.files_processed.len(), 2);
    assert_eq!(response.files_processed[0].file_name, "package.json");
    assert_eq!(response.files_processed[0].component_count, 3);
    assert_eq!(response.sbom_id, "shop-1");
    assert_eq!(response.document.packages.len(), 5);

    let repo = use_case.sbom_repository();
    assert_eq!(repo.documents.borrow().len(), 1);
    assert_eq!(repo.components.borrow()["shop-1"], response.components);
}

#[tokio::test]
async fn test_persisted_document_matches_response() {
    let reader = MockManifestReader::new(&[("package.json", PACKAGE_JSON)]);
    let use_case = ScanManifestsUseCase::new(reader, RecordingRepository::default(), MockProgressReporter);

    let response = use_case.execute(request()).await.unwrap();
    let stored = use_case.sbom_repository().documents.borrow()[0].clone();
    assert_eq!(stored, serde_json::to_string_pretty(&response.document).unwrap());
}

#[tokio::test]
async fn test_duplicates_across_files_keep_first() {
    let reader = MockManifestReader::new(&[
        ("package.json", PACKAGE_JSON),
        ("package-lock.json", PACKAGE_LOCK),
    ]);
    let use_case = ScanManifestsUseCase::new(reader, InMemorySbomRepository::new(), MockProgressReporter);

    let response = use_case.execute(request()).await.unwrap();

    assert_eq!(response.total_parsed, 5);
    assert_eq!(response.components.len(), 4);
    assert_eq!(response.duplicates_removed(), 1);
    let lodash = response
        .components
        .iter()
        .find(|c| c.name == "lodash")
        .unwrap();
    assert!(lodash.license.is_none());

    let stored = use_case.sbom_repository().get(&response.sbom_id).unwrap();
    assert_eq!(stored.components.len(), 4);
}

#[tokio::test]
async fn test_no_manifests_found() {
    let use_case = ScanManifestsUseCase::new(
        MockManifestReader::new(&[]),
        InMemorySbomRepository::new(),
        MockProgressReporter,
    );

    let err = use_case.execute(request()).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SbomError>(),
        Some(SbomError::NoManifestsFound { .. })
    ));
    assert!(use_case.sbom_repository().is_empty());
}

#[tokio::test]
async fn test_first_failure_in_file_order_aborts() {
    let reader = MockManifestReader::new(&[
        ("package.json", "{ not json"),
        ("Cargo.toml", "[dependencies\n"),
    ]);
    let use_case = ScanManifestsUseCase::new(reader, InMemorySbomRepository::new(), MockProgressReporter);

    let err = use_case.execute(request()).await.unwrap_err();
    match err.downcast_ref::<SbomError>() {
        Some(SbomError::MalformedManifest { file_name, .. }) => {
            assert_eq!(file_name, "package.json")
        }
        other => panic!("expected MalformedManifest, got {:?}", other),
    }
    assert!(use_case.sbom_repository().is_empty());
}

#[tokio::test]
async fn test_explicit_unsupported_file_fails() {
    let reader = MockManifestReader::new(&[("setup.py", "from setuptools import setup")]);
    let use_case = ScanManifestsUseCase::new(reader, InMemorySbomRepository::new(), MockProgressReporter);

    let err = use_case
        .execute(request().with_files(vec![PathBuf::from("setup.py")]))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SbomError>(),
        Some(SbomError::UnsupportedFile { .. })
    ));
}

#[tokio::test]
async fn test_namespace_base_is_applied() {
    let reader = MockManifestReader::new(&[("go.mod", "module example.com/app\n\nrequire github.com/pkg/errors v0.9.1\n")]);
    let use_case = ScanManifestsUseCase::new(reader, InMemorySbomRepository::new(), MockProgressReporter);

    let response = use_case
        .execute(request().with_namespace_base("https://sbom.example.org/"))
        .await
        .unwrap();

    assert!(response
        .document
        .document_namespace
        .starts_with("https://sbom.example.org/shop/"));
    assert_eq!(response.namespace_base, "https://sbom.example.org/");
    assert_eq!(response.components[0].version, "0.9.1");
}
