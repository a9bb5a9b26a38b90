use crate::adapters::outbound::filesystem::write_atomically;
use crate::ports::outbound::SbomRepository;
use crate::sbom_generation::domain::{Component, SbomFormat};
use crate::shared::error::SbomError;
use crate::shared::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const RECORD_FILE: &str = "sbom.json";
const DOCUMENT_FILE: &str = "document.json";
const COMPONENTS_FILE: &str = "components.json";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SbomRecord<'a> {
    id: &'a str,
    project_id: &'a str,
    version: &'a str,
    format: &'static str,
    stored_at: String,
}

/// FileSystemSbomRepository stores each SBOM in its own directory:
///
/// ```text
/// <store>/<sbom-id>/sbom.json        record (project, version, format)
/// <store>/<sbom-id>/document.json    raw document
/// <store>/<sbom-id>/components.json  canonical components
/// ```
pub struct FileSystemSbomRepository {
    store_dir: PathBuf,
}

impl FileSystemSbomRepository {
    pub fn new(store_dir: PathBuf) -> Self {
        Self { store_dir }
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    pub fn sbom_dir(&self, sbom_id: &str) -> PathBuf {
        self.store_dir.join(sbom_id)
    }

    fn create_dir(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| {
            SbomError::FileWriteError {
                path: dir.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl SbomRepository for FileSystemSbomRepository {
    fn persist_document(
        &self,
        project_id: &str,
        version: &str,
        format: SbomFormat,
        raw_content: &str,
    ) -> Result<String> {
        let sbom_id = Uuid::new_v4().to_string();
        let dir = self.sbom_dir(&sbom_id);
        self.create_dir(&dir)?;

        let record = SbomRecord {
            id: &sbom_id,
            project_id,
            version,
            format: format.as_str(),
            stored_at: chrono::Utc::now().to_rfc3339(),
        };
        write_atomically(
            &dir.join(RECORD_FILE),
            serde_json::to_string_pretty(&record)?.as_bytes(),
        )?;
        write_atomically(&dir.join(DOCUMENT_FILE), raw_content.as_bytes())?;

        tracing::info!(sbom_id = %sbom_id, dir = %dir.display(), "document persisted");
        Ok(sbom_id)
    }

    fn persist_components(&self, sbom_id: &str, components: &[Component]) -> Result<()> {
        let dir = self.sbom_dir(sbom_id);
        if !dir.join(RECORD_FILE).is_file() {
            return Err(SbomError::SbomNotFound {
                sbom_id: sbom_id.to_string(),
            }
            .into());
        }

        let json = serde_json::to_string_pretty(components)?;
        write_atomically(&dir.join(COMPONENTS_FILE), json.as_bytes())?;
        tracing::debug!(sbom_id, count = components.len(), "components persisted");
        Ok(())
    }
}
