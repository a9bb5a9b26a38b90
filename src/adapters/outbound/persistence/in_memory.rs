use crate::ports::outbound::SbomRepository;
use crate::sbom_generation::domain::{Component, SbomFormat};
use crate::shared::error::SbomError;
use crate::shared::Result;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// One persisted SBOM
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSbom {
    pub project_id: String,
    pub version: String,
    pub format: SbomFormat,
    pub raw_content: String,
    pub components: Vec<Component>,
}

/// InMemorySbomRepository keeps SBOMs for the lifetime of the process.
///
/// Ids are random v4 UUIDs.
#[derive(Debug, Default)]
pub struct InMemorySbomRepository {
    sboms: Mutex<HashMap<String, StoredSbom>>,
}

impl InMemorySbomRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, sbom_id: &str) -> Option<StoredSbom> {
        self.sboms.lock().ok()?.get(sbom_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.sboms.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, StoredSbom>>> {
        self.sboms
            .lock()
            .map_err(|_| anyhow::anyhow!("SBOM repository lock poisoned"))
    }
}

impl SbomRepository for InMemorySbomRepository {
    fn persist_document(
        &self,
        project_id: &str,
        version: &str,
        format: SbomFormat,
        raw_content: &str,
    ) -> Result<String> {
        let sbom_id = Uuid::new_v4().to_string();
        self.lock()?.insert(
            sbom_id.clone(),
            StoredSbom {
                project_id: project_id.to_string(),
                version: version.to_string(),
                format,
                raw_content: raw_content.to_string(),
                components: Vec::new(),
            },
        );
        tracing::debug!(sbom_id = %sbom_id, project_id, "document stored in memory");
        Ok(sbom_id)
    }

    fn persist_components(&self, sbom_id: &str, components: &[Component]) -> Result<()> {
        let mut sboms = self.lock()?;
        let stored = sboms.get_mut(sbom_id).ok_or_else(|| SbomError::SbomNotFound {
            sbom_id: sbom_id.to_string(),
        })?;
        stored.components = components.to_vec();
        Ok(())
    }
}
