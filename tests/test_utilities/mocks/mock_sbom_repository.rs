use manifest_sbom::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock SbomRepository recording every call, with sequential ids
#[derive(Default, Clone)]
pub struct MockSbomRepository {
    pub documents: Arc<Mutex<Vec<(String, String, SbomFormat, String)>>>,
    pub components: Arc<Mutex<Vec<(String, Vec<Component>)>>>,
    pub fail_on_components: bool,
}

impl MockSbomRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_components() -> Self {
        Self {
            fail_on_components: true,
            ..Self::default()
        }
    }

    pub fn document_count(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    pub fn stored_components(&self, sbom_id: &str) -> Option<Vec<Component>> {
        self.components
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| id == sbom_id)
            .map(|(_, components)| components.clone())
    }
}

impl SbomRepository for MockSbomRepository {
    fn persist_document(
        &self,
        project_id: &str,
        version: &str,
        format: SbomFormat,
        raw_content: &str,
    ) -> Result<String> {
        let mut documents = self.documents.lock().unwrap();
        documents.push((
            project_id.to_string(),
            version.to_string(),
            format,
            raw_content.to_string(),
        ));
        Ok(format!("sbom-{}", documents.len()))
    }

    fn persist_components(&self, sbom_id: &str, components: &[Component]) -> Result<()> {
        if self.fail_on_components {
            anyhow::bail!("Mock component storage failure");
        }
        self.components
            .lock()
            .unwrap()
            .push((sbom_id.to_string(), components.to_vec()));
        Ok(())
    }
}
