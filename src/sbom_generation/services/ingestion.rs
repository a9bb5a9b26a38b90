use crate::sbom_generation::domain::{IngestionOutcome, ManifestFile, ParseResult, ProcessedFile};
use crate::sbom_generation::parsers::ParserRegistry;
use crate::shared::error::SbomError;

/// ManifestIngestionPipeline dispatches manifests to their parsers and
/// aggregates the results.
///
/// Parsing and aggregation are separate steps so callers can parse files
/// concurrently and hand the results back in discovery order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestIngestionPipeline {
    registry: ParserRegistry,
}

impl ManifestIngestionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    pub fn parse_file(&self, manifest: &ManifestFile) -> Result<ParseResult, SbomError> {
        let result = self
            .registry
            .parse(&manifest.file_name, &manifest.content)?;
        tracing::debug!(
            file = %manifest.file_name,
            ecosystem = %result.ecosystem,
            components = result.components.len(),
            "parsed manifest"
        );
        Ok(result)
    }

    /// Concatenates parse results in the order given.
    ///
    /// No deduplication happens here.
    pub fn aggregate(results: Vec<(String, ParseResult)>) -> IngestionOutcome {
        let mut outcome = IngestionOutcome::default();
        for (file_name, result) in results {
            outcome.files_processed.push(ProcessedFile {
                file_name,
                ecosystem: result.ecosystem,
                component_count: result.components.len(),
            });
            outcome.ecosystem = Some(result.ecosystem);
            outcome.ecosystems.insert(result.ecosystem);
            outcome.components.extend(result.components);
        }
        outcome
    }

    /// Parses every manifest in order, stopping at the first failure
    pub fn ingest(&self, manifests: &[ManifestFile]) -> Result<IngestionOutcome, SbomError> {
        let results = manifests
            .iter()
            .map(|m| Ok((m.file_name.clone(), self.parse_file(m)?)))
            .collect::<Result<Vec<_>, SbomError>>()?;
        Ok(Self::aggregate(results))
    }
}
