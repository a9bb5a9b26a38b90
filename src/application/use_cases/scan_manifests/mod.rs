use crate::application::dto::{ScanRequest, ScanResponse};
use crate::ports::outbound::{ManifestReader, ProgressReporter, SbomRepository};
use crate::sbom_generation::domain::{ManifestFile, ParseResult, SbomFormat, SbomMetadata};
use crate::sbom_generation::services::{
    ComponentDeduplicator, ManifestIngestionPipeline, SpdxSynthesizer,
};
use crate::shared::error::SbomError;
use crate::shared::Result;
use futures::future::join_all;
use std::path::{Path, PathBuf};

#[cfg(test)]
mod tests;

/// ScanManifestsUseCase - Core use case for SBOM generation
///
/// Reads a project's manifests, parses them concurrently, deduplicates the
/// components, synthesizes an SPDX document and persists both the document
/// and the canonical component set.
///
/// # Type Parameters
/// * `MR` - ManifestReader implementation
/// * `SR` - SbomRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct ScanManifestsUseCase<MR, SR, PR> {
    manifest_reader: MR,
    sbom_repository: SR,
    progress_reporter: PR,
    pipeline: ManifestIngestionPipeline,
}

impl<MR, SR, PR> ScanManifestsUseCase<MR, SR, PR>
where
    MR: ManifestReader,
    SR: SbomRepository,
    PR: ProgressReporter,
{
    /// Creates a new ScanManifestsUseCase with injected dependencies
    pub fn new(manifest_reader: MR, sbom_repository: SR, progress_reporter: PR) -> Self {
        Self {
            manifest_reader,
            sbom_repository,
            progress_reporter,
            pipeline: ManifestIngestionPipeline::new(),
        }
    }

    pub fn sbom_repository(&self) -> &SR {
        &self.sbom_repository
    }

    /// Executes the scan
    ///
    /// # Errors
    /// - `SbomError::NoManifestsFound` when there is nothing to scan
    /// - the first parse failure in file order; nothing is persisted then
    /// - `SbomError::Validation` when the document is incomplete
    pub async fn execute(&self, request: ScanRequest) -> Result<ScanResponse> {
        // Step 1: Locate and read manifests
        let paths = self.resolve_manifest_paths(&request)?;
        let manifests = self.read_manifests(&paths)?;

        // Step 2: Parse concurrently, aggregate in file order
        let results = self.parse_manifests(manifests).await?;
        let outcome = ManifestIngestionPipeline::aggregate(results);
        let total_parsed = outcome.components.len();

        // Step 3: Deduplicate
        let components = ComponentDeduplicator::deduplicate(outcome.components);
        self.progress_reporter.report(&format!(
            "✅ Detected {} component(s) ({} duplicate(s) removed)",
            components.len(),
            total_parsed - components.len()
        ));

        // Step 4: Synthesize the SPDX document
        let metadata = SbomMetadata::for_current_tool();
        let document = SpdxSynthesizer::new(request.namespace_base.clone()).synthesize(
            &request.project,
            &components,
            outcome.ecosystem,
            &metadata,
        )?;

        // Step 5: Persist
        let raw_document = serde_json::to_string_pretty(&document)?;
        let sbom_id = self.sbom_repository.persist_document(
            &request.project.id,
            &request.project.version,
            SbomFormat::Spdx,
            &raw_document,
        )?;
        self.sbom_repository
            .persist_components(&sbom_id, &components)?;

        tracing::info!(
            sbom_id = %sbom_id,
            files = outcome.files_processed.len(),
            components = components.len(),
            "scan complete"
        );
        self.progress_reporter
            .report_completion(&format!("✅ SBOM {} stored", sbom_id));

        Ok(ScanResponse {
            sbom_id,
            project: request.project,
            metadata,
            ecosystem: outcome.ecosystem,
            ecosystems: outcome.ecosystems,
            files_processed: outcome.files_processed,
            total_parsed,
            components,
            document,
            namespace_base: request.namespace_base,
        })
    }

    fn resolve_manifest_paths(&self, request: &ScanRequest) -> Result<Vec<PathBuf>> {
        let paths = match &request.files {
            Some(files) => files
                .iter()
                .map(|file| {
                    if file.is_absolute() {
                        file.clone()
                    } else {
                        request.project_path.join(file)
                    }
                })
                .collect(),
            None => {
                self.progress_reporter.report(&format!(
                    "📖 Discovering manifests in: {}",
                    request.project_path.display()
                ));
                self.manifest_reader
                    .discover_manifests(&request.project_path)?
            }
        };

        if paths.is_empty() {
            return Err(SbomError::NoManifestsFound {
                path: request.project_path.clone(),
            }
            .into());
        }
        Ok(paths)
    }

    fn read_manifests(&self, paths: &[PathBuf]) -> Result<Vec<ManifestFile>> {
        let total = paths.len();
        let mut manifests = Vec::with_capacity(total);
        for (index, path) in paths.iter().enumerate() {
            let file_name = base_name(path);
            self.progress_reporter
                .report_progress(index + 1, total, Some(&file_name));
            let content = self.manifest_reader.read_manifest(path)?;
            manifests.push(ManifestFile::new(file_name, content));
        }
        Ok(manifests)
    }

    /// Parses every manifest on the blocking pool.
    ///
    /// Results come back in submission order; the first failure in that
    /// order is returned.
    async fn parse_manifests(
        &self,
        manifests: Vec<ManifestFile>,
    ) -> Result<Vec<(String, ParseResult)>> {
        let pipeline = self.pipeline;
        let handles = manifests.into_iter().map(|manifest| {
            tokio::task::spawn_blocking(move || {
                pipeline
                    .parse_file(&manifest)
                    .map(|result| (manifest.file_name, result))
            })
        });

        let mut results = Vec::new();
        for joined in join_all(handles).await {
            results.push(joined??);
        }
        Ok(results)
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
