use crate::application::dto::ExportFormat;
use crate::application::factories::FormatterFactory;
use crate::application::read_models::SbomReadModel;
use crate::ports::outbound::ProgressReporter;
use crate::shared::Result;

/// A rendered export, ready to be written or served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub content: String,
}

/// ExportSbomUseCase - Renders a canonical component set into an export format
///
/// Rendering is a pure function of the read model: exporting the same model
/// twice in a format yields the same content, except for the JSON
/// envelope's `exportedAt` stamp.
pub struct ExportSbomUseCase<PR> {
    progress_reporter: PR,
}

impl<PR: ProgressReporter> ExportSbomUseCase<PR> {
    pub fn new(progress_reporter: PR) -> Self {
        Self { progress_reporter }
    }

    pub fn execute(&self, model: &SbomReadModel, format: ExportFormat) -> Result<ExportArtifact> {
        self.progress_reporter
            .report(FormatterFactory::progress_message(format));

        let content = FormatterFactory::create(format).format(model)?;
        let filename = format.export_filename(&model.project.name, &model.project.version);
        tracing::debug!(format = %format, filename = %filename, bytes = content.len(), "export rendered");

        Ok(ExportArtifact {
            filename,
            content_type: format.content_type(),
            content,
        })
    }
}
