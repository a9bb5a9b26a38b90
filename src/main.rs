mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Args;
use manifest_sbom::adapters::outbound::console::{LicenseReportRenderer, StderrProgressReporter};
use manifest_sbom::adapters::outbound::filesystem::FileSystemReader;
use manifest_sbom::adapters::outbound::persistence::{
    FileSystemSbomRepository, InMemorySbomRepository,
};
use manifest_sbom::application::dto::{ScanRequest, ScanResponse};
use manifest_sbom::application::factories::{PresenterFactory, PresenterType};
use manifest_sbom::application::use_cases::{
    AuditLicensesUseCase, ExportSbomUseCase, ScanManifestsUseCase,
};
use manifest_sbom::config::{discover_config, load_config_from_path, Settings};
use manifest_sbom::ports::outbound::SbomRepository;
use manifest_sbom::sbom_generation::domain::{ProjectInfo, VulnerabilityIndex};
use manifest_sbom::sbom_generation::policies::LicenseCatalog;
use manifest_sbom::shared::error::ExitCode;
use manifest_sbom::shared::security::{read_guarded, validate_project_directory, MAX_FILE_SIZE};
use manifest_sbom::shared::Result;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    init_logging(args.log_level());

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Initialize tracing; `RUST_LOG` takes precedence over `-v`.
fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let project_path = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    validate_project_directory(&project_path)?;

    // Config: explicit path, else auto-discovery in the project directory
    let config = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(&project_path)?,
    };
    let settings = Settings::merge(
        &args.overrides(),
        config.as_ref(),
        &default_project_name(&project_path),
    )?;

    let mut catalog = LicenseCatalog::builtin();
    if let Some(config) = &config {
        config.register_policies(&mut catalog)?;
    }

    let project = ProjectInfo::new(settings.project_name.clone(), settings.project_version.clone())
        .with_author(settings.author.clone());
    let mut request = ScanRequest::new(project_path, project)
        .with_namespace_base(settings.namespace_base.clone());
    if !args.files.is_empty() {
        request = request.with_files(args.files.clone());
    }

    let reader = FileSystemReader::new().with_max_file_size(settings.max_manifest_size);
    let response = match &args.store {
        Some(store) => {
            scan(reader, FileSystemSbomRepository::new(store.clone()), request).await?
        }
        None => scan(reader, InMemorySbomRepository::new(), request).await?,
    };

    let vulnerabilities = match &args.vulnerabilities {
        Some(path) => load_vulnerabilities(path)?,
        None => VulnerabilityIndex::new(),
    };
    let model = response
        .read_model_builder()
        .vulnerabilities(vulnerabilities)
        .build();

    let artifact =
        ExportSbomUseCase::new(StderrProgressReporter::new()).execute(&model, settings.format)?;
    let presenter = PresenterFactory::create(PresenterType::resolve(
        args.output.as_deref(),
        &artifact.filename,
    ));
    presenter.present(&artifact.content)?;

    if args.license_report || args.fail_on_violation {
        let summary =
            AuditLicensesUseCase::new(&catalog).execute(&response.components, &settings.license_policy);
        if args.license_report {
            let renderer = LicenseReportRenderer::new(std::io::stderr().is_terminal());
            eprint!("{}", renderer.render(&summary));
        }
        if args.fail_on_violation && summary.has_violations() {
            return Ok(ExitCode::PolicyViolations);
        }
    }

    Ok(ExitCode::Success)
}

async fn scan<SR: SbomRepository>(
    reader: FileSystemReader,
    repository: SR,
    request: ScanRequest,
) -> Result<ScanResponse> {
    let use_case = ScanManifestsUseCase::new(
        reader,
        repository,
        StderrProgressReporter::new(),
    );
    use_case.execute(request).await
}

fn load_vulnerabilities(path: &Path) -> Result<VulnerabilityIndex> {
    let content = read_guarded(path, MAX_FILE_SIZE)?;
    serde_json::from_str(&content).with_context(|| {
        format!(
            "Failed to parse vulnerability file: {}\n\n💡 Hint: Expected a JSON object mapping \"name@version\" to a list of records.",
            path.display()
        )
    })
}

/// Basename of the project directory, resolving `.` and friends
fn default_project_name(path: &Path) -> String {
    path.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "project".to_string())
}
