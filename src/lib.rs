//! manifest-sbom - SBOM generation from dependency manifests
//!
//! This library scans npm, Python, Java, Go and Rust manifests, merges their
//! dependencies into one canonical component set, and renders it as SPDX 2.3,
//! CycloneDX 1.5, CSV, JSON or a SpreadsheetML workbook. A license normalizer
//! and policy engine evaluate the same components against license policies.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_generation`): Parsers, policies and document synthesis
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use manifest_sbom::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! let use_case = ScanManifestsUseCase::new(
//!     FileSystemReader::new(),
//!     InMemorySbomRepository::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = ScanRequest::new(PathBuf::from("."), ProjectInfo::new("shop", "1.0.0"));
//! let response = use_case.execute(request).await?;
//!
//! let model = response.read_model_builder().build();
//! let output = CycloneDxFormatter::new().format(&model)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod sbom_generation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{LicenseReportRenderer, StderrProgressReporter};
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        CsvFormatter, CycloneDxFormatter, JsonFormatter, SpdxFormatter, SpreadsheetFormatter,
    };
    pub use crate::adapters::outbound::persistence::{
        FileSystemSbomRepository, InMemorySbomRepository, StoredSbom,
    };
    pub use crate::application::dto::{ExportFormat, ScanRequest, ScanResponse};
    pub use crate::application::factories::FormatterFactory;
    pub use crate::application::read_models::{SbomReadModel, SbomReadModelBuilder};
    pub use crate::application::use_cases::{
        AuditLicensesUseCase, ExportArtifact, ExportSbomUseCase, ScanManifestsUseCase,
    };
    pub use crate::ports::outbound::{
        ManifestReader, OutputPresenter, ProgressReporter, SbomFormatter, SbomRepository,
    };
    pub use crate::sbom_generation::domain::{
        Component, Ecosystem, LicenseSummary, ManifestFile, ParseResult, ProjectInfo,
        SbomFormat, SbomMetadata, SpdxDocument, VulnerabilityIndex, VulnerabilityRecord,
    };
    pub use crate::sbom_generation::parsers::{ManifestParser, ParserRegistry};
    pub use crate::sbom_generation::policies::LicenseCatalog;
    pub use crate::sbom_generation::services::{
        ComponentDeduplicator, LicenseAuditor, LicenseNormalizer, ManifestIngestionPipeline,
        PolicyEngine, SpdxSynthesizer,
    };
    pub use crate::shared::error::SbomError;
    pub use crate::shared::Result;
}
