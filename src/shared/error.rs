use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no policy violations, or violations were not requested to fail the run
    Success = 0,
    /// License policy violations were found and `--fail-on-violation` was set
    PolicyViolations = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (parse error, validation error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::PolicyViolations => write!(f, "Policy Violations (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for manifest ingestion and SBOM synthesis.
///
/// Parsers return these directly; the application layer wraps them in
/// `anyhow::Error`, from which they can be recovered with `downcast_ref`.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("Unsupported manifest file: {file_name}\n\n💡 Hint: Supported files are package.json, package-lock.json, requirements.txt, Pipfile, Pipfile.lock, pyproject.toml, pom.xml, build.gradle, build.gradle.kts, go.mod, go.sum, Cargo.toml and Cargo.lock")]
    UnsupportedFile { file_name: String },

    #[error("Failed to parse manifest: {file_name}\nDetails: {details}\n\n💡 Hint: Please verify that the file is well-formed")]
    MalformedManifest { file_name: String, details: String },

    #[error("SBOM document validation failed:\n  - {}", errors.join("\n  - "))]
    Validation { errors: Vec<String> },

    #[error("No supported manifest files found in: {path}\n\n💡 Hint: Run in the root directory of a project, or specify the correct path with the --path option")]
    NoManifestsFound { path: PathBuf },

    #[error("Unknown export format: {format}\n\n💡 Hint: Use one of spdx, cyclonedx, csv, json or spreadsheet")]
    UnknownExportFormat { format: String },

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("SBOM not found: {sbom_id}")]
    SbomNotFound { sbom_id: String },
}

impl SbomError {
    /// Shorthand used by the parsers when a matched file cannot be read
    pub fn malformed(file_name: &str, details: impl fmt::Display) -> Self {
        SbomError::MalformedManifest {
            file_name: file_name.to_string(),
            details: details.to_string(),
        }
    }
}
