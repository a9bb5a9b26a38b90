use clap::{ArgAction, Parser};
use manifest_sbom::application::dto::ExportFormat;
use manifest_sbom::config::SettingsOverrides;
use std::path::PathBuf;

/// Generate SBOMs from npm, Python, Java, Go and Rust dependency manifests
#[derive(Parser, Debug)]
#[command(name = "manifest-sbom")]
#[command(version)]
#[command(about = "Generate SBOMs from npm, Python, Java, Go and Rust dependency manifests", long_about = None)]
pub struct Args {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Export format: spdx, cyclonedx, csv, json or spreadsheet
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Output file or directory (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Scan only these manifests instead of discovering them.
    /// Can be specified multiple times: --file package.json --file go.mod
    #[arg(long = "file", value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Project name (defaults to the directory name)
    #[arg(short = 'n', long = "name")]
    pub project_name: Option<String>,

    /// Project version recorded in the SBOM
    #[arg(long)]
    pub project_version: Option<String>,

    /// Author recorded as the SBOM creator
    #[arg(long)]
    pub author: Option<String>,

    /// Config file (defaults to manifest-sbom.config.yml in the project directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory to persist SBOMs in (kept in memory if not specified)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// JSON file of vulnerability records keyed by `name@version`
    #[arg(long)]
    pub vulnerabilities: Option<PathBuf>,

    /// License policy used for the report: commercial, permissive,
    /// open-source, unrestricted or a policy from the config file
    #[arg(long)]
    pub policy: Option<String>,

    /// Print a license summary to stderr
    #[arg(long)]
    pub license_report: bool,

    /// Exit with status 1 when a license violates the policy
    #[arg(long)]
    pub fail_on_violation: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            project_name: self.project_name.clone(),
            project_version: self.project_version.clone(),
            author: self.author.clone(),
            format: self.format,
            license_policy: self.policy.clone(),
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
