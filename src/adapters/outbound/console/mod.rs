/// Console adapters for user-facing progress and report output
mod license_report;
mod progress_reporter;

pub use license_report::LicenseReportRenderer;
pub use progress_reporter::StderrProgressReporter;
