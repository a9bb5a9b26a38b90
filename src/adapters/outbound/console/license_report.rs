use crate::sbom_generation::domain::{LicenseSummary, RiskLevel};
use owo_colors::{OwoColorize, Style};
use std::fmt::Write;

/// Renders a license summary for the terminal
///
/// Colors are applied only when `colored` is set, so the same text can be
/// written to a pipe or compared in tests.
pub struct LicenseReportRenderer {
    colored: bool,
}

impl LicenseReportRenderer {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn render(&self, summary: &LicenseSummary) -> String {
        let mut out = String::new();
        let bold = Style::new().bold();

        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{} (policy: {})",
            self.paint("📜 License report", bold),
            summary.policy
        );
        let _ = writeln!(out, "   Components: {}", summary.total_components);
        for (license, count) in &summary.license_counts {
            let _ = writeln!(out, "   - {}: {}", license, count);
        }
        if summary.unknown_licenses > 0 {
            let _ = writeln!(
                out,
                "   - {}: {}",
                self.paint("UNKNOWN", Style::new().yellow()),
                summary.unknown_licenses
            );
        }

        let risk = &summary.risk_distribution;
        let _ = writeln!(
            out,
            "   Risk: {} low, {} medium, {} high",
            self.paint(&risk.low.to_string(), risk_style(RiskLevel::Low)),
            self.paint(&risk.medium.to_string(), risk_style(RiskLevel::Medium)),
            self.paint(&risk.high.to_string(), risk_style(RiskLevel::High)),
        );

        if summary.violations.is_empty() {
            let _ = writeln!(
                out,
                "{}",
                self.paint("✅ No license policy violations", Style::new().green())
            );
            return out;
        }

        let _ = writeln!(
            out,
            "{}",
            self.paint(
                &format!("❌ {} license policy violation(s):", summary.violations.len()),
                Style::new().red().bold(),
            )
        );
        for violation in &summary.violations {
            let _ = writeln!(
                out,
                "   - {} ({}): {} [{}]",
                violation.component,
                violation.license,
                violation.reason,
                self.paint(violation.risk_level.as_str(), risk_style(violation.risk_level)),
            );
        }
        out
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.colored {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

fn risk_style(level: RiskLevel) -> Style {
    match level {
        RiskLevel::Low => Style::new().green(),
        RiskLevel::Medium => Style::new().yellow(),
        RiskLevel::High => Style::new().red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::{Component, Ecosystem};
    use crate::sbom_generation::policies::LicenseCatalog;
    use crate::sbom_generation::services::LicenseAuditor;

    fn summary(licenses: &[Option<&str>]) -> LicenseSummary {
        let catalog = LicenseCatalog::builtin();
        let components: Vec<Component> = licenses
            .iter()
            .enumerate()
            .map(|(i, l)| {
                Component::new(Ecosystem::Rust, format!("crate-{}", i), "1.0.0")
                    .with_license(l.map(str::to_string))
            })
            .collect();
        LicenseAuditor::new(&catalog).summarize(&components, "commercial")
    }

    #[test]
    fn test_render_plain_with_violations() {
        let text = LicenseReportRenderer::new(false).render(&summary(&[
            Some("MIT"),
            Some("GPL-3.0"),
            None,
        ]));

        assert!(text.contains("📜 License report (policy: commercial)"));
        assert!(text.contains("   - MIT: 1"));
        assert!(text.contains("   - UNKNOWN: 1"));
        assert!(text.contains("Risk: 1 low, 1 medium, 1 high"));
        assert!(text.contains("❌ 1 license policy violation(s):"));
        assert!(text.contains(
            "   - crate-1 (GPL-3.0): License GPL-3.0 is explicitly blocked by policy [high]"
        ));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_render_clean() {
        let text = LicenseReportRenderer::new(false).render(&summary(&[Some("Apache-2.0")]));
        assert!(text.contains("✅ No license policy violations"));
    }

    #[test]
    fn test_render_colored() {
        let text = LicenseReportRenderer::new(true).render(&summary(&[Some("GPL-2.0")]));
        assert!(text.contains('\u{1b}'));
    }
}
