use crate::sbom_generation::domain::{Component, LicenseSummary};
use crate::sbom_generation::policies::LicenseCatalog;
use crate::sbom_generation::services::LicenseAuditor;

/// AuditLicensesUseCase - Evaluates a component set against a license policy
pub struct AuditLicensesUseCase<'a> {
    catalog: &'a LicenseCatalog,
}

impl<'a> AuditLicensesUseCase<'a> {
    pub fn new(catalog: &'a LicenseCatalog) -> Self {
        Self { catalog }
    }

    /// Summarizes licenses under `policy`; unknown policy names fall back
    /// to `commercial`, which the returned summary records.
    pub fn execute(&self, components: &[Component], policy: &str) -> LicenseSummary {
        LicenseAuditor::new(self.catalog).summarize(components, policy)
    }

    /// Keys of every policy in the catalog, built-in ones first
    pub fn available_policies(&self) -> Vec<&'a str> {
        self.catalog
            .policies()
            .iter()
            .map(|p| p.key.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::{Ecosystem, LicensePolicy, PolicyRules};

    #[test]
    fn test_execute() {
        let catalog = LicenseCatalog::builtin();
        let components = vec![
            Component::new(Ecosystem::Java, "org.example:core", "1.0")
                .with_license(Some("GPL-2.0".to_string())),
            Component::new(Ecosystem::Java, "org.example:util", "1.0")
                .with_license(Some("Apache 2.0".to_string())),
        ];

        let summary = AuditLicensesUseCase::new(&catalog).execute(&components, "permissive");

        assert_eq!(summary.policy, "permissive");
        assert_eq!(summary.license_counts["Apache-2.0"], 1);
        assert_eq!(summary.violations.len(), 1);
        assert_eq!(summary.violations[0].component, "org.example:core");
    }

    #[test]
    fn test_available_policies_include_custom() {
        let mut catalog = LicenseCatalog::builtin();
        catalog
            .register_policy(LicensePolicy {
                key: "internal".to_string(),
                name: "Internal".to_string(),
                description: "Internal tools".to_string(),
                rules: PolicyRules {
                    allow_permissive: true,
                    ..PolicyRules::default()
                },
            })
            .unwrap();

        let policies = AuditLicensesUseCase::new(&catalog).available_policies();
        assert_eq!(
            policies,
            vec!["commercial", "permissive", "open-source", "unrestricted", "internal"]
        );
    }
}
