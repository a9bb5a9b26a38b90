use super::{LicenseNormalizer, PolicyEngine};
use crate::sbom_generation::domain::{
    Component, LicenseSummary, PolicyViolation, RiskDistribution, RiskLevel, UNKNOWN_LICENSE,
};
use crate::sbom_generation::policies::LicenseCatalog;
use std::collections::BTreeMap;

/// LicenseAuditor summarizes the licenses of a component set under a policy.
///
/// Unknown licenses are counted separately and weigh as medium risk, but
/// are not reported as violations.
pub struct LicenseAuditor<'a> {
    normalizer: LicenseNormalizer<'a>,
    engine: PolicyEngine<'a>,
}

impl<'a> LicenseAuditor<'a> {
    pub fn new(catalog: &'a LicenseCatalog) -> Self {
        Self {
            normalizer: LicenseNormalizer::new(catalog),
            engine: PolicyEngine::new(catalog),
        }
    }

    pub fn summarize(&self, components: &[Component], policy_name: &str) -> LicenseSummary {
        let policy = self
            .engine
            .resolve_policy(policy_name)
            .map(|p| p.key.clone())
            .unwrap_or_else(|| policy_name.to_string());

        let mut license_counts = BTreeMap::new();
        let mut unknown_licenses = 0;
        let mut violations = Vec::new();
        let mut risk_distribution = RiskDistribution::default();

        for component in components {
            let spdx_id = self
                .normalizer
                .normalize(component.license.as_deref().unwrap_or_default());

            if spdx_id == UNKNOWN_LICENSE {
                unknown_licenses += 1;
                risk_distribution.record(RiskLevel::Medium);
                continue;
            }

            *license_counts.entry(spdx_id.clone()).or_insert(0) += 1;

            let decision = self.engine.check(&spdx_id, &policy);
            if !decision.allowed {
                violations.push(PolicyViolation {
                    component: component.name.clone(),
                    license: spdx_id,
                    reason: decision.reason.clone().unwrap_or_default(),
                    risk_level: decision.risk_level,
                });
            }
            risk_distribution.record(decision.risk_level);
        }

        tracing::info!(
            policy = %policy,
            components = components.len(),
            violations = violations.len(),
            "license audit complete"
        );

        LicenseSummary {
            policy,
            total_components: components.len(),
            license_counts,
            unknown_licenses,
            violations,
            risk_distribution,
        }
    }
}
