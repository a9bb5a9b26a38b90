use crate::sbom_generation::domain::{
    Compatibility, LicenseCategory, LicensePolicy, PolicyDecision, RiskLevel,
};
use crate::sbom_generation::policies::{LicenseCatalog, DEFAULT_POLICY};

/// PolicyEngine evaluates SPDX ids against named license policies.
///
/// Evaluation never fails: unknown licenses and blocked licenses come back
/// as denied decisions.
pub struct PolicyEngine<'a> {
    catalog: &'a LicenseCatalog,
}

impl<'a> PolicyEngine<'a> {
    pub fn new(catalog: &'a LicenseCatalog) -> Self {
        Self { catalog }
    }

    /// Resolves a policy by key, falling back to `commercial`
    pub fn resolve_policy(&self, policy_name: &str) -> Option<&'a LicensePolicy> {
        self.catalog.policy(policy_name).or_else(|| {
            tracing::warn!(
                policy = policy_name,
                fallback = DEFAULT_POLICY,
                "unknown license policy, using fallback"
            );
            self.catalog.policy(DEFAULT_POLICY)
        })
    }

    /// Checks a normalized SPDX id against a policy.
    ///
    /// Precedence: unknown license, block-list, allow-list, category flags.
    pub fn check(&self, spdx_id: &str, policy_name: &str) -> PolicyDecision {
        let Some(entry) = self.catalog.license(spdx_id) else {
            return PolicyDecision::deny("Unknown license", RiskLevel::Medium);
        };
        let Some(policy) = self.resolve_policy(policy_name) else {
            return PolicyDecision::allow(entry.risk_level);
        };
        let rules = &policy.rules;

        if rules.blocks(&entry.id) {
            return PolicyDecision::deny(
                format!("License {} is explicitly blocked by policy", entry.id),
                RiskLevel::High,
            );
        }

        if let Some(allowed) = rules.allow_list() {
            if !allowed.iter().any(|id| id == &entry.id) {
                return PolicyDecision::deny(
                    format!("License {} is not in the allowed list", entry.id),
                    entry.risk_level,
                );
            }
        }

        if !rules.allows_category(entry.category) {
            return PolicyDecision::deny(category_denial(entry.category), entry.risk_level);
        }

        PolicyDecision::allow(entry.risk_level)
    }

    /// Whether two licenses can be combined in one work
    pub fn check_compatibility(&self, first: &str, second: &str) -> Compatibility {
        let (Some(a), Some(b)) = (self.catalog.license(first), self.catalog.license(second))
        else {
            return Compatibility {
                compatible: false,
                reason: Some("One or both licenses are unknown".to_string()),
            };
        };

        let lenient = |c: LicenseCategory| {
            matches!(c, LicenseCategory::Permissive | LicenseCategory::PublicDomain)
        };
        if lenient(a.category) || lenient(b.category) {
            return Compatibility {
                compatible: true,
                reason: None,
            };
        }

        let strong = |c: LicenseCategory| c == LicenseCategory::StrongCopyleft;
        if (strong(a.category) || strong(b.category)) && a.id != b.id {
            return Compatibility {
                compatible: false,
                reason: Some(
                    "Strong copyleft licenses require the entire work to use the same license"
                        .to_string(),
                ),
            };
        }

        Compatibility {
            compatible: true,
            reason: None,
        }
    }
}

fn category_denial(category: LicenseCategory) -> &'static str {
    match category {
        LicenseCategory::Permissive => "Permissive licenses are not allowed by policy",
        LicenseCategory::WeakCopyleft => "Weak copyleft licenses are not allowed by policy",
        LicenseCategory::StrongCopyleft => {
            "Strong copyleft licenses (GPL) are not allowed by policy"
        }
        LicenseCategory::Proprietary => "Proprietary licenses are not allowed by policy",
        LicenseCategory::PublicDomain => "Public domain licenses are not allowed by policy",
    }
}
