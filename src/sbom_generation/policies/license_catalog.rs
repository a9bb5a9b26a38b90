use crate::sbom_generation::domain::{
    LicenseCategory, LicenseEntry, LicensePolicy, PolicyRules, RiskLevel,
};
use crate::shared::error::SbomError;

/// Policy used when none is named, or when an unknown name is requested
pub const DEFAULT_POLICY: &str = "commercial";

/// Read-only license tables: SPDX classification, alias spellings and
/// named policies.
///
/// Built once at startup and passed by reference into the normalizer and
/// the policy engine. Custom policies are merged in before first use.
#[derive(Debug, Clone)]
pub struct LicenseCatalog {
    licenses: Vec<LicenseEntry>,
    aliases: Vec<(String, String)>,
    policies: Vec<LicensePolicy>,
}

impl LicenseCatalog {
    /// The built-in tables
    pub fn builtin() -> Self {
        use LicenseCategory::*;
        use RiskLevel::*;

        let licenses = vec![
            LicenseEntry::new("MIT", "MIT License", Permissive, Low),
            LicenseEntry::new("Apache-2.0", "Apache License 2.0", Permissive, Low),
            LicenseEntry::new("BSD-2-Clause", "BSD 2-Clause License", Permissive, Low),
            LicenseEntry::new("BSD-3-Clause", "BSD 3-Clause License", Permissive, Low),
            LicenseEntry::new("ISC", "ISC License", Permissive, Low),
            LicenseEntry::new("GPL-2.0", "GNU General Public License v2.0", StrongCopyleft, High),
            LicenseEntry::new("GPL-3.0", "GNU General Public License v3.0", StrongCopyleft, High),
            LicenseEntry::new(
                "AGPL-3.0",
                "GNU Affero General Public License v3.0",
                StrongCopyleft,
                High,
            ),
            LicenseEntry::new(
                "LGPL-2.1",
                "GNU Lesser General Public License v2.1",
                WeakCopyleft,
                Medium,
            ),
            LicenseEntry::new(
                "LGPL-3.0",
                "GNU Lesser General Public License v3.0",
                WeakCopyleft,
                Medium,
            ),
            LicenseEntry::new("MPL-2.0", "Mozilla Public License 2.0", WeakCopyleft, Medium),
            LicenseEntry::new("EPL-2.0", "Eclipse Public License 2.0", WeakCopyleft, Medium),
            LicenseEntry::new(
                "CC0-1.0",
                "Creative Commons Zero v1.0 Universal",
                PublicDomain,
                Low,
            ),
            LicenseEntry::new("Unlicense", "The Unlicense", PublicDomain, Low),
        ];

        let aliases = [
            ("MIT", "MIT"),
            ("Apache-2", "Apache-2.0"),
            ("Apache 2.0", "Apache-2.0"),
            ("BSD", "BSD-3-Clause"),
            ("BSD-2", "BSD-2-Clause"),
            ("BSD-3", "BSD-3-Clause"),
            ("GPL-2", "GPL-2.0"),
            ("GPL-3", "GPL-3.0"),
            ("GPLv2", "GPL-2.0"),
            ("GPLv3", "GPL-3.0"),
            ("LGPL-2", "LGPL-2.1"),
            ("LGPL-3", "LGPL-3.0"),
            ("LGPLv2", "LGPL-2.1"),
            ("LGPLv3", "LGPL-3.0"),
            ("AGPLv3", "AGPL-3.0"),
            ("MPL-2", "MPL-2.0"),
            ("EPL-2", "EPL-2.0"),
            ("CC0", "CC0-1.0"),
            ("Public Domain", "CC0-1.0"),
        ]
        .into_iter()
        .map(|(alias, id)| (alias.to_string(), id.to_string()))
        .collect();

        let policies = vec![
            policy(
                "commercial",
                "Commercial",
                "Strict policy for commercial/proprietary software",
                PolicyRules {
                    allow_permissive: true,
                    allow_proprietary: true,
                    allow_public_domain: true,
                    blocked_licenses: Some(
                        ["GPL-2.0", "GPL-3.0", "AGPL-3.0"]
                            .map(String::from)
                            .to_vec(),
                    ),
                    ..PolicyRules::default()
                },
            ),
            policy(
                "permissive",
                "Permissive",
                "Only allow permissive and public domain licenses",
                PolicyRules {
                    allow_permissive: true,
                    allow_public_domain: true,
                    ..PolicyRules::default()
                },
            ),
            policy(
                "open-source",
                "Open Source",
                "Allow most open source licenses",
                PolicyRules {
                    allow_permissive: true,
                    allow_weak_copyleft: true,
                    allow_strong_copyleft: true,
                    allow_public_domain: true,
                    ..PolicyRules::default()
                },
            ),
            policy(
                "unrestricted",
                "Unrestricted",
                "Allow all licenses",
                PolicyRules {
                    allow_permissive: true,
                    allow_weak_copyleft: true,
                    allow_strong_copyleft: true,
                    allow_proprietary: true,
                    allow_public_domain: true,
                    ..PolicyRules::default()
                },
            ),
        ];

        Self {
            licenses,
            aliases,
            policies,
        }
    }

    /// Known licenses in table order
    pub fn licenses(&self) -> &[LicenseEntry] {
        &self.licenses
    }

    /// Exact SPDX id lookup
    pub fn license(&self, spdx_id: &str) -> Option<&LicenseEntry> {
        self.licenses.iter().find(|l| l.id == spdx_id)
    }

    /// Exact alias lookup, returning the canonical SPDX id
    pub fn alias(&self, raw: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(alias, _)| alias == raw)
            .map(|(_, id)| id.as_str())
    }

    pub fn policies(&self) -> &[LicensePolicy] {
        &self.policies
    }

    pub fn policy(&self, key: &str) -> Option<&LicensePolicy> {
        self.policies.iter().find(|p| p.key == key)
    }

    /// Adds a policy, replacing any existing policy with the same key.
    ///
    /// # Errors
    /// Rejects an empty key and rule sets that can never allow anything.
    pub fn register_policy(&mut self, policy: LicensePolicy) -> Result<(), SbomError> {
        if policy.key.trim().is_empty() {
            return Err(SbomError::Config {
                message: "policy name must not be empty".to_string(),
            });
        }
        let rules = &policy.rules;
        let allows_any_category = [
            LicenseCategory::Permissive,
            LicenseCategory::WeakCopyleft,
            LicenseCategory::StrongCopyleft,
            LicenseCategory::Proprietary,
            LicenseCategory::PublicDomain,
        ]
        .into_iter()
        .any(|c| rules.allows_category(c));
        if !allows_any_category {
            return Err(SbomError::Config {
                message: format!("policy '{}' does not allow any license category", policy.key),
            });
        }

        match self.policies.iter_mut().find(|p| p.key == policy.key) {
            Some(existing) => *existing = policy,
            None => self.policies.push(policy),
        }
        Ok(())
    }
}

impl Default for LicenseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn policy(key: &str, name: &str, description: &str, rules: PolicyRules) -> LicensePolicy {
    LicensePolicy {
        key: key.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables() {
        let catalog = LicenseCatalog::builtin();
        assert_eq!(catalog.licenses().len(), 14);
        assert_eq!(catalog.licenses()[0].id, "MIT");

        let keys: Vec<_> = catalog.policies().iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["commercial", "permissive", "open-source", "unrestricted"]);
    }

    #[test]
    fn test_lookup() {
        let catalog = LicenseCatalog::builtin();
        let gpl = catalog.license("GPL-3.0").unwrap();
        assert_eq!(gpl.category, LicenseCategory::StrongCopyleft);
        assert_eq!(gpl.risk_level, RiskLevel::High);
        assert!(catalog.license("gpl-3.0").is_none());
        assert_eq!(catalog.alias("Public Domain"), Some("CC0-1.0"));
        assert_eq!(catalog.alias("public domain"), None);
    }

    #[test]
    fn test_commercial_blocks_gpl() {
        let catalog = LicenseCatalog::builtin();
        let commercial = catalog.policy(DEFAULT_POLICY).unwrap();
        assert!(commercial.rules.blocks("AGPL-3.0"));
        assert!(!commercial.rules.allows_category(LicenseCategory::WeakCopyleft));
    }

    #[test]
    fn test_register_policy_replaces_existing() {
        let mut catalog = LicenseCatalog::builtin();
        catalog
            .register_policy(policy(
                "permissive",
                "Permissive (strict)",
                "Permissive only",
                PolicyRules {
                    allow_permissive: true,
                    ..PolicyRules::default()
                },
            ))
            .unwrap();

        assert_eq!(catalog.policies().len(), 4);
        let replaced = catalog.policy("permissive").unwrap();
        assert_eq!(replaced.name, "Permissive (strict)");
        assert!(!replaced.rules.allow_public_domain);
    }

    #[test]
    fn test_register_policy_rejects_empty_rules() {
        let mut catalog = LicenseCatalog::builtin();
        let result = catalog.register_policy(policy("nothing", "Nothing", "", PolicyRules::default()));
        assert!(matches!(result, Err(SbomError::Config { .. })));

        let result = catalog.register_policy(policy(
            " ",
            "Blank",
            "",
            PolicyRules {
                allow_permissive: true,
                ..PolicyRules::default()
            },
        ));
        assert!(matches!(result, Err(SbomError::Config { .. })));
    }
}
