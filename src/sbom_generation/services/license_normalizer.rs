use crate::sbom_generation::domain::{LicenseInfo, RiskLevel, UNKNOWN_LICENSE};
use crate::sbom_generation::policies::LicenseCatalog;

/// LicenseNormalizer maps free-form license strings to SPDX identifiers.
///
/// Lookup cascade, first match wins:
/// 1. exact SPDX id
/// 2. alias table
/// 3. case-insensitive id or full name
/// 4. substring containment in either direction, in table order
///
/// Anything else normalizes to `UNKNOWN`.
pub struct LicenseNormalizer<'a> {
    catalog: &'a LicenseCatalog,
}

impl<'a> LicenseNormalizer<'a> {
    pub fn new(catalog: &'a LicenseCatalog) -> Self {
        Self { catalog }
    }

    pub fn normalize(&self, raw: &str) -> String {
        let cleaned = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if cleaned.is_empty() {
            return UNKNOWN_LICENSE.to_string();
        }

        if let Some(entry) = self.catalog.license(&cleaned) {
            return entry.id.clone();
        }
        if let Some(id) = self.catalog.alias(&cleaned) {
            return id.to_string();
        }

        let lowered = cleaned.to_lowercase();
        let licenses = self.catalog.licenses();
        if let Some(entry) = licenses
            .iter()
            .find(|l| l.id.to_lowercase() == lowered || l.name.to_lowercase() == lowered)
        {
            return entry.id.clone();
        }

        // Heuristic: "MIT/X11" hits MIT, "GPL" hits the first GPL entry.
        licenses
            .iter()
            .find(|l| {
                let id = l.id.to_lowercase();
                lowered.contains(&id) || id.contains(&lowered)
            })
            .map(|l| l.id.clone())
            .unwrap_or_else(|| UNKNOWN_LICENSE.to_string())
    }

    /// Metadata for an SPDX id; unknown ids get a medium-risk placeholder
    pub fn license_info(&self, spdx_id: &str) -> LicenseInfo {
        match self.catalog.license(spdx_id) {
            Some(entry) => LicenseInfo {
                id: entry.id.clone(),
                name: entry.name.clone(),
                category: Some(entry.category),
                risk_level: entry.risk_level,
                is_known: true,
            },
            None => LicenseInfo {
                id: spdx_id.to_string(),
                name: "Unknown License".to_string(),
                category: None,
                risk_level: RiskLevel::Medium,
                is_known: false,
            },
        }
    }
}
