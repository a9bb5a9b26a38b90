//! Configuration file support for manifest-sbom.
//!
//! Provides YAML-based configuration through `manifest-sbom.config.yml`
//! files, the merge of CLI flags over config values over built-in defaults,
//! and the registration of custom license policies.

use anyhow::Context;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::application::dto::ExportFormat;
use crate::sbom_generation::domain::{LicensePolicy, PolicyRules};
use crate::sbom_generation::policies::{LicenseCatalog, DEFAULT_POLICY};
use crate::sbom_generation::services::DEFAULT_NAMESPACE_BASE;
use crate::shared::error::SbomError;
use crate::shared::security::{read_guarded, MAX_FILE_SIZE};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "manifest-sbom.config.yml";

pub const DEFAULT_PROJECT_VERSION: &str = "1.0.0";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub project_name: Option<String>,
    pub project_version: Option<String>,
    pub author: Option<String>,
    pub format: Option<String>,
    pub license_policy: Option<String>,
    pub namespace_base: Option<String>,
    /// Largest manifest read, in bytes
    pub max_manifest_size: Option<u64>,
    pub policies: Option<BTreeMap<String, PolicyConfig>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// A custom license policy; unset category flags are `false`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct PolicyConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub allow_permissive: bool,
    #[serde(default)]
    pub allow_weak_copyleft: bool,
    #[serde(default)]
    pub allow_strong_copyleft: bool,
    #[serde(default)]
    pub allow_proprietary: bool,
    #[serde(default)]
    pub allow_public_domain: bool,
    pub blocked_licenses: Option<Vec<String>>,
    pub allowed_licenses: Option<Vec<String>>,
}

impl PolicyConfig {
    fn into_policy(self, key: &str) -> LicensePolicy {
        LicensePolicy {
            key: key.to_string(),
            name: self.name.unwrap_or_else(|| key.to_string()),
            description: self.description.unwrap_or_default(),
            rules: PolicyRules {
                allow_permissive: self.allow_permissive,
                allow_weak_copyleft: self.allow_weak_copyleft,
                allow_strong_copyleft: self.allow_strong_copyleft,
                allow_proprietary: self.allow_proprietary,
                allow_public_domain: self.allow_public_domain,
                blocked_licenses: self.blocked_licenses,
                allowed_licenses: self.allowed_licenses,
            },
        }
    }
}

impl ConfigFile {
    /// Merges the custom policies into `catalog`; a key equal to a built-in
    /// policy replaces it.
    pub fn register_policies(&self, catalog: &mut LicenseCatalog) -> Result<()> {
        let Some(policies) = &self.policies else {
            return Ok(());
        };
        for (key, policy) in policies {
            catalog.register_policy(policy.clone().into_policy(key.trim()))?;
            tracing::debug!(policy = %key, "registered custom license policy");
        }
        Ok(())
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_guarded(path, MAX_FILE_SIZE).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(format) = &config.format {
        format
            .parse::<ExportFormat>()
            .map_err(|message| SbomError::Config { message })?;
    }

    if config.max_manifest_size == Some(0) {
        return Err(SbomError::Config {
            message: "max_manifest_size: must be greater than zero".to_string(),
        }
        .into());
    }

    if let Some(policies) = &config.policies {
        for (key, policy) in policies {
            if key.trim().is_empty() {
                return Err(SbomError::Config {
                    message: "policies: policy name must not be empty".to_string(),
                }
                .into());
            }
            let allows_anything = policy.allow_permissive
                || policy.allow_weak_copyleft
                || policy.allow_strong_copyleft
                || policy.allow_proprietary
                || policy.allow_public_domain;
            if !allows_anything {
                return Err(SbomError::Config {
                    message: format!(
                        "policies.{}: a policy must allow at least one license category",
                        key
                    ),
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        tracing::warn!(field = %key, "unknown config field");
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Values given on the command line; `None` defers to the config file.
#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    pub project_name: Option<String>,
    pub project_version: Option<String>,
    pub author: Option<String>,
    pub format: Option<ExportFormat>,
    pub license_policy: Option<String>,
}

/// Effective settings of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub project_name: String,
    pub project_version: String,
    pub author: Option<String>,
    pub format: ExportFormat,
    pub license_policy: String,
    pub namespace_base: String,
    pub max_manifest_size: u64,
}

impl Settings {
    /// CLI flags override config values, which override built-in defaults.
    /// `fallback_name` is used when neither names the project.
    pub fn merge(
        overrides: &SettingsOverrides,
        config: Option<&ConfigFile>,
        fallback_name: &str,
    ) -> Result<Self> {
        let from_config = |pick: fn(&ConfigFile) -> &Option<String>| {
            config.and_then(|c| pick(c).clone())
        };

        let format = match overrides.format {
            Some(format) => format,
            None => match from_config(|c| &c.format) {
                Some(raw) => raw
                    .parse::<ExportFormat>()
                    .map_err(|message| SbomError::Config { message })?,
                None => ExportFormat::default(),
            },
        };

        Ok(Self {
            project_name: overrides
                .project_name
                .clone()
                .or_else(|| from_config(|c| &c.project_name))
                .unwrap_or_else(|| fallback_name.to_string()),
            project_version: overrides
                .project_version
                .clone()
                .or_else(|| from_config(|c| &c.project_version))
                .unwrap_or_else(|| DEFAULT_PROJECT_VERSION.to_string()),
            author: overrides
                .author
                .clone()
                .or_else(|| from_config(|c| &c.author)),
            format,
            license_policy: overrides
                .license_policy
                .clone()
                .or_else(|| from_config(|c| &c.license_policy))
                .unwrap_or_else(|| DEFAULT_POLICY.to_string()),
            namespace_base: from_config(|c| &c.namespace_base)
                .unwrap_or_else(|| DEFAULT_NAMESPACE_BASE.to_string()),
            max_manifest_size: config
                .and_then(|c| c.max_manifest_size)
                .unwrap_or(MAX_FILE_SIZE),
        })
    }
}
