use super::ManifestParser;
use crate::sbom_generation::domain::{Component, Ecosystem, ParseResult};
use crate::shared::error::SbomError;
use serde::Deserialize;
use toml::{Table, Value};

const DEPENDENCY_SECTIONS: [&str; 3] = ["dependencies", "dev-dependencies", "build-dependencies"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RustParser;

impl ManifestParser for RustParser {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Rust
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["Cargo.toml", "Cargo.lock"]
    }

    fn parse(&self, file_name: &str, content: &str) -> Result<ParseResult, SbomError> {
        if file_name == "Cargo.lock" {
            parse_cargo_lock(file_name, content)
        } else {
            parse_cargo_toml(file_name, content)
        }
    }
}

fn parse_cargo_toml(file_name: &str, content: &str) -> Result<ParseResult, SbomError> {
    let manifest: Table =
        toml::from_str(content).map_err(|e| SbomError::malformed(file_name, e))?;
    let mut result = ParseResult::new(Ecosystem::Rust);
    let mut components = Vec::new();

    if let Some(package) = manifest.get("package").and_then(Value::as_table) {
        if let Some(name) = package.get("name").and_then(Value::as_str) {
            result.insert_metadata("packageName", name);
        }
        if let Some(version) = package.get("version").and_then(Value::as_str) {
            result.insert_metadata("packageVersion", version);
        }
    }

    for section in DEPENDENCY_SECTIONS {
        if let Some(deps) = manifest.get(section).and_then(Value::as_table) {
            components.extend(dependency_table(deps, section, None));
        }
    }

    if let Some(targets) = manifest.get("target").and_then(Value::as_table) {
        for (cfg, body) in targets {
            for section in DEPENDENCY_SECTIONS {
                if let Some(deps) = body.get(section).and_then(Value::as_table) {
                    components.extend(dependency_table(deps, section, Some(cfg.as_str())));
                }
            }
        }
    }

    if let Some(deps) = manifest
        .get("workspace")
        .and_then(|w| w.get("dependencies"))
        .and_then(Value::as_table)
    {
        components.extend(
            dependency_table(deps, "dependencies", None)
                .into_iter()
                .map(|c| c.with_metadata("workspace", true)),
        );
    }

    result.components = components;
    Ok(result)
}

fn dependency_table(deps: &Table, section: &str, target: Option<&str>) -> Vec<Component> {
    deps.iter()
        .filter_map(|(key, spec)| {
            let mut inherited = false;
            let (name, version, features) = match spec {
                Value::String(version) => (key.as_str(), version.as_str(), Vec::new()),
                Value::Table(table) => {
                    // `workspace = true` entries take their version from the workspace root
                    inherited = table.get("workspace").and_then(Value::as_bool) == Some(true);
                    let name = table
                        .get("package")
                        .and_then(Value::as_str)
                        .unwrap_or(key.as_str());
                    let version = table
                        .get("version")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown");
                    let features: Vec<String> = table
                        .get("features")
                        .and_then(Value::as_array)
                        .map(|f| f.iter().filter_map(Value::as_str).map(str::to_string).collect())
                        .unwrap_or_default();
                    (name, version, features)
                }
                _ => return None,
            };

            let mut component = Component::new(Ecosystem::Rust, name, version)
                .with_metadata("isDev", section == "dev-dependencies")
                .with_metadata("isBuild", section == "build-dependencies")
                .with_metadata("features", features);
            if name != key.as_str() {
                component = component.with_metadata("alias", key.as_str());
            }
            if let Some(target) = target {
                component = component.with_metadata("target", target);
            }
            if inherited {
                component = component.with_metadata("workspace", true);
            }
            Some(component)
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct CargoLock {
    #[serde(default)]
    version: Option<u32>,
    #[serde(default, rename = "package")]
    packages: Vec<LockedPackage>,
}

#[derive(Debug, Deserialize)]
struct LockedPackage {
    name: String,
    version: String,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    checksum: Option<String>,
    #[serde(default)]
    dependencies: Vec<String>,
}

fn parse_cargo_lock(file_name: &str, content: &str) -> Result<ParseResult, SbomError> {
    let lock: CargoLock =
        toml::from_str(content).map_err(|e| SbomError::malformed(file_name, e))?;

    let components = lock
        .packages
        .into_iter()
        .map(|pkg| {
            let dependencies = pkg
                .dependencies
                .iter()
                .filter_map(|dep| dep.split_whitespace().next())
                .map(str::to_string)
                .collect();
            let component = Component::new(Ecosystem::Rust, pkg.name, pkg.version)
                .with_checksum(pkg.checksum)
                .with_dependencies(dependencies);
            match pkg.source {
                Some(source) => component.with_metadata("source", source),
                None => component,
            }
        })
        .collect();

    let mut result = ParseResult::new(Ecosystem::Rust).with_components(components);
    if let Some(version) = lock.version {
        result.insert_metadata("lockfileVersion", version);
    }
    Ok(result)
}
