use super::ManifestParser;
use crate::sbom_generation::domain::{Component, Ecosystem, ParseResult};
use crate::shared::error::SbomError;
use serde_json::{Map, Value};

/// Dependency categories of `package.json`, in merge order
const PACKAGE_JSON_SECTIONS: [(&str, Option<&str>); 4] = [
    ("dependencies", None),
    ("devDependencies", Some("isDev")),
    ("peerDependencies", Some("isPeer")),
    ("optionalDependencies", Some("isOptional")),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NpmParser;

impl ManifestParser for NpmParser {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["package.json", "package-lock.json"]
    }

    fn parse(&self, file_name: &str, content: &str) -> Result<ParseResult, SbomError> {
        let data: Value =
            serde_json::from_str(content).map_err(|e| SbomError::malformed(file_name, e))?;
        let root = data
            .as_object()
            .ok_or_else(|| SbomError::malformed(file_name, "top-level value is not an object"))?;

        if file_name == "package-lock.json" {
            Ok(parse_package_lock(root))
        } else {
            Ok(parse_package_json(root))
        }
    }
}

fn parse_package_json(root: &Map<String, Value>) -> ParseResult {
    let mut components: Vec<Component> = Vec::new();

    for (section, _) in PACKAGE_JSON_SECTIONS {
        let Some(deps) = root.get(section).and_then(Value::as_object) else {
            continue;
        };
        for (name, range) in deps {
            if components.iter().any(|c| &c.name == name) {
                continue;
            }
            let version = clean_version(range.as_str().unwrap_or_default());
            let mut component = Component::new(Ecosystem::Npm, name, version);
            for (flag_section, flag) in PACKAGE_JSON_SECTIONS {
                if let Some(flag) = flag {
                    let declared = root
                        .get(flag_section)
                        .and_then(Value::as_object)
                        .is_some_and(|m| m.contains_key(name));
                    component = component.with_metadata(flag, declared);
                }
            }
            components.push(component);
        }
    }

    let mut result = ParseResult::new(Ecosystem::Npm).with_components(components);
    for (key, field) in [
        ("projectName", "name"),
        ("projectVersion", "version"),
        ("description", "description"),
        ("license", "license"),
    ] {
        if let Some(value) = root.get(field).filter(|v| !v.is_null()) {
            result.insert_metadata(key, value.clone());
        }
    }
    result
}

fn parse_package_lock(root: &Map<String, Value>) -> ParseResult {
    let mut components = Vec::new();

    match root.get("packages").and_then(Value::as_object) {
        Some(packages) if !packages.is_empty() => {
            for (path, entry) in packages {
                if path.is_empty() {
                    continue;
                }
                if let Some(component) = lock_package(path, entry) {
                    components.push(component);
                }
            }
        }
        _ => {
            if let Some(deps) = root.get("dependencies").and_then(Value::as_object) {
                walk_legacy_dependencies(deps, &mut components);
            }
        }
    }

    let mut result = ParseResult::new(Ecosystem::Npm).with_components(components);
    if let Some(version) = root.get("lockfileVersion") {
        result.insert_metadata("lockfileVersion", version.clone());
    }
    result
}

/// One entry of the v2/v3 `packages` map
fn lock_package(path: &str, entry: &Value) -> Option<Component> {
    let version = entry.get("version").and_then(Value::as_str)?;
    let name = entry
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| package_name_from_path(path));

    Some(
        Component::new(Ecosystem::Npm, name, version)
            .with_license(entry.get("license").and_then(Value::as_str).map(str::to_string))
            .with_checksum(entry.get("integrity").and_then(Value::as_str).and_then(sha256_integrity))
            .with_dependencies(object_keys(entry.get("dependencies")))
            .with_metadata("resolved", entry.get("resolved").cloned().unwrap_or(Value::Null))
            .with_metadata("dev", bool_field(entry, "dev"))
            .with_metadata("optional", bool_field(entry, "optional")),
    )
}

/// Lockfile v1: nested `dependencies` tree, each node listing `requires`
fn walk_legacy_dependencies(deps: &Map<String, Value>, components: &mut Vec<Component>) {
    for (name, entry) in deps {
        let version = entry
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or_default();
        components.push(
            Component::new(Ecosystem::Npm, name, version)
                .with_checksum(entry.get("integrity").and_then(Value::as_str).and_then(sha256_integrity))
                .with_dependencies(object_keys(entry.get("requires")))
                .with_metadata("resolved", entry.get("resolved").cloned().unwrap_or(Value::Null))
                .with_metadata("dev", bool_field(entry, "dev")),
        );

        if let Some(nested) = entry.get("dependencies").and_then(Value::as_object) {
            walk_legacy_dependencies(nested, components);
        }
    }
}

/// `node_modules/a/node_modules/@scope/b` -> `@scope/b`
fn package_name_from_path(path: &str) -> String {
    const MARKER: &str = "node_modules/";
    match path.rfind(MARKER) {
        Some(idx) => path[idx + MARKER.len()..].to_string(),
        None => path.to_string(),
    }
}

/// Removes leading range operators: `^1.2.3` -> `1.2.3`, `>=2.0.0` -> `2.0.0`
fn clean_version(range: &str) -> String {
    range
        .trim()
        .trim_start_matches(['^', '~', '>', '=', '<'])
        .to_string()
}

/// Only `sha256-` integrity values carry a usable SHA-256
fn sha256_integrity(integrity: &str) -> Option<String> {
    integrity.strip_prefix("sha256-").map(str::to_string)
}

fn object_keys(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_object)
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default()
}

fn bool_field(entry: &Value, key: &str) -> bool {
    entry.get(key).and_then(Value::as_bool).unwrap_or(false)
}
