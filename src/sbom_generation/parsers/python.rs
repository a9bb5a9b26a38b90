use super::ManifestParser;
use crate::sbom_generation::domain::{Component, Ecosystem, ParseResult};
use crate::shared::error::SbomError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;
use toml::{Table, Value as TomlValue};

/// `name[extras] <op> version`, stopping at markers, separators and comments
static REQUIREMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_][A-Za-z0-9._-]*)\s*(?:\[[^\]]*\])?\s*([<>=!~]+)?\s*([0-9][^\s;,#]*)?")
        .expect("requirement pattern is valid")
});

const UNKNOWN_VERSION: &str = "unknown";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PythonParser;

impl ManifestParser for PythonParser {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Python
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["requirements.txt", "Pipfile", "Pipfile.lock", "pyproject.toml"]
    }

    fn parse(&self, file_name: &str, content: &str) -> Result<ParseResult, SbomError> {
        match file_name {
            "requirements.txt" => Ok(parse_requirements(content)),
            "Pipfile.lock" => parse_pipfile_lock(file_name, content),
            "Pipfile" => parse_pipfile(file_name, content),
            _ => parse_pyproject(file_name, content),
        }
    }
}

/// A parsed PEP 508 requirement: lower-cased name, operator, pinned version
struct Requirement {
    name: String,
    operator: Option<String>,
    version: Option<String>,
}

impl Requirement {
    fn parse(spec: &str) -> Option<Self> {
        let caps = REQUIREMENT.captures(spec.trim())?;
        Some(Self {
            name: caps[1].to_lowercase(),
            operator: caps.get(2).map(|m| m.as_str().to_string()),
            version: caps.get(3).map(|m| m.as_str().to_string()),
        })
    }

    fn into_component(self) -> Component {
        let version = self
            .version
            .unwrap_or_else(|| UNKNOWN_VERSION.to_string());
        let component = Component::new(Ecosystem::Python, self.name, version);
        match self.operator {
            Some(op) => component.with_metadata("versionOperator", op),
            None => component,
        }
    }
}

fn parse_requirements(content: &str) -> ParseResult {
    let components = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(Requirement::parse)
        .map(Requirement::into_component)
        .collect();

    ParseResult::new(Ecosystem::Python).with_components(components)
}

fn parse_pipfile(file_name: &str, content: &str) -> Result<ParseResult, SbomError> {
    let table: Table = toml::from_str(content).map_err(|e| SbomError::malformed(file_name, e))?;
    let mut components = Vec::new();

    for (section, is_dev) in [("packages", false), ("dev-packages", true)] {
        let Some(packages) = table.get(section).and_then(TomlValue::as_table) else {
            continue;
        };
        for (name, spec) in packages {
            let raw = match spec {
                TomlValue::String(s) => s.as_str(),
                TomlValue::Table(t) => t.get("version").and_then(TomlValue::as_str).unwrap_or(""),
                _ => "",
            };
            let version = match raw.trim() {
                "*" => "latest".to_string(),
                "" => UNKNOWN_VERSION.to_string(),
                other => other
                    .trim_start_matches(['=', '<', '>', '~', '!'])
                    .trim()
                    .to_string(),
            };
            components.push(
                Component::new(Ecosystem::Python, name.to_lowercase(), version)
                    .with_metadata("isDev", is_dev),
            );
        }
    }

    Ok(ParseResult::new(Ecosystem::Python).with_components(components))
}

fn parse_pipfile_lock(file_name: &str, content: &str) -> Result<ParseResult, SbomError> {
    let data: JsonValue =
        serde_json::from_str(content).map_err(|e| SbomError::malformed(file_name, e))?;
    let mut components = Vec::new();

    for (section, is_dev) in [("default", false), ("develop", true)] {
        let Some(packages) = data.get(section).and_then(JsonValue::as_object) else {
            continue;
        };
        for (name, entry) in packages {
            let version = entry
                .get("version")
                .and_then(JsonValue::as_str)
                .map(|v| v.trim_start_matches("==").to_string())
                .unwrap_or_else(|| UNKNOWN_VERSION.to_string());
            let checksum = entry
                .get("hashes")
                .and_then(JsonValue::as_array)
                .and_then(|hashes| {
                    hashes
                        .iter()
                        .filter_map(JsonValue::as_str)
                        .find_map(|h| h.strip_prefix("sha256:"))
                })
                .map(str::to_string);

            let mut component = Component::new(Ecosystem::Python, name.to_lowercase(), version)
                .with_checksum(checksum)
                .with_metadata("isDev", is_dev);
            for key in ["index", "markers"] {
                if let Some(value) = entry.get(key) {
                    component = component.with_metadata(key, value.clone());
                }
            }
            components.push(component);
        }
    }

    let mut result = ParseResult::new(Ecosystem::Python).with_components(components);
    if let Some(python) = data.pointer("/_meta/requires/python_version") {
        result.insert_metadata("pythonVersion", python.clone());
    }
    Ok(result)
}

/// PEP 621 `[project]` tables plus Poetry dependency tables
fn parse_pyproject(file_name: &str, content: &str) -> Result<ParseResult, SbomError> {
    let table: Table = toml::from_str(content).map_err(|e| SbomError::malformed(file_name, e))?;
    let mut components = Vec::new();
    let mut result = ParseResult::new(Ecosystem::Python);

    if let Some(project) = table.get("project").and_then(TomlValue::as_table) {
        for key in ["name", "version"] {
            if let Some(value) = project.get(key).and_then(TomlValue::as_str) {
                result.insert_metadata(key, value);
            }
        }

        for spec in string_array(project.get("dependencies")) {
            if let Some(req) = Requirement::parse(spec) {
                components.push(req.into_component());
            }
        }

        if let Some(groups) = project
            .get("optional-dependencies")
            .and_then(TomlValue::as_table)
        {
            for (group, specs) in groups {
                for spec in string_array(Some(specs)) {
                    if let Some(req) = Requirement::parse(spec) {
                        components.push(
                            req.into_component()
                                .with_metadata("isOptional", true)
                                .with_metadata("group", group.as_str()),
                        );
                    }
                }
            }
        }
    }

    if let Some(poetry) = table
        .get("tool")
        .and_then(|t| t.get("poetry"))
        .and_then(TomlValue::as_table)
    {
        result.insert_metadata("buildTool", "poetry");
        if let Some(deps) = poetry.get("dependencies").and_then(TomlValue::as_table) {
            components.extend(poetry_components(deps, None));
        }
        if let Some(groups) = poetry.get("group").and_then(TomlValue::as_table) {
            for (group, body) in groups {
                if let Some(deps) = body.get("dependencies").and_then(TomlValue::as_table) {
                    components.extend(poetry_components(deps, Some(group)));
                }
            }
        }
    }

    result.components = components;
    Ok(result)
}

fn poetry_components(deps: &Table, group: Option<&str>) -> Vec<Component> {
    deps.iter()
        .filter(|(name, _)| name.as_str() != "python")
        .map(|(name, spec)| {
            let raw = match spec {
                TomlValue::String(s) => s.as_str(),
                TomlValue::Table(t) => t.get("version").and_then(TomlValue::as_str).unwrap_or(""),
                _ => "",
            };
            let version = raw.trim_start_matches(['^', '~', '=', '<', '>', '!']).trim();
            let version = match version {
                "" => UNKNOWN_VERSION,
                "*" => "latest",
                v => v,
            };
            let component = Component::new(Ecosystem::Python, name.to_lowercase(), version);
            match group {
                Some(group) => component.with_metadata("group", group),
                None => component,
            }
        })
        .collect()
}

fn string_array(value: Option<&TomlValue>) -> impl Iterator<Item = &str> {
    value
        .and_then(TomlValue::as_array)
        .into_iter()
        .flatten()
        .filter_map(TomlValue::as_str)
}
