use super::ManifestParser;
use crate::sbom_generation::domain::{Component, Ecosystem, ParseResult};
use crate::shared::error::SbomError;
use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use regex::Regex;
use std::collections::HashMap;

const CONFIGURATIONS: &str = "testImplementation|testCompile|testRuntimeOnly|implementation|compileOnly|compile|runtimeOnly|runtime|annotationProcessor|kapt|api";

/// `implementation 'g:a:v'` and `implementation("g:a:v")`
static GRADLE_STRING_NOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"\b({})\s*\(?\s*["']([^"':\s]+):([^"':\s]+):([^"'\s)]+)["']"#,
        CONFIGURATIONS
    ))
    .expect("gradle string notation pattern is valid")
});

/// `implementation group: 'g', name: 'a', version: 'v'` (Kotlin DSL uses `=`)
static GRADLE_MAP_NOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"\b({})\s*\(?\s*group\s*[:=]\s*["']([^"']+)["']\s*,\s*name\s*[:=]\s*["']([^"']+)["']\s*(?:,\s*version\s*[:=]\s*["']([^"']+)["'])?"#,
        CONFIGURATIONS
    ))
    .expect("gradle map notation pattern is valid")
});

/// `id "x" version "y"` and `id("x") version "y"`
static GRADLE_PLUGIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bid\s*\(?\s*["']([^"']+)["']\s*\)?\s+version\s*\(?\s*["']([^"']+)["']"#)
        .expect("gradle plugin pattern is valid")
});

const PLUGIN_SUPPLIER: &str = "Gradle Plugin Portal";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JavaParser;

impl ManifestParser for JavaParser {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Java
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["pom.xml", "build.gradle", "build.gradle.kts"]
    }

    fn parse(&self, file_name: &str, content: &str) -> Result<ParseResult, SbomError> {
        if file_name == "pom.xml" {
            parse_pom(file_name, content)
        } else {
            Ok(parse_gradle(content, file_name.ends_with(".kts")))
        }
    }
}

/// Direct children of one `<dependency>` element
#[derive(Debug, Default)]
struct PomDependency {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    scope: Option<String>,
    optional: Option<String>,
    managed: bool,
}

impl PomDependency {
    fn set(&mut self, tag: &str, text: String) {
        match tag {
            "groupId" => self.group_id = Some(text),
            "artifactId" => self.artifact_id = Some(text),
            "version" => self.version = Some(text),
            "scope" => self.scope = Some(text),
            "optional" => self.optional = Some(text),
            _ => {}
        }
    }
}

/// Project coordinates and `<properties>` gathered while walking the POM
#[derive(Debug, Default)]
struct PomProject {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    parent_group_id: Option<String>,
    parent_version: Option<String>,
    properties: HashMap<String, String>,
}

impl PomProject {
    fn version(&self) -> Option<&str> {
        self.version.as_deref().or(self.parent_version.as_deref())
    }

    /// Resolves `${name}` placeholders; unknown ones lose their delimiters
    fn resolve(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find('}') {
                Some(end) => {
                    let key = &after[..end];
                    match self.lookup(key) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(key),
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    out.push_str(after);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out.replace(['$', '{', '}'], "")
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        match key {
            "project.version" | "pom.version" | "version" => self.version(),
            "project.groupId" | "pom.groupId" => {
                self.group_id.as_deref().or(self.parent_group_id.as_deref())
            }
            _ => self.properties.get(key).map(String::as_str),
        }
    }
}

fn parse_pom(file_name: &str, content: &str) -> Result<ParseResult, SbomError> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut project = PomProject::default();
    let mut dependencies: Vec<PomDependency> = Vec::new();
    // Depth of the `<dependency>` element currently open, if any
    let mut open_dependency: Option<usize> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if tag == "dependency"
                    && open_dependency.is_none()
                    && path.last().map(String::as_str) == Some("dependencies")
                {
                    open_dependency = Some(path.len());
                    dependencies.push(PomDependency {
                        managed: path.iter().any(|p| p == "dependencyManagement"),
                        ..PomDependency::default()
                    });
                }
                path.push(tag);
            }
            Ok(Event::End(_)) => {
                path.pop();
                if open_dependency == Some(path.len()) {
                    open_dependency = None;
                }
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| SbomError::malformed(file_name, e))?
                    .trim()
                    .to_string();
                let Some(tag) = path.last().cloned() else {
                    continue;
                };

                match open_dependency {
                    Some(depth) if path.len() == depth + 2 => {
                        if let Some(dep) = dependencies.last_mut() {
                            dep.set(&tag, text);
                        }
                    }
                    Some(_) => {}
                    None => collect_project_field(&mut project, &path, text),
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(SbomError::malformed(file_name, e)),
        }
    }

    if !path.is_empty() {
        return Err(SbomError::malformed(
            file_name,
            format!("unexpected end of document inside <{}>", path.join("><")),
        ));
    }

    let components = dependencies
        .into_iter()
        .filter_map(|dep| pom_component(&project, dep))
        .collect();

    let mut result = ParseResult::new(Ecosystem::Java).with_components(components);
    result.insert_metadata("buildTool", "maven");
    if let Some(group) = project.group_id.as_deref().or(project.parent_group_id.as_deref()) {
        result.insert_metadata("projectGroupId", group);
    }
    if let Some(artifact) = project.artifact_id.as_deref() {
        result.insert_metadata("projectArtifactId", artifact);
    }
    if let Some(version) = project.version() {
        result.insert_metadata("projectVersion", version);
    }
    Ok(result)
}

fn collect_project_field(project: &mut PomProject, path: &[String], text: String) {
    let segments: Vec<&str> = path.iter().map(String::as_str).collect();
    match segments.as_slice() {
        ["project", "groupId"] => project.group_id = Some(text),
        ["project", "artifactId"] => project.artifact_id = Some(text),
        ["project", "version"] => project.version = Some(text),
        ["project", "parent", "groupId"] => project.parent_group_id = Some(text),
        ["project", "parent", "version"] => project.parent_version = Some(text),
        ["project", "properties", key] => {
            project.properties.insert(key.to_string(), text);
        }
        _ => {}
    }
}

fn pom_component(project: &PomProject, dep: PomDependency) -> Option<Component> {
    let group_id = project.resolve(dep.group_id.as_deref()?);
    let artifact_id = project.resolve(dep.artifact_id.as_deref()?);
    let version = dep
        .version
        .as_deref()
        .map(|v| project.resolve(v))
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    let mut component = Component::new(
        Ecosystem::Java,
        format!("{}:{}", group_id, artifact_id),
        version,
    )
    .with_metadata("groupId", group_id.as_str())
    .with_metadata("artifactId", artifact_id.as_str())
    .with_metadata("scope", dep.scope.as_deref().unwrap_or("compile"))
    .with_metadata("optional", dep.optional.as_deref() == Some("true"));
    if dep.managed {
        component = component.with_metadata("managed", true);
    }
    Some(component)
}

fn parse_gradle(content: &str, kotlin_dsl: bool) -> ParseResult {
    let source: String = content
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut positioned: Vec<(usize, Component)> = Vec::new();

    for caps in GRADLE_STRING_NOTATION.captures_iter(&source) {
        let position = caps.get(0).map_or(0, |m| m.start());
        positioned.push((
            position,
            gradle_component(&caps[1], &caps[2], &caps[3], Some(&caps[4])),
        ));
    }
    for caps in GRADLE_MAP_NOTATION.captures_iter(&source) {
        let position = caps.get(0).map_or(0, |m| m.start());
        let version = caps.get(4).map(|m| m.as_str());
        positioned.push((
            position,
            gradle_component(&caps[1], &caps[2], &caps[3], version),
        ));
    }
    positioned.sort_by_key(|(position, _)| *position);

    let mut components: Vec<Component> = positioned.into_iter().map(|(_, c)| c).collect();

    for caps in GRADLE_PLUGIN.captures_iter(&source) {
        components.push(
            Component::new(Ecosystem::Java, &caps[1], &caps[2])
                .with_supplier(PLUGIN_SUPPLIER)
                .with_metadata("buildTool", "gradle")
                .with_metadata("type", "plugin"),
        );
    }

    let mut result = ParseResult::new(Ecosystem::Java).with_components(components);
    result.insert_metadata("buildTool", "gradle");
    result.insert_metadata("kotlinDsl", kotlin_dsl);
    result
}

fn gradle_component(
    configuration: &str,
    group_id: &str,
    artifact_id: &str,
    version: Option<&str>,
) -> Component {
    Component::new(
        Ecosystem::Java,
        format!("{}:{}", group_id, artifact_id),
        version.unwrap_or("unknown"),
    )
    .with_metadata("buildTool", "gradle")
    .with_metadata("groupId", group_id)
    .with_metadata("artifactId", artifact_id)
    .with_metadata("configuration", configuration)
}
