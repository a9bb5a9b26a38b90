use super::{strip_v_prefix, ManifestParser};
use crate::sbom_generation::domain::{Component, Ecosystem, ParseResult};
use crate::shared::error::SbomError;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoParser;

impl ManifestParser for GoParser {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Go
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["go.mod", "go.sum"]
    }

    fn parse(&self, file_name: &str, content: &str) -> Result<ParseResult, SbomError> {
        if file_name == "go.sum" {
            Ok(parse_go_sum(content))
        } else {
            parse_go_mod(file_name, content)
        }
    }
}

/// Block currently open in a go.mod file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GoModBlock {
    None,
    Require,
    /// `replace (`, `exclude (`, `retract (`: skipped wholesale
    Other,
}

fn parse_go_mod(file_name: &str, content: &str) -> Result<ParseResult, SbomError> {
    let mut result = ParseResult::new(Ecosystem::Go);
    let mut components = Vec::new();
    let mut block = GoModBlock::None;
    let mut block_start = 0;

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        if block != GoModBlock::None {
            if trimmed == ")" {
                block = GoModBlock::None;
            } else if block == GoModBlock::Require {
                if let Some(component) = require_entry(trimmed) {
                    components.push(component);
                }
            }
            continue;
        }

        let (directive, rest) = trimmed
            .split_once(char::is_whitespace)
            .map(|(d, r)| (d, r.trim()))
            .unwrap_or((trimmed, ""));

        match directive {
            "module" => result.insert_metadata("moduleName", rest.trim_matches('"')),
            "go" => result.insert_metadata("goVersion", rest),
            "toolchain" => result.insert_metadata("toolchain", rest),
            "require" if rest.starts_with('(') => {
                block = GoModBlock::Require;
                block_start = index + 1;
            }
            "require" => {
                if let Some(component) = require_entry(rest) {
                    components.push(component);
                }
            }
            "replace" | "exclude" | "retract" | "godebug" if rest.starts_with('(') => {
                block = GoModBlock::Other;
                block_start = index + 1;
            }
            _ => {}
        }
    }

    if block != GoModBlock::None {
        return Err(SbomError::malformed(
            file_name,
            format!("block opened at line {} is never closed", block_start),
        ));
    }

    result.components = components;
    Ok(result)
}

/// `github.com/pkg/errors v0.9.1 // indirect`
fn require_entry(entry: &str) -> Option<Component> {
    let (spec, comment) = match entry.split_once("//") {
        Some((spec, comment)) => (spec, comment.trim()),
        None => (entry, ""),
    };
    let mut parts = spec.split_whitespace();
    let name = parts.next()?;
    let version = strip_v_prefix(parts.next()?);

    Some(
        Component::new(Ecosystem::Go, name, version)
            .with_metadata("indirect", comment.starts_with("indirect")),
    )
}

/// go.sum lines are `module version hash`; `/go.mod` lines repeat the
/// module entry with the hash of its go.mod file only.
fn parse_go_sum(content: &str) -> ParseResult {
    let mut seen = HashSet::new();
    let mut components = Vec::new();

    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let [name, version, hash, ..] = parts.as_slice() else {
            continue;
        };
        if version.ends_with("/go.mod") {
            continue;
        }

        let version = strip_v_prefix(version);
        if !seen.insert(format!("{}@{}", name, version)) {
            continue;
        }

        components.push(
            Component::new(Ecosystem::Go, *name, version)
                .with_checksum(hash.strip_prefix("h1:").map(str::to_string))
                .with_metadata("hash", *hash),
        );
    }

    ParseResult::new(Ecosystem::Go).with_components(components)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_mod_require_block() {
        let content = r#"module github.com/acme/api

go 1.21

toolchain go1.21.5

require github.com/google/uuid v1.5.0

require (
	github.com/gin-gonic/gin v1.9.1
	// a comment inside the block
	golang.org/x/net v0.19.0 // indirect
)

replace (
	github.com/old/mod v1.0.0 => github.com/new/mod v1.1.0
)
"#;
        let result = GoParser.parse("go.mod", content).unwrap();
        let keys: Vec<_> = result.components.iter().map(|c| c.identity_key()).collect();
        assert_eq!(
            keys,
            vec![
                "github.com/google/uuid@1.5.0",
                "github.com/gin-gonic/gin@1.9.1",
                "golang.org/x/net@0.19.0",
            ]
        );
        assert!(!result.components[1].metadata_flag("indirect"));
        assert!(result.components[2].metadata_flag("indirect"));
        assert_eq!(
            result.components[0].purl.as_deref(),
            Some("pkg:golang/github.com/google/uuid@1.5.0")
        );
        assert_eq!(result.metadata["moduleName"], "github.com/acme/api");
        assert_eq!(result.metadata["goVersion"], "1.21");
        assert_eq!(result.metadata["toolchain"], "go1.21.5");
    }

    #[test]
    fn test_go_mod_unclosed_block() {
        let content = "module m\n\nrequire (\n\tgithub.com/a/b v1.0.0\n";
        let result = GoParser.parse("go.mod", content);
        assert!(matches!(result, Err(SbomError::MalformedManifest { .. })));
    }

    #[test]
    fn test_go_sum_drops_go_mod_lines() {
        let content = "mod v1.2.3 h1:AAA=\nmod v1.2.3/go.mod h1:BBB=\n";
        let result = GoParser.parse("go.sum", content).unwrap();
        assert_eq!(result.components.len(), 1);
        let component = &result.components[0];
        assert_eq!(component.name, "mod");
        assert_eq!(component.version, "1.2.3");
        assert_eq!(component.checksum_sha256.as_deref(), Some("AAA="));
    }

    #[test]
    fn test_go_sum_deduplicates_and_ignores_non_h1() {
        let content = "\
github.com/a/b v1.0.0 h1:first=
github.com/a/b v1.0.0 h1:second=
github.com/c/d v0.1.0 h2:other=

short line
";
        let result = GoParser.parse("go.sum", content).unwrap();
        assert_eq!(result.components.len(), 2);
        assert_eq!(result.components[0].checksum_sha256.as_deref(), Some("first="));
        assert!(result.components[1].checksum_sha256.is_none());
        assert_eq!(result.components[1].metadata_str("hash"), Some("h2:other="));
    }
}
