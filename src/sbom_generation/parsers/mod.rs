//! Manifest parsers, one per ecosystem.
//!
//! Every parser is a pure function of `(file name, content)`. The set of
//! parsers is closed: [`EcosystemParser`] enumerates them and
//! [`ParserRegistry`] dispatches a file to the first one whose pattern list
//! contains its exact basename.
//!
//! # Supported files
//!
//! - npm: `package.json`, `package-lock.json`
//! - Python: `requirements.txt`, `Pipfile`, `Pipfile.lock`, `pyproject.toml`
//! - Java: `pom.xml`, `build.gradle`, `build.gradle.kts`
//! - Go: `go.mod`, `go.sum`
//! - Rust: `Cargo.toml`, `Cargo.lock`

mod go;
mod java;
mod npm;
mod python;
mod rust;

use crate::sbom_generation::domain::{Ecosystem, ParseResult};
use crate::shared::error::SbomError;

pub use go::GoParser;
pub use java::JavaParser;
pub use npm::NpmParser;
pub use python::PythonParser;
pub use rust::RustParser;

/// Capability every ecosystem parser provides
pub trait ManifestParser: Send + Sync {
    /// Ecosystem every component produced by this parser belongs to
    fn ecosystem(&self) -> Ecosystem;

    /// Exact basenames this parser claims
    fn file_patterns(&self) -> &'static [&'static str];

    fn can_parse(&self, file_name: &str) -> bool {
        self.file_patterns().contains(&file_name)
    }

    /// Parses raw manifest text.
    ///
    /// # Errors
    /// Returns `SbomError::MalformedManifest` when the content does not
    /// follow the file's grammar.
    fn parse(&self, file_name: &str, content: &str) -> Result<ParseResult, SbomError>;
}

/// Closed set of parsers, in registry order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcosystemParser {
    Npm(NpmParser),
    Python(PythonParser),
    Java(JavaParser),
    Go(GoParser),
    Rust(RustParser),
}

impl EcosystemParser {
    pub const ALL: [EcosystemParser; 5] = [
        EcosystemParser::Npm(NpmParser),
        EcosystemParser::Python(PythonParser),
        EcosystemParser::Java(JavaParser),
        EcosystemParser::Go(GoParser),
        EcosystemParser::Rust(RustParser),
    ];

    fn inner(&self) -> &dyn ManifestParser {
        match self {
            EcosystemParser::Npm(p) => p,
            EcosystemParser::Python(p) => p,
            EcosystemParser::Java(p) => p,
            EcosystemParser::Go(p) => p,
            EcosystemParser::Rust(p) => p,
        }
    }
}

impl ManifestParser for EcosystemParser {
    fn ecosystem(&self) -> Ecosystem {
        self.inner().ecosystem()
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        self.inner().file_patterns()
    }

    fn parse(&self, file_name: &str, content: &str) -> Result<ParseResult, SbomError> {
        self.inner().parse(file_name, content)
    }
}

/// First-match dispatch from a basename to its parser
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserRegistry;

impl ParserRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Every recognized basename, in discovery order
    pub fn known_file_names(&self) -> Vec<&'static str> {
        EcosystemParser::ALL
            .iter()
            .flat_map(|p| p.file_patterns().iter().copied())
            .collect()
    }

    pub fn for_file(&self, file_name: &str) -> Option<EcosystemParser> {
        EcosystemParser::ALL
            .into_iter()
            .find(|p| p.can_parse(file_name))
    }

    /// Parses a file with its matching parser.
    ///
    /// # Errors
    /// `UnsupportedFile` when no parser claims the basename, otherwise
    /// whatever the parser reports.
    pub fn parse(&self, file_name: &str, content: &str) -> Result<ParseResult, SbomError> {
        let parser = self
            .for_file(file_name)
            .ok_or_else(|| SbomError::UnsupportedFile {
                file_name: file_name.to_string(),
            })?;
        parser.parse(file_name, content)
    }
}

/// Strips a leading `v` from Go-style version tags
pub(crate) fn strip_v_prefix(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_file_names_order() {
        let names = ParserRegistry::new().known_file_names();
        assert_eq!(
            names,
            vec![
                "package.json",
                "package-lock.json",
                "requirements.txt",
                "Pipfile",
                "Pipfile.lock",
                "pyproject.toml",
                "pom.xml",
                "build.gradle",
                "build.gradle.kts",
                "go.mod",
                "go.sum",
                "Cargo.toml",
                "Cargo.lock",
            ]
        );
    }

    #[test]
    fn test_for_file_exact_basename() {
        let registry = ParserRegistry::new();
        assert_eq!(
            registry.for_file("Pipfile.lock").map(|p| p.ecosystem()),
            Some(Ecosystem::Python)
        );
        assert_eq!(
            registry.for_file("build.gradle.kts").map(|p| p.ecosystem()),
            Some(Ecosystem::Java)
        );
        assert!(registry.for_file("my-package.json").is_none());
        assert!(registry.for_file("Cargo.toml.bak").is_none());
    }

    #[test]
    fn test_parse_unsupported_file() {
        let result = ParserRegistry::new().parse("Gemfile.lock", "GEM");
        assert!(matches!(
            result,
            Err(SbomError::UnsupportedFile { ref file_name }) if file_name == "Gemfile.lock"
        ));
    }

    #[test]
    fn test_patterns_are_disjoint() {
        let names = ParserRegistry::new().known_file_names();
        for name in &names {
            let claimed = EcosystemParser::ALL
                .iter()
                .filter(|p| p.can_parse(name))
                .count();
            assert_eq!(claimed, 1, "{} claimed by {} parsers", name, claimed);
        }
    }

    #[test]
    fn test_purl_rule_holds_across_parsers() {
        let inputs = [
            ("package.json", r#"{"dependencies":{"lodash":"^4.17.21"}}"#),
            ("requirements.txt", "requests==2.31.0\n"),
            ("go.mod", "module m\n\nrequire github.com/pkg/errors v0.9.1\n"),
            ("Cargo.toml", "[dependencies]\nserde = \"1.0.197\"\n"),
            (
                "pom.xml",
                "<project><dependencies><dependency><groupId>junit</groupId><artifactId>junit</artifactId><version>4.13.2</version></dependency></dependencies></project>",
            ),
        ];

        let registry = ParserRegistry::new();
        for (file_name, content) in inputs {
            let result = registry.parse(file_name, content).unwrap();
            for component in &result.components {
                assert_eq!(
                    component.purl.as_deref(),
                    Some(
                        format!(
                            "pkg:{}/{}@{}",
                            result.ecosystem.purl_type(),
                            component.name,
                            component.version
                        )
                        .as_str()
                    )
                );
            }
        }
    }

    #[test]
    fn test_strip_v_prefix() {
        assert_eq!(strip_v_prefix("v1.2.3"), "1.2.3");
        assert_eq!(strip_v_prefix("1.2.3"), "1.2.3");
    }
}
