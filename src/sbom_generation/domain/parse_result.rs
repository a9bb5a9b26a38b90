use super::component::{Component, Ecosystem};
use serde_json::Value;
use std::collections::BTreeMap;

/// Raw manifest handed to a parser: basename plus text content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFile {
    pub file_name: String,
    pub content: String,
}

impl ManifestFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

/// Output of one parser invocation.
///
/// `metadata` carries ecosystem-specific facts (module path, Go version,
/// build tool) that nothing downstream depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub ecosystem: Ecosystem,
    pub components: Vec<Component>,
    pub metadata: BTreeMap<String, Value>,
}

impl ParseResult {
    pub fn new(ecosystem: Ecosystem) -> Self {
        Self {
            ecosystem,
            components: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_components(mut self, components: Vec<Component>) -> Self {
        self.components = components;
        self
    }

    pub fn insert_metadata(&mut self, key: &str, value: impl Into<Value>) {
        self.metadata.insert(key.to_string(), value.into());
    }
}
