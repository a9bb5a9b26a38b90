use super::component::{Component, Ecosystem};
use serde::Serialize;
use std::collections::BTreeSet;

/// Per-file summary of one successful parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedFile {
    pub file_name: String,
    pub ecosystem: Ecosystem,
    pub component_count: usize,
}

/// Aggregated result of parsing every manifest of one scan.
///
/// `ecosystem` is the ecosystem of the last parsed file; `ecosystems` holds
/// every ecosystem that contributed a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestionOutcome {
    pub ecosystem: Option<Ecosystem>,
    pub ecosystems: BTreeSet<Ecosystem>,
    pub files_processed: Vec<ProcessedFile>,
    pub components: Vec<Component>,
}

impl IngestionOutcome {
    pub fn is_mixed(&self) -> bool {
        self.ecosystems.len() > 1
    }
}
