use crate::sbom_generation::domain::Component;
use std::collections::HashSet;

/// ComponentDeduplicator collapses an aggregated component sequence into a
/// unique set.
///
/// The first occurrence of each `name@version` wins and later duplicates are
/// dropped without merging any of their fields, so the output depends on
/// input order.
pub struct ComponentDeduplicator;

impl ComponentDeduplicator {
    pub fn deduplicate(components: Vec<Component>) -> Vec<Component> {
        let mut seen = HashSet::with_capacity(components.len());
        components
            .into_iter()
            .filter(|component| seen.insert(component.identity_key()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::Ecosystem;
    use crate::sbom_generation::parsers::ParserRegistry;

    #[test]
    fn test_keep_first_without_merging() {
        let first = Component::new(Ecosystem::Npm, "lodash", "4.17.21");
        let second = Component::new(Ecosystem::Npm, "lodash", "4.17.21")
            .with_license(Some("MIT".to_string()))
            .with_metadata("isDev", true);
        let other = Component::new(Ecosystem::Npm, "lodash", "4.17.20");

        let result = ComponentDeduplicator::deduplicate(vec![first.clone(), second, other]);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0], first);
        assert!(result[0].license.is_none());
        assert_eq!(result[1].version, "4.17.20");
    }

    #[test]
    fn test_idempotent_over_repeated_manifest() {
        let content = r#"{
            "dependencies": {"express": "^4.18.2", "lodash": "~4.17.21"},
            "devDependencies": {"jest": "29.7.0"}
        }"#;
        let registry = ParserRegistry::new();
        let once = registry.parse("package.json", content).unwrap().components;
        let mut twice = once.clone();
        twice.extend(once.clone());

        assert_eq!(
            ComponentDeduplicator::deduplicate(twice),
            ComponentDeduplicator::deduplicate(once)
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(ComponentDeduplicator::deduplicate(Vec::new()).is_empty());
    }
}
