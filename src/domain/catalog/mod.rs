// src/domain/catalog/mod.rs
//! Capability catalog: the curated set of signal kinds a strategy IR may
//! reference.
//!
//! The catalog is built once and only read afterwards. Callers share it behind
//! an `Arc<Catalog>`; there is no way to register capabilities after
//! construction.

mod entries;

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Encoding name of the composite comparison/boolean-combination signal.
pub const PARAMETRIC_ENCODING: &str = "ParametricSignal";

/// Signal category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SignalCategory {
    /// Raw market-data fields (open, close, volume, ...)
    MarketData,
    /// Derived indicator series
    Indicator,
    /// Comparison and boolean-combination rules
    Logic,
}

impl SignalCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MarketData => "Market Data",
            Self::Indicator => "Indicator",
            Self::Logic => "Logic",
        }
    }
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArgKind {
    Number,
    String,
    Enum,
}

/// A named argument a capability accepts.
#[derive(Debug, Clone, Serialize)]
pub struct ArgDefinition {
    pub name: &'static str,
    pub kind: ArgKind,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub optional: bool,
    pub description: &'static str,
}

impl ArgDefinition {
    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ArgKind::Number,
            min: None,
            max: None,
            optional: false,
            description,
        }
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// One catalog entry describing a signal kind.
#[derive(Debug, Clone, Serialize)]
pub struct SignalCapability {
    /// Canonical id, unique ignoring case
    pub id: &'static str,
    pub name: &'static str,
    pub aliases: Vec<&'static str>,
    pub category: SignalCategory,
    pub description: &'static str,
    /// Signal implementation type emitted by the compiler
    pub encoding: &'static str,
    pub args: Vec<ArgDefinition>,
    /// Minimum number of children a node must carry
    pub required_children: usize,
    /// Positional meaning of each child
    pub child_slots: Vec<&'static str>,
}

impl SignalCapability {
    pub fn is_parametric(&self) -> bool {
        self.encoding == PARAMETRIC_ENCODING
    }

    /// `- <Name> (ID: <id>) - <Description>`
    pub fn registry_line(&self) -> String {
        format!("- {} (ID: {}) - {}", self.name, self.id, self.description)
    }

    /// Arguments a node must supply, in declaration order.
    pub fn required_args(&self) -> impl Iterator<Item = &ArgDefinition> {
        self.args.iter().filter(|arg| !arg.optional)
    }
}

pub struct Catalog {
    capabilities: Vec<SignalCapability>,
    // lowercased id -> position in `capabilities`
    index: HashMap<String, usize>,
    // lowercased alias -> lowercased canonical ids, registration order
    aliases: HashMap<String, Vec<String>>,
}

impl Catalog {
    /// The built-in capability set.
    pub fn standard() -> Self {
        Self::from_capabilities(entries::standard_entries())
    }

    pub fn from_capabilities(capabilities: Vec<SignalCapability>) -> Self {
        let mut catalog = Self {
            capabilities: Vec::with_capacity(capabilities.len()),
            index: HashMap::new(),
            aliases: HashMap::new(),
        };

        for capability in capabilities {
            catalog.register(capability);
        }

        log::debug!("Capability catalog built with {} entries", catalog.len());
        catalog
    }

    fn register(&mut self, capability: SignalCapability) {
        let key = capability.id.to_lowercase();
        if self.index.contains_key(&key) {
            log::warn!("Duplicate capability id ignored: {}", capability.id);
            return;
        }

        for alias in &capability.aliases {
            self.aliases
                .entry(alias.to_lowercase())
                .or_default()
                .push(key.clone());
        }

        self.index.insert(key, self.capabilities.len());
        self.capabilities.push(capability);
    }

    /// Resolve an id or alias, ignoring case. Canonical ids win over aliases;
    /// an alias shared by several capabilities resolves to the first registered.
    pub fn lookup(&self, id: &str) -> Option<&SignalCapability> {
        let key = id.to_lowercase();
        let position = match self.index.get(&key) {
            Some(position) => *position,
            None => {
                let canonical = self.aliases.get(&key)?.first()?;
                *self.index.get(canonical)?
            }
        };
        self.capabilities.get(position)
    }

    /// Case-insensitive substring match on name or any alias, in registry order.
    pub fn search_by_name(&self, pattern: &str) -> Vec<&SignalCapability> {
        let pattern = pattern.to_lowercase();
        self.capabilities
            .iter()
            .filter(|capability| {
                capability.name.to_lowercase().contains(&pattern)
                    || capability
                        .aliases
                        .iter()
                        .any(|alias| alias.to_lowercase().contains(&pattern))
            })
            .collect()
    }

    pub fn list_all(&self) -> &[SignalCapability] {
        &self.capabilities
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// One line per capability, sorted by category then name, for embedding in
    /// the translator prompt. The format must stay stable.
    pub fn compact_registry(&self) -> String {
        let mut sorted: Vec<&SignalCapability> = self.capabilities.iter().collect();
        sorted.sort_by(|a, b| {
            a.category
                .as_str()
                .cmp(b.category.as_str())
                .then_with(|| a.name.cmp(b.name))
        });

        sorted
            .iter()
            .map(|capability| capability.registry_line())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &'static str, name: &'static str, aliases: Vec<&'static str>) -> SignalCapability {
        SignalCapability {
            id,
            name,
            aliases,
            category: SignalCategory::MarketData,
            description: "test leaf",
            encoding: "RawDataSignal",
            args: Vec::new(),
            required_children: 0,
            child_slots: Vec::new(),
        }
    }

    #[test]
    fn lookup_is_case_insensitive_on_canonical_id() {
        let catalog = Catalog::standard();

        let lower = catalog.lookup("raw.close").unwrap();
        let upper = catalog.lookup("RAW.CLOSE").unwrap();

        assert_eq!(lower.id, "raw.close");
        assert_eq!(upper.id, "raw.close");
    }

    #[test]
    fn every_alias_resolves_to_a_capability() {
        let catalog = Catalog::standard();

        for capability in catalog.list_all() {
            for alias in &capability.aliases {
                assert!(
                    catalog.lookup(alias).is_some(),
                    "alias {} did not resolve",
                    alias
                );
                assert!(catalog.lookup(&alias.to_uppercase()).is_some());
            }
        }
    }

    #[test]
    fn unambiguous_alias_matches_canonical_lookup() {
        let catalog = Catalog::standard();

        let by_alias = catalog.lookup("Close Price").unwrap();
        let by_id = catalog.lookup("raw.close").unwrap();

        assert_eq!(by_alias.id, by_id.id);
    }

    #[test]
    fn shared_alias_resolves_to_first_registered() {
        let catalog = Catalog::from_capabilities(vec![
            leaf("first", "First", vec!["shared"]),
            leaf("second", "Second", vec!["shared"]),
        ]);

        assert_eq!(catalog.lookup("SHARED").unwrap().id, "first");
    }

    #[test]
    fn canonical_id_takes_precedence_over_alias() {
        let catalog = Catalog::from_capabilities(vec![
            leaf("alpha", "Alpha", vec!["beta"]),
            leaf("beta", "Beta", vec![]),
        ]);

        assert_eq!(catalog.lookup("beta").unwrap().id, "beta");
    }

    #[test]
    fn duplicate_ids_keep_the_first_registration() {
        let catalog = Catalog::from_capabilities(vec![
            leaf("dup", "Original", vec![]),
            leaf("DUP", "Replacement", vec![]),
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup("dup").unwrap().name, "Original");
    }

    #[test]
    fn lookup_misses_return_none() {
        let catalog = Catalog::standard();

        assert!(catalog.lookup("").is_none());
        assert!(catalog.lookup("does.not.exist").is_none());
    }

    #[test]
    fn search_matches_name_or_alias_in_registry_order() {
        let catalog = Catalog::standard();

        let ids: Vec<&str> = catalog
            .search_by_name("MOVING AVERAGE")
            .iter()
            .map(|c| c.id)
            .collect();

        assert_eq!(ids, vec!["sma", "ema"]);

        let by_alias: Vec<&str> = catalog.search_by_name("ewma").iter().map(|c| c.id).collect();
        assert_eq!(by_alias, vec!["ema"]);
    }

    #[test]
    fn search_without_match_is_empty() {
        let catalog = Catalog::standard();
        assert!(catalog.search_by_name("zzz-no-such-signal").is_empty());
    }

    #[test]
    fn compact_registry_is_sorted_by_category_then_name() {
        let catalog = Catalog::standard();
        let registry = catalog.compact_registry();
        let lines: Vec<&str> = registry.lines().collect();

        assert_eq!(lines.len(), catalog.len());
        assert!(lines
            .iter()
            .all(|line| line.starts_with("- ") && line.contains(" (ID: ")));

        let mut expected: Vec<&SignalCapability> = catalog.list_all().iter().collect();
        expected.sort_by_key(|c| (c.category.as_str(), c.name));
        let expected_first = format!(
            "- {} (ID: {}) - {}",
            expected[0].name, expected[0].id, expected[0].description
        );
        assert_eq!(lines[0], expected_first);
        assert!(!registry.ends_with('\n'));
    }

    #[test]
    fn compact_registry_line_format() {
        let catalog = Catalog::from_capabilities(vec![leaf("raw.x", "X Field", vec![])]);

        assert_eq!(catalog.compact_registry(), "- X Field (ID: raw.x) - test leaf");
    }

    #[test]
    fn parametric_capability_is_flagged() {
        let catalog = Catalog::standard();

        assert!(catalog.lookup("parametric").unwrap().is_parametric());
        assert!(!catalog.lookup("sma").unwrap().is_parametric());
    }
}
