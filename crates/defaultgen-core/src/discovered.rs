//! Defaults discovered on a companion scope by naming convention.

use rustc_hash::FxHashMap;

use crate::{DefaultExpression, QualifiedName, ReferenceKind, SemanticType};

/// Convention key: underscores removed, lowercased.
///
/// `DEFAULT_HOST_NAME`, `DEFAULT_HOSTNAME` and `defaultHostName()` all land
/// on `hostname`.
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|&c| c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// One companion member usable as a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDefault {
    pub normalized_name: String,
    /// Qualified field path or zero-argument call path.
    pub expression: DefaultExpression,
    /// Member name as declared.
    pub original_name: String,
    pub source_kind: ReferenceKind,
    /// Field type or factory return type.
    pub value_type: SemanticType,
}

/// Discovered defaults keyed by normalized name.
///
/// Every contribution is retained. Lookups bind the last one scanned for a
/// key; keys with more than one contribution are ambiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredDefaults {
    companion: QualifiedName,
    entries: FxHashMap<String, Vec<DiscoveredDefault>>,
    /// Keys in first-scanned order.
    order: Vec<String>,
}

impl DiscoveredDefaults {
    pub fn new(companion: QualifiedName) -> Self {
        Self {
            companion,
            entries: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    pub fn companion(&self) -> &QualifiedName {
        &self.companion
    }

    pub fn insert(&mut self, default: DiscoveredDefault) {
        let key = default.normalized_name.clone();
        let slot = self.entries.entry(key.clone()).or_default();
        if slot.is_empty() {
            self.order.push(key);
        }
        slot.push(default);
    }

    /// The bound default for a normalized key.
    pub fn get(&self, key: &str) -> Option<&DiscoveredDefault> {
        self.entries.get(key).and_then(|all| all.last())
    }

    /// Every contribution to a key, in scan order.
    pub fn contributors(&self, key: &str) -> &[DiscoveredDefault] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_ambiguous(&self, key: &str) -> bool {
        self.contributors(key).len() > 1
    }

    /// Keys in first-scanned order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Bound defaults in key order.
    pub fn iter(&self) -> impl Iterator<Item = &DiscoveredDefault> {
        self.order.iter().filter_map(|key| self.get(key))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
