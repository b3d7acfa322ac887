//! Buff registry for definition lookup.
//!
//! The `BuffRegistry` is read-only configuration shared by every battle run
//! with the same rule set. The engine takes it by reference and never
//! mutates it, so several rule sets can be simulated side by side.

use rustc_hash::FxHashMap;

use super::definition::{BuffDefinition, BuffId};

/// Registry of buff definitions.
///
/// ## Example
///
/// ```
/// use battle_sim::buffs::{BuffDefinition, BuffId, BuffRegistry};
///
/// let mut registry = BuffRegistry::new();
/// registry.register(BuffDefinition::new("haste").with_stat_buff("crit_chance", 15));
///
/// let found = registry.get(&BuffId::new("haste")).unwrap();
/// assert_eq!(found.stat_buffs.get("crit_chance"), Some(&15));
/// ```
#[derive(Clone, Debug, Default)]
pub struct BuffRegistry {
    buffs: FxHashMap<BuffId, BuffDefinition>,
}

impl BuffRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a buff definition.
    ///
    /// Panics if a buff with the same ID already exists.
    pub fn register(&mut self, buff: BuffDefinition) {
        if self.buffs.contains_key(&buff.id) {
            panic!("Buff with ID '{}' already registered", buff.id);
        }
        self.buffs.insert(buff.id.clone(), buff);
    }

    /// Register a definition (builder pattern).
    #[must_use]
    pub fn with(mut self, buff: BuffDefinition) -> Self {
        self.register(buff);
        self
    }

    /// Get a buff definition by ID.
    #[must_use]
    pub fn get(&self, id: &BuffId) -> Option<&BuffDefinition> {
        self.buffs.get(id)
    }

    /// Check if a buff ID is registered.
    #[must_use]
    pub fn contains(&self, id: &BuffId) -> bool {
        self.buffs.contains_key(id)
    }

    /// Get the number of registered buffs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffs.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }

    /// Iterate over all buff definitions.
    pub fn iter(&self) -> impl Iterator<Item = &BuffDefinition> {
        self.buffs.values()
    }
}

impl FromIterator<BuffDefinition> for BuffRegistry {
    fn from_iter<I: IntoIterator<Item = BuffDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for buff in iter {
            registry.register(buff);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry = BuffRegistry::new();
        registry.register(BuffDefinition::new("shield").with_stat_buff("protection", 30));

        assert!(registry.get(&BuffId::new("shield")).is_some());
        assert!(registry.get(&BuffId::new("missing")).is_none());
        assert!(registry.contains(&BuffId::new("shield")));
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut registry = BuffRegistry::new();
        registry.register(BuffDefinition::new("shield"));
        registry.register(BuffDefinition::new("shield"));
    }

    #[test]
    fn test_from_iterator() {
        let registry: BuffRegistry = [
            BuffDefinition::new("a"),
            BuffDefinition::new("b"),
        ]
        .into_iter()
        .collect();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.iter().count(), 2);
    }
}
