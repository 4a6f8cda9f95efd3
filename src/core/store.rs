//! Composite-key index over preloaded mapping tables
//!
//! Built once at startup from the clip configuration, then read-only for
//! the life of the process.

use crate::core::config::{read_clip_config, read_mapping_table, ConfigEntry, MappingTable};
use crate::core::error::{ConfigError, ConfigResult};
use log::debug;
use std::collections::HashMap;
use std::path::Path;

/// Value stored per composite key - base directory plus its mapping table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    /// Base directory for audio files resolved through this entry
    pub dir: String,
    /// Ordered (key, value) pairs; first match wins
    pub mappings: MappingTable,
}

impl StoreEntry {
    /// Resolve a numeric-string token against the mapping table
    ///
    /// Exact string equality, declaration order, first match wins.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| m.key == key)
            .map(|m| m.value.as_str())
    }
}

/// Mapping store indexed by composite key
///
/// Composite keys have two forms per configuration entry:
///
/// 1. `"{primary}_{secondary-or-empty}"` - always inserted.
/// 2. `"{primary}"` alone - inserted additionally iff `primary` contains a
///    hyphen (the "dash entries").
///
/// Later declarations with the same composite key overwrite earlier ones;
/// the store holds at most one record per composite key.
#[derive(Debug)]
pub struct MappingStore {
    entries: HashMap<String, StoreEntry>,
}

impl MappingStore {
    /// Load the store from a clip config file
    ///
    /// Reads the top-level configuration and every referenced mapping
    /// table (resolved relative to `mapping_dir`), then builds the
    /// composite-key index. Fails if any resource is missing or
    /// unparseable; no partial store is ever returned.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        config_path: P,
        mapping_dir: Q,
    ) -> ConfigResult<Self> {
        let config_entries = read_clip_config(config_path.as_ref())?;
        let mapping_dir = mapping_dir.as_ref();

        let mut loaded = Vec::with_capacity(config_entries.len());
        for entry in config_entries {
            let mapping_path = mapping_dir.join(&entry.mapping);
            if !mapping_path.exists() {
                return Err(ConfigError::MappingNotFound {
                    path: mapping_path,
                    primary: entry.primary,
                });
            }
            let table = read_mapping_table(&mapping_path)?;
            loaded.push((entry, table));
        }

        Ok(Self::from_entries(loaded))
    }

    /// Build the store from already-loaded entries, no I/O
    ///
    /// Same indexing rules as [`MappingStore::load`]; used directly by
    /// tests and benchmarks.
    pub fn from_entries(entries: Vec<(ConfigEntry, MappingTable)>) -> Self {
        let mut index = HashMap::new();

        for (entry, table) in entries {
            let composite = format!("{}_{}", entry.primary, entry.secondary);
            debug!(
                "Loaded entry: primary={}, secondary={}, dir={}, mapping={} ({} pairs)",
                entry.primary,
                entry.secondary,
                entry.dir,
                entry.mapping,
                table.len()
            );

            if entry.primary.contains('-') {
                debug!("Registered dash entry: {}", entry.primary);
                index.insert(
                    entry.primary.clone(),
                    StoreEntry {
                        dir: entry.dir.clone(),
                        mappings: table.clone(),
                    },
                );
            }

            index.insert(
                composite,
                StoreEntry {
                    dir: entry.dir,
                    mappings: table,
                },
            );
        }

        Self { entries: index }
    }

    /// Build a store with an explicit index, bypassing the composite-key
    /// rules; lets resolution tests pin down store states the
    /// configuration rules cannot reach
    #[cfg(test)]
    pub(crate) fn from_index(entries: HashMap<String, StoreEntry>) -> Self {
        Self { entries }
    }

    /// Look up a composite key; pure read, no side effects
    pub fn lookup(&self, composite_key: &str) -> Option<&StoreEntry> {
        self.entries.get(composite_key)
    }

    /// Check if a composite key exists
    pub fn contains(&self, composite_key: &str) -> bool {
        self.entries.contains_key(composite_key)
    }

    /// All composite keys in the store
    pub fn composite_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Number of composite keys (dash entries counted separately)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no entries were loaded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MapEntry;

    fn entry(primary: &str, secondary: &str, dir: &str) -> ConfigEntry {
        ConfigEntry {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            dir: dir.to_string(),
            mapping: "unused.xml".to_string(),
        }
    }

    fn table(pairs: &[(&str, &str)]) -> MappingTable {
        pairs
            .iter()
            .map(|(k, v)| MapEntry {
                key: k.to_string(),
                value: v.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_composite_key_form() {
        let store = MappingStore::from_entries(vec![(
            entry("WA", "BC", "sounds/wa"),
            table(&[("1", "one.mp3")]),
        )]);

        assert!(store.contains("WA_BC"));
        assert!(!store.contains("WA"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_secondary_key_form() {
        let store =
            MappingStore::from_entries(vec![(entry("WA", "", "sounds/wa"), table(&[]))]);

        assert!(store.contains("WA_"));
        assert!(!store.contains("WA"));
    }

    #[test]
    fn test_hyphenated_primary_registers_dash_entry() {
        let store = MappingStore::from_entries(vec![(
            entry("WA-BC", "", "sounds/dash"),
            table(&[("12", "twelve.mp3")]),
        )]);

        // Both composite-key forms present
        assert!(store.contains("WA-BC_"));
        assert!(store.contains("WA-BC"));
        assert_eq!(store.len(), 2);

        // Both forms index the same record
        assert_eq!(store.lookup("WA-BC"), store.lookup("WA-BC_"));
    }

    #[test]
    fn test_last_write_wins() {
        let store = MappingStore::from_entries(vec![
            (entry("WA", "", "sounds/old"), table(&[("1", "old.mp3")])),
            (entry("WA", "", "sounds/new"), table(&[("1", "new.mp3")])),
        ]);

        assert_eq!(store.len(), 1);
        let e = store.lookup("WA_").unwrap();
        assert_eq!(e.dir, "sounds/new");
        assert_eq!(e.resolve("1"), Some("new.mp3"));
    }

    #[test]
    fn test_lookup_miss() {
        let store = MappingStore::from_entries(vec![]);
        assert!(store.lookup("ZZ_").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let e = StoreEntry {
            dir: "sounds".to_string(),
            mappings: table(&[("1", "first.mp3"), ("1", "second.mp3")]),
        };
        assert_eq!(e.resolve("1"), Some("first.mp3"));
        assert_eq!(e.resolve("2"), None);
    }

    #[test]
    fn test_resolve_is_exact_string_match() {
        let e = StoreEntry {
            dir: "sounds".to_string(),
            mappings: table(&[("01", "padded.mp3")]),
        };
        // "1" and "01" are different tokens
        assert_eq!(e.resolve("01"), Some("padded.mp3"));
        assert_eq!(e.resolve("1"), None);
    }
}
