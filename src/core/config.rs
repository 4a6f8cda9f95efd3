//! Clip configuration loading
//!
//! Deserializes the two XML document shapes used by the announcement system.
//!
//! # Document Formats
//!
//! Top-level clip config:
//!
//! ```text
//! <AudioClipConfig>
//!     <Entry primary="WA" secondary="" dir="sounds\wa" mapping="wa.xml"/>
//!     <Entry primary="WA-BC" dir="sounds\dash" mapping="dash.xml"/>
//! </AudioClipConfig>
//! ```
//!
//! Mapping table (one per distinct `mapping` reference, resolved relative
//! to a mapping base directory):
//!
//! ```text
//! <AudioMappingTable>
//!     <Entry key="1" value="one.mp3"/>
//!     <Entry key="2" value="two.mp3"/>
//! </AudioMappingTable>
//! ```
//!
//! A document whose body holds a single `<Entry>` deserializes into a
//! one-element list; the typed model owns the single-record vs
//! list-of-records coercion.

use crate::core::error::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::Path;

/// One top-level configuration declaration
///
/// `secondary` is normalized to an empty string when the attribute is
/// absent, matching how composite keys are formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// Letter-code identifier, may contain hyphens (dash entries)
    pub primary: String,
    /// Optional second letter code, empty when absent
    pub secondary: String,
    /// Base directory for resolved audio files
    pub dir: String,
    /// Mapping table resource reference (file name under the mapping dir)
    pub mapping: String,
}

/// One (key, value) pair of a mapping table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    /// Numeric-string token matched against sequence numbers
    pub key: String,
    /// Audio file name the key resolves to
    pub value: String,
}

/// Ordered list of mapping pairs; lookup is first match wins
pub type MappingTable = Vec<MapEntry>;

#[derive(Debug, Deserialize)]
struct ClipConfigDoc {
    #[serde(rename = "Entry", default)]
    entries: Vec<ConfigEntryNode>,
}

#[derive(Debug, Deserialize)]
struct ConfigEntryNode {
    #[serde(rename = "@primary")]
    primary: String,
    #[serde(rename = "@secondary")]
    secondary: Option<String>,
    #[serde(rename = "@dir")]
    dir: String,
    #[serde(rename = "@mapping")]
    mapping: String,
}

#[derive(Debug, Deserialize)]
struct MappingTableDoc {
    #[serde(rename = "Entry", default)]
    entries: Vec<MapEntryNode>,
}

#[derive(Debug, Deserialize)]
struct MapEntryNode {
    #[serde(rename = "@key")]
    key: String,
    #[serde(rename = "@value")]
    value: String,
}

/// Parse an `AudioClipConfig` document from a string
pub fn parse_clip_config(xml: &str) -> ConfigResult<Vec<ConfigEntry>> {
    let doc: ClipConfigDoc = quick_xml::de::from_str(xml)?;
    Ok(doc
        .entries
        .into_iter()
        .map(|node| ConfigEntry {
            primary: node.primary,
            secondary: node.secondary.unwrap_or_default(),
            dir: node.dir,
            mapping: node.mapping,
        })
        .collect())
}

/// Parse an `AudioMappingTable` document from a string
pub fn parse_mapping_table(xml: &str) -> ConfigResult<MappingTable> {
    let doc: MappingTableDoc = quick_xml::de::from_str(xml)?;
    Ok(doc
        .entries
        .into_iter()
        .map(|node| MapEntry {
            key: node.key,
            value: node.value,
        })
        .collect())
}

/// Read and parse an `AudioClipConfig` document from a file
pub fn read_clip_config<P: AsRef<Path>>(path: P) -> ConfigResult<Vec<ConfigEntry>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let xml = std::fs::read_to_string(path)?;
    parse_clip_config(&xml).map_err(|e| with_path(e, path))
}

/// Read and parse an `AudioMappingTable` document from a file
pub fn read_mapping_table<P: AsRef<Path>>(path: P) -> ConfigResult<MappingTable> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path)?;
    parse_mapping_table(&xml).map_err(|e| with_path(e, path))
}

/// Attach file context to a bare document error
fn with_path(err: ConfigError, path: &Path) -> ConfigError {
    match err {
        ConfigError::InvalidDocument(source) => ConfigError::InvalidXml {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multiple_entries() {
        let xml = r#"
            <AudioClipConfig>
                <Entry primary="WA" secondary="BC" dir="sounds\wa" mapping="wa.xml"/>
                <Entry primary="XY" dir="sounds\xy" mapping="xy.xml"/>
            </AudioClipConfig>
        "#;
        let entries = parse_clip_config(xml).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].primary, "WA");
        assert_eq!(entries[0].secondary, "BC");
        assert_eq!(entries[0].dir, "sounds\\wa");
        assert_eq!(entries[0].mapping, "wa.xml");
    }

    #[test]
    fn test_single_entry_coerced_to_list() {
        let xml = r#"
            <AudioClipConfig>
                <Entry primary="WA" secondary="" dir="sounds" mapping="wa.xml"/>
            </AudioClipConfig>
        "#;
        let entries = parse_clip_config(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].primary, "WA");
    }

    #[test]
    fn test_missing_secondary_defaults_to_empty() {
        let xml = r#"
            <AudioClipConfig>
                <Entry primary="WA" dir="sounds" mapping="wa.xml"/>
            </AudioClipConfig>
        "#;
        let entries = parse_clip_config(xml).unwrap();
        assert_eq!(entries[0].secondary, "");
    }

    #[test]
    fn test_empty_config() {
        let entries = parse_clip_config("<AudioClipConfig></AudioClipConfig>").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_missing_required_attribute_fails() {
        let xml = r#"
            <AudioClipConfig>
                <Entry primary="WA" mapping="wa.xml"/>
            </AudioClipConfig>
        "#;
        assert!(parse_clip_config(xml).is_err());
    }

    #[test]
    fn test_malformed_xml_fails() {
        assert!(parse_clip_config("<AudioClipConfig><Entry").is_err());
    }

    #[test]
    fn test_parse_mapping_table() {
        let xml = r#"
            <AudioMappingTable>
                <Entry key="1" value="one.mp3"/>
                <Entry key="2" value="two.mp3"/>
            </AudioMappingTable>
        "#;
        let table = parse_mapping_table(xml).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].key, "1");
        assert_eq!(table[0].value, "one.mp3");
        assert_eq!(table[1].key, "2");
    }

    #[test]
    fn test_mapping_table_preserves_declaration_order() {
        let xml = r#"
            <AudioMappingTable>
                <Entry key="2" value="late.mp3"/>
                <Entry key="1" value="one.mp3"/>
                <Entry key="2" value="dup.mp3"/>
            </AudioMappingTable>
        "#;
        let table = parse_mapping_table(xml).unwrap();
        let keys: Vec<&str> = table.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["2", "1", "2"]);
    }

    #[test]
    fn test_read_clip_config_missing_file() {
        let err = read_clip_config("does/not/exist.xml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
