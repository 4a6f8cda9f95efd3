//! ClipMap - announcement sequence to audio clip path resolver
//!
//! Resolves encoded announcement sequences (flight codes and similar) into
//! ordered lists of audio file paths, driven by a two-level XML-configured
//! mapping table.
//!
//! # Features
//!
//! - Regex-decomposed sequence grammar: up to four (letters, digits) segments
//! - Composite-key mapping store built once at startup, read-only afterwards
//! - Dash-entry probing for hyphenated wildcard-style codes
//! - Positional tertiary/quaternary overrides in dash mode
//!
//! # Example
//!
//! ```ignore
//! use clipmap::{MappingStore, SequenceResolver};
//!
//! // Load the clip config and its referenced mapping tables
//! let store = MappingStore::load("AudioClipConfig.xml", "mappings")?;
//!
//! // Create the resolver
//! let resolver = SequenceResolver::new(store);
//!
//! // Resolve a colon-separated request payload
//! let paths = resolver.resolve_request("WA1:AB12CD34");
//! ```

pub mod core;

// Re-export commonly used types
pub use core::{
    dash_key, parse_clip_config, parse_mapping_table, parse_sequence, ClipMapError, ConfigEntry,
    ConfigError, MapEntry, MappingStore, MappingTable, ParsedSequence, Result, SequenceResolver,
    StoreEntry,
};
