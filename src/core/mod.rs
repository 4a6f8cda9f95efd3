//! Core sequence resolution functionality
//!
//! This module contains the clip configuration loader, the composite-key
//! mapping store, and the sequence resolution pipeline.

mod config;
mod error;
mod resolver;
mod store;

pub use config::{
    parse_clip_config, parse_mapping_table, read_clip_config, read_mapping_table, ConfigEntry,
    MapEntry, MappingTable,
};
pub use error::{ClipMapError, ConfigError, ConfigResult, Result};
pub use resolver::{dash_key, parse_sequence, ParsedSequence, SequenceResolver};
pub use store::{MappingStore, StoreEntry};
