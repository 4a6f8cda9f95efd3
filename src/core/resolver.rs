//! Sequence resolution algorithm
//!
//! Turns encoded announcement sequences into ordered lists of audio clip
//! paths.
//!
//! The resolution pipeline runs four stages per sequence:
//! 1. Dash probe: replace digit runs with hyphens and look the result up
//!    as a dash entry; on a hit, the first number is consumed by the dash
//!    entry's table
//! 2. Structural parse: decompose the sequence into up to four
//!    (letters, digits) segments
//! 3. Base lookup: find the store entry for `"{primary}_{secondary}"`
//! 4. Per-number resolution: resolve each remaining number against its
//!    table, with tertiary/quaternary overrides in dash mode

use crate::core::store::{MappingStore, StoreEntry};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

/// Sequence grammar: one mandatory letter run (optionally followed by
/// digits), then zero to three (letters, digits) pairs, anchored both ends
static SEQUENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z]+)(\d+)?(?:([A-Z]+)(\d+))?(?:([A-Z]+)(\d+))?(?:([A-Z]+)(\d+))?$")
        .expect("sequence grammar regex is valid")
});

/// Maximal run of digits, used for dash-key derivation and the dash-stage
/// first-number extraction
static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digit run regex is valid"));

/// Directory strings in the config carry this fixed prefix, which must not
/// appear in served paths. Stripped in the base/override stages only,
/// never from the dash-stage path.
const DIR_PREFIX_ARTIFACT: &str = "domestic\\";

/// Structured decomposition of one sequence string
///
/// Ephemeral: created and discarded within one resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSequence {
    /// First letter run (required)
    pub primary: String,
    /// Second letter run, empty if absent
    pub secondary: String,
    /// Third letter run, empty if absent
    pub tertiary: String,
    /// Fourth letter run, empty if absent
    pub quaternary: String,
    /// Digit runs present, in appearance order (up to 4)
    pub numbers: Vec<String>,
}

/// Parse a sequence string against the grammar
///
/// Returns `None` if the string does not match (a fifth segment,
/// lowercase letters, stray characters, empty input).
///
/// # Examples
/// ```
/// use clipmap::core::parse_sequence;
///
/// let parsed = parse_sequence("WA1BC2").unwrap();
/// assert_eq!(parsed.primary, "WA");
/// assert_eq!(parsed.secondary, "BC");
/// assert_eq!(parsed.numbers, vec!["1", "2"]);
///
/// assert!(parse_sequence("wa1").is_none());
/// ```
pub fn parse_sequence(sequence: &str) -> Option<ParsedSequence> {
    let caps = SEQUENCE_RE.captures(sequence)?;

    let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
    let numbers = [2, 4, 6, 8].iter().filter_map(|&i| group(i)).collect();

    Some(ParsedSequence {
        primary: group(1)?,
        secondary: group(3).unwrap_or_default(),
        tertiary: group(5).unwrap_or_default(),
        quaternary: group(7).unwrap_or_default(),
        numbers,
    })
}

/// Derive the dash key for a sequence
///
/// Every maximal digit run becomes a single hyphen, surrounding
/// whitespace is trimmed, and exactly one trailing hyphen is stripped.
///
/// # Examples
/// ```
/// use clipmap::core::dash_key;
///
/// assert_eq!(dash_key("AB12CD34"), "AB-CD");
/// assert_eq!(dash_key("WA1"), "WA");
/// assert_eq!(dash_key("AB-CD"), "AB-CD");
/// ```
pub fn dash_key(sequence: &str) -> String {
    let replaced = DIGIT_RUN_RE.replace_all(sequence, "-");
    let trimmed = replaced.trim();
    trimmed.strip_suffix('-').unwrap_or(trimmed).to_string()
}

/// Strip one occurrence of the directory prefix artifact
fn normalize_dir(dir: &str) -> String {
    dir.replacen(DIR_PREFIX_ARTIFACT, "", 1)
}

/// Join a base directory and a clip file name with a forward slash
///
/// Paths are served POSIX-style regardless of the separators inside the
/// configured directory string.
fn join_clip(dir: &str, value: &str) -> String {
    if dir.is_empty() {
        value.to_string()
    } else if dir.ends_with('/') {
        format!("{dir}{value}")
    } else {
        format!("{dir}/{value}")
    }
}

/// Resolves sequences against a preloaded mapping store
///
/// The resolver owns the store; construct it only after the store has been
/// fully built, so no resolution ever runs against partial state.
pub struct SequenceResolver {
    store: MappingStore,
}

impl SequenceResolver {
    pub fn new(store: MappingStore) -> Self {
        Self { store }
    }

    /// Get a reference to the underlying store
    pub fn store(&self) -> &MappingStore {
        &self.store
    }

    /// Resolve one sequence through the four-stage pipeline
    ///
    /// Individual failures degrade to "contribute nothing": a grammar
    /// mismatch or a missing base entry ends the sequence early but keeps
    /// whatever the dash stage already produced, and a per-number miss
    /// skips that position without aborting the rest.
    pub fn resolve_sequence(&self, sequence: &str) -> Vec<String> {
        let mut results = Vec::new();

        // Stage 1: dash probe
        let mut dash_used = false;
        if let Some(dash_entry) = self.store.lookup(&dash_key(sequence)) {
            dash_used = true;
            match DIGIT_RUN_RE.find(sequence) {
                Some(first_run) => {
                    let number = first_run.as_str();
                    match dash_entry.resolve(number) {
                        // Dash-stage dir is joined as-is, without the
                        // prefix strip applied below
                        Some(value) => results.push(join_clip(&dash_entry.dir, value)),
                        None => warn!("No dash mapping for key: {number}"),
                    }
                }
                None => warn!("Dash entry matched digit-free sequence: {sequence}"),
            }
        }

        // Stage 2: structural parse
        let Some(parsed) = parse_sequence(sequence) else {
            warn!("Failed to parse sequence: {sequence}");
            return results;
        };

        // Stage 3: base lookup
        let base_key = format!("{}_{}", parsed.primary, parsed.secondary);
        let Some(base_entry) = self.store.lookup(&base_key) else {
            warn!("No entry for key: {base_key}");
            return results;
        };

        // Stage 4: per-number resolution. In dash mode the first number
        // was already consumed by the dash lookup, even when it is the
        // only one.
        let numbers = if dash_used {
            parsed.numbers.get(1..).unwrap_or(&[])
        } else {
            &parsed.numbers[..]
        };

        for (index, number) in numbers.iter().enumerate() {
            let target = if dash_used && index == 1 {
                let key = format!("{}_{}", parsed.primary, parsed.tertiary);
                self.lookup_override(&key)
            } else if dash_used && index == 2 {
                let key = format!("{}_{}", parsed.primary, parsed.quaternary);
                self.lookup_override(&key)
            } else {
                Some(base_entry)
            };

            let Some(entry) = target else {
                continue;
            };
            match entry.resolve(number) {
                Some(value) => {
                    results.push(join_clip(&normalize_dir(&entry.dir), value));
                }
                None => warn!("No mapping for number: {number} in {}", entry.dir),
            }
        }

        results
    }

    fn lookup_override(&self, key: &str) -> Option<&StoreEntry> {
        let entry = self.store.lookup(key);
        if entry.is_none() {
            warn!("No entry for override key: {key}");
        }
        entry
    }

    /// Resolve a batch of sequences, preserving input order
    ///
    /// Runs the pipeline independently per sequence; no state is carried
    /// across sequences and the batch as a whole never fails.
    pub fn resolve_all<S: AsRef<str>>(&self, sequences: &[S]) -> Vec<String> {
        sequences
            .iter()
            .flat_map(|s| self.resolve_sequence(s.as_ref()))
            .collect()
    }

    /// Resolution entry point: split a colon-separated payload and
    /// resolve each token
    pub fn resolve_request(&self, input: &str) -> Vec<String> {
        let sequences: Vec<&str> = input.split(':').collect();
        self.resolve_all(&sequences)
    }
}
