//! Floor/room extraction from work-order descriptions
//!
//! Extraction is a priority list of regex rules per field; the first rule that
//! matches wins. Explicit markers (`Room: 204`) are listed before implicit
//! patterns (a bare `1204`), so explicit always beats implicit.
//!
//! ## Example
//!
//! ```rust
//! use aim_report_core::{ExtractorConfig, FieldExtractor};
//!
//! let extractor = FieldExtractor::new(&ExtractorConfig::default()).unwrap();
//!
//! let location = extractor.extract("Floor: 2 Room: 204 ceiling tile");
//! assert_eq!((location.floor.as_str(), location.room.as_str()), ("2", "204"));
//!
//! // No explicit floor: derived from the room number
//! let location = extractor.extract("Rm: 1204A outlet dead");
//! assert_eq!(location.floor, "12");
//! ```

use std::collections::{BTreeMap, BTreeSet};

use regex::{Regex, RegexBuilder};

use crate::config::{ExtractorConfig, ReportConfig};
use crate::error::{ReportError, Result};
use crate::record::FieldValue;

/// Floor/room labels derived from one description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Normalized floor label, or empty
    pub floor: String,
    /// Room token, or empty
    pub room: String,
}

impl Location {
    /// Create a location from its parts
    pub fn new(floor: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            floor: floor.into(),
            room: room.into(),
        }
    }

    /// `true` when neither floor nor room was found
    pub fn is_empty(&self) -> bool {
        self.floor.is_empty() && self.room.is_empty()
    }
}

/// One entry of an extraction rule table
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    /// Rule name, used in logs and errors
    pub name: String,
    /// Case-insensitive pattern
    pub pattern: Regex,
    /// Capture group holding the value
    pub group: usize,
}

impl ExtractionRule {
    /// Compile a case-insensitive rule
    pub fn new(name: impl Into<String>, pattern: &str, group: usize) -> Result<Self> {
        let name = name.into();
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| ReportError::InvalidPattern {
                name: name.clone(),
                source,
            })?;
        Ok(Self {
            name,
            pattern,
            group,
        })
    }

    /// Captured value of the first match, if any
    pub fn apply<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(self.group))
            .map(|m| m.as_str())
    }
}

/// Description → [`Location`] extractor
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    floor_rules: Vec<ExtractionRule>,
    room_rules: Vec<ExtractionRule>,
    floor_aliases: BTreeMap<String, String>,
    high_rise_prefixes: BTreeSet<String>,
}

impl FieldExtractor {
    /// Build the rule tables from configuration
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let mut floor_rules = vec![ExtractionRule::new(
            "floor_marker",
            &marker_pattern(&config.floor_markers),
            1,
        )?];
        if !config.special_floor_words.is_empty() {
            floor_rules.push(ExtractionRule::new(
                "special_floor_word",
                &format!(r"\b({})\b", alternation(&config.special_floor_words)),
                1,
            )?);
        }

        let room_rules = vec![
            ExtractionRule::new("room_marker", &marker_pattern(&config.room_markers), 1)?,
            ExtractionRule::new("bare_room_number", r"\b(\d{3,4}[a-z]?)\b", 1)?,
        ];

        Ok(Self {
            floor_rules,
            room_rules,
            floor_aliases: config
                .floor_aliases
                .iter()
                .map(|(k, v)| (k.to_uppercase(), v.clone()))
                .collect(),
            high_rise_prefixes: config.high_rise_prefixes.iter().cloned().collect(),
        })
    }

    /// Floor rules, in priority order
    pub fn floor_rules(&self) -> &[ExtractionRule] {
        &self.floor_rules
    }

    /// Room rules, in priority order
    pub fn room_rules(&self) -> &[ExtractionRule] {
        &self.room_rules
    }

    /// Extract floor and room from a description
    pub fn extract(&self, description: &str) -> Location {
        let desc = description.trim();
        if desc.is_empty() {
            return Location::default();
        }

        let mut floor = first_match(&self.floor_rules, desc).unwrap_or_default();
        let room = first_match(&self.room_rules, desc).unwrap_or_default();

        if floor.is_empty() && !room.is_empty() {
            floor = self.floor_from_room(&room);
        }

        Location {
            floor: self.normalize_floor(floor),
            room,
        }
    }

    /// Extract from a raw field; missing or non-text values yield an empty location
    pub fn extract_value(&self, description: Option<&FieldValue>) -> Location {
        match description {
            Some(FieldValue::Text(text)) => self.extract(text),
            _ => Location::default(),
        }
    }

    /// Fallback floor derived from the leading digits of a room token
    fn floor_from_room(&self, room: &str) -> String {
        let bytes = room.as_bytes();
        if bytes.len() >= 2 && bytes[0].is_ascii_digit() && bytes[1].is_ascii_digit() {
            let prefix = &room[..2];
            if self.high_rise_prefixes.contains(prefix) {
                return prefix.to_string();
            }
        }
        match bytes.first() {
            Some(b) if b.is_ascii_digit() => (*b as char).to_string(),
            _ => String::new(),
        }
    }

    fn normalize_floor(&self, floor: String) -> String {
        match self.floor_aliases.get(&floor.to_uppercase()) {
            Some(canonical) => canonical.clone(),
            None => floor,
        }
    }
}

/// Normalize a building field to its canonical short code
pub fn normalize_building(value: Option<&FieldValue>, config: &ReportConfig) -> String {
    let raw = match value {
        None | Some(FieldValue::Empty) => return String::new(),
        Some(v) => v.to_string().trim().to_uppercase(),
    };
    config.building_aliases.get(&raw).cloned().unwrap_or(raw)
}

fn first_match(rules: &[ExtractionRule], text: &str) -> Option<String> {
    rules.iter().find_map(|rule| {
        let value = rule.apply(text)?;
        tracing::trace!(rule = %rule.name, value, "extraction rule matched");
        Some(value.to_string())
    })
}

fn alternation(words: &[String]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w.trim()))
        .collect::<Vec<_>>()
        .join("|")
}

fn marker_pattern(markers: &[String]) -> String {
    // no leading word boundary: "Restroom:" and "Subfloor:" carry a marker too
    format!(r"(?:{})\s*:\s*[-#]?\s*([a-z0-9]+)", alternation(markers))
}
