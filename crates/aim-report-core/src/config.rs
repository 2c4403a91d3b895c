//! Report configuration
//!
//! Every rule set the extractor and ranking engine consult lives here rather
//! than in module-level constants, so callers (and tests) can swap building
//! orders, status lists or extraction vocabularies without touching code.
//!
//! ## Example
//!
//! ```rust
//! use aim_report_core::ReportConfig;
//!
//! let mut config = ReportConfig::default();
//! config.ranking.building_order = vec!["NORTH".into(), "SOUTH".into()];
//! assert!(config.validate().is_ok());
//! ```

use std::collections::BTreeMap;

use crate::error::{ReportError, Result};
use crate::record::InspectionStatus;

/// Top-level configuration handed to [`crate::ReportPipeline`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReportConfig {
    /// Floor/room extraction vocabulary
    pub extractor: ExtractorConfig,
    /// Sort order rules
    pub ranking: RankingConfig,
    /// Raw building spelling (upper-cased) → canonical code
    pub building_aliases: BTreeMap<String, String>,
    /// Allowed inspection statuses; the first one is the default
    pub inspection_statuses: Vec<InspectionStatus>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            extractor: ExtractorConfig::default(),
            ranking: RankingConfig::default(),
            building_aliases: pairs(&[("E.T.B", "ETB"), ("W.E.B", "WEB"), ("H.E.B", "HEB")]),
            inspection_statuses: InspectionStatus::ALL.to_vec(),
        }
    }
}

impl ReportConfig {
    /// Status assigned to every freshly created record
    pub fn default_status(&self) -> InspectionStatus {
        self.inspection_statuses
            .first()
            .copied()
            .unwrap_or(InspectionStatus::Pending)
    }

    /// Reject configurations the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.inspection_statuses.is_empty() {
            return Err(ReportError::config("inspection_statuses must not be empty"));
        }
        if self.extractor.floor_markers.iter().any(|m| m.trim().is_empty())
            || self.extractor.room_markers.iter().any(|m| m.trim().is_empty())
        {
            return Err(ReportError::config("extraction markers must not be blank"));
        }
        if let Some(prefix) = self
            .extractor
            .high_rise_prefixes
            .iter()
            .find(|p| p.len() != 2 || !p.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(ReportError::config(format!(
                "high-rise prefix {prefix:?} must be exactly two digits"
            )));
        }
        if self.ranking.building_order.iter().any(|b| b.trim().is_empty()) {
            return Err(ReportError::config(
                "building_order lists codes only; blank buildings are ranked automatically",
            ));
        }
        Ok(())
    }
}

/// Vocabulary used by [`crate::FieldExtractor`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExtractorConfig {
    /// Words that introduce an explicit floor (`Floor:`, `Lvl:` ...)
    pub floor_markers: Vec<String>,
    /// Words that introduce an explicit room (`Room:`, `Rm:`)
    pub room_markers: Vec<String>,
    /// Standalone words that name a floor on their own
    pub special_floor_words: Vec<String>,
    /// Upper-cased floor token → canonical floor label
    pub floor_aliases: BTreeMap<String, String>,
    /// Two-digit room prefixes that denote a two-digit floor
    pub high_rise_prefixes: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            floor_markers: strings(&["floor", "flr", "level", "lvl"]),
            room_markers: strings(&["room", "rm"]),
            special_floor_words: strings(&["LL", "SF", "Basement"]),
            floor_aliases: pairs(&[
                ("0", "B"),
                ("B", "B"),
                ("BASEMENT", "B"),
                ("LL", "LL"),
                ("SF", "SF"),
            ]),
            high_rise_prefixes: strings(&["10", "11", "12"]),
        }
    }
}

/// Ordering rules used by [`crate::RankingEngine`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RankingConfig {
    /// Preferred building codes, first sorts first
    pub building_order: Vec<String>,
    /// Non-numeric floors placed before numbered floors
    pub floors_before_numbered: Vec<String>,
    /// Non-numeric floors placed after numbered floors
    pub floors_after_numbered: Vec<String>,
    /// Substrings marking shared spaces, ranked below every other room
    pub common_area_markers: Vec<String>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            building_order: strings(&["ETB", "WEB", "HEB"]),
            floors_before_numbered: strings(&["B", "LL"]),
            floors_after_numbered: strings(&["SF"]),
            common_area_markers: strings(&["HALL", "STAIR", "STR", "ELEV"]),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn pairs(values: &[(&str, &str)]) -> BTreeMap<String, String> {
    values
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ReportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_status(), InspectionStatus::Pending);
    }

    #[test]
    fn test_default_status_follows_first_entry() {
        let config = ReportConfig {
            inspection_statuses: vec![InspectionStatus::NeedsReview, InspectionStatus::Pending],
            ..Default::default()
        };
        assert_eq!(config.default_status(), InspectionStatus::NeedsReview);
    }

    #[test]
    fn test_empty_status_list_rejected() {
        let config = ReportConfig {
            inspection_statuses: vec![],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ReportError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_bad_high_rise_prefix_rejected() {
        let mut config = ReportConfig::default();
        config.extractor.high_rise_prefixes.push("1A".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_building_code_rejected() {
        let mut config = ReportConfig::default();
        config.ranking.building_order.push(String::new());
        assert!(config.validate().is_err());
    }
}
