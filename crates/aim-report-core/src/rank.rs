//! Building → floor → room ordering
//!
//! Each rank is an enum whose variant order is its tier order, so the derived
//! `Ord` gives the whole comparison. Keys are computed on demand while
//! sorting and never stored on a record.

use std::collections::BTreeSet;

use crate::config::RankingConfig;
use crate::record::WorkOrderRecord;

/// Position of a building in the preferred order
///
/// Preferred codes take `0..n`, blank takes `n`, anything else `n + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuildingRank(pub usize);

/// Floor ordering tier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FloorRank {
    /// No floor known
    Blank,
    /// Basement-style floor, ordered alphabetically
    BeforeNumbered(String),
    /// Numbered floor
    Numbered(u64),
    /// Special floor ranked above the numbered ones (sub-floor)
    AfterNumbered(String),
    /// Any other label, ordered alphabetically
    Other(String),
}

/// Room ordering tier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoomRank {
    /// No room known
    Blank,
    /// Room starting with digits: numeric prefix, then trailing letters
    Numbered { number: u64, suffix: String },
    /// Other labels, ordered alphabetically
    Named(String),
    /// Hallways, stairwells, elevators
    CommonArea(String),
}

/// Composite key, compared field by field
pub type SortKey = (BuildingRank, FloorRank, RoomRank);

/// Computes ranks and sorts records
#[derive(Debug, Clone)]
pub struct RankingEngine {
    building_order: Vec<String>,
    floors_before_numbered: BTreeSet<String>,
    floors_after_numbered: BTreeSet<String>,
    common_area_markers: Vec<String>,
}

impl RankingEngine {
    /// Create an engine from configuration
    pub fn new(config: &RankingConfig) -> Self {
        Self {
            building_order: upper_all(&config.building_order).collect(),
            floors_before_numbered: upper_all(&config.floors_before_numbered).collect(),
            floors_after_numbered: upper_all(&config.floors_after_numbered).collect(),
            common_area_markers: upper_all(&config.common_area_markers).collect(),
        }
    }

    /// Rank a building code
    pub fn building_rank(&self, building: &str) -> BuildingRank {
        let val = building.trim().to_uppercase();
        if let Some(idx) = self.building_order.iter().position(|b| *b == val) {
            return BuildingRank(idx);
        }
        if val.is_empty() {
            BuildingRank(self.building_order.len())
        } else {
            BuildingRank(self.building_order.len() + 1)
        }
    }

    /// Rank a floor label
    pub fn floor_rank(&self, floor: &str) -> FloorRank {
        let val = floor.trim().to_uppercase();
        if val.is_empty() {
            return FloorRank::Blank;
        }
        if self.floors_before_numbered.contains(&val) {
            return FloorRank::BeforeNumbered(val);
        }
        if self.floors_after_numbered.contains(&val) {
            return FloorRank::AfterNumbered(val);
        }
        if val.bytes().all(|b| b.is_ascii_digit()) {
            return FloorRank::Numbered(parse_saturating(&val));
        }
        FloorRank::Other(val)
    }

    /// Rank a room label
    pub fn room_rank(&self, room: &str) -> RoomRank {
        let val = room.trim().to_uppercase();
        if val.is_empty() {
            return RoomRank::Blank;
        }

        let digits_end = val
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(val.len());
        if digits_end > 0 {
            let rest = &val[digits_end..];
            let suffix_end = rest
                .find(|c: char| !c.is_ascii_uppercase())
                .unwrap_or(rest.len());
            return RoomRank::Numbered {
                number: parse_saturating(&val[..digits_end]),
                suffix: rest[..suffix_end].to_string(),
            };
        }

        if self.common_area_markers.iter().any(|m| val.contains(m.as_str())) {
            RoomRank::CommonArea(val)
        } else {
            RoomRank::Named(val)
        }
    }

    /// Full composite key of a record
    pub fn sort_key(&self, record: &WorkOrderRecord) -> SortKey {
        (
            self.building_rank(&record.building),
            self.floor_rank(&record.floor),
            self.room_rank(&record.room),
        )
    }

    /// Stable ascending sort; ties keep input order
    pub fn sort(&self, records: &mut [WorkOrderRecord]) {
        records.sort_by_cached_key(|r| self.sort_key(r));
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(&RankingConfig::default())
    }
}

fn upper_all(values: &[String]) -> impl Iterator<Item = String> + '_ {
    values.iter().map(|v| v.trim().to_uppercase())
}

fn parse_saturating(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}
