//! # aim-report-core
//!
//! Core logic for turning a facilities-management work-order export into an
//! ordered inspection report.
//!
//! This crate provides:
//! - [`FieldExtractor`] - Floor/room extraction from free-text descriptions
//! - [`RankingEngine`] - Building → floor → room ordering
//! - [`business_days`] - Weekday aging of work orders
//! - [`ReportPipeline`] - One-pass enrichment and sort of a loaded batch
//!
//! Reading CSV input and rendering the workbook live in `aim-report-csv` and
//! `aim-report-xlsx`; this crate does no I/O.
//!
//! ## Example
//!
//! ```rust
//! use aim_report_core::{FieldExtractor, ReportConfig};
//!
//! let extractor = FieldExtractor::new(&ReportConfig::default().extractor).unwrap();
//! let location = extractor.extract("Leak under sink, Room: 1104");
//!
//! assert_eq!(location.floor, "11");
//! assert_eq!(location.room, "1104");
//! ```

pub mod age;
pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod rank;
pub mod record;

pub use age::{business_days, checked_business_days, date_from_value, parse_date};
pub use config::{ExtractorConfig, RankingConfig, ReportConfig};
pub use error::{ReportError, Result};
pub use extract::{normalize_building, ExtractionRule, FieldExtractor, Location};
pub use pipeline::ReportPipeline;
pub use rank::{BuildingRank, FloorRank, RankingEngine, RoomRank, SortKey};
pub use record::{
    AgeDays, ColumnRoles, FieldValue, InputBatch, InspectionStatus, RawRecord, WorkOrderRecord,
    WorkOrderReport,
};

/// Output column holding the normalized building code
pub const COL_BUILDING: &str = "Building";

/// Output column holding the extracted floor
pub const COL_FLOOR: &str = "Floor";

/// Output column holding the extracted room
pub const COL_ROOM: &str = "Room";

/// Output column holding the business-day age
pub const COL_AGE: &str = "Age (Work Days)";

/// Output column holding the inspection status
pub const COL_INSPECTION_STATUS: &str = "Inspection Status";

/// Derived columns, in the order they lead the report
pub const DERIVED_COLUMNS: [&str; 5] = [
    COL_BUILDING,
    COL_FLOOR,
    COL_ROOM,
    COL_AGE,
    COL_INSPECTION_STATUS,
];
