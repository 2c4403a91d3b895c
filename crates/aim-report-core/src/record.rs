//! Work-order record types

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::error::ReportError;
use crate::{COL_AGE, COL_BUILDING, COL_FLOOR, COL_INSPECTION_STATUS, COL_ROOM};

/// A single source or derived field value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Missing/blank value
    #[default]
    Empty,
    /// Free text
    Text(String),
    /// Numeric value
    Number(f64),
    /// Calendar date
    Date(NaiveDate),
}

impl FieldValue {
    /// Create a text value
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Borrow the text payload, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the numeric payload, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// `true` for [`FieldValue::Empty`] and whitespace-only text
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) | FieldValue::Date(_) => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

/// One source row: column name → value, in input column order
pub type RawRecord = IndexMap<String, FieldValue>;

/// Business-day age; `None` means "unavailable", never zero
pub type AgeDays = Option<i64>;

/// Inspection progress of a work order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InspectionStatus {
    /// Not yet inspected
    Pending,
    /// Inspected and signed off
    Complete,
    /// Inspected, work outstanding
    Incomplete,
    /// Needs a coordinator decision
    #[cfg_attr(feature = "serde", serde(rename = "Needs Review"))]
    NeedsReview,
}

impl InspectionStatus {
    /// Every status, in dropdown order
    pub const ALL: [InspectionStatus; 4] = [
        InspectionStatus::Pending,
        InspectionStatus::Complete,
        InspectionStatus::Incomplete,
        InspectionStatus::NeedsReview,
    ];

    /// Label shown in the workbook
    pub fn label(&self) -> &'static str {
        match self {
            InspectionStatus::Pending => "Pending",
            InspectionStatus::Complete => "Complete",
            InspectionStatus::Incomplete => "Incomplete",
            InspectionStatus::NeedsReview => "Needs Review",
        }
    }
}

impl fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InspectionStatus {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        InspectionStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ReportError::config(format!("unknown inspection status {s:?}")))
    }
}

/// Source columns already resolved by the loader
///
/// The core never guesses which column means what; anything the loader could
/// not find arrives as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    /// Free-text description column (required)
    pub description: Option<String>,
    /// Creation date column
    pub created: Option<String>,
    /// Last edit date column
    pub edited: Option<String>,
    /// Building/property column
    pub building: Option<String>,
}

impl ColumnRoles {
    /// Column whose dates drive aging: created, else edited
    pub fn age_source(&self) -> Option<&str> {
        self.created.as_deref().or(self.edited.as_deref())
    }

    /// Resolved date columns, in input role order
    pub fn date_columns(&self) -> impl Iterator<Item = &str> {
        [self.created.as_deref(), self.edited.as_deref()]
            .into_iter()
            .flatten()
    }
}

/// A loaded batch ready for [`crate::ReportPipeline::run`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputBatch {
    /// Source column names, in file order
    pub columns: Vec<String>,
    /// Resolved column roles
    pub roles: ColumnRoles,
    /// Source rows
    pub records: Vec<RawRecord>,
}

/// A source row enriched with derived location, age and status
#[derive(Debug, Clone, PartialEq)]
pub struct WorkOrderRecord {
    /// Original fields, in input order
    pub fields: RawRecord,
    /// Normalized building code, or empty
    pub building: String,
    /// Normalized floor label, or empty
    pub floor: String,
    /// Room token, or empty
    pub room: String,
    /// Business-day age
    pub age_days: AgeDays,
    /// Inspection status
    pub inspection_status: InspectionStatus,
}

impl WorkOrderRecord {
    /// Resolve a report column, preferring derived fields over originals
    pub fn value(&self, column: &str) -> FieldValue {
        match column {
            COL_BUILDING => FieldValue::text(&self.building),
            COL_FLOOR => FieldValue::text(&self.floor),
            COL_ROOM => FieldValue::text(&self.room),
            COL_AGE => self
                .age_days
                .map_or(FieldValue::Empty, |d| FieldValue::Number(d as f64)),
            COL_INSPECTION_STATUS => FieldValue::text(self.inspection_status.label()),
            _ => self.fields.get(column).cloned().unwrap_or_default(),
        }
    }
}

/// The sorted, enriched record set handed to a renderer
#[derive(Debug, Clone, PartialEq)]
pub struct WorkOrderReport {
    /// Output column plan (derived columns first)
    pub columns: Vec<String>,
    /// Records in report order
    pub records: Vec<WorkOrderRecord>,
    /// Statuses offered to the inspector, default first
    pub statuses: Vec<InspectionStatus>,
}

impl WorkOrderReport {
    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when the report has no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Zero-based position of `column` in the output plan
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Row count per configured status, in configured order
    pub fn status_counts(&self) -> Vec<(InspectionStatus, usize)> {
        self.statuses
            .iter()
            .map(|status| {
                let count = self
                    .records
                    .iter()
                    .filter(|r| r.inspection_status == *status)
                    .count();
                (*status, count)
            })
            .collect()
    }

    /// Mean of the available ages
    pub fn average_age(&self) -> Option<f64> {
        let ages: Vec<i64> = self.records.iter().filter_map(|r| r.age_days).collect();
        if ages.is_empty() {
            return None;
        }
        Some(ages.iter().sum::<i64>() as f64 / ages.len() as f64)
    }

    /// Median of the available ages
    pub fn median_age(&self) -> Option<f64> {
        let mut ages: Vec<i64> = self.records.iter().filter_map(|r| r.age_days).collect();
        if ages.is_empty() {
            return None;
        }
        ages.sort_unstable();
        let mid = ages.len() / 2;
        Some(if ages.len() % 2 == 0 {
            (ages[mid - 1] + ages[mid]) as f64 / 2.0
        } else {
            ages[mid] as f64
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(age: AgeDays, status: InspectionStatus) -> WorkOrderRecord {
        WorkOrderRecord {
            fields: RawRecord::new(),
            building: String::new(),
            floor: String::new(),
            room: String::new(),
            age_days: age,
            inspection_status: status,
        }
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Number(42.0).to_string(), "42");
        assert_eq!(FieldValue::Number(1.5).to_string(), "1.5");
        assert_eq!(FieldValue::Empty.to_string(), "");
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(FieldValue::Date(date).to_string(), "2024-03-09");
    }

    #[test]
    fn test_field_value_is_empty() {
        assert!(FieldValue::Empty.is_empty());
        assert!(FieldValue::text("   ").is_empty());
        assert!(!FieldValue::text("x").is_empty());
        assert!(!FieldValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(
            "needs review".parse::<InspectionStatus>().unwrap(),
            InspectionStatus::NeedsReview
        );
        assert!("done".parse::<InspectionStatus>().is_err());
    }

    #[test]
    fn test_age_source_prefers_created() {
        let roles = ColumnRoles {
            created: Some("Date Created".into()),
            edited: Some("Edit Date".into()),
            ..Default::default()
        };
        assert_eq!(roles.age_source(), Some("Date Created"));

        let roles = ColumnRoles {
            edited: Some("Edit Date".into()),
            ..Default::default()
        };
        assert_eq!(roles.age_source(), Some("Edit Date"));
    }

    #[test]
    fn test_value_prefers_derived_fields() {
        let mut rec = record(Some(3), InspectionStatus::Pending);
        rec.fields.insert("Floor".into(), FieldValue::text("raw"));
        rec.fields.insert("WO".into(), FieldValue::Number(17.0));
        rec.floor = "2".into();

        assert_eq!(rec.value(COL_FLOOR), FieldValue::text("2"));
        assert_eq!(rec.value(COL_AGE), FieldValue::Number(3.0));
        assert_eq!(rec.value("WO"), FieldValue::Number(17.0));
        assert_eq!(rec.value("missing"), FieldValue::Empty);
    }

    #[test]
    fn test_report_statistics() {
        let report = WorkOrderReport {
            columns: vec![],
            records: vec![
                record(Some(1), InspectionStatus::Pending),
                record(None, InspectionStatus::Pending),
                record(Some(4), InspectionStatus::Complete),
                record(Some(10), InspectionStatus::Pending),
            ],
            statuses: InspectionStatus::ALL.to_vec(),
        };

        assert_eq!(
            report.status_counts(),
            vec![
                (InspectionStatus::Pending, 3),
                (InspectionStatus::Complete, 1),
                (InspectionStatus::Incomplete, 0),
                (InspectionStatus::NeedsReview, 0),
            ]
        );
        assert_eq!(report.average_age(), Some(5.0));
        assert_eq!(report.median_age(), Some(4.0));
    }

    #[test]
    fn test_report_statistics_without_ages() {
        let report = WorkOrderReport {
            columns: vec![],
            records: vec![record(None, InspectionStatus::Pending)],
            statuses: InspectionStatus::ALL.to_vec(),
        };
        assert_eq!(report.average_age(), None);
        assert_eq!(report.median_age(), None);
    }
}
