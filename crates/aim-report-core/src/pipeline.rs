//! Batch enrichment and ordering
//!
//! One loaded batch goes through a single pass (extraction → age → status
//! default), date columns are normalized, the output column plan is fixed and
//! the records are sorted once.

use chrono::NaiveDate;

use crate::age::{checked_business_days, date_from_value};
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::extract::{normalize_building, FieldExtractor};
use crate::rank::RankingEngine;
use crate::record::{FieldValue, InputBatch, RawRecord, WorkOrderRecord, WorkOrderReport};
use crate::DERIVED_COLUMNS;

/// Enriches and sorts work-order batches
#[derive(Debug, Clone)]
pub struct ReportPipeline {
    config: ReportConfig,
    extractor: FieldExtractor,
    ranking: RankingEngine,
}

impl ReportPipeline {
    /// Build a pipeline, compiling the extraction rules once
    pub fn new(config: ReportConfig) -> Result<Self> {
        config.validate()?;
        let extractor = FieldExtractor::new(&config.extractor)?;
        let ranking = RankingEngine::new(&config.ranking);
        Ok(Self {
            config,
            extractor,
            ranking,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Extractor in use
    pub fn extractor(&self) -> &FieldExtractor {
        &self.extractor
    }

    /// Ranking engine in use
    pub fn ranking(&self) -> &RankingEngine {
        &self.ranking
    }

    /// Turn a loaded batch into an ordered report, aging against `today`
    pub fn run(&self, batch: InputBatch, today: NaiveDate) -> Result<WorkOrderReport> {
        let InputBatch {
            columns,
            roles,
            records,
        } = batch;

        let description_col = roles
            .description
            .clone()
            .ok_or_else(|| ReportError::MissingRequiredField("Description".to_string()))?;
        let age_col = roles.age_source().map(str::to_string);
        let date_cols: Vec<String> = roles.date_columns().map(str::to_string).collect();

        let mut unavailable_ages = 0usize;
        let mut enriched: Vec<WorkOrderRecord> = Vec::with_capacity(records.len());
        for (idx, mut fields) in records.into_iter().enumerate() {
            let location = self.extractor.extract_value(fields.get(&description_col));
            let building = normalize_building(
                roles.building.as_ref().and_then(|c| fields.get(c)),
                &self.config,
            );

            let age_days = match &age_col {
                Some(col) => {
                    let start = self.start_date(&fields, col, idx);
                    let age = checked_business_days(start, today);
                    if age.is_none() {
                        unavailable_ages += 1;
                    }
                    age
                }
                None => None,
            };

            normalize_dates(&mut fields, &date_cols);

            enriched.push(WorkOrderRecord {
                fields,
                building,
                floor: location.floor,
                room: location.room,
                age_days,
                inspection_status: self.config.default_status(),
            });
        }

        let columns = plan_columns(&columns, &enriched);
        self.ranking.sort(&mut enriched);

        tracing::info!(
            rows = enriched.len(),
            columns = columns.len(),
            unavailable_ages,
            "work-order batch prepared"
        );

        Ok(WorkOrderReport {
            columns,
            records: enriched,
            statuses: self.config.inspection_statuses.clone(),
        })
    }

    fn start_date(&self, fields: &RawRecord, column: &str, row: usize) -> Option<NaiveDate> {
        let value = fields.get(column)?;
        match date_from_value(value) {
            Ok(date) => date,
            Err(err) => {
                tracing::debug!(row, column, error = %err, "age unavailable");
                None
            }
        }
    }
}

/// Rewrite resolved date columns as dates; unparseable values become blank
fn normalize_dates(fields: &mut RawRecord, date_cols: &[String]) {
    for col in date_cols {
        if let Some(value) = fields.get_mut(col) {
            *value = match date_from_value(value) {
                Ok(Some(date)) => FieldValue::Date(date),
                Ok(None) | Err(_) => FieldValue::Empty,
            };
        }
    }
}

/// Derived columns first, then every original column holding any value
fn plan_columns(source_columns: &[String], records: &[WorkOrderRecord]) -> Vec<String> {
    let mut columns: Vec<String> = DERIVED_COLUMNS.iter().map(|c| c.to_string()).collect();
    for col in source_columns {
        if columns.contains(col) {
            continue;
        }
        let has_value = records
            .iter()
            .any(|r| r.fields.get(col).is_some_and(|v| !v.is_empty()));
        if has_value {
            columns.push(col.clone());
        }
    }
    columns
}
