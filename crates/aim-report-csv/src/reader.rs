//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use aim_report_core::{FieldValue, InputBatch, RawRecord};

use crate::columns::{clean_headers, discover_roles};
use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;

/// Work-order export reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into an input batch
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<InputBatch> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading work-order export");
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into an input batch
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<InputBatch> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(true)
            .flexible(options.flexible)
            .from_reader(reader);

        let raw_headers = csv_reader.byte_headers()?.clone();
        if raw_headers.is_empty() {
            return Err(CsvError::EmptyInput);
        }
        let headers: Vec<String> = raw_headers
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();
        let columns = clean_headers(headers.iter().map(String::as_str));
        let roles = discover_roles(&columns);
        tracing::debug!(?columns, ?roles, "resolved columns");

        let mut records = Vec::new();
        for result in csv_reader.byte_records() {
            let record = result?;
            if record.len() > columns.len() {
                tracing::debug!(
                    line = record.position().map(|p| p.line()),
                    extra = record.len() - columns.len(),
                    "ignoring fields beyond the header"
                );
            }

            let mut row = RawRecord::with_capacity(columns.len());
            for (idx, column) in columns.iter().enumerate() {
                let field = record
                    .get(idx)
                    .map(String::from_utf8_lossy)
                    .unwrap_or_default();
                let keep_text = roles.description.as_deref() == Some(column.as_str());
                let value = if options.auto_detect_types && !keep_text {
                    Self::detect_type(&field)
                } else if field.trim().is_empty() {
                    FieldValue::Empty
                } else {
                    FieldValue::text(field.into_owned())
                };
                row.insert(column.clone(), value);
            }
            records.push(row);
        }

        tracing::info!(rows = records.len(), columns = columns.len(), "loaded CSV");
        Ok(InputBatch {
            columns,
            roles,
            records,
        })
    }

    /// Detect the type of a field value
    fn detect_type(field: &str) -> FieldValue {
        let trimmed = field.trim();

        if trimmed.is_empty() {
            return FieldValue::Empty;
        }

        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => FieldValue::Number(n),
            _ => FieldValue::text(field),
        }
    }
}
