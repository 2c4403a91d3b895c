//! Workbook writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use aim_report_core::{FieldValue, WorkOrderReport, COL_AGE, COL_INSPECTION_STATUS};
use rust_xlsxwriter::utility::column_number_to_name;
use rust_xlsxwriter::{
    Color, ConditionalFormat3ColorScale, ConditionalFormatFormula, ConditionalFormatType,
    DataValidation, Format, Workbook, Worksheet,
};

use crate::error::{RenderError, RenderResult};
use crate::options::{
    is_description_column, RenderOptions, MAX_CELL_CHARS, MAX_COLUMNS, MAX_ROWS,
};
use crate::styles::{fill, SheetStyles};

/// Renders a [`WorkOrderReport`] to XLSX
#[derive(Debug, Clone, Default)]
pub struct ReportWriter {
    options: RenderOptions,
}

impl ReportWriter {
    /// Create a writer with the given options
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options in use
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Write a report to a file path
    pub fn write_file<P: AsRef<Path>>(
        &self,
        report: &WorkOrderReport,
        path: P,
    ) -> RenderResult<()> {
        let file = File::create(path)?;
        self.write(report, file)
    }

    /// Write a report to a writer
    pub fn write<W: Write>(&self, report: &WorkOrderReport, mut writer: W) -> RenderResult<()> {
        let buffer = self.write_buffer(report)?;
        writer.write_all(&buffer)?;
        writer.flush()?;
        Ok(())
    }

    /// Render a report to an in-memory XLSX file
    pub fn write_buffer(&self, report: &WorkOrderReport) -> RenderResult<Vec<u8>> {
        let mut workbook = self.build(report)?;
        let buffer = workbook.save_to_buffer()?;
        tracing::info!(
            rows = report.len(),
            columns = report.columns.len(),
            bytes = buffer.len(),
            "workbook rendered"
        );
        Ok(buffer)
    }

    fn build(&self, report: &WorkOrderReport) -> RenderResult<Workbook> {
        if report.len() >= MAX_ROWS || report.columns.len() > MAX_COLUMNS {
            return Err(RenderError::SheetTooLarge {
                rows: report.len(),
                columns: report.columns.len(),
            });
        }

        let styles = SheetStyles::new(&self.options);
        let mut workbook = Workbook::new();
        workbook.push_worksheet(self.work_orders_sheet(report, &styles)?);
        if let Some(name) = &self.options.dashboard_sheet_name {
            workbook.push_worksheet(self.dashboard_sheet(name, report, &styles)?);
        }
        Ok(workbook)
    }

    fn work_orders_sheet(
        &self,
        report: &WorkOrderReport,
        styles: &SheetStyles,
    ) -> RenderResult<Worksheet> {
        let mut sheet = Worksheet::new();
        sheet.set_name(&self.options.sheet_name)?;

        let descriptive: Vec<bool> = report
            .columns
            .iter()
            .map(|c| is_description_column(c))
            .collect();

        for (idx, name) in report.columns.iter().enumerate() {
            let col = idx as u16;
            sheet.write_string_with_format(0, col, name, &styles.header)?;
            let width = if descriptive[idx] {
                self.options.description_width
            } else {
                self.options.column_width
            };
            sheet.set_column_width(col, width)?;
        }

        for (idx, record) in report.records.iter().enumerate() {
            let row = idx as u32 + 1;
            for (c, name) in report.columns.iter().enumerate() {
                let format = if descriptive[c] {
                    &styles.description
                } else {
                    &styles.body
                };
                write_value(&mut sheet, row, c as u16, &record.value(name), format)?;
            }
        }

        sheet.set_freeze_panes(1, 1)?;

        if report.is_empty() {
            tracing::warn!("report has no rows; skipping validation and conditional formats");
            return Ok(sheet);
        }

        let last_row = report.len() as u32;
        if let Some(col) = report.column_index(COL_INSPECTION_STATUS) {
            self.add_status_rules(&mut sheet, report, last_row, col as u16)?;
        }
        if let Some(col) = report.column_index(COL_AGE) {
            self.add_age_scale(&mut sheet, report, last_row, col as u16)?;
        }
        Ok(sheet)
    }

    /// Dropdown plus stoplight fill on the status column
    fn add_status_rules(
        &self,
        sheet: &mut Worksheet,
        report: &WorkOrderReport,
        last_row: u32,
        col: u16,
    ) -> RenderResult<()> {
        let labels: Vec<&str> = report.statuses.iter().map(|s| s.label()).collect();
        let validation = DataValidation::new()
            .allow_list_strings(&labels)?
            .set_input_message(self.options.status_prompt.as_str())?
            .set_error_message(self.options.status_error.as_str())?;
        sheet.add_data_validation(1, col, last_row, col, &validation)?;

        let letter = column_number_to_name(col);
        for (status, rgb) in &self.options.status_fills {
            let rule = ConditionalFormatFormula::new()
                .set_rule(format!("=${letter}2=\"{}\"", status.label()).as_str())
                .set_format(fill(*rgb));
            sheet.add_conditional_format(1, col, last_row, col, &rule)?;
        }
        Ok(())
    }

    /// Green → yellow → orange heatmap on the age column
    fn add_age_scale(
        &self,
        sheet: &mut Worksheet,
        report: &WorkOrderReport,
        last_row: u32,
        col: u16,
    ) -> RenderResult<()> {
        let midpoint = report.median_age().unwrap_or(0.0).max(1.0);
        let (low, mid, high) = self.options.age_scale;
        let scale = ConditionalFormat3ColorScale::new()
            .set_minimum(ConditionalFormatType::Number, 0)
            .set_minimum_color(Color::RGB(low))
            .set_midpoint(ConditionalFormatType::Number, midpoint)
            .set_midpoint_color(Color::RGB(mid))
            .set_maximum(ConditionalFormatType::Highest, 0)
            .set_maximum_color(Color::RGB(high));
        sheet.add_conditional_format(1, col, last_row, col, &scale)?;
        Ok(())
    }

    fn dashboard_sheet(
        &self,
        name: &str,
        report: &WorkOrderReport,
        styles: &SheetStyles,
    ) -> RenderResult<Worksheet> {
        let mut sheet = Worksheet::new();
        sheet.set_name(name)?;

        sheet.write_string_with_format(0, 0, "Status", &styles.dashboard_header)?;
        sheet.write_string_with_format(0, 1, "Count", &styles.dashboard_header)?;

        let mut row = 1u32;
        for (status, count) in report.status_counts() {
            sheet.write_string_with_format(row, 0, status.label(), &styles.dashboard_body)?;
            sheet.write_number_with_format(row, 1, count as f64, &styles.dashboard_body)?;
            row += 1;
        }

        let average = report.average_age().map_or(0.0, round2);
        sheet.write_string_with_format(row, 0, "Average Age (Work Days)", &styles.dashboard_body)?;
        sheet.write_number_with_format(row, 1, average, &styles.dashboard_body)?;

        sheet.set_column_width(0, self.options.dashboard_width)?;
        sheet.set_column_width(1, self.options.dashboard_width)?;
        Ok(sheet)
    }
}

fn write_value(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &FieldValue,
    format: &Format,
) -> RenderResult<()> {
    match value {
        FieldValue::Empty => {
            sheet.write_blank(row, col, format)?;
        }
        FieldValue::Number(n) if n.is_finite() => {
            sheet.write_number_with_format(row, col, *n, format)?;
        }
        FieldValue::Text(text) => {
            sheet.write_string_with_format(row, col, clip(text, row, col), format)?;
        }
        other => {
            sheet.write_string_with_format(row, col, other.to_string(), format)?;
        }
    }
    Ok(())
}

/// Cut text to the per-cell character limit
fn clip(text: &str, row: u32, col: u16) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => {
            tracing::warn!(row, col, "cell text truncated to {MAX_CELL_CHARS} characters");
            &text[..end]
        }
        None => text,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
