//! # aim-report-xlsx
//!
//! Renders a [`aim_report_core::WorkOrderReport`] as a styled workbook:
//! a "Work Orders" sheet with an inspection-status dropdown, stoplight and
//! age heatmap conditional formats, plus a "Dashboard" summary sheet.

pub mod error;
pub mod options;
pub mod writer;

mod styles;

pub use error::{RenderError, RenderResult};
pub use options::RenderOptions;
pub use writer::ReportWriter;
