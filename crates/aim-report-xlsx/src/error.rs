//! Rendering error types

use thiserror::Error;

/// Result type for rendering operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while writing the workbook
#[derive(Debug, Error)]
pub enum RenderError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook writer error
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Report does not fit on one worksheet
    #[error("Report too large for a worksheet: {rows} rows, {columns} columns")]
    SheetTooLarge { rows: usize, columns: usize },
}
