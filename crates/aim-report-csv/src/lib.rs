//! # aim-report-csv
//!
//! CSV loader for AiM `browse`/`fc_review` work-order exports.
//!
//! The loader owns everything the core refuses to guess: header cleanup,
//! which column holds the description or the dates, and light value typing.

mod columns;
mod error;
mod options;
mod reader;

pub use columns::{clean_header, discover_roles, find_column};
pub use error::{CsvError, CsvResult};
pub use options::CsvReadOptions;
pub use reader::CsvReader;
