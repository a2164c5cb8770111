pub mod csv;
pub mod format;
pub mod json;
pub mod summary;

pub use crate::error::ExportError;
pub use csv::export_csv;
pub use json::export_json;
pub use summary::{render_text, report_rows, ReportRow};
