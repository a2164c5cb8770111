use super::summary::report_rows;
use crate::error::ExportError;
use crate::model::{EvaluationResult, ProjectInputs};
use std::fs::File;
use std::path::Path;

pub fn export_csv<P: AsRef<Path>>(
    inputs: &ProjectInputs,
    result: &EvaluationResult,
    path: P,
) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(["Section", "Metric", "Value"])?;

    for row in report_rows(inputs, result) {
        writer.write_record([row.section, row.metric, row.value.as_str()])?;
    }

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    tracing::debug!(path = %path_ref.display(), "exported CSV report");
    Ok(())
}
