//! Error types for the feasibility calculator.

use std::path::PathBuf;
use thiserror::Error;

/// A project input that cannot be evaluated.
///
/// Always names the offending field so the caller can show the message
/// next to the matching form input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field was not supplied.
    #[error("missing required field '{field}'")]
    Missing { field: &'static str },

    /// A numeric field is outside its allowed range (or not finite).
    #[error("field '{field}' = {value} is out of range: {expected}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// An enumerated field holds an unrecognized tag.
    #[error("field '{field}' has unknown value '{value}' (expected one of: {expected})")]
    UnknownVariant {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A typology entry is invalid.
    #[error("typology #{index} ('{name}'): {source}")]
    Typology {
        index: usize,
        name: String,
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Field the error refers to, for field-level messages.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::OutOfRange { field, .. }
            | Self::UnknownVariant { field, .. } => field,
            Self::Typology { source, .. } => source.field(),
        }
    }
}

/// Errors that can occur when loading a project file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read the project file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid JSON or a value has the wrong type.
    #[error("invalid project file: {source}")]
    InvalidJson {
        #[from]
        source: serde_json::Error,
    },

    /// The project parameters failed validation.
    #[error("invalid project parameters: {source}")]
    Invalid {
        #[from]
        source: ValidationError,
    },
}

/// Errors that can occur when exporting data.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}
