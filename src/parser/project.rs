use super::draft::ProjectDraft;
use crate::error::LoadError;
use crate::model::ProjectInputs;
use std::fs;
use std::path::Path;

/// Loads and validates a project file.
///
/// The file is a flat JSON object with one key per form field (see
/// [`ProjectDraft`]). Identification fields and the typology list may be
/// omitted; every other field is required.
///
/// # Arguments
///
/// * `path` - Path to the project JSON file
///
/// # Errors
///
/// Returns [`LoadError::FileRead`] if the file cannot be read.
/// Returns [`LoadError::InvalidJson`] if the JSON is malformed or a value has the wrong type.
/// Returns [`LoadError::Invalid`] if a field is missing or out of range.
///
/// # Example
///
/// ```no_run
/// use urbanistika::engine::evaluate;
/// use urbanistika::parser::load_project_file;
///
/// let inputs = load_project_file("project.json")?;
/// let result = evaluate(&inputs)?;
/// println!("{}: {}", inputs.info.name, result.status);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_project_file<P: AsRef<Path>>(path: P) -> Result<ProjectInputs, LoadError> {
    let path_ref = path.as_ref();
    let content = fs::read_to_string(path_ref).map_err(|source| LoadError::FileRead {
        path: path_ref.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path_ref.display(), bytes = content.len(), "read project file");
    parse_project(&content)
}

/// Parses and validates a project from JSON text.
pub fn parse_project(content: &str) -> Result<ProjectInputs, LoadError> {
    let draft: ProjectDraft = serde_json::from_str(content)?;
    Ok(draft.into_inputs()?)
}

/// Pretty JSON of `inputs` in project-file form.
pub fn to_project_json(inputs: &ProjectInputs) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ProjectDraft::from(inputs))
}
