pub mod draft;
pub mod project;

pub use crate::error::LoadError;
pub use draft::ProjectDraft;
pub use project::{load_project_file, parse_project, to_project_json};
