use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::model::Operation;
use crate::Language;

pub const ARTIFACT_STEM: &str = "transformed_code";

/// Language the transformed code is written in.
pub fn effective_language(operation: Operation, source: Language, target: Option<Language>) -> Language {
    match operation {
        Operation::Translate => target.unwrap_or(source),
        Operation::Fix => source,
    }
}

pub fn artifact_name(language: Language) -> String {
    format!("{}.{}", ARTIFACT_STEM, language.export_extension())
}

pub fn write_artifact(dir: &Path, language: Language, code: &str) -> Result<PathBuf, ExportError> {
    if code.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    let path = dir.join(artifact_name(language));
    std::fs::write(&path, code).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
