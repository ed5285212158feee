use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown language tag '{0}'. Supported: python, javascript, typescript, java, cpp, csharp, go, rust, php, ruby")]
pub struct UnknownLanguage(pub String);

/// Rejections raised before a transformation is attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter some code to transform")]
    EmptyCode,
    #[error("Please add at least one test case for bug fixing")]
    MissingTestCases,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of test cases")]
    NotAnArray,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No transformed code to export")]
    NothingToExport,
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// Failures inside a mock execution. Always folded into the execution result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecError {
    #[error("Cannot read properties of {0} (reading 'toString')")]
    NoValue(&'static str),
}
