use std::path::Path;

use crate::config::EngineConfig;
use crate::detect;
use crate::diff::{self, DiffMode};
use crate::error::ValidationError;
use crate::export;
use crate::model::{DiffLine, Operation, TransformationRequest, TransformationResponse};
use crate::output::Notice;
use crate::testcases::TestCaseList;
use crate::transform;
use crate::Language;

pub const ENGINE_FAILURE: &str = "Failed to transform code. Please try again.";

/// In-memory session state: the editor buffer, the selections and the last
/// transformation. Nothing is persisted.
#[derive(Debug, Clone)]
pub struct Workspace {
    original_code: String,
    pub source_language: Language,
    pub target_language: Language,
    pub operation: Operation,
    pub test_cases: TestCaseList,
    last: Option<TransformationResponse>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            original_code: String::new(),
            source_language: Language::Python,
            target_language: Language::JavaScript,
            operation: Operation::Fix,
            test_cases: TestCaseList::default(),
            last: None,
        }
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn original_code(&self) -> &str {
        &self.original_code
    }

    /// Replace the buffer and re-detect its language.
    pub fn set_code(&mut self, code: impl Into<String>) -> Option<Notice> {
        self.original_code = code.into();
        let detected = detect::detect(&self.original_code);
        if detected == self.source_language {
            return None;
        }
        self.source_language = detected;
        Some(Notice::info(format!("Auto-detected language: {detected}")))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.original_code.trim().is_empty() {
            return Err(ValidationError::EmptyCode);
        }
        if self.operation == Operation::Fix && self.test_cases.is_empty() {
            return Err(ValidationError::MissingTestCases);
        }
        Ok(())
    }

    /// Test cases are only sent when fixing.
    pub fn build_request(&self) -> TransformationRequest {
        let (target, cases) = match self.operation {
            Operation::Translate => (self.target_language, Vec::new()),
            Operation::Fix => (self.source_language, self.test_cases.as_slice().to_vec()),
        };
        TransformationRequest {
            code: self.original_code.clone(),
            source_language: self.source_language,
            target_language: Some(target),
            operation: self.operation,
            test_cases: cases,
        }
    }

    /// Validate, transform and store the response.
    ///
    /// Taking `&mut self` keeps a second run from starting while one is
    /// pending. The engine runs on its own task so a panic inside it is
    /// reported instead of tearing the session down.
    pub async fn run(&mut self, config: &EngineConfig) -> Notice {
        if let Err(e) = self.validate() {
            return Notice::error(e.to_string());
        }

        let request = self.build_request();
        let engine_config = config.clone();
        let task = tokio::spawn(async move { transform::transform(request, &engine_config).await });

        let response = match task.await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "transformation failed");
                return Notice::error(ENGINE_FAILURE);
            }
        };

        let total = response.test_results.len();
        let passed = response.passed_count();
        self.last = Some(response);

        if total == 0 {
            Notice::success("Code transformed successfully!")
        } else if passed == total {
            Notice::success(format!("All {total} test cases passed!"))
        } else {
            Notice::warning(format!("{passed}/{total} test cases passed"))
        }
    }

    pub fn last_response(&self) -> Option<&TransformationResponse> {
        self.last.as_ref()
    }

    pub fn transformed_code(&self) -> Option<&str> {
        self.last.as_ref().map(|r| r.transformed_code.as_str())
    }

    pub fn output_language(&self) -> Language {
        export::effective_language(self.operation, self.source_language, Some(self.target_language))
    }

    /// Original vs transformed. Empty until a run has completed.
    pub fn diff(&self, mode: DiffMode) -> Vec<DiffLine> {
        match self.transformed_code() {
            Some(code) => diff::diff_with_mode(&self.original_code, code, mode),
            None => Vec::new(),
        }
    }

    pub fn export(&self, dir: &Path) -> Notice {
        let code = self.transformed_code().unwrap_or_default();
        match export::write_artifact(dir, self.output_language(), code) {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "exported transformed code");
                Notice::success("Code exported successfully!")
            }
            Err(e) => Notice::error(e.to_string()),
        }
    }
}
