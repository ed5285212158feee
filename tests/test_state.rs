use codemorph::config::EngineConfig;
use codemorph::diff::DiffMode;
use codemorph::error::ValidationError;
use codemorph::model::{DiffLineType, Operation, TestCase};
use codemorph::output::NoticeLevel;
use codemorph::state::Workspace;
use codemorph::Language;
use tempfile::TempDir;

const BUGGY_EVEN: &str = "def is_even(n):\n    return n % 2 != 0  # Bug: should be == 0";

fn even_cases() -> Vec<TestCase> {
    vec![
        TestCase::new("2", "true", Some("Even number should return true".into())),
        TestCase::new("3", "false", Some("Odd number should return false".into())),
    ]
}

fn fix_workspace() -> Workspace {
    let mut ws = Workspace::new();
    ws.set_code(BUGGY_EVEN);
    ws.test_cases.replace_all(even_cases());
    ws
}

// --- editing ---

#[test]
fn set_code_keeps_matching_language_silently() {
    let mut ws = Workspace::new();
    assert_eq!(ws.source_language, Language::Python);
    assert!(ws.set_code(BUGGY_EVEN).is_none());
}

#[test]
fn set_code_announces_detected_language() {
    let mut ws = Workspace::new();
    let notice = ws.set_code("function add(a, b) { return a + b; }").unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.message, "Auto-detected language: javascript");
    assert_eq!(ws.source_language, Language::JavaScript);
    assert!(ws.set_code("const x = 1").is_none());
}

// --- validation ---

#[test]
fn empty_code_is_rejected() {
    let mut ws = Workspace::new();
    ws.set_code("   \n");
    assert_eq!(ws.validate(), Err(ValidationError::EmptyCode));
}

#[test]
fn fix_without_tests_is_rejected() {
    let mut ws = Workspace::new();
    ws.set_code(BUGGY_EVEN);
    assert_eq!(ws.validate(), Err(ValidationError::MissingTestCases));
    assert_eq!(
        ValidationError::MissingTestCases.to_string(),
        "Please add at least one test case for bug fixing"
    );
}

#[test]
fn translate_without_tests_is_allowed() {
    let mut ws = Workspace::new();
    ws.set_code(BUGGY_EVEN);
    ws.operation = Operation::Translate;
    assert!(ws.validate().is_ok());
}

#[test]
fn request_targets_source_when_fixing() {
    let ws = fix_workspace();
    let request = ws.build_request();
    assert_eq!(request.target_language, Some(Language::Python));
    assert_eq!(request.test_cases.len(), 2);
}

#[test]
fn request_drops_tests_when_translating() {
    let mut ws = fix_workspace();
    ws.operation = Operation::Translate;
    let request = ws.build_request();
    assert_eq!(request.target_language, Some(Language::JavaScript));
    assert!(request.test_cases.is_empty());
}

// --- running ---

#[tokio::test]
async fn run_fix_reports_all_passed() {
    let mut ws = fix_workspace();
    let notice = ws.run(&EngineConfig::immediate()).await;
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "All 2 test cases passed!");
    assert!(ws.transformed_code().unwrap().contains("n % 2 == 0"));
}

#[tokio::test]
async fn run_reports_partial_passes_as_warning() {
    let mut ws = fix_workspace();
    ws.test_cases.push(TestCase::new("5", "true", None));
    let notice = ws.run(&EngineConfig::immediate()).await;
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(notice.message, "2/3 test cases passed");
}

#[tokio::test]
async fn run_translate_without_tests() {
    let mut ws = Workspace::new();
    ws.set_code("def add(a, b):\n    return a + b");
    ws.operation = Operation::Translate;
    let notice = ws.run(&EngineConfig::immediate()).await;
    assert_eq!(notice.message, "Code transformed successfully!");
    assert!(ws.transformed_code().unwrap().contains("function add(a, b) {"));
    assert_eq!(ws.output_language(), Language::JavaScript);
}

#[tokio::test]
async fn run_rejects_invalid_input_without_transforming() {
    let mut ws = Workspace::new();
    let notice = ws.run(&EngineConfig::immediate()).await;
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Please enter some code to transform");
    assert!(ws.last_response().is_none());
}

#[tokio::test]
async fn diff_after_run() {
    let mut ws = fix_workspace();
    assert!(ws.diff(DiffMode::Positional).is_empty());
    ws.run(&EngineConfig::immediate()).await;
    let lines = ws.diff(DiffMode::Positional);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].kind, DiffLineType::Unchanged);
    assert_eq!(lines[1].kind, DiffLineType::Modified);
}

// --- export ---

#[test]
fn export_without_result_is_an_error() {
    let dir = TempDir::new().unwrap();
    let notice = fix_workspace().export(dir.path());
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "No transformed code to export");
}

#[tokio::test]
async fn export_writes_source_extension_when_fixing() {
    let dir = TempDir::new().unwrap();
    let mut ws = fix_workspace();
    ws.run(&EngineConfig::immediate()).await;
    let notice = ws.export(dir.path());
    assert_eq!(notice.message, "Code exported successfully!");
    let written = std::fs::read_to_string(dir.path().join("transformed_code.py")).unwrap();
    assert_eq!(written, ws.transformed_code().unwrap());
}

#[tokio::test]
async fn export_uses_target_extension_when_translating() {
    let dir = TempDir::new().unwrap();
    let mut ws = Workspace::new();
    ws.set_code("def add(a, b):\n    return a + b");
    ws.operation = Operation::Translate;
    ws.run(&EngineConfig::immediate()).await;
    ws.export(dir.path());
    assert!(dir.path().join("transformed_code.js").exists());
}
