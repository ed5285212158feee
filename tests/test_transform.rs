use codemorph::config::EngineConfig;
use codemorph::model::{ChangeType, Operation, TestCase, TransformationRequest};
use codemorph::transform::{self, FIX_EXPLANATION};
use codemorph::Language;
use std::time::{Duration, Instant};

fn case(id: &str, input: &str, expected: &str) -> TestCase {
    TestCase {
        id: id.to_string(),
        input: input.to_string(),
        expected: expected.to_string(),
        description: None,
    }
}

fn fix_request(code: &str, cases: Vec<TestCase>) -> TransformationRequest {
    TransformationRequest {
        code: code.to_string(),
        source_language: Language::Python,
        target_language: None,
        operation: Operation::Fix,
        test_cases: cases,
    }
}

fn translate_request(code: &str, from: Language, to: Option<Language>) -> TransformationRequest {
    TransformationRequest {
        code: code.to_string(),
        source_language: from,
        target_language: to,
        operation: Operation::Translate,
        test_cases: vec![],
    }
}

// --- fix ---

#[test]
fn even_fix_produces_single_change() {
    let response = transform::transform_now(&fix_request("def is_even(n): return n % 2 != 0", vec![]));
    assert!(response.transformed_code.contains("n % 2 == 0"));
    assert_eq!(response.changes.len(), 1);
    assert_eq!(response.changes[0].kind, ChangeType::Modified);
    assert_eq!(response.changes[0].line, 1);
    assert!(response.changes[0].description.contains("even number logic"));
    assert_eq!(response.explanation, FIX_EXPLANATION);
}

#[test]
fn change_line_points_at_marker() {
    let code = "# even check\ndef is_even(n):\n    return n % 2 != 0";
    let response = transform::transform_now(&fix_request(code, vec![]));
    assert_eq!(response.changes[0].line, 3);
}

#[test]
fn factorial_and_range_fixes_stack() {
    let code = "def factorial(n):\n    for i in range(len(xs) + 1):\n        pass\n    return n + 1";
    let (fixed, changes) = transform::apply_fixes(code);
    assert_eq!(changes.len(), 2);
    assert!(fixed.contains("return n * factorial(n - 1)"));
    assert!(fixed.contains("range(len(xs))"));
    assert_eq!(changes[0].line, 4);
    assert_eq!(changes[1].line, 2);
}

#[test]
fn earlier_rule_output_disables_assignment_rule() {
    // rule a introduces `==`, so rule d no longer sees a bare `=`
    let code = "def is_even(n):\n    if n % 2 != 0: return False\n    return True";
    let (fixed, changes) = transform::apply_fixes(code);
    assert_eq!(changes.len(), 1);
    assert!(fixed.contains("if n % 2 == 0"));
}

#[test]
fn assignment_rule_reports_if_line() {
    let code = "x = 3\nif x = 5:\n    print(x)";
    let (fixed, changes) = transform::apply_fixes(code);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].line, 2);
    assert!(fixed.contains("if x == 5:"));
}

#[test]
fn fix_is_idempotent() {
    let first = transform::transform_now(&fix_request("def is_even(n): return n % 2 != 0", vec![]));
    let second = transform::transform_now(&fix_request(&first.transformed_code, vec![]));
    assert!(second.changes.is_empty());
    assert_eq!(second.transformed_code, first.transformed_code);
}

#[test]
fn clean_code_is_untouched() {
    let code = "def add(a, b):\n    return a + b";
    let response = transform::transform_now(&fix_request(code, vec![]));
    assert_eq!(response.transformed_code, code);
    assert!(response.changes.is_empty());
}

// --- translate ---

#[test]
fn python_to_javascript_add() {
    let request = translate_request("def add(a, b):\n    return a + b", Language::Python, Some(Language::JavaScript));
    let response = transform::transform_now(&request);
    assert!(response.transformed_code.contains("function add(a, b) {"));
    assert!(response.transformed_code.contains("return a + b;"));
    assert_eq!(response.changes.len(), 1);
    assert_eq!(response.changes[0].line, 1);
    assert_eq!(response.explanation, "Translated code from python to javascript.");
}

#[test]
fn javascript_to_python() {
    let request = translate_request(
        "function add(a, b) {\n  return a + b;\n}",
        Language::JavaScript,
        Some(Language::Python),
    );
    let response = transform::transform_now(&request);
    assert!(response.transformed_code.starts_with("def add(a, b):"));
    assert_eq!(response.changes[0].description, "Converted JavaScript function syntax to Python");
}

#[test]
fn unsupported_pair_is_unchanged() {
    let code = "def add(a, b):\n    return a + b";
    let response = transform::transform_now(&translate_request(code, Language::Python, Some(Language::Rust)));
    assert_eq!(response.transformed_code, code);
    assert!(response.changes.is_empty());
    assert_eq!(response.explanation, "Translated code from python to rust.");
}

#[test]
fn missing_target_is_unchanged() {
    let code = "def f(): pass";
    let response = transform::transform_now(&translate_request(code, Language::Python, None));
    assert_eq!(response.transformed_code, code);
    assert!(response.changes.is_empty());
}

// --- test execution ---

#[test]
fn end_to_end_even_fix_passes_both_cases() {
    let request = fix_request(
        "def is_even(n): return n % 2 != 0",
        vec![case("1", "2", "true"), case("2", "3", "false")],
    );
    let response = transform::transform_now(&request);
    assert_eq!(response.test_results.len(), 2);
    assert!(response.test_results.iter().all(|r| r.passed));
    assert!(response.all_passed());
}

#[test]
fn results_preserve_order_and_ids() {
    let request = fix_request(
        "def is_even(n): return n % 2 == 0",
        vec![case("b", "3", "false"), case("a", "2", "true"), case("c", "5", "true")],
    );
    let response = transform::transform_now(&request);
    let ids: Vec<&str> = response.test_results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
    assert_eq!(response.passed_count(), 2);
    assert!(!response.test_results[2].passed);
}

#[test]
fn expected_quotes_are_ignored() {
    let code = "def reverse_str(s): return s[::-1]";
    let response = transform::transform_now(&fix_request(code, vec![case("1", "\"abc\"", "\"cba\"")]));
    assert!(response.test_results[0].passed);
    assert_eq!(response.test_results[0].actual, "cba");
}

#[test]
fn missing_function_fails_without_aborting() {
    let request = fix_request("x = 1", vec![case("1", "2", "true"), case("2", "3", "false")]);
    let response = transform::transform_now(&request);
    assert_eq!(response.test_results.len(), 2);
    for r in &response.test_results {
        assert!(!r.passed);
        assert_eq!(r.actual, "undefined");
        assert_eq!(r.error.as_deref(), Some("Could not find function"));
    }
}

#[test]
fn description_defaults_and_execution_time_is_plausible() {
    let mut described = case("2", "2", "true");
    described.description = Some("even input".into());
    let mut blank = case("3", "2", "true");
    blank.description = Some(String::new());
    let request = fix_request("def is_even(n): pass", vec![case("1", "2", "true"), described, blank]);
    let response = transform::transform_now(&request);
    assert_eq!(response.test_results[0].description, "Test case");
    assert_eq!(response.test_results[1].description, "even input");
    assert_eq!(response.test_results[2].description, "Test case");
    for r in &response.test_results {
        let ms = r.execution_time.unwrap();
        assert!((10..60).contains(&ms));
    }
}

#[test]
fn translated_code_is_what_gets_executed() {
    let request = TransformationRequest {
        test_cases: vec![case("1", "[2, 3]", "5")],
        ..translate_request("def add(a, b):\n    return a + b", Language::Python, Some(Language::JavaScript))
    };
    let response = transform::transform_now(&request);
    assert!(response.test_results[0].passed);
}

#[test]
fn response_serializes_camel_case() {
    let response = transform::transform_now(&fix_request("def is_even(n): return n % 2 != 0", vec![case("1", "2", "true")]));
    let json = serde_json::to_value(&response).unwrap();
    assert!(json["transformedCode"].is_string());
    assert_eq!(json["changes"][0]["type"], "modified");
    assert_eq!(json["testResults"][0]["passed"], true);
    assert!(json["testResults"][0]["executionTime"].is_u64());
    assert!(json["testResults"][0].get("error").is_none());
}

// --- async entry point ---

#[tokio::test]
async fn transform_waits_for_configured_delay() {
    let config = EngineConfig::default().with_delay(Duration::from_millis(50));
    let start = Instant::now();
    let response = transform::transform(fix_request("def is_even(n): return n % 2 != 0", vec![]), &config).await;
    assert!(start.elapsed() >= Duration::from_millis(50));
    assert_eq!(response.changes.len(), 1);
}

#[tokio::test]
async fn transform_can_be_cancelled() {
    let config = EngineConfig::default().with_delay(Duration::from_secs(30));
    let pending = transform::transform(fix_request("def f(): pass", vec![]), &config);
    let outcome = tokio::time::timeout(Duration::from_millis(20), pending).await;
    assert!(outcome.is_err());
}

#[tokio::test]
async fn immediate_config_has_no_delay() {
    let config = EngineConfig::immediate();
    assert!(config.delay.is_zero());
    let response = transform::transform(fix_request("def f(): pass", vec![]), &config).await;
    assert!(response.changes.is_empty());
}
