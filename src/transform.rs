use crate::config::EngineConfig;
use crate::execute;
use crate::model::{
    ChangeRecord, ChangeType, Operation, TestCase, TestResult, TransformationRequest,
    TransformationResponse,
};
use crate::rules::{self, FIX_RULES};

pub const FIX_EXPLANATION: &str = "Fixed logical errors in the code to make test cases pass.";
pub const DEFAULT_TEST_DESCRIPTION: &str = "Test case";

/// Transform after the configured delay. Dropping the future cancels the
/// request; nothing is observable until it completes.
pub async fn transform(request: TransformationRequest, config: &EngineConfig) -> TransformationResponse {
    if !config.delay.is_zero() {
        tokio::time::sleep(config.delay).await;
    }
    transform_now(&request)
}

/// Synchronous core of [`transform`]. Total over any request.
pub fn transform_now(request: &TransformationRequest) -> TransformationResponse {
    let (transformed_code, changes) = match request.operation {
        Operation::Fix => apply_fixes(&request.code),
        Operation::Translate => translate(request),
    };

    let test_results = request
        .test_cases
        .iter()
        .map(|tc| run_test_case(&transformed_code, tc))
        .collect();

    let explanation = match request.operation {
        Operation::Fix => FIX_EXPLANATION.to_string(),
        Operation::Translate => format!(
            "Translated code from {} to {}.",
            request.source_language,
            request
                .target_language
                .map(|l| l.as_str())
                .unwrap_or("unspecified"),
        ),
    };

    TransformationResponse {
        transformed_code,
        explanation,
        changes,
        test_results,
    }
}

/// Run every fix rule in order over a shared buffer.
pub fn apply_fixes(code: &str) -> (String, Vec<ChangeRecord>) {
    let mut buffer = code.to_string();
    let mut changes = Vec::new();

    for rule in &FIX_RULES {
        if !(rule.applies)(&buffer) {
            continue;
        }
        buffer = (rule.rewrite)(&buffer);
        let line = marker_line(&buffer, rule.marker);
        tracing::debug!(rule = rule.rule_name, line, "applied fix rule");
        changes.push(ChangeRecord {
            line,
            kind: ChangeType::Modified,
            description: rule.description.to_string(),
        });
    }

    (buffer, changes)
}

// 1-based line of the first occurrence; line 1 when absent.
fn marker_line(code: &str, marker: &str) -> usize {
    code.split('\n')
        .position(|l| l.contains(marker))
        .map_or(1, |i| i + 1)
}

fn translate(request: &TransformationRequest) -> (String, Vec<ChangeRecord>) {
    let translation = request
        .target_language
        .and_then(|to| rules::translation_for(request.source_language, to));

    match translation {
        Some(t) => {
            tracing::debug!(from = %t.from, to = %t.to, "translating");
            let change = ChangeRecord {
                line: 1,
                kind: ChangeType::Modified,
                description: t.description.to_string(),
            };
            (t.apply(&request.code), vec![change])
        }
        None => (request.code.clone(), Vec::new()),
    }
}

pub fn run_test_case(code: &str, tc: &TestCase) -> TestResult {
    let execution = execute::execute(code, &tc.input);
    let passed = execution.result == tc.expected.replace('"', "");

    TestResult {
        id: tc.id.clone(),
        description: tc
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_TEST_DESCRIPTION.to_string()),
        input: tc.input.clone(),
        expected: tc.expected.clone(),
        actual: execution.result,
        passed,
        error: execution.error,
        execution_time: Some(fastrand::u64(10..60)),
    }
}
