use serde_json::Value;
use std::path::Path;

use crate::error::ImportError;
use crate::execute::format_number;
use crate::model::TestCase;

pub fn generate_id() -> String {
    format!("{:016x}", fastrand::u64(..))
}

impl TestCase {
    pub fn new(input: impl Into<String>, expected: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: generate_id(),
            input: input.into(),
            expected: expected.into(),
            description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestCaseField {
    Input,
    Expected,
    Description,
}

/// Ordered test-case list. Order is display order only.
#[derive(Debug, Clone, Default)]
pub struct TestCaseList {
    cases: Vec<TestCase>,
}

impl TestCaseList {
    pub fn new(cases: Vec<TestCase>) -> Self {
        let mut list = Self::default();
        list.replace_all(cases);
        list
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.iter()
    }

    pub fn as_slice(&self) -> &[TestCase] {
        &self.cases
    }

    fn contains_id(&self, id: &str) -> bool {
        self.cases.iter().any(|tc| tc.id == id)
    }

    /// Append a case. An empty id, or one already present in the list, is replaced with a
    /// fresh one, so ids stay unique.
    pub fn push(&mut self, mut case: TestCase) {
        while case.id.is_empty() || self.contains_id(&case.id) {
            case.id = generate_id();
        }
        self.cases.push(case);
    }

    /// Append an empty case and return its id.
    pub fn add_blank(&mut self) -> String {
        self.push(TestCase::new("", "", Some(String::new())));
        self.cases.last().map(|tc| tc.id.clone()).unwrap_or_default()
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.cases.len();
        self.cases.retain(|tc| tc.id != id);
        self.cases.len() != before
    }

    pub fn update(&mut self, id: &str, field: TestCaseField, value: impl Into<String>) -> bool {
        let Some(tc) = self.cases.iter_mut().find(|tc| tc.id == id) else {
            return false;
        };
        let value = value.into();
        match field {
            TestCaseField::Input => tc.input = value,
            TestCaseField::Expected => tc.expected = value,
            TestCaseField::Description => tc.description = Some(value),
        }
        true
    }

    pub fn replace_all(&mut self, cases: Vec<TestCase>) {
        self.cases.clear();
        for case in cases {
            self.push(case);
        }
    }

    /// Replace the whole list from JSON. Malformed input is logged and the
    /// current list kept.
    pub fn import_json(&mut self, text: &str) -> bool {
        match import_json(text) {
            Ok(cases) => {
                tracing::debug!(count = cases.len(), "imported test cases");
                self.replace_all(cases);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring test case import");
                false
            }
        }
    }
}

/// Parse `[{ "input": .., "expected": .., "description"?: .. }, ..]`.
/// `input` and `expected` are kept as JSON text, so `2` stays `2` and
/// `"abc"` keeps its quotes. See [`json_text`] for the exact form.
pub fn import_json(text: &str) -> Result<Vec<TestCase>, ImportError> {
    let parsed: Value = serde_json::from_str(text)?;
    let Value::Array(items) = parsed else {
        return Err(ImportError::NotAnArray);
    };

    Ok(items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let field = |name: &str| item.get(name).map(json_text).unwrap_or_default();
            let description = item
                .get("description")
                .and_then(Value::as_str)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Test case {}", index + 1));
            TestCase::new(field("input"), field("expected"), Some(description))
        })
        .collect())
}

/// Compact JSON in script-stringify form: numbers print like script numbers
/// (`3.0` is `3`, `1e21` is `1e+21`) and object keys keep their order, with
/// array-index keys first in ascending order.
pub fn json_text(value: &Value) -> String {
    let mut out = String::new();
    write_json(value, &mut out);
    out
}

fn write_json(value: &Value, out: &mut String) {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) => out.push_str(&format_number(f)),
            None => out.push_str(&n.to_string()),
        },
        Value::String(s) => out.push_str(&Value::String(s.clone()).to_string()),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            // stable: non-index keys keep insertion order
            entries.sort_by_key(|(key, _)| array_index(key).map_or((1, 0), |i| (0, i)));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_json(item, out);
            }
            out.push('}');
        }
        Value::Null | Value::Bool(_) => out.push_str(&value.to_string()),
    }
}

/// Canonical decimal below 2^32 - 1, the keys scripts enumerate first.
fn array_index(key: &str) -> Option<u32> {
    let index: u32 = key.parse().ok()?;
    (index != u32::MAX && index.to_string() == key).then_some(index)
}

pub fn load_file(path: &Path) -> anyhow::Result<Vec<TestCase>> {
    use anyhow::Context;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&text).with_context(|| format!("invalid test cases in {}", path.display()))
}

/// `INPUT=EXPECTED`, split on the first `=`.
pub fn parse_case_arg(arg: &str) -> Result<TestCase, String> {
    match arg.split_once('=') {
        Some((input, expected)) => Ok(TestCase::new(input.trim(), expected.trim(), None)),
        None => Err(format!("expected INPUT=EXPECTED, got '{arg}'")),
    }
}
