use console::Style;
use serde::Serialize;

use crate::diff::DiffSummary;
use crate::model::{DiffLine, DiffLineType, TestResult, TransformationResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
    Info,
}

/// A short transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }
}

pub fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => print_success(&notice.message),
        NoticeLevel::Warning => print_warning(&notice.message),
        NoticeLevel::Error => print_error(&notice.message),
        NoticeLevel::Info => print_info(&notice.message),
    }
}

pub fn print_error(msg: &str) {
    let style = Style::new().red().bold();
    eprintln!("{} {}", style.apply_to("✗"), msg);
}

pub fn print_success(msg: &str) {
    let style = Style::new().green().bold();
    println!("{} {}", style.apply_to("✓"), msg);
}

pub fn print_warning(msg: &str) {
    let style = Style::new().yellow().bold();
    println!("{} {}", style.apply_to("!"), msg);
}

pub fn print_info(msg: &str) {
    let style = Style::new().dim();
    eprintln!("{} {}", style.apply_to("·"), msg);
}

pub fn print_response(response: &TransformationResponse) {
    let title = Style::new().bold();
    println!("{}", title.apply_to("Transformed Code"));
    for line in response.transformed_code.split('\n') {
        println!("  {}", line);
    }
    println!();

    println!("{} {}", title.apply_to("Explanation:"), response.explanation);
    if !response.changes.is_empty() {
        let dim = Style::new().dim();
        for change in &response.changes {
            println!(
                "  {} {} {}",
                dim.apply_to(format!("L{}", change.line)),
                dim.apply_to(format!("[{:?}]", change.kind).to_lowercase()),
                change.description,
            );
        }
    }
}

pub fn print_test_results(results: &[TestResult]) {
    if results.is_empty() {
        return;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();
    let badge = if passed == total {
        Style::new().green().bold()
    } else {
        Style::new().red().bold()
    };

    println!();
    println!("Test Results {}", badge.apply_to(format!("{passed}/{total} Passed")));

    let dim = Style::new().dim();
    for r in results {
        let (mark, style) = if r.passed {
            ("✓", Style::new().green())
        } else {
            ("✗", Style::new().red())
        };
        let time = r
            .execution_time
            .map(|ms| format!(" {ms}ms"))
            .unwrap_or_default();
        println!("  {} {}{}", style.apply_to(mark), r.description, dim.apply_to(time));
        println!(
            "    {} {}  {} {}  {} {}",
            dim.apply_to("input:"),
            r.input,
            dim.apply_to("expected:"),
            r.expected,
            dim.apply_to("actual:"),
            r.actual,
        );
        if let Some(err) = &r.error {
            println!("    {} {}", Style::new().red().apply_to("error:"), err);
        }
    }
}

/// Side-by-side rendering. A side's rows with no text carry no line number.
pub fn print_diff(lines: &[DiffLine], summary: &DiffSummary) {
    let width = lines
        .iter()
        .map(|l| l.original.chars().count())
        .max()
        .unwrap_or(0)
        .max(8);
    let num_width = lines.len().to_string().len();

    let title = Style::new().bold();
    println!(
        "{}{}",
        title.apply_to(format!("{:<w$}", "Original", w = width + num_width + 3)),
        title.apply_to("Modified"),
    );

    for line in lines {
        let left_style = match line.kind {
            DiffLineType::Removed | DiffLineType::Modified => Style::new().red(),
            DiffLineType::Unchanged => Style::new(),
            DiffLineType::Added => Style::new().dim(),
        };
        let right_style = match line.kind {
            DiffLineType::Added | DiffLineType::Modified => Style::new().green(),
            DiffLineType::Unchanged => Style::new(),
            DiffLineType::Removed => Style::new().dim(),
        };
        println!(
            "{} {} {} {}",
            gutter(&line.original, line.line_number, num_width),
            left_style.apply_to(format!("{:<width$}", line.original)),
            gutter(&line.modified, line.line_number, num_width),
            right_style.apply_to(&line.modified),
        );
    }

    let dim = Style::new().dim();
    println!(
        "{}",
        dim.apply_to(format!(
            "{} unchanged, {} added, {} removed, {} modified",
            summary.unchanged, summary.added, summary.removed, summary.modified
        ))
    );
}

fn gutter(text: &str, line_number: usize, width: usize) -> String {
    let dim = Style::new().dim();
    if text.is_empty() {
        format!("{:>width$}", "")
    } else {
        dim.apply_to(format!("{line_number:>width$}")).to_string()
    }
}
