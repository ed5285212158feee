//! Content-based language detection.
//!
//! Languages are tried in [`Language::ALL`] order and the first one with any
//! matching pattern wins. Several languages share patterns (`function f(`
//! is both JavaScript and PHP), so the order decides. Identifier classes
//! are ASCII-only.

use regex::Regex;
use std::sync::LazyLock;

use crate::Language;

pub const DEFAULT_LANGUAGE: Language = Language::JavaScript;

struct LanguagePatterns {
    language: Language,
    patterns: Vec<Regex>,
}

fn compile(language: Language, sources: &[&str]) -> LanguagePatterns {
    LanguagePatterns {
        language,
        patterns: sources
            .iter()
            .map(|s| Regex::new(s).expect("invalid detector pattern"))
            .collect(),
    }
}

static TABLE: LazyLock<Vec<LanguagePatterns>> = LazyLock::new(|| {
    vec![
        compile(
            Language::Python,
            &[
                r"def\s+[[:word:]]+\s*\(",
                r"import\s+[[:word:]]+",
                r#"if\s+__name__\s*==\s*['"]__main__['"]"#,
                r"print\s*\(",
            ],
        ),
        compile(
            Language::JavaScript,
            &[
                r"function\s+[[:word:]]+\s*\(",
                r"const\s+[[:word:]]+\s*=",
                r"let\s+[[:word:]]+\s*=",
                r"var\s+[[:word:]]+\s*=",
                r"console\.log\s*\(",
            ],
        ),
        compile(
            Language::TypeScript,
            &[
                r"interface\s+[[:word:]]+",
                r"type\s+[[:word:]]+\s*=",
                r":\s*string",
                r":\s*number",
                r"export\s+interface",
            ],
        ),
        compile(
            Language::Java,
            &[
                r"public\s+class\s+[[:word:]]+",
                r"public\s+static\s+void\s+main",
                r"System\.out\.println",
                r"import\s+java\.",
            ],
        ),
        compile(
            Language::Cpp,
            &[
                r"#include\s*<[[:word:]]+>",
                r"using\s+namespace\s+std",
                r"cout\s*<<",
                r"cin\s*>>",
            ],
        ),
        compile(
            Language::CSharp,
            &[
                r"using\s+System",
                r"public\s+class\s+[[:word:]]+",
                r"Console\.WriteLine",
                r"namespace\s+[[:word:]]+",
            ],
        ),
        compile(
            Language::Go,
            &[
                r"package\s+main",
                r"func\s+main\s*\(\)",
                r"import\s*\(",
                r"fmt\.Println",
            ],
        ),
        compile(
            Language::Rust,
            &[
                r"fn\s+main\s*\(\)",
                r"let\s+mut\s+[[:word:]]+",
                r"println!\s*\(",
                r"use\s+std::",
            ],
        ),
        compile(
            Language::Php,
            &[r"<\?php", r"function\s+[[:word:]]+\s*\(", r"echo\s+", r"\$[[:word:]]+"],
        ),
        compile(
            Language::Ruby,
            &[r"def\s+[[:word:]]+", r"puts\s+", r"require\s+", r"class\s+[[:word:]]+"],
        ),
    ]
});

/// Classify `code`. Falls back to [`DEFAULT_LANGUAGE`] when nothing matches.
pub fn detect(code: &str) -> Language {
    TABLE
        .iter()
        .find(|entry| entry.patterns.iter().any(|p| p.is_match(code)))
        .map(|entry| entry.language)
        .unwrap_or(DEFAULT_LANGUAGE)
}
