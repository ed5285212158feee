//! Rewrite rule tables for the fix and translate operations.
//! Each table is ordered and every rule is a plain textual rewrite.

use regex::Regex;
use std::sync::LazyLock;

use crate::Language;

pub struct FixRule {
    pub rule_name: &'static str,
    /// Checked against the buffer as left by the previous rule.
    pub applies: fn(&str) -> bool,
    pub rewrite: fn(&str) -> String,
    /// The change is reported on the first rewritten line containing this.
    pub marker: &'static str,
    pub description: &'static str,
}

pub static FIX_RULES: [FixRule; 4] = [
    FixRule {
        rule_name: "even_logic",
        applies: even_logic_applies,
        rewrite: even_logic_rewrite,
        marker: "n % 2",
        description: "Fixed even number logic: changed != to ==",
    },
    FixRule {
        rule_name: "factorial_recursion",
        applies: factorial_applies,
        rewrite: factorial_rewrite,
        marker: "return n",
        description: "Fixed factorial recursion: changed addition to multiplication",
    },
    FixRule {
        rule_name: "off_by_one_range",
        applies: off_by_one_applies,
        rewrite: off_by_one_rewrite,
        marker: "range",
        description: "Fixed off-by-one error in range",
    },
    FixRule {
        rule_name: "assignment_in_conditional",
        applies: assignment_applies,
        rewrite: assignment_rewrite,
        marker: "if",
        description: "Fixed assignment in conditional: changed = to ==",
    },
];

static RANGE_PLUS_ONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"range\(len\(([^)]+)\)\s*\+\s*1\)").expect("invalid range pattern")
});

static IF_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"if\s+([^=\s]+)\s*=\s*([^=][^;{]*)").expect("invalid conditional pattern")
});

fn even_logic_applies(code: &str) -> bool {
    code.contains("n % 2 != 0") && code.to_lowercase().contains("even")
}

fn even_logic_rewrite(code: &str) -> String {
    code.replacen("n % 2 != 0", "n % 2 == 0", 1)
}

fn factorial_applies(code: &str) -> bool {
    code.contains("return n + 1") && code.to_lowercase().contains("factorial")
}

fn factorial_rewrite(code: &str) -> String {
    code.replacen("return n + 1", "return n * factorial(n - 1)", 1)
}

fn off_by_one_applies(code: &str) -> bool {
    RANGE_PLUS_ONE.is_match(code)
}

fn off_by_one_rewrite(code: &str) -> String {
    RANGE_PLUS_ONE.replace_all(code, "range(len(${1}))").into_owned()
}

// Literal textual test: any `==` anywhere disables the rule, and the `if`
// may be part of a longer word.
fn assignment_applies(code: &str) -> bool {
    code.contains('=') && !code.contains("==") && code.contains("if") && IF_ASSIGNMENT.is_match(code)
}

fn assignment_rewrite(code: &str) -> String {
    IF_ASSIGNMENT.replacen(code, 1, "if ${1} == ${2}").into_owned()
}

pub struct Substitution {
    pub pattern: Regex,
    pub replacement: &'static str,
}

pub struct Translation {
    pub from: Language,
    pub to: Language,
    pub description: &'static str,
    pub steps: Vec<Substitution>,
}

impl Translation {
    pub fn apply(&self, code: &str) -> String {
        self.steps.iter().fold(code.to_string(), |acc, step| {
            step.pattern.replace_all(&acc, step.replacement).into_owned()
        })
    }
}

fn steps(table: &[(&str, &'static str)]) -> Vec<Substitution> {
    table
        .iter()
        .map(|&(pattern, replacement)| Substitution {
            pattern: Regex::new(pattern).expect("invalid translation pattern"),
            replacement,
        })
        .collect()
}

pub static TRANSLATIONS: LazyLock<Vec<Translation>> = LazyLock::new(|| {
    vec![
        Translation {
            from: Language::Python,
            to: Language::JavaScript,
            description: "Converted Python function syntax to JavaScript",
            steps: steps(&[
                (r"def\s+([[:word:]]+)\s*\((.*?)\):\s*", "function ${1}(${2}) {\n"),
                // closes the function body after its return
                (r"(\s+)return\s+(.+)", "${1}return ${2};\n}"),
                (r"(?-u:\b)True(?-u:\b)", "true"),
                (r"(?-u:\b)False(?-u:\b)", "false"),
                (r"(?-u:\b)None(?-u:\b)", "null"),
                (r"#\s*", "// "),
                (r"\}\s*\}", "}"),
            ]),
        },
        Translation {
            from: Language::JavaScript,
            to: Language::Python,
            description: "Converted JavaScript function syntax to Python",
            steps: steps(&[
                (r"function\s+([[:word:]]+)\s*\((.*?)\)\s*\{", "def ${1}(${2}):"),
                (r"return\s+([^;]+);?\s*\}", "    return ${1}"),
                (r"(?-u:\b)true(?-u:\b)", "True"),
                (r"(?-u:\b)false(?-u:\b)", "False"),
                (r"(?-u:\b)null(?-u:\b)", "None"),
                (r"//\s*", "# "),
                (r";", ""),
                (r"\}", ""),
            ]),
        },
    ]
});

/// The substitution chain for a directed pair, if one exists.
pub fn translation_for(from: Language, to: Language) -> Option<&'static Translation> {
    TRANSLATIONS.iter().find(|t| t.from == from && t.to == to)
}
