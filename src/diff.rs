use serde::{Deserialize, Serialize};
use similar::{Algorithm, DiffOp};

use crate::model::{DiffLine, DiffLineType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    /// Row i of one side is compared with row i of the other.
    #[default]
    Positional,
    /// Longest-common-subsequence line alignment.
    Aligned,
}

impl std::str::FromStr for DiffMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positional" => Ok(DiffMode::Positional),
            "aligned" => Ok(DiffMode::Aligned),
            other => Err(format!("unknown diff mode '{other}'. Expected positional or aligned")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub unchanged: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

pub fn diff_with_mode(original: &str, modified: &str, mode: DiffMode) -> Vec<DiffLine> {
    match mode {
        DiffMode::Positional => diff(original, modified),
        DiffMode::Aligned => diff_aligned(original, modified),
    }
}

/// Positional line comparison.
///
/// The shorter side is padded with empty lines, so a padding row and a real
/// blank line are indistinguishable: both sides empty is `Unchanged`. An
/// inserted line shifts every following row to `Modified`.
pub fn diff(original: &str, modified: &str) -> Vec<DiffLine> {
    let original_lines: Vec<&str> = original.split('\n').collect();
    let modified_lines: Vec<&str> = modified.split('\n').collect();
    let max_lines = original_lines.len().max(modified_lines.len());

    (0..max_lines)
        .map(|i| {
            let left = original_lines.get(i).copied().unwrap_or("");
            let right = modified_lines.get(i).copied().unwrap_or("");
            DiffLine {
                line_number: i + 1,
                original: left.to_string(),
                modified: right.to_string(),
                kind: classify(left, right),
            }
        })
        .collect()
}

fn classify(left: &str, right: &str) -> DiffLineType {
    if left == right {
        DiffLineType::Unchanged
    } else if right.is_empty() {
        DiffLineType::Removed
    } else if left.is_empty() {
        DiffLineType::Added
    } else {
        DiffLineType::Modified
    }
}

/// Aligned line comparison. Deleted lines appear as `Removed` rows with an
/// empty right side, inserted lines as `Added` rows with an empty left side.
/// A deletion directly followed by an insertion is paired up into
/// `Modified` rows.
pub fn diff_aligned(original: &str, modified: &str) -> Vec<DiffLine> {
    let old: Vec<&str> = original.split('\n').collect();
    let new: Vec<&str> = modified.split('\n').collect();
    let ops = similar::capture_diff_slices(Algorithm::Myers, &old, &new);

    let mut rows: Vec<(String, String, DiffLineType)> = Vec::new();
    for op in ops {
        match op {
            DiffOp::Equal { old_index, len, .. } => {
                for line in &old[old_index..old_index + len] {
                    rows.push((line.to_string(), line.to_string(), DiffLineType::Unchanged));
                }
            }
            DiffOp::Delete { old_index, old_len, .. } => {
                for line in &old[old_index..old_index + old_len] {
                    rows.push((line.to_string(), String::new(), DiffLineType::Removed));
                }
            }
            DiffOp::Insert { new_index, new_len, .. } => {
                for line in &new[new_index..new_index + new_len] {
                    rows.push((String::new(), line.to_string(), DiffLineType::Added));
                }
            }
            DiffOp::Replace { old_index, old_len, new_index, new_len } => {
                let paired = old_len.min(new_len);
                for k in 0..paired {
                    rows.push((
                        old[old_index + k].to_string(),
                        new[new_index + k].to_string(),
                        DiffLineType::Modified,
                    ));
                }
                for line in &old[old_index + paired..old_index + old_len] {
                    rows.push((line.to_string(), String::new(), DiffLineType::Removed));
                }
                for line in &new[new_index + paired..new_index + new_len] {
                    rows.push((String::new(), line.to_string(), DiffLineType::Added));
                }
            }
        }
    }

    merge_delete_insert(&mut rows);

    rows.into_iter()
        .enumerate()
        .map(|(i, (original, modified, kind))| DiffLine {
            line_number: i + 1,
            original,
            modified,
            kind,
        })
        .collect()
}

// Myers emits separate Delete/Insert ops for a changed block; fold them into
// Modified rows so a one-line edit is a single row.
fn merge_delete_insert(rows: &mut Vec<(String, String, DiffLineType)>) {
    let mut merged = Vec::with_capacity(rows.len());
    let mut i = 0;
    while i < rows.len() {
        if rows[i].2 != DiffLineType::Removed {
            merged.push(std::mem::take(&mut rows[i]));
            i += 1;
            continue;
        }
        let del_start = i;
        while i < rows.len() && rows[i].2 == DiffLineType::Removed {
            i += 1;
        }
        let ins_start = i;
        while i < rows.len() && rows[i].2 == DiffLineType::Added {
            i += 1;
        }
        let dels = ins_start - del_start;
        let inss = i - ins_start;
        let paired = dels.min(inss);
        for k in 0..paired {
            let left = std::mem::take(&mut rows[del_start + k].0);
            let right = std::mem::take(&mut rows[ins_start + k].1);
            merged.push((left, right, DiffLineType::Modified));
        }
        for k in paired..dels {
            merged.push(std::mem::take(&mut rows[del_start + k]));
        }
        for k in paired..inss {
            merged.push(std::mem::take(&mut rows[ins_start + k]));
        }
    }
    *rows = merged;
}

pub fn summary(lines: &[DiffLine]) -> DiffSummary {
    let mut s = DiffSummary::default();
    for line in lines {
        match line.kind {
            DiffLineType::Unchanged => s.unchanged += 1,
            DiffLineType::Added => s.added += 1,
            DiffLineType::Removed => s.removed += 1,
            DiffLineType::Modified => s.modified += 1,
        }
    }
    s
}

/// `-`/`+` listing of changed lines only.
pub fn unified(original: &str, modified: &str) -> String {
    use similar::{ChangeTag, TextDiff};
    let diff = TextDiff::from_lines(original, modified);
    let mut output = String::new();
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "- ",
            ChangeTag::Insert => "+ ",
            ChangeTag::Equal => continue,
        };
        output.push_str(sign);
        output.push_str(change.value());
        if change.missing_newline() {
            output.push('\n');
        }
    }
    output
}
