//! Line diffs via longest common subsequence.
//!
//! A full `(m+1)×(n+1)` LCS table is built over the two line sequences, then
//! backtracked from the bottom-right corner. When both backtrack directions
//! keep the same LCS length the walk takes the insertion, so on the forward
//! read removals appear before additions within a changed run. Callers that
//! compare diff output byte for byte depend on this shape.

use std::fmt::Write as _;

use scrivener_types::{DiffKind, DiffLine};

/// Diff two texts line by line.
pub fn diff_lines(old_text: &str, new_text: &str) -> Vec<DiffLine> {
    let old: Vec<&str> = old_text.lines().collect();
    let new: Vec<&str> = new_text.lines().collect();
    let (m, n) = (old.len(), new.len());

    let width = n + 1;
    let mut table = vec![0u32; (m + 1) * width];
    for i in 1..=m {
        for j in 1..=n {
            table[i * width + j] = if old[i - 1] == new[j - 1] {
                table[(i - 1) * width + (j - 1)] + 1
            } else {
                table[(i - 1) * width + j].max(table[i * width + (j - 1)])
            };
        }
    }

    let mut steps: Vec<(DiffKind, &str)> = Vec::with_capacity(m.max(n));
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old[i - 1] == new[j - 1] {
            steps.push((DiffKind::Context, old[i - 1]));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table[i * width + (j - 1)] >= table[(i - 1) * width + j]) {
            steps.push((DiffKind::Add, new[j - 1]));
            j -= 1;
        } else {
            steps.push((DiffKind::Remove, old[i - 1]));
            i -= 1;
        }
    }

    let mut old_no = 1u32;
    let mut new_no = 1u32;
    steps
        .into_iter()
        .rev()
        .map(|(kind, text)| match kind {
            DiffKind::Context => {
                let line = DiffLine::context(old_no, new_no, text);
                old_no += 1;
                new_no += 1;
                line
            }
            DiffKind::Add => {
                let line = DiffLine::add(new_no, text);
                new_no += 1;
                line
            }
            DiffKind::Remove => {
                let line = DiffLine::remove(old_no, text);
                old_no += 1;
                line
            }
        })
        .collect()
}

/// Number of cells the LCS table for these texts would need.
pub fn table_cells(old_text: &str, new_text: &str) -> usize {
    let m = old_text.lines().count();
    let n = new_text.lines().count();
    (m + 1).saturating_mul(n + 1)
}

/// Diff two texts unless the LCS table would exceed `max_cells`.
pub fn bounded_diff(old_text: &str, new_text: &str, max_cells: usize) -> Option<Vec<DiffLine>> {
    let cells = table_cells(old_text, new_text);
    if cells > max_cells {
        tracing::debug!(cells, max_cells, "skipping diff for large edit");
        return None;
    }
    Some(diff_lines(old_text, new_text))
}

/// Render a diff as numbered unified text: `old new sign text` per line.
///
/// ```text
///    1    1   fn main() {
///    2      -     old();
///         2 +     new();
///    3    3   }
/// ```
pub fn render_unified(lines: &[DiffLine]) -> String {
    let max_no = lines
        .iter()
        .flat_map(|l| [l.old_line, l.new_line])
        .flatten()
        .max()
        .unwrap_or(0);
    let width = max_no.to_string().len().max(4);

    let mut out = String::new();
    for line in lines {
        let old = line.old_line.map(|n| n.to_string()).unwrap_or_default();
        let new = line.new_line.map(|n| n.to_string()).unwrap_or_default();
        let _ = writeln!(
            out,
            "{old:>width$} {new:>width$} {} {}",
            line.kind.sign(),
            line.text,
            width = width
        );
    }
    out
}
