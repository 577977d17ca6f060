//! Patch application strategies.

use scrivener_types::MatchStrategy;

use crate::error::{Result, WorkspaceError};

use super::block::PatchInstruction;

/// New content produced by a successful patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub content: String,
    pub strategy: MatchStrategy,
    pub replacements: usize,
}

/// Apply a parsed search/replace block to `content`.
///
/// Tries, in order:
/// 1. Verbatim substring: first occurrence, or all with `replace_all`.
/// 2. Whitespace-flexible: the first window of lines equal to the search
///    lines after trimming each line. The untrimmed span is replaced.
///
/// An empty search inserts the replacement at the start of the file.
pub fn apply_block_patch(
    path: &str,
    content: &str,
    instruction: &PatchInstruction,
    replace_all: bool,
    snippet_chars: usize,
) -> Result<Applied> {
    let search = instruction.search.as_str();
    let replace = instruction.replace.as_str();

    if search.is_empty() {
        return Ok(Applied {
            content: format!("{replace}{content}"),
            strategy: MatchStrategy::Exact,
            replacements: 1,
        });
    }

    if content.contains(search) {
        let (content, replacements) = if replace_all {
            (content.replace(search, replace), content.matches(search).count())
        } else {
            (content.replacen(search, replace, 1), 1)
        };
        return Ok(Applied {
            content,
            strategy: MatchStrategy::Exact,
            replacements,
        });
    }

    if let Some((start, end)) = find_trimmed_window(content, search) {
        tracing::debug!(path, start, end, "search block matched with flexible whitespace");
        let mut patched = String::with_capacity(content.len() - (end - start) + replace.len());
        patched.push_str(&content[..start]);
        patched.push_str(replace);
        patched.push_str(&content[end..]);
        return Ok(Applied {
            content: patched,
            strategy: MatchStrategy::WhitespaceFlexible,
            replacements: 1,
        });
    }

    Err(WorkspaceError::search_not_found(path, search, snippet_chars))
}

/// Replace `old` with `new` without any block parsing.
///
/// Case-insensitive matching folds both sides for comparison but slices the
/// original content, so unmatched text keeps its casing.
pub fn apply_literal_replace(
    path: &str,
    content: &str,
    old: &str,
    new: &str,
    replace_all: bool,
    case_insensitive: bool,
    snippet_chars: usize,
) -> Result<Applied> {
    if old.is_empty() {
        return Err(WorkspaceError::InvalidParams("oldString must not be empty".into()));
    }

    if !case_insensitive {
        if !content.contains(old) {
            return Err(WorkspaceError::search_not_found(path, old, snippet_chars));
        }
        let (content, replacements) = if replace_all {
            (content.replace(old, new), content.matches(old).count())
        } else {
            (content.replacen(old, new, 1), 1)
        };
        return Ok(Applied {
            content,
            strategy: MatchStrategy::Literal,
            replacements,
        });
    }

    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;
    let mut replacements = 0;
    while let Some((start, end)) = find_case_insensitive(&content[cursor..], old) {
        out.push_str(&content[cursor..cursor + start]);
        out.push_str(new);
        cursor += end;
        replacements += 1;
        if !replace_all {
            break;
        }
    }

    if replacements == 0 {
        return Err(WorkspaceError::search_not_found(path, old, snippet_chars));
    }
    out.push_str(&content[cursor..]);

    Ok(Applied {
        content: out,
        strategy: MatchStrategy::CaseInsensitive,
        replacements,
    })
}

/// Byte range of the first case-insensitive occurrence of `needle`.
///
/// The range is measured in `haystack`, so its length is the length of the
/// matched original text.
pub fn find_case_insensitive(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    let folded: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if folded.is_empty() {
        return Some((0, 0));
    }
    haystack
        .char_indices()
        .find_map(|(start, _)| match_folded_at(&haystack[start..], &folded).map(|len| (start, start + len)))
}

/// Length in bytes of the prefix of `text` whose lowercase form is `folded`.
fn match_folded_at(text: &str, folded: &[char]) -> Option<usize> {
    let mut expected = folded.iter();
    for (idx, ch) in text.char_indices() {
        for lower in ch.to_lowercase() {
            match expected.next() {
                Some(&want) if want == lower => {}
                _ => return None,
            }
        }
        if expected.len() == 0 {
            return Some(idx + ch.len_utf8());
        }
    }
    None
}

/// Byte range covering the first line window that matches `search` line by
/// line after trimming. The range excludes the final line's terminator.
fn find_trimmed_window(content: &str, search: &str) -> Option<(usize, usize)> {
    let wanted: Vec<&str> = search.lines().map(str::trim).collect();
    if wanted.is_empty() {
        return None;
    }

    let spans = line_spans(content);
    if wanted.len() > spans.len() {
        return None;
    }

    (0..=spans.len() - wanted.len()).find_map(|first| {
        let window = &spans[first..first + wanted.len()];
        let matches = window
            .iter()
            .zip(&wanted)
            .all(|(&(start, end), want)| content[start..end].trim() == *want);
        matches.then(|| (window[0].0, window[window.len() - 1].1))
    })
}

/// `(start, end)` of each line's text, excluding `\n` / `\r\n`.
fn line_spans(content: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut offset = 0;
    for raw in content.split_inclusive('\n') {
        let text = raw
            .strip_suffix('\n')
            .map(|t| t.strip_suffix('\r').unwrap_or(t))
            .unwrap_or(raw);
        spans.push((offset, offset + text.len()));
        offset += raw.len();
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(search: &str, replace: &str) -> PatchInstruction {
        PatchInstruction::new(search, replace)
    }

    #[test]
    fn test_exact_first_occurrence() {
        let out = apply_block_patch("f", "a b a", &block("a", "x"), false, 100).unwrap();
        assert_eq!(out.content, "x b a");
        assert_eq!(out.strategy, MatchStrategy::Exact);
        assert_eq!(out.replacements, 1);
    }

    #[test]
    fn test_exact_replace_all() {
        let out = apply_block_patch("f", "a b a", &block("a", "x"), true, 100).unwrap();
        assert_eq!(out.content, "x b x");
        assert_eq!(out.replacements, 2);
    }

    #[test]
    fn test_verbatim_search_never_uses_flexible() {
        // The search also matches line-wise after trimming, but the verbatim
        // substring must win.
        let content = "  let x = 1;\nlet x = 1;\n";
        let out = apply_block_patch("f", content, &block("let x = 1;", "let x = 2;"), false, 100).unwrap();
        assert_eq!(out.strategy, MatchStrategy::Exact);
        assert_eq!(out.content, "  let x = 2;\nlet x = 1;\n");
    }

    #[test]
    fn test_flexible_single_line() {
        let out = apply_block_patch(
            "app.ts",
            "console.log(1)",
            &block(" console.log(1) ", "console.log(2)"),
            false,
            100,
        )
        .unwrap();
        assert_eq!(out.content, "console.log(2)");
        assert_eq!(out.strategy, MatchStrategy::WhitespaceFlexible);
    }

    #[test]
    fn test_flexible_multiline_keeps_surroundings() {
        let content = "fn main() {\n    let a = 1;\n    let b = 2;\n}\n";
        let search = "let a = 1;\nlet b = 2;";
        let replace = "    let a = 10;\n    let b = 20;";
        let out = apply_block_patch("main.rs", content, &block(search, replace), false, 100).unwrap();
        assert_eq!(out.content, "fn main() {\n    let a = 10;\n    let b = 20;\n}\n");
        assert_eq!(out.strategy, MatchStrategy::WhitespaceFlexible);
    }

    #[test]
    fn test_flexible_handles_crlf() {
        let content = "one\r\n  two  \r\nthree\r\n";
        let out = apply_block_patch("f", content, &block("two", "TWO"), false, 100).unwrap();
        // "two" is a verbatim substring, so exact wins here.
        assert_eq!(out.content, "one\r\n  TWO  \r\nthree\r\n");

        let out = apply_block_patch("f", content, &block("one\ntwo", "1\n2"), false, 100).unwrap();
        assert_eq!(out.strategy, MatchStrategy::WhitespaceFlexible);
        assert_eq!(out.content, "1\n2\r\nthree\r\n");
    }

    #[test]
    fn test_empty_search_inserts_at_start() {
        let out = apply_block_patch("f", "body", &block("", "head\n"), true, 100).unwrap();
        assert_eq!(out.content, "head\nbody");
    }

    #[test]
    fn test_block_miss_echoes_snippet() {
        let search = "missing ".repeat(30);
        let err = apply_block_patch("app.ts", "content", &block(&search, "x"), false, 100).unwrap_err();
        match err {
            WorkspaceError::SearchTextNotFound { path, snippet } => {
                assert_eq!(path, "app.ts");
                assert_eq!(snippet.chars().count(), 100);
                assert!(search.starts_with(&snippet));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_search_longer_than_file() {
        let err = apply_block_patch("f", "a", &block("a\nb\nc\n d", "x"), false, 100).unwrap_err();
        assert!(matches!(err, WorkspaceError::SearchTextNotFound { .. }));
    }

    #[test]
    fn test_literal_case_sensitive() {
        let out = apply_literal_replace("f", "Foo foo", "foo", "bar", false, false, 100).unwrap();
        assert_eq!(out.content, "Foo bar");
        assert_eq!(out.strategy, MatchStrategy::Literal);

        let err = apply_literal_replace("f", "Foo", "foo", "bar", false, false, 100).unwrap_err();
        assert!(matches!(err, WorkspaceError::SearchTextNotFound { .. }));
    }

    #[test]
    fn test_literal_case_insensitive_single() {
        let out = apply_literal_replace("f", "Say HELLO and Hello", "hello", "bye", false, true, 100).unwrap();
        assert_eq!(out.content, "Say bye and Hello");
        assert_eq!(out.replacements, 1);
        assert_eq!(out.strategy, MatchStrategy::CaseInsensitive);
    }

    #[test]
    fn test_literal_case_insensitive_all_preserves_other_text() {
        let out = apply_literal_replace("f", "Alpha ALPHA beta Alpha", "alpha", "x", true, true, 100).unwrap();
        assert_eq!(out.content, "x x beta x");
        assert_eq!(out.replacements, 3);

        let out = apply_literal_replace("f", "KeepCase FOO keepcase", "foo", "bar", true, true, 100).unwrap();
        assert_eq!(out.content, "KeepCase bar keepcase");
    }

    #[test]
    fn test_literal_rejects_empty_old_string() {
        let err = apply_literal_replace("f", "abc", "", "x", false, false, 100).unwrap_err();
        assert!(matches!(err, WorkspaceError::InvalidParams(_)));
    }

    #[test]
    fn test_find_case_insensitive_offsets_are_in_original() {
        assert_eq!(find_case_insensitive("xxABCxx", "abc"), Some((2, 5)));
        assert_eq!(find_case_insensitive("ÉCOLE école", "école"), Some((0, 6)));
        assert_eq!(find_case_insensitive("abc", "abd"), None);
        assert_eq!(find_case_insensitive("ab", "abc"), None);
    }
}
