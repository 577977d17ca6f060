//! Path canonicalization.

/// Canonicalize a path string.
///
/// Strips any mix of leading `./` and `/`, collapses runs of `/`, and drops a
/// trailing `/`. Total over all inputs and idempotent.
///
/// ```ignore
/// assert_eq!(normalize("./src//lib/"), "src/lib");
/// assert_eq!(normalize("/./a"), "a");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut rest = raw;
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('/') {
            rest = stripped;
        } else {
            break;
        }
    }

    let mut out = String::with_capacity(rest.len());
    let mut prev_slash = false;
    for ch in rest.chars() {
        if ch == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(ch);
    }

    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

/// Final segment of a `/`-separated path.
pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_leading_markers() {
        assert_eq!(normalize("./src/main.rs"), "src/main.rs");
        assert_eq!(normalize("/src/main.rs"), "src/main.rs");
        assert_eq!(normalize("././src/main.rs"), "src/main.rs");
        assert_eq!(normalize("///src/main.rs"), "src/main.rs");
        assert_eq!(normalize(".//./src/main.rs"), "src/main.rs");
    }

    #[test]
    fn test_collapses_and_trims_separators() {
        assert_eq!(normalize("src//lib///mod.rs"), "src/lib/mod.rs");
        assert_eq!(normalize("src/lib/"), "src/lib");
        assert_eq!(normalize("src/lib//"), "src/lib");
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("/"), "");
        assert_eq!(normalize("./"), "");
        assert_eq!(normalize("."), ".");
        assert_eq!(normalize("a"), "a");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "/",
            "./",
            ".//./a",
            "/./a//b/",
            "a/./b",
            "../x",
            "src//",
            "./././",
            "//.//.//x//",
            "a b/c d.txt",
            "ユニコード//ファイル.md/",
        ];
        for raw in samples {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("src/lib/mod.rs"), "mod.rs");
        assert_eq!(basename("mod.rs"), "mod.rs");
        assert_eq!(basename("src/"), "");
        assert_eq!(basename(""), "");
    }
}
