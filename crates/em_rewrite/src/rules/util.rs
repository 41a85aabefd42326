//! Shared text helpers for the rewrite rules.

use std::sync::LazyLock;

use regex::Regex;

static TRAILING_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\}\);\s*$").expect("trailing close pattern is valid"));

/// Drop a final `});` (and anything but whitespace after it) from the text.
pub(super) fn strip_trailing_close(text: &mut String) {
    if let Some(m) = TRAILING_CLOSE.find(text) {
        let start = m.start();
        text.truncate(start);
    }
}

/// Remove every non-overlapping match of `pattern`, keeping the rest in place.
pub(super) fn remove_all(text: &str, pattern: &Regex) -> String {
    pattern.replace_all(text, "").into_owned()
}

/// Replace `from` with `to` wherever it stands as a whole identifier.
///
/// Occurrences glued to other identifier characters (`_`, `$`, letters,
/// digits) are left alone. Returns the new text and the number of
/// replacements made.
pub(super) fn replace_token(text: &str, from: &str, to: &str) -> (String, usize) {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    let mut count = 0;

    for (start, _) in text.match_indices(from) {
        let end = start + from.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        if before.is_some_and(is_ident_char) || after.is_some_and(is_ident_char) {
            continue;
        }
        result.push_str(&text[last..start]);
        result.push_str(to);
        last = end;
        count += 1;
    }

    result.push_str(&text[last..]);
    (result, count)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_final_close_only() {
        let mut text = String::from("a();\n});\nb();\n});  \n");
        strip_trailing_close(&mut text);
        assert_eq!(text, "a();\n});\nb();\n");
    }

    #[test]
    fn leaves_text_without_close() {
        let mut text = String::from("a();\n});\nb();");
        strip_trailing_close(&mut text);
        assert_eq!(text, "a();\n});\nb();");
    }

    #[test]
    fn replaces_whole_tokens() {
        let (out, n) = replace_token("new Ctx(); Ctx.x; MyCtx; Ctx2; $Ctx; (Ctx)", "Ctx", "C");
        assert_eq!(out, "new C(); C.x; MyCtx; Ctx2; $Ctx; (C)");
        assert_eq!(n, 3);
    }

    #[test]
    fn replaces_at_text_edges() {
        let (out, n) = replace_token("Ctx", "Ctx", "C");
        assert_eq!(out, "C");
        assert_eq!(n, 1);
    }
}
