//! Escaping grammar for container and constructed values.
//!
//! A delimiter (`,` or `=`) loses its meaning when the character right before
//! it is a backslash. Splitting keeps the backslash; [`unescape`] strips it
//! once the part has been isolated.

/// Splits `input` on every `delimiter` not preceded by a backslash.
///
/// Always returns at least one part, so an empty input gives `[""]`.
///
/// # Examples
///
/// ```
/// use argtree_parser::escape::split_unescaped;
///
/// assert_eq!(split_unescaped(r"a\,b,c", ','), vec![r"a\,b", "c"]);
/// ```
pub fn split_unescaped(input: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut previous = None;

    for (index, ch) in input.char_indices() {
        if ch == delimiter && previous != Some('\\') {
            parts.push(&input[start..index]);
            start = index + ch.len_utf8();
        }
        previous = Some(ch);
    }
    parts.push(&input[start..]);
    parts
}

/// Splits on the first `delimiter` not preceded by a backslash.
pub fn split_once_unescaped(input: &str, delimiter: char) -> Option<(&str, &str)> {
    let mut previous = None;
    for (index, ch) in input.char_indices() {
        if ch == delimiter && previous != Some('\\') {
            return Some((&input[..index], &input[index + ch.len_utf8()..]));
        }
        previous = Some(ch);
    }
    None
}

/// Replaces `\,` with `,` and `\=` with `=`. Other backslashes are kept.
pub fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(&next @ (',' | '=')) = chars.peek() {
                out.push(next);
                chars.next();
                continue;
            }
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain() {
        assert_eq!(split_unescaped("a,b,c", ','), vec!["a", "b", "c"]);
        assert_eq!(split_unescaped("", ','), vec![""]);
        assert_eq!(split_unescaped("a,", ','), vec!["a", ""]);
    }

    #[test]
    fn test_split_skips_escaped_delimiter() {
        assert_eq!(split_unescaped(r"x\,y,z\,", ','), vec![r"x\,y", r"z\,"]);
    }

    #[test]
    fn test_split_once_uses_first_unescaped() {
        assert_eq!(split_once_unescaped("a=b=c", '='), Some(("a", "b=c")));
        assert_eq!(split_once_unescaped(r"a\=b=c", '='), Some((r"a\=b", "c")));
        assert_eq!(split_once_unescaped(r"a\=b", '='), None);
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"a\,b"), "a,b");
        assert_eq!(unescape(r"k\=v"), "k=v");
        assert_eq!(unescape(r"C:\dir"), r"C:\dir");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_multibyte_parts() {
        assert_eq!(split_unescaped("👍,😊", ','), vec!["👍", "😊"]);
    }
}
