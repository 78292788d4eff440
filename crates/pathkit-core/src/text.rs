//! Line and separator splitting for puzzle input.

/// Lines of `text` without their terminators.
///
/// `\n`, `\r\n` and a lone `\r` each end a line. A final terminator does
/// not produce a trailing empty line.
///
/// ```
/// use pathkit_core::text::lines;
/// assert_eq!(lines("a\rb\r\n\nc\n"), vec!["a", "b", "", "c"]);
/// ```
pub fn lines(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some(i) = rest.find(['\n', '\r']) {
        out.push(&rest[..i]);
        let end = if rest[i..].starts_with("\r\n") { i + 2 } else { i + 1 };
        rest = &rest[end..];
    }
    if !rest.is_empty() {
        out.push(rest);
    }
    out
}

/// Split `text` on every occurrence of `separator`.
///
/// Leading and interior empty pieces are kept. A final separator does not
/// produce a trailing empty piece, and empty input produces no pieces. An
/// empty separator never matches, so the whole text is one piece.
///
/// ```
/// use pathkit_core::text::split_on;
/// assert_eq!(split_on("a, b,, c, ", ", "), vec!["a", "b,", "c"]);
/// assert_eq!(split_on("--x", "-"), vec!["", "", "x"]);
/// ```
pub fn split_on<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if text.is_empty() {
        return Vec::new();
    }
    if separator.is_empty() {
        return vec![text];
    }
    let mut pieces: Vec<&str> = text.split(separator).collect();
    if pieces.last().is_some_and(|last| last.is_empty()) {
        pieces.pop();
    }
    pieces
}
