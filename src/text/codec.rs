//! Escaping of the patch format's reserved characters.
//!
//! Semicolons and commas separate messages and list elements in the file format, and
//! `$<digit>` is an argument substitution token. Stored node text is always kept in
//! escaped form; the display form is only reconstructed to estimate node size.

/// Maximum number of characters per display line before wrapping.
pub const WRAP_WIDTH: usize = 60;

/// Escape `text` so it survives as a single atom sequence in the patch format.
///
/// - `\` becomes `\\`
/// - `;` becomes ` \; ` and `,` becomes ` \, `
/// - `$` becomes `\$` when immediately followed by an ASCII digit
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str(" \\; "),
            ',' => out.push_str(" \\, "),
            '$' if chars.peek().is_some_and(char::is_ascii_digit) => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape `name` so it stays one symbol atom: separators and whitespace are
/// backslash-escaped in place, without the padding [`escape`] adds. An empty name
/// becomes the `-` placeholder.
pub fn escape_symbol(name: &str) -> String {
    if name.is_empty() {
        return "-".to_string();
    }
    let mut out = String::with_capacity(name.len() + 4);
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' | ';' | ',' => {
                out.push('\\');
                out.push(c);
            }
            '$' if chars.peek().is_some_and(char::is_ascii_digit) => out.push_str("\\$"),
            c if c.is_whitespace() => {
                out.push('\\');
                out.push(' ');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Reverse [`escape`], producing the text as an editor would display it.
///
/// Escaped semicolons end a line, escaped commas are joined back to the preceding
/// word, and every resulting line is trimmed.
pub fn unescape(text: &str) -> String {
    let mut disp = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        let (piece, consumed) = if rest.starts_with(" \\; ") {
            ('\n', 4)
        } else if rest.starts_with(" \\, ") {
            (',', 4)
        } else if let Some(tail) = rest.strip_prefix('\\') {
            match tail.chars().next() {
                Some('\\') => ('\\', 2),
                Some('$') => ('$', 2),
                Some(';') => ('\n', 2),
                Some(',') => (',', 2),
                _ => ('\\', 1),
            }
        } else {
            (c, c.len_utf8())
        };
        disp.push(piece);
        rest = &rest[consumed..];
    }

    disp.split('\n').map(str::trim).collect::<Vec<_>>().join("\n")
}

/// Unescape `text` and word-wrap every line to at most [`WRAP_WIDTH`] characters.
///
/// Blank pieces are dropped, so an empty text yields no lines.
pub fn display_lines(text: &str) -> Vec<String> {
    let display = unescape(text);
    let mut lines = Vec::new();
    for line in split_lines(&display) {
        lines.extend(wrap_line(line));
    }
    lines
}

/// Split on every Unicode line boundary, not just `\n` and `\r\n`. `\r\n` counts as one
/// break and a trailing break does not produce an empty last line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let is_break = matches!(
            c,
            '\n' | '\r'
                | '\u{0b}'
                | '\u{0c}'
                | '\u{1c}'
                | '\u{1d}'
                | '\u{1e}'
                | '\u{85}'
                | '\u{2028}'
                | '\u{2029}'
        );
        if !is_break {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' && chars.peek().is_some_and(|&(_, next)| next == '\n') {
            chars.next();
            start += 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Greedy wrap: each piece is the longest run of up to [`WRAP_WIDTH`] characters that
/// ends before whitespace or at the end of the line, else exactly [`WRAP_WIDTH`]
/// characters.
fn wrap_line(line: &str) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let n = chars.len();
    let mut pieces = Vec::new();
    let mut i = 0usize;

    while i < n {
        let mut start = i;
        while start < n && chars[start] == ' ' {
            start += 1;
        }
        if start == n {
            break;
        }

        let remaining = n - start;
        let end = if remaining <= WRAP_WIDTH {
            n
        } else {
            (1..=WRAP_WIDTH)
                .rev()
                .find(|&k| chars[start + k].is_whitespace())
                .map_or(start + WRAP_WIDTH, |k| start + k + 1)
        };

        let piece: String = chars[start..end].iter().collect();
        let piece = piece.trim();
        if !piece.is_empty() {
            pieces.push(piece.to_string());
        }
        i = end;
    }
    pieces
}

#[cfg(test)]
#[path = "../../tests/unit/text/codec.rs"]
mod tests;
