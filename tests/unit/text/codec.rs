use super::*;

#[test]
fn escape_spaces_out_separators() {
    assert_eq!(escape("a;b"), "a \\; b");
    assert_eq!(escape("0, 1 2"), "0 \\,  1 2");
    assert_eq!(escape("c:\\tmp"), "c:\\\\tmp");
}

#[test]
fn escape_only_touches_dollar_before_digit() {
    assert_eq!(escape("expr $f2"), "expr $f2");
    assert_eq!(escape("$1 $ $x"), "\\$1 $ $x");
    assert_eq!(escape("cost$"), "cost$");
}

#[test]
fn unescape_reverses_escape() {
    for text in [
        "loadbang",
        "0, 1 $2, $1 $3 $2",
        "pack 0 0 0",
        "path\\to\\file",
        "$1 and $ alone",
        "",
    ] {
        assert_eq!(unescape(&escape(text)), text, "round trip of {text:?}");
    }
}

#[test]
fn unescape_splits_statements_onto_lines() {
    let stored = escape("1; note 440 0.8  80 0 1.0 320");
    assert_eq!(unescape(&stored), "1\nnote 440 0.8  80 0 1.0 320");
}

#[test]
fn unescape_accepts_unspaced_separators() {
    assert_eq!(unescape("a\\;b"), "a\nb");
    assert_eq!(unescape("a\\,b"), "a,b");
}

#[test]
fn display_lines_of_empty_text_is_empty() {
    assert!(display_lines("").is_empty());
    assert!(display_lines("   ").is_empty());
}

#[test]
fn display_lines_wraps_at_whitespace() {
    let text = vec!["word"; 20].join(" ");
    let lines = display_lines(&text);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].chars().count(), 59);
    assert_eq!(lines[1].chars().count(), 39);
    assert!(lines.iter().all(|l| l.chars().count() <= WRAP_WIDTH));
}

#[test]
fn display_lines_hard_breaks_long_words() {
    let text = "a".repeat(130);
    let lines = display_lines(&text);
    let lens: Vec<usize> = lines.iter().map(|l| l.len()).collect();
    assert_eq!(lens, vec![60, 60, 10]);
}

#[test]
fn display_lines_keeps_statement_breaks() {
    let stored = escape("1; note 440");
    assert_eq!(display_lines(&stored), vec!["1", "note 440"]);
}

#[test]
fn whitespace_exactly_at_wrap_width_keeps_a_full_line() {
    let text = format!("{} b", "a".repeat(WRAP_WIDTH));
    assert_eq!(display_lines(&text), vec!["a".repeat(WRAP_WIDTH), "b".to_string()]);

    let text = format!("{} {}", "a".repeat(WRAP_WIDTH - 1), "b".repeat(5));
    assert_eq!(
        display_lines(&text),
        vec!["a".repeat(WRAP_WIDTH - 1), "bbbbb".to_string()]
    );
}

#[test]
fn display_lines_split_on_every_line_boundary() {
    assert_eq!(display_lines("a\rb"), vec!["a", "b"]);
    assert_eq!(display_lines("a\r\nb\n"), vec!["a", "b"]);
    assert_eq!(display_lines("a\u{0c}b\u{2028}c"), vec!["a", "b", "c"]);
    assert_eq!(display_lines("a\u{85}\u{85}b"), vec!["a", "b"]);
}

#[test]
fn escape_symbol_keeps_one_atom() {
    assert_eq!(escape_symbol("freq"), "freq");
    assert_eq!(escape_symbol(""), "-");
    assert_eq!(escape_symbol("my synth"), "my\\ synth");
    assert_eq!(escape_symbol("a;b,c"), "a\\;b\\,c");
    assert_eq!(escape_symbol("$1-out $x"), "\\$1-out\\ $x");
}
