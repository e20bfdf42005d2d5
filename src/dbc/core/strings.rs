// Tokenizing helpers shared by the record decoders.

use regex::Regex;
use std::sync::LazyLock;

// A bare run of digits or a double-quoted string (quotes included in the match).
static VALUE_OR_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\d+|"([^"]*)""#).expect("valid value-table regex"));

/// One lexeme of a value-table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lexeme<'a> {
    Number(&'a str),
    Quoted(&'a str),
}

// Split a record on single spaces after trimming surrounding whitespace.
// Runs of spaces produce empty tokens and tabs stay inside tokens.
pub(crate) fn tokenize(line: &str) -> Vec<&str> {
    line.trim().split(' ').collect()
}

// Remove every double quote from a token (`"CI_SigId"` -> `CI_SigId`).
pub(crate) fn strip_quotes(token: &str) -> String {
    token.replace('"', "")
}

// Scan `<number> "<text>" ...` lexemes. Anything between two lexemes must be whitespace or
// the record terminator `;`, otherwise the offending text is returned as the error.
pub(crate) fn scan_values_and_quoted(s: &str) -> Result<Vec<Lexeme<'_>>, String> {
    let mut out: Vec<Lexeme<'_>> = Vec::new();
    let mut last: usize = 0;

    for cap in VALUE_OR_QUOTED.captures_iter(s) {
        let Some(m) = cap.get(0) else {
            continue;
        };
        let gap: &str = &s[last..m.start()];
        if !is_separator(gap) {
            return Err(gap.trim().to_string());
        }
        match cap.get(1) {
            Some(text) => out.push(Lexeme::Quoted(text.as_str())),
            None => out.push(Lexeme::Number(m.as_str())),
        }
        last = m.end();
    }

    let tail: &str = &s[last..];
    if !is_separator(tail) {
        return Err(tail.trim().to_string());
    }
    Ok(out)
}

fn is_separator(gap: &str) -> bool {
    gap.chars().all(|c| c.is_whitespace() || c == ';')
}
