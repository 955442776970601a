//! Shell-style glob patterns for hostnames.
//!
//! Patterns use path glob syntax: `*` matches any run of non-`/`
//! characters, `?` one non-`/` character, `[a-z]` / `[^a-z]` character
//! classes, and `\c` escapes `c`. They are translated into the
//! [`glob`] crate's dialect once, at construction.

use glob::{MatchOptions, Pattern};
use std::iter::Peekable;
use std::str::Chars;
use tracing::debug;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

const UNTERMINATED_CLASS: &str = "unterminated character class";
const UNSUPPORTED_CLASS: &str = "character class cannot be expressed";

/// A compiled glob pattern.
///
/// A malformed pattern is kept but never matches anything.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    compiled: Option<Pattern>,
}

impl GlobPattern {
    /// Compile a pattern. Syntax errors are logged and yield a pattern that never matches.
    pub fn new(source: &str) -> Self {
        let compiled = match translate(source).and_then(|t| Pattern::new(&t).map_err(|e| e.msg)) {
            Ok(pattern) => Some(pattern),
            Err(reason) => {
                debug!(pattern = source, reason, "malformed glob pattern will never match");
                None
            }
        };
        Self {
            source: source.to_string(),
            compiled,
        }
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern compiled
    pub fn is_valid(&self) -> bool {
        self.compiled.is_some()
    }

    /// Check if the whole hostname matches
    pub fn matches(&self, host: &str) -> bool {
        self.compiled
            .as_ref()
            .is_some_and(|p| p.matches_with(host, MATCH_OPTIONS))
    }
}

fn translate(pattern: &str) -> Result<String, &'static str> {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                // A run of stars means the same as one; the glob crate rejects `**` mid-segment.
                while chars.next_if_eq(&'*').is_some() {}
                out.push('*');
            }
            '?' => out.push('?'),
            '\\' => {
                let escaped = chars.next().ok_or("trailing backslash")?;
                push_literal(&mut out, escaped);
            }
            '[' => translate_class(&mut chars, &mut out)?,
            c => push_literal(&mut out, c),
        }
    }

    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    match c {
        '?' | '*' | '[' | ']' => {
            out.push('[');
            out.push(c);
            out.push(']');
        }
        c => out.push(c),
    }
}

fn class_char(chars: &mut Peekable<Chars<'_>>) -> Result<char, &'static str> {
    match chars.next() {
        None => Err(UNTERMINATED_CLASS),
        Some('-') | Some(']') => Err("unescaped '-' or ']' in character class"),
        Some('\\') => chars.next().ok_or(UNTERMINATED_CLASS),
        Some(c) => Ok(c),
    }
}

fn translate_class(chars: &mut Peekable<Chars<'_>>, out: &mut String) -> Result<(), &'static str> {
    let negated = chars.next_if_eq(&'^').is_some();
    let mut ranges = Vec::new();

    loop {
        match chars.peek() {
            None => return Err(UNTERMINATED_CLASS),
            Some(']') if !ranges.is_empty() => {
                chars.next();
                break;
            }
            _ => {}
        }
        let lo = class_char(chars)?;
        let hi = if chars.next_if_eq(&'-').is_some() {
            class_char(chars)?
        } else {
            lo
        };
        ranges.push((lo, hi));
    }

    emit_class(out, negated, ranges)
}

/// Write a class in the glob crate's dialect.
///
/// That dialect has no escapes: a literal `]` must come first, a leading
/// `!` negates, and every other member is written as a `lo-hi` range.
fn emit_class(
    out: &mut String,
    negated: bool,
    mut ranges: Vec<(char, char)>,
) -> Result<(), &'static str> {
    if ranges.iter().filter(|(lo, hi)| *lo == ']' || *hi == ']').count() > 1
        || ranges.iter().any(|&(lo, hi)| hi == ']' && lo != ']')
    {
        return Err(UNSUPPORTED_CLASS);
    }
    if let Some(i) = ranges.iter().position(|&(lo, _)| lo == ']') {
        ranges.swap(0, i);
    }

    if !negated && ranges[0].0 == '!' {
        match ranges.iter().position(|&(lo, _)| lo != '!') {
            Some(i) => ranges.swap(0, i),
            None if ranges.iter().all(|&r| r == ('!', '!')) => {
                out.push('!');
                return Ok(());
            }
            None => return Err(UNSUPPORTED_CLASS),
        }
    }

    // A lone ']' is written bare, so the member after it must not start with '-'.
    let bare_bracket = ranges[0] == (']', ']');
    if bare_bracket && ranges.len() > 1 && ranges[1].0 == '-' {
        match ranges.iter().skip(2).position(|&(lo, _)| lo != '-') {
            Some(i) => ranges.swap(1, i + 2),
            None => return Err(UNSUPPORTED_CLASS),
        }
    }

    out.push('[');
    if negated {
        out.push('!');
    }
    for (i, &(lo, hi)) in ranges.iter().enumerate() {
        out.push(lo);
        if i == 0 && bare_bracket {
            continue;
        }
        out.push('-');
        out.push(hi);
    }
    out.push(']');
    Ok(())
}
