// src/sql/mod.rs
use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Language tag written into every tuple.
pub const LANGUAGE_CODE: &str = "EN";

// Separator left behind by the last rendered tuple.
static TRAILING_SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r",\n$").expect("Failed to compile TRAILING_SEPARATOR_RE")
});

/// One row destined for the chapter description lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub index: usize,          // 1-based position in document order
    pub language: &'static str,
    pub text: String,          // Trimmed and quote-escaped
}

impl Record {
    /// Builds a record from the raw text of the element at `position` (0-based).
    pub fn from_raw(position: usize, raw_text: &str) -> Self {
        Self {
            index: position + 1,
            language: LANGUAGE_CODE,
            text: escape_literal(trim_page_whitespace(raw_text)).into_owned(),
        }
    }

    /// Renders the tuple without any trailing separator, e.g. `(1, 'EN', 'Live animals')`.
    pub fn render(&self) -> String {
        format!("({}, '{}', '{}')", self.index, self.language, self.text)
    }
}

/// Whitespace as browsers define it for `String.prototype.trim`: the Zs
/// space separators, tab, vertical tab, form feed, BOM and line terminators.
/// Unlike `char::is_whitespace` this strips U+FEFF and keeps U+0085.
fn is_page_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{b}' | '\u{c}' | ' ' | '\u{a0}' | '\u{feff}'
            | '\n' | '\r' | '\u{2028}' | '\u{2029}'
            | '\u{1680}' | '\u{2000}'..='\u{200a}' | '\u{202f}' | '\u{205f}' | '\u{3000}'
    )
}

pub fn trim_page_whitespace(text: &str) -> &str {
    text.trim_matches(is_page_whitespace)
}

/// Doubles every single quote so the text can sit inside a SQL string literal.
pub fn escape_literal(text: &str) -> Cow<'_, str> {
    if text.contains('\'') {
        Cow::Owned(text.replace('\'', "''"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Joins records into a `VALUES` list body.
///
/// Every tuple is followed by `,\n` and the final separator is then swapped
/// for `;`. An empty slice yields an empty string.
pub fn format_values_list(records: &[Record]) -> String {
    let mut accumulator = String::new();
    for record in records {
        accumulator.push_str(&record.render());
        accumulator.push_str(",\n");
    }

    TRAILING_SEPARATOR_RE.replace(&accumulator, ";").into_owned()
}
