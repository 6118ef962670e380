//! Fragment sanitization.
//!
//! [`sanitize`] applies [`SANITIZE_RULES`] in order. Later rules see the
//! output of earlier ones, e.g. the title rule never sees emphasis markers.
//!
//! Sanitization is idempotent: every rule leaves text that no rule of a second
//! pass would change.

use umlmend_core::markers::{END_MARKER, Marker, START_MARKER};

use crate::{
    arrow,
    rules::{RewriteRule, apply_rules},
    text::{
        after_leading_word, clean_title, collapse_whitespace, map_lines, starts_with_any_keyword,
        starts_with_keyword,
    },
};

pub(crate) const NOTE_KEYWORDS: [&str; 3] = ["note", "rnote", "hnote"];

/// The sanitizer rules, in application order.
pub const SANITIZE_RULES: &[RewriteRule] = &[
    RewriteRule::new("strip_markup", strip_markup),
    RewriteRule::new("drop_empty_annotations", drop_empty_annotations),
    RewriteRule::new("canonicalize_title", canonicalize_title),
    RewriteRule::new("normalize_arrows", normalize_arrows),
    RewriteRule::new("drop_symbol_lines", drop_symbol_lines),
    RewriteRule::new("collapse_whitespace", collapse_lines),
    RewriteRule::new("wrap_markers", wrap_markers),
];

/// Sanitize a candidate fragment. Total; never fails.
///
/// # Examples
///
/// ```
/// use umlmend_parser::sanitize;
///
/// let sanitized = sanitize("title **Order Flow!**\nCustomer  ==>  Shop : pay");
/// assert_eq!(
///     sanitized,
///     "@startuml\ntitle \"Order Flow\"\nCustomer --> Shop : pay\n@enduml"
/// );
/// ```
pub fn sanitize(text: &str) -> String {
    apply_rules(SANITIZE_RULES, text)
}

/// Removes emphasis and code-span markup, keeping the inner text.
///
/// Backticks, asterisks and `~~` disappear; underscores wrapping a word
/// (`_word_`, `__word__`) are trimmed from that word, and words made only of
/// underscores are dropped.
fn strip_markup(text: &str) -> String {
    map_lines(text, |line| {
        let line = line.replace(['`', '*'], "").replace("~~", "");
        let words: Vec<&str> = line
            .split_whitespace()
            .map(|word| {
                if word.starts_with('_') && word.ends_with('_') {
                    word.trim_matches('_')
                } else {
                    word
                }
            })
            .filter(|word| !word.is_empty())
            .collect();
        Some(words.join(" "))
    })
}

/// Drops note keywords that carry no attached content, and bare `end note`.
fn drop_empty_annotations(text: &str) -> String {
    map_lines(text, |line| {
        let is_empty_note = starts_with_any_keyword(line, &NOTE_KEYWORDS)
            && line
                .split_once(':')
                .is_none_or(|(_, content)| content.trim().is_empty());

        let collapsed = collapse_whitespace(line).to_ascii_lowercase();
        let is_note_end = collapsed == "end note" || collapsed == "endnote";

        (!is_empty_note && !is_note_end).then(|| line.to_string())
    })
}

/// Rewrites any title declaration as `title "<text>"` with punctuation removed.
fn canonicalize_title(text: &str) -> String {
    map_lines(text, |line| {
        if !starts_with_keyword(line, "title") {
            return Some(line.to_string());
        }
        let title = clean_title(after_leading_word(line));
        (!title.is_empty()).then(|| format!("title \"{title}\""))
    })
}

/// Collapses arrow tokens between two endpoints to `->` or `-->`.
fn normalize_arrows(text: &str) -> String {
    map_lines(text, |line| {
        Some(match arrow::find_forward(line) {
            Some(found) => format!("{} {} {}", found.source, found.kind.arrow(), found.target),
            None => line.to_string(),
        })
    })
}

/// Drops lines made only of punctuation and symbols.
fn drop_symbol_lines(text: &str) -> String {
    map_lines(text, |line| {
        line.chars()
            .any(char::is_alphanumeric)
            .then(|| line.to_string())
    })
}

/// Collapses whitespace runs, trims every line and drops blank lines.
fn collapse_lines(text: &str) -> String {
    map_lines(text, |line| {
        let line = collapse_whitespace(line);
        (!line.is_empty()).then_some(line)
    })
}

/// Normalizes marker lines and ensures the text is wrapped by both markers.
fn wrap_markers(text: &str) -> String {
    let mut lines: Vec<&str> = text
        .lines()
        .map(|line| match Marker::of_line(line) {
            Some(marker) => marker.as_str(),
            None => line,
        })
        .collect();

    if lines.first() != Some(&START_MARKER) {
        lines.insert(0, START_MARKER);
    }
    if lines.len() < 2 || lines.last() != Some(&END_MARKER) {
        lines.push(END_MARKER);
    }
    lines.join("\n")
}
