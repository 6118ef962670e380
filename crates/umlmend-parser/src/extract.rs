//! Fragment extraction.
//!
//! Scans generated text for spans delimited by a start marker line and the
//! next end marker line. Extraction is a pure function over the input: the
//! [`Fragments`] iterator borrows the text, can be cloned to restart, and
//! never fails.
//!
//! Malformed delimiting is skipped rather than reported:
//! - an end marker without an open fragment is ignored,
//! - a start marker while a fragment is open abandons the open fragment and
//!   opens a new one at that line,
//! - a fragment still open at the end of input is dropped.

use std::{iter::FusedIterator, ops::Range};

use umlmend_core::markers::Marker;

/// A delimited span of generated text claimed to describe one diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFragment<'a> {
    ordinal: usize,
    text: &'a str,
    start: usize,
    end: usize,
}

impl<'a> RawFragment<'a> {
    /// Returns the position of this fragment among all fragments found, 0-based.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Returns the original text between the marker lines, untouched.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Returns the byte range of the whole region, marker lines included.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns `true` if the fragment has no extractable content.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Lazy iterator over the fragments of a text. See [`extract`].
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    source: &'a str,
    offset: usize,
    ordinal: usize,
}

impl<'a> Iterator for Fragments<'a> {
    type Item = RawFragment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        // (region start, body start) of the currently open fragment
        let mut open: Option<(usize, usize)> = None;

        while self.offset < self.source.len() {
            let line_start = self.offset;
            let line_end = self.source[line_start..]
                .find('\n')
                .map_or(self.source.len(), |idx| line_start + idx + 1);
            self.offset = line_end;

            let line = &self.source[line_start..line_end];
            match Marker::of_line(line) {
                Some(Marker::Start) => open = Some((line_start, line_end)),
                Some(Marker::End) => {
                    let Some((region_start, body_start)) = open.take() else {
                        continue;
                    };
                    let fragment = RawFragment {
                        ordinal: self.ordinal,
                        text: trim_line_break(&self.source[body_start..line_start]),
                        start: region_start,
                        end: line_start + line.trim_end_matches(['\r', '\n']).len(),
                    };
                    self.ordinal += 1;
                    return Some(fragment);
                }
                None => {}
            }
        }

        None
    }
}

impl FusedIterator for Fragments<'_> {}

fn trim_line_break(text: &str) -> &str {
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.strip_suffix('\r').unwrap_or(text)
}

/// Returns a lazy iterator over the diagram fragments of `text`, in order.
///
/// # Examples
///
/// ```
/// use umlmend_parser::extract;
///
/// let text = "Intro\n@startuml\nA -> B : hi\n@enduml\nOutro";
/// let fragments: Vec<_> = extract(text).collect();
///
/// assert_eq!(fragments.len(), 1);
/// assert_eq!(fragments[0].text(), "A -> B : hi");
/// ```
pub fn extract(text: &str) -> Fragments<'_> {
    Fragments {
        source: text,
        offset: 0,
        ordinal: 0,
    }
}

/// Returns the prose of `text` with every matched fragment region removed.
pub fn strip_fragments(text: &str) -> String {
    let mut prose = String::with_capacity(text.len());
    let mut cursor = 0;
    for fragment in extract(text) {
        let span = fragment.span();
        prose.push_str(&text[cursor..span.start]);
        cursor = span.end;
    }
    prose.push_str(&text[cursor..]);
    prose.trim().to_string()
}
