//! Lenient arrow detection.
//!
//! Generated text writes arrows in many shapes (`->`, `==>`, `--->`, `<--`).
//! These helpers locate the first arrow that sits between two plausible
//! endpoints and split the line around it.

use umlmend_core::semantic::InteractionKind;

const SHAFT: [char; 2] = ['-', '='];

/// An arrow found inside a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ArrowMatch<'a> {
    /// Trimmed text on the tail side of the arrow.
    pub source: &'a str,
    /// Trimmed text on the head side of the arrow, including any message.
    pub target: &'a str,
    pub kind: InteractionKind,
}

fn is_endpoint_end(text: &str) -> bool {
    text.chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '"')
}

fn is_endpoint_start(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '"')
}

/// A shaft of one character is a request, anything longer a response.
fn kind_for_shaft(len: usize) -> InteractionKind {
    if len == 1 {
        InteractionKind::Synchronous
    } else {
        InteractionKind::Response
    }
}

/// Finds the first `A -> B` style arrow.
///
/// Extra heads (`->>`, `-->>`) belong to the arrow.
pub(crate) fn find_forward(line: &str) -> Option<ArrowMatch<'_>> {
    for (head, _) in line.match_indices('>') {
        let before = &line[..head];
        let tail = before.trim_end_matches(SHAFT);
        let shaft = before.len() - tail.len();
        if shaft == 0 {
            continue;
        }

        let source = tail.trim();
        let target = line[head + 1..].trim_start_matches('>').trim();
        if is_endpoint_end(source) && is_endpoint_start(target) {
            return Some(ArrowMatch {
                source,
                target,
                kind: kind_for_shaft(shaft),
            });
        }
    }
    None
}

/// Finds the first `B <- A` style arrow, reporting `A` as the source.
///
/// Bidirectional arrows (`<->`) are not reverse arrows.
pub(crate) fn find_reverse(line: &str) -> Option<ArrowMatch<'_>> {
    for (head, _) in line.match_indices('<') {
        let after = &line[head + 1..];
        let rest = after.trim_start_matches(SHAFT);
        let shaft = after.len() - rest.len();
        if shaft == 0 || rest.starts_with('>') {
            continue;
        }

        let target = line[..head].trim();
        let source = rest.trim();
        if is_endpoint_end(target) && is_endpoint_start(source) {
            return Some(ArrowMatch {
                source,
                target,
                kind: kind_for_shaft(shaft),
            });
        }
    }
    None
}

/// Splits `endpoint : message` at the first colon.
pub(crate) fn split_message(text: &str) -> (&str, Option<&str>) {
    match text.split_once(':') {
        Some((endpoint, message)) => (endpoint.trim(), Some(message.trim())),
        None => (text.trim(), None),
    }
}
