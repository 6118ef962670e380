//! Strict line grammar for sanitized fragments.
//!
//! A fragment line is one of:
//! - `title "<text>"`
//! - `participant <identifier>`
//! - `<identifier> -> <identifier> : <message>` (synchronous)
//! - `<identifier> --> <identifier> : <message>` (response)
//!
//! Anything else is [`Line::Other`]. Whitespace around arrows and the message
//! colon is optional; keywords are lowercase.

use winnow::{
    Parser as _,
    ascii::{space0, space1},
    combinator::{alt, delimited, preceded, terminated},
    error::ModalResult,
    token::{one_of, rest, take_till, take_while},
};

use umlmend_core::{
    markers::{END_MARKER, START_MARKER},
    semantic::InteractionKind,
};

type Input<'a> = &'a str;

/// An interaction line split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionLine<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub kind: InteractionKind,
    pub message: &'a str,
}

/// Classification of a single fragment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    StartMarker,
    EndMarker,
    Title(&'a str),
    Participant(&'a str),
    Interaction(InteractionLine<'a>),
    Other,
}

/// Parse an identifier: `[A-Za-z][A-Za-z0-9_]*`
fn identifier<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

/// Parse `title "<text>"`, returning the text between the quotes
fn title<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    delimited(("title", space1, '"'), take_till(0.., '"'), ('"', space0)).parse_next(input)
}

/// Parse `participant <identifier>`
fn participant<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    preceded(("participant", space1), terminated(identifier, space0)).parse_next(input)
}

/// Parse an arrow token, longest form first
fn arrow(input: &mut Input<'_>) -> ModalResult<InteractionKind> {
    alt((
        "-->".value(InteractionKind::Response),
        "->".value(InteractionKind::Synchronous),
    ))
    .parse_next(input)
}

/// Parse `<identifier> <arrow> <identifier> : <message>`
fn interaction<'a>(input: &mut Input<'a>) -> ModalResult<InteractionLine<'a>> {
    let from = identifier.parse_next(input)?;
    let kind = delimited(space0, arrow, space0).parse_next(input)?;
    let to = identifier.parse_next(input)?;
    let message = preceded((space0, ':'), rest)
        .map(str::trim)
        .verify(|message: &str| !message.is_empty())
        .parse_next(input)?;

    Ok(InteractionLine {
        from,
        to,
        kind,
        message,
    })
}

/// Classify a single line of a fragment.
///
/// # Examples
///
/// ```
/// use umlmend_parser::line::{Line, classify};
///
/// assert_eq!(classify("participant User"), Line::Participant("User"));
/// assert_eq!(classify("title \"Login\""), Line::Title("Login"));
/// assert_eq!(classify("activate User"), Line::Other);
/// ```
pub fn classify(line: &str) -> Line<'_> {
    let line = line.trim();

    if line == START_MARKER {
        return Line::StartMarker;
    }
    if line == END_MARKER {
        return Line::EndMarker;
    }
    if let Ok(text) = title.parse(line) {
        return Line::Title(text);
    }
    if let Ok(name) = participant.parse(line) {
        return Line::Participant(name);
    }
    if let Ok(interaction) = interaction.parse(line) {
        return Line::Interaction(interaction);
    }

    Line::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interaction_line(line: &str) -> InteractionLine<'_> {
        match classify(line) {
            Line::Interaction(interaction) => interaction,
            other => panic!("Expected interaction, got {other:?}"),
        }
    }

    #[test]
    fn test_markers() {
        assert_eq!(classify("@startuml"), Line::StartMarker);
        assert_eq!(classify("  @enduml "), Line::EndMarker);
        assert_eq!(classify("@startuml extra"), Line::Other);
    }

    #[test]
    fn test_title() {
        assert_eq!(classify("title \"Order Flow\""), Line::Title("Order Flow"));
        assert_eq!(classify("title \"\""), Line::Title(""));
        assert_eq!(classify("title Order Flow"), Line::Other);
        assert_eq!(classify("title \"A\" trailing"), Line::Other);
        assert_eq!(classify("Title \"A\""), Line::Other);
    }

    #[test]
    fn test_participant() {
        assert_eq!(classify("participant Web_App2"), Line::Participant("Web_App2"));
        assert_eq!(classify("participant 2fa"), Line::Other);
        assert_eq!(classify("participant Web App"), Line::Other);
        assert_eq!(classify("participantUser"), Line::Other);
    }

    #[test]
    fn test_interaction_synchronous() {
        let interaction = interaction_line("User -> Server : log in");
        assert_eq!(interaction.from, "User");
        assert_eq!(interaction.to, "Server");
        assert_eq!(interaction.kind, InteractionKind::Synchronous);
        assert_eq!(interaction.message, "log in");
    }

    #[test]
    fn test_interaction_response_compact() {
        let interaction = interaction_line("Server-->User:ok");
        assert_eq!(interaction.kind, InteractionKind::Response);
        assert_eq!(interaction.message, "ok");
    }

    #[test]
    fn test_interaction_requires_message() {
        assert_eq!(classify("User -> Server"), Line::Other);
        assert_eq!(classify("User -> Server :   "), Line::Other);
    }

    #[test]
    fn test_interaction_rejects_bad_endpoints() {
        assert_eq!(classify("\"Web App\" -> Server : x"), Line::Other);
        assert_eq!(classify("User => Server : x"), Line::Other);
    }
}
