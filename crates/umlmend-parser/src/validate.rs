//! Fragment validation.
//!
//! Validation applies a fixed sequence of structural rules. The first rule a
//! fragment violates determines the reported [`InvalidReason`], so the verdict
//! for a given text is always the same.
//!
//! Rules, in order:
//! 1. at least [`MIN_LINES`] non-empty lines,
//! 2. first and last lines are exactly the start and end markers,
//! 3. exactly one non-empty title,
//! 4. at least two distinct declared participants,
//! 5. at least one interaction, and every interaction endpoint declared,
//! 6. no disallowed construct anywhere in the body.

use std::fmt;

use indexmap::IndexSet;
use thiserror::Error;

use umlmend_core::{
    markers::{END_MARKER, START_MARKER, contains_marker},
    semantic::{Diagram, Interaction},
};

use crate::{
    line::{InteractionLine, Line, classify},
    text::{contains_tag, is_approved_char, starts_with_any_keyword},
};

/// Minimum number of non-empty lines, markers included.
pub const MIN_LINES: usize = 4;

/// Declaration keywords of structural diagrams. Only sequence participants
/// are legal in a fragment.
const CLASS_KEYWORDS: [&str; 5] = ["class", "interface", "abstract", "enum", "annotation"];

/// Why a fragment failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum InvalidReason {
    #[error("fragment has fewer than 4 non-empty lines")]
    TooFewLines,

    #[error("fragment does not start with `@startuml` and end with `@enduml`")]
    MissingMarkers,

    #[error("fragment must declare exactly one non-empty title")]
    MissingTitle,

    #[error("fragment declares fewer than two participants")]
    InsufficientParticipants,

    #[error("fragment has no interaction")]
    NoInteraction,

    #[error("interaction references an undeclared participant")]
    UndeclaredParticipant,

    #[error("fragment contains a disallowed construct")]
    DisallowedConstruct,
}

impl InvalidReason {
    /// Returns the stable snake_case name of this reason.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TooFewLines => "too_few_lines",
            Self::MissingMarkers => "missing_markers",
            Self::MissingTitle => "missing_title",
            Self::InsufficientParticipants => "insufficient_participants",
            Self::NoInteraction => "no_interaction",
            Self::UndeclaredParticipant => "undeclared_participant",
            Self::DisallowedConstruct => "disallowed_construct",
        }
    }
}

/// Verdict of [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationResult {
    Valid,
    Invalid(InvalidReason),
}

impl ValidationResult {
    /// Returns `true` for [`ValidationResult::Valid`].
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the failure reason, if any.
    pub fn reason(self) -> Option<InvalidReason> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(reason),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::Invalid(reason) => write!(f, "invalid ({})", reason.as_str()),
        }
    }
}

impl<T> From<Result<T, InvalidReason>> for ValidationResult {
    fn from(result: Result<T, InvalidReason>) -> Self {
        match result {
            Ok(_) => Self::Valid,
            Err(reason) => Self::Invalid(reason),
        }
    }
}

/// Validate a fragment.
///
/// # Examples
///
/// ```
/// use umlmend_parser::{InvalidReason, ValidationResult, validate};
///
/// let text = "@startuml\ntitle \"Ping\"\nparticipant A\nparticipant B\nA -> B : ping\n@enduml";
/// assert_eq!(validate(text), ValidationResult::Valid);
///
/// let result = validate("@startuml\nA -> B : ping\n@enduml");
/// assert_eq!(result, ValidationResult::Invalid(InvalidReason::TooFewLines));
/// ```
pub fn validate(text: &str) -> ValidationResult {
    check(text).into()
}

/// Validate a fragment and return its structured [`Diagram`].
///
/// Legal lines outside the data model (`activate A`, `autonumber`) are
/// accepted and left out of the result.
pub fn check(text: &str) -> Result<Diagram, InvalidReason> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() < MIN_LINES {
        return Err(InvalidReason::TooFewLines);
    }

    let [first, body @ .., last] = lines.as_slice() else {
        return Err(InvalidReason::TooFewLines);
    };
    if *first != START_MARKER || *last != END_MARKER {
        return Err(InvalidReason::MissingMarkers);
    }

    let classified: Vec<(&str, Line<'_>)> =
        body.iter().map(|line| (*line, classify(line))).collect();

    let title = single_title(&classified)?;

    let participants: IndexSet<&str> = classified
        .iter()
        .filter_map(|(_, line)| match line {
            Line::Participant(name) => Some(*name),
            _ => None,
        })
        .collect();
    if participants.len() < 2 {
        return Err(InvalidReason::InsufficientParticipants);
    }

    let interactions: Vec<InteractionLine<'_>> = classified
        .iter()
        .filter_map(|(_, line)| match line {
            Line::Interaction(interaction) => Some(*interaction),
            _ => None,
        })
        .collect();
    if interactions.is_empty() {
        return Err(InvalidReason::NoInteraction);
    }
    if interactions
        .iter()
        .any(|i| !participants.contains(i.from) || !participants.contains(i.to))
    {
        return Err(InvalidReason::UndeclaredParticipant);
    }

    if classified
        .iter()
        .any(|(text, line)| is_disallowed(text, line))
    {
        return Err(InvalidReason::DisallowedConstruct);
    }

    let mut diagram = Diagram::new(title);
    for name in participants {
        diagram.add_participant(name);
    }
    for i in interactions {
        diagram.add_interaction(Interaction::new(i.from, i.to, i.message, i.kind));
    }
    Ok(diagram)
}

fn single_title<'a>(classified: &[(&str, Line<'a>)]) -> Result<&'a str, InvalidReason> {
    let mut titles = classified.iter().filter_map(|(_, line)| match line {
        Line::Title(title) => Some(*title),
        _ => None,
    });
    match (titles.next(), titles.next()) {
        (Some(title), None) if !title.trim().is_empty() => Ok(title.trim()),
        _ => Err(InvalidReason::MissingTitle),
    }
}

fn is_disallowed(text: &str, line: &Line<'_>) -> bool {
    contains_marker(text)
        || contains_tag(text)
        || text.contains(['{', '}'])
        || (matches!(line, Line::Other) && starts_with_any_keyword(text, &CLASS_KEYWORDS))
        || !text.chars().all(is_approved_char)
}
