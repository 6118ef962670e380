//! Repair toolkits applied by the healing controller.
//!
//! - [`tokens`] fixes common token-level mistakes and leaves unrecognized
//!   lines alone.
//! - [`structural`] rebuilds a fragment from the lines it can recognize and
//!   discards everything else.

pub mod structural;
pub mod tokens;

pub use structural::{RepairMode, StructuralRepairer};
pub use tokens::{TOKEN_RULES, fix_tokens};

use umlmend_core::{
    identifier::to_identifier,
    semantic::{Interaction, InteractionKind},
};

use crate::text::{after_leading_word, clean_message, starts_with_keyword};

/// Keywords that declare a sequence participant.
const PARTICIPANT_KEYWORDS: [&str; 8] = [
    "participant",
    "actor",
    "boundary",
    "control",
    "entity",
    "database",
    "collections",
    "queue",
];

/// Extracts the participant name declared by a keyword line.
///
/// The alias after `as` wins over the displayed name, and a trailing body
/// (`class Config {`) is ignored.
fn declared_name(line: &str) -> Option<String> {
    let mut rest = after_leading_word(line).trim();
    if starts_with_keyword(rest, "class") {
        rest = after_leading_word(rest).trim();
    }
    let rest = rest.split_once('{').map_or(rest, |(head, _)| head);
    to_identifier(find_alias(rest).unwrap_or(rest))
}

/// Returns the text after the last ` as `, ASCII case-insensitively.
fn find_alias(text: &str) -> Option<&str> {
    text.to_ascii_lowercase()
        .rfind(" as ")
        .map(|idx| text[idx + 4..].trim())
        .filter(|alias| !alias.is_empty())
}

/// Builds an interaction from loose endpoint and message text.
///
/// Returns `None` if either endpoint has nothing usable as an identifier.
fn salvage_interaction(
    from: &str,
    to: &str,
    message: Option<&str>,
    kind: InteractionKind,
) -> Option<Interaction> {
    let from = to_identifier(from)?;
    let to = to_identifier(to)?;
    let message = message
        .map(clean_message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| kind.default_message().to_string());
    Some(Interaction::new(from, to, message, kind))
}
