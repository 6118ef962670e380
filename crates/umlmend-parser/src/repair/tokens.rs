//! Token-level fixes.
//!
//! These rules correct mistakes that leave the overall shape of a fragment
//! intact: keyword casing, alternative participant keywords, reversed arrows,
//! loose interaction endpoints and repeated titles. A line no rule recognizes
//! passes through untouched.

use crate::{
    arrow::{self, split_message},
    line::{Line, classify},
    rules::{RewriteRule, apply_rules},
    sanitize::{NOTE_KEYWORDS, sanitize},
    text::{
        after_leading_word, leading_word, map_lines, starts_with_any_keyword, starts_with_keyword,
    },
};

use super::{PARTICIPANT_KEYWORDS, declared_name, salvage_interaction};

const LOWERCASE_KEYWORDS: [&str; 11] = [
    "title",
    "participant",
    "actor",
    "boundary",
    "control",
    "entity",
    "database",
    "collections",
    "queue",
    "activate",
    "deactivate",
];

/// The token-level rules, in application order.
pub const TOKEN_RULES: &[RewriteRule] = &[
    RewriteRule::new("lowercase_keywords", lowercase_keywords),
    RewriteRule::new("declare_aliases", declare_aliases),
    RewriteRule::new("reverse_arrows", reverse_arrows),
    RewriteRule::new("canonical_interactions", canonical_interactions),
    RewriteRule::new("dedupe_titles", dedupe_titles),
];

/// Sanitize, apply [`TOKEN_RULES`], then sanitize the result again.
///
/// # Examples
///
/// ```
/// use umlmend_parser::repair::fix_tokens;
///
/// let fixed = fix_tokens("Actor User\nparticipant Api\nApi <- User : call");
/// assert_eq!(
///     fixed,
///     "@startuml\nparticipant User\nparticipant Api\nUser -> Api : call\n@enduml"
/// );
/// ```
pub fn fix_tokens(text: &str) -> String {
    sanitize(&apply_rules(TOKEN_RULES, &sanitize(text)))
}

fn lowercase_keywords(text: &str) -> String {
    map_lines(text, |line| {
        let word = leading_word(line);
        if word.chars().any(|c| c.is_ascii_uppercase())
            && starts_with_any_keyword(line, &LOWERCASE_KEYWORDS)
        {
            Some(format!("{}{}", word.to_ascii_lowercase(), after_leading_word(line)))
        } else {
            Some(line.to_string())
        }
    })
}

/// Rewrites `actor X`, `database "Long Name"` and `participant "Name" as X`
/// as plain `participant` declarations.
fn declare_aliases(text: &str) -> String {
    map_lines(text, |line| {
        let is_declaration = starts_with_any_keyword(line, &PARTICIPANT_KEYWORDS)
            && !matches!(classify(line), Line::Participant(_))
            && arrow::find_forward(line).is_none()
            && arrow::find_reverse(line).is_none();
        let rewritten = is_declaration
            .then(|| declared_name(line))
            .flatten()
            .map(|name| format!("participant {name}"));
        Some(rewritten.unwrap_or_else(|| line.to_string()))
    })
}

/// Rewrites `B <- A : m` as `A -> B : m`, keeping the arrow kind.
fn reverse_arrows(text: &str) -> String {
    map_lines(text, |line| {
        if arrow::find_forward(line).is_some() {
            return Some(line.to_string());
        }
        let Some(found) = arrow::find_reverse(line) else {
            return Some(line.to_string());
        };
        let (source, message) = split_message(found.source);
        let arrow = found.kind.arrow();
        Some(match message {
            Some(message) => format!("{source} {arrow} {} : {message}", found.target),
            None => format!("{source} {arrow} {}", found.target),
        })
    })
}

/// Returns `true` if the arrow source opens a declaration or a note
/// (`participant A`, `note right: A`) rather than naming an endpoint.
fn is_keyword_statement(source: &str) -> bool {
    let rest = after_leading_word(source);
    !rest.is_empty()
        && !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_')
        && (starts_with_any_keyword(source, &PARTICIPANT_KEYWORDS)
            || starts_with_any_keyword(source, &NOTE_KEYWORDS))
}

/// Coerces interaction endpoints to identifiers and supplies a message.
///
/// Declaration and note lines that happen to contain an arrow are left alone.
fn canonical_interactions(text: &str) -> String {
    map_lines(text, |line| {
        let canonical = arrow::find_forward(line).and_then(|found| {
            if is_keyword_statement(found.source) {
                return None;
            }
            let (target, message) = split_message(found.target);
            salvage_interaction(found.source, target, message, found.kind)
        });
        Some(canonical.map_or_else(|| line.to_string(), |interaction| interaction.to_string()))
    })
}

/// Keeps the first title declaration.
fn dedupe_titles(text: &str) -> String {
    let mut seen = false;
    map_lines(text, |line| {
        if starts_with_keyword(line, "title") {
            if seen {
                return None;
            }
            seen = true;
        }
        Some(line.to_string())
    })
}

#[cfg(test)]
mod tests {
    use crate::validate::{ValidationResult, validate};

    use super::*;

    #[test]
    fn test_lowercase_keywords() {
        assert_eq!(
            lowercase_keywords("Participant User\nACTOR Admin\nUser -> Admin : Hi"),
            "participant User\nactor Admin\nUser -> Admin : Hi"
        );
        assert_eq!(lowercase_keywords("Participants x"), "Participants x");
    }

    #[test]
    fn test_declare_aliases() {
        let input = "actor Customer\n\
                     participant \"Payment Gateway\" as Gateway\n\
                     database Orders\n\
                     participant Shop\n\
                     actor A -> B : hi\n\
                     queue ???";
        assert_eq!(
            declare_aliases(input),
            "participant Customer\n\
             participant Gateway\n\
             participant Orders\n\
             participant Shop\n\
             actor A -> B : hi\n\
             queue ???"
        );
    }

    #[test]
    fn test_reverse_arrows() {
        assert_eq!(reverse_arrows("B <- A : call"), "A -> B : call");
        assert_eq!(reverse_arrows("B <-- A"), "A --> B");
        assert_eq!(reverse_arrows("A -> B : a <- b"), "A -> B : a <- b");
        assert_eq!(reverse_arrows("A <-> B"), "A <-> B");
    }

    #[test]
    fn test_canonical_interactions() {
        assert_eq!(
            canonical_interactions("\"Web App\" -> API : POST /login (json)"),
            "WebApp -> API : POST login json"
        );
        assert_eq!(canonical_interactions("A --> B"), "A --> B : response");
        assert_eq!(canonical_interactions("A -> B : <i></i>"), "A -> B : request");
        assert_eq!(canonical_interactions("plain text"), "plain text");
    }

    #[test]
    fn test_canonical_interactions_skip_keyword_lines() {
        assert_eq!(canonical_interactions("note right: A -> B"), "note right: A -> B");
        assert_eq!(canonical_interactions("participant A -> B"), "participant A -> B");
        assert_eq!(
            canonical_interactions("Database -> Server"),
            "Database -> Server : request"
        );
        assert_eq!(
            canonical_interactions("Queue_1 --> Worker : job"),
            "Queue_1 --> Worker : job"
        );
    }

    #[test]
    fn test_dedupe_titles() {
        assert_eq!(
            dedupe_titles("title \"A\"\nx\ntitle \"B\"\nTitle \"C\""),
            "title \"A\"\nx"
        );
    }

    #[test]
    fn test_fix_tokens_heals_common_mistakes() {
        let input = "Title: Payment Flow\n\
                     Actor Customer\n\
                     participant \"Payment Gateway\" as Gateway\n\
                     Gateway <-- Customer : pay (card)\n\
                     Customer -> Gateway";
        let fixed = fix_tokens(input);

        assert_eq!(
            fixed,
            "@startuml\n\
             title \"Payment Flow\"\n\
             participant Customer\n\
             participant Gateway\n\
             Customer --> Gateway : pay card\n\
             Customer -> Gateway : request\n\
             @enduml"
        );
        assert_eq!(validate(&fixed), ValidationResult::Valid);
    }

    #[test]
    fn test_fix_tokens_leaves_unrecognized_lines() {
        let fixed = fix_tokens("class Config {\nparticipant A");
        assert!(fixed.contains("class Config {"));
    }
}
