//! Participant identifiers.
//!
//! An identifier matches `[A-Za-z][A-Za-z0-9_]*`. Generated text often names
//! participants with spaces, quotes or numbering (`"Web App"`, `1. User`);
//! [`to_identifier`] coerces such names into the grammar.

/// Returns `true` if `text` is a well-formed identifier.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Coerces free-form text into an identifier.
///
/// Characters outside `[A-Za-z0-9_]` act as word breaks; each word after the
/// first is joined with its first letter upper-cased. Leading characters that
/// cannot start an identifier are skipped. Returns `None` if nothing usable
/// remains.
///
/// Already well-formed identifiers are returned unchanged.
///
/// # Examples
///
/// ```
/// use umlmend_core::identifier::to_identifier;
///
/// assert_eq!(to_identifier("\"Web App\"").as_deref(), Some("WebApp"));
/// assert_eq!(to_identifier("1. user service").as_deref(), Some("userService"));
/// assert_eq!(to_identifier("---"), None);
/// ```
pub fn to_identifier(text: &str) -> Option<String> {
    if is_identifier(text) {
        return Some(text.to_string());
    }

    let mut ident = String::with_capacity(text.len());
    let mut word_break = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if ident.is_empty() && !c.is_ascii_alphabetic() {
                continue;
            }
            if word_break {
                ident.push(c.to_ascii_uppercase());
                word_break = false;
            } else {
                ident.push(c);
            }
        } else if !ident.is_empty() {
            word_break = true;
        }
    }

    (!ident.is_empty()).then_some(ident)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("User"));
        assert!(is_identifier("auth_service2"));
        assert!(!is_identifier("2fa"));
        assert!(!is_identifier("_private"));
        assert!(!is_identifier("Web App"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_to_identifier_keeps_identifiers() {
        for ident in ["User", "auth_Service2", "Queue_1"] {
            assert_eq!(to_identifier(ident).as_deref(), Some(ident));
        }
    }

    #[test]
    fn test_to_identifier_words() {
        assert_eq!(to_identifier("Web App").as_deref(), Some("WebApp"));
        assert_eq!(to_identifier("payment-gateway").as_deref(), Some("paymentGateway"));
    }

    #[test]
    fn test_to_identifier_skips_leading_noise() {
        assert_eq!(to_identifier("1. User").as_deref(), Some("User"));
        assert_eq!(to_identifier("__init").as_deref(), Some("init"));
    }

    #[test]
    fn test_to_identifier_drops_non_ascii() {
        assert_eq!(to_identifier("Café").as_deref(), Some("Caf"));
        assert_eq!(to_identifier("日本"), None);
    }

    #[test]
    fn test_to_identifier_empty() {
        assert_eq!(to_identifier(""), None);
        assert_eq!(to_identifier("\"\""), None);
    }
}
