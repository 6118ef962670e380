//! Small text helpers shared by the sanitizer, validator and repairer.

/// Returns `true` for characters the validator accepts inside a fragment.
pub(crate) fn is_approved_char(c: char) -> bool {
    c.is_alphabetic()
        || c.is_ascii_digit()
        || c.is_whitespace()
        || matches!(c, '@' | '-' | '>' | '<' | ':' | '"' | '\'' | '_')
}

/// Returns the leading run of alphabetic characters of the trimmed line.
///
/// Keywords are recognized through this run so that the decision does not
/// depend on the whitespace that follows them.
pub(crate) fn leading_word(line: &str) -> &str {
    let line = line.trim_start();
    let end = line
        .char_indices()
        .find(|(_, c)| !c.is_alphabetic())
        .map_or(line.len(), |(idx, _)| idx);
    &line[..end]
}

/// Returns the text following the leading word.
pub(crate) fn after_leading_word(line: &str) -> &str {
    let line = line.trim_start();
    &line[leading_word(line).len()..]
}

/// Returns `true` if the leading word equals `keyword`, ASCII case-insensitively.
pub(crate) fn starts_with_keyword(line: &str, keyword: &str) -> bool {
    leading_word(line).eq_ignore_ascii_case(keyword)
}

/// Returns `true` if the leading word is one of `keywords`.
pub(crate) fn starts_with_any_keyword(line: &str, keywords: &[&str]) -> bool {
    let word = leading_word(line);
    keywords.iter().any(|keyword| word.eq_ignore_ascii_case(keyword))
}

/// Collapses every whitespace run to a single space and trims the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Applies `f` to every line, dropping lines for which it returns `None`.
pub(crate) fn map_lines<F>(text: &str, f: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    text.lines().filter_map(f).collect::<Vec<_>>().join("\n")
}

/// Reduces title text to letters, digits and single spaces.
pub(crate) fn clean_title(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    collapse_whitespace(&kept)
}

/// Reduces a message label to characters that cannot be mistaken for markup.
///
/// Tags are removed first; any remaining character outside the approved set,
/// as well as `<`, `>` and `@`, becomes a space.
pub(crate) fn clean_message(text: &str) -> String {
    let untagged = strip_tags(text);
    let kept: String = untagged
        .chars()
        .map(|c| {
            if is_approved_char(c) && !matches!(c, '<' | '>' | '@') {
                c
            } else {
                ' '
            }
        })
        .collect();
    collapse_whitespace(&kept)
}

/// Returns the byte range of the first HTML-like tag (`<b>`, `</div>`, `<br/>`).
fn find_tag(text: &str) -> Option<(usize, usize)> {
    for (open, _) in text.match_indices('<') {
        let after = &text[open + 1..];
        let name = after.strip_prefix('/').unwrap_or(after);
        if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            continue;
        }
        if let Some(close) = after.find('>') {
            return Some((open, open + 1 + close + 1));
        }
    }
    None
}

/// Returns `true` if the text contains an HTML-like tag.
pub(crate) fn contains_tag(text: &str) -> bool {
    find_tag(text).is_some()
}

/// Removes every HTML-like tag, keeping the text between tags.
pub(crate) fn strip_tags(text: &str) -> String {
    let mut remaining = text.to_string();
    while let Some((start, end)) = find_tag(&remaining) {
        remaining.replace_range(start..end, " ");
    }
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_word() {
        assert_eq!(leading_word("  title: Foo"), "title");
        assert_eq!(leading_word("note->B"), "note");
        assert_eq!(leading_word("@startuml"), "");
        assert_eq!(after_leading_word("Title \"X\""), " \"X\"");
    }

    #[test]
    fn test_keywords() {
        assert!(starts_with_keyword("TITLE x", "title"));
        assert!(!starts_with_keyword("titles x", "title"));
        assert!(starts_with_any_keyword("Actor User", &["actor", "database"]));
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title(" \"Order   Flow!\" "), "Order Flow");
        assert_eq!(clean_title("!!!"), "");
    }

    #[test]
    fn test_clean_message() {
        assert_eq!(clean_message("POST /api/login (json)"), "POST api login json");
        assert_eq!(clean_message("<b>bold</b> text"), "bold text");
        assert_eq!(clean_message("see @enduml"), "see enduml");
    }

    #[test]
    fn test_tags() {
        assert!(contains_tag("<div>"));
        assert!(contains_tag("a </b> c"));
        assert!(!contains_tag("A <- B"));
        assert!(!contains_tag("x < y"));
        assert!(!contains_tag("<b unterminated"));
        assert_eq!(collapse_whitespace(&strip_tags("<i>a</i> b")), "a b");
    }
}
