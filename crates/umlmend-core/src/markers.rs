//! Fragment delimiters.
//!
//! A diagram fragment is the text between a [`START_MARKER`] line and the next
//! [`END_MARKER`] line.

/// Literal that opens a diagram fragment.
pub const START_MARKER: &str = "@startuml";

/// Literal that closes a diagram fragment.
pub const END_MARKER: &str = "@enduml";

/// A recognized marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Start,
    End,
}

impl Marker {
    /// Returns the canonical literal for this marker.
    pub fn as_str(self) -> &'static str {
        match self {
            Marker::Start => START_MARKER,
            Marker::End => END_MARKER,
        }
    }

    /// Classifies a line as a marker line.
    ///
    /// The trimmed line must begin with a marker literal, compared ASCII
    /// case-insensitively. Trailing text such as a diagram name
    /// (`@startuml login`) is tolerated.
    pub fn of_line(line: &str) -> Option<Marker> {
        let trimmed = line.trim();
        if starts_with_ignore_case(trimmed, START_MARKER) {
            Some(Marker::Start)
        } else if starts_with_ignore_case(trimmed, END_MARKER) {
            Some(Marker::End)
        } else {
            None
        }
    }
}

/// Returns `true` if `text` contains either marker literal anywhere,
/// ASCII case-insensitively.
pub fn contains_marker(text: &str) -> bool {
    let lowered = text.to_ascii_lowercase();
    lowered.contains(START_MARKER) || lowered.contains(END_MARKER)
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_line_exact() {
        assert_eq!(Marker::of_line("@startuml"), Some(Marker::Start));
        assert_eq!(Marker::of_line("@enduml"), Some(Marker::End));
    }

    #[test]
    fn test_of_line_tolerant() {
        assert_eq!(Marker::of_line("   @StartUML login  "), Some(Marker::Start));
        assert_eq!(Marker::of_line("@ENDUML\r"), Some(Marker::End));
    }

    #[test]
    fn test_of_line_rejects_other_text() {
        assert_eq!(Marker::of_line("see @startuml below"), None);
        assert_eq!(Marker::of_line("@start"), None);
        assert_eq!(Marker::of_line(""), None);
        // Multi-byte text shorter than the marker must not panic
        assert_eq!(Marker::of_line("é"), None);
    }

    #[test]
    fn test_contains_marker() {
        assert!(contains_marker("A -> B : see @EndUml"));
        assert!(!contains_marker("A -> B : hello"));
    }
}
