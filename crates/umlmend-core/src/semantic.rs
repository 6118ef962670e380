//! Semantic model for sequence diagrams.
//!
//! A [`Diagram`] is the terminal artifact of the healing pipeline: a title, an
//! ordered set of [`Participant`]s and an ordered list of [`Interaction`]s. Its
//! [`Display`](fmt::Display) implementation produces the canonical textual form
//! that is handed to the external renderer.

use std::fmt;

use indexmap::IndexSet;

use crate::markers::{END_MARKER, START_MARKER};

/// A named lifeline in a sequence diagram.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Participant {
    name: String,
}

impl Participant {
    /// Create a participant with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the participant name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "participant {}", self.name)
    }
}

/// The kind of an interaction arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionKind {
    /// A synchronous request, written `->`.
    #[default]
    Synchronous,
    /// A response, written `-->`.
    Response,
}

impl InteractionKind {
    /// Returns the canonical arrow token for this kind.
    pub fn arrow(self) -> &'static str {
        match self {
            InteractionKind::Synchronous => "->",
            InteractionKind::Response => "-->",
        }
    }

    /// Returns the message used when an interaction of this kind has none.
    pub fn default_message(self) -> &'static str {
        match self {
            InteractionKind::Synchronous => "request",
            InteractionKind::Response => "response",
        }
    }
}

/// A directed message between two participants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interaction {
    from: String,
    to: String,
    message: String,
    kind: InteractionKind,
}

impl Interaction {
    /// Create a new interaction.
    ///
    /// # Arguments
    ///
    /// * `from` - Name of the sending participant.
    /// * `to` - Name of the receiving participant.
    /// * `message` - Message label attached to the arrow.
    /// * `kind` - Whether this is a request or a response.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        message: impl Into<String>,
        kind: InteractionKind,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            message: message.into(),
            kind,
        }
    }

    /// Returns the sending participant name.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Returns the receiving participant name.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Returns the message label.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the interaction kind.
    pub fn kind(&self) -> InteractionKind {
        self.kind
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} : {}",
            self.from,
            self.kind.arrow(),
            self.to,
            self.message
        )
    }
}

/// A structured sequence diagram.
///
/// Participants keep their first-seen order. Adding an interaction implicitly
/// adds both of its endpoints to the participant set, so every interaction of
/// a `Diagram` built through [`Diagram::add_interaction`] references known
/// participants.
///
/// # Examples
///
/// ```
/// use umlmend_core::semantic::{Diagram, Interaction, InteractionKind};
///
/// let mut diagram = Diagram::new("Login");
/// diagram.add_interaction(Interaction::new(
///     "User",
///     "Server",
///     "submit",
///     InteractionKind::Synchronous,
/// ));
///
/// assert_eq!(diagram.participants().len(), 2);
/// assert!(diagram.is_well_formed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    title: String,
    participants: IndexSet<Participant>,
    interactions: Vec<Interaction>,
}

impl Diagram {
    /// Create an empty diagram with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            participants: IndexSet::new(),
            interactions: Vec::new(),
        }
    }

    /// Returns the diagram title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the participants in first-seen order.
    pub fn participants(&self) -> &IndexSet<Participant> {
        &self.participants
    }

    /// Returns the interactions in order.
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Returns `true` if a participant with this name is present.
    pub fn has_participant(&self, name: &str) -> bool {
        self.participants.contains(&Participant::new(name))
    }

    /// Add a participant. Returns `false` if it was already present.
    pub fn add_participant(&mut self, name: impl Into<String>) -> bool {
        self.participants.insert(Participant::new(name))
    }

    /// Append an interaction, declaring its endpoints if needed.
    pub fn add_interaction(&mut self, interaction: Interaction) {
        self.add_participant(interaction.from());
        self.add_participant(interaction.to());
        self.interactions.push(interaction);
    }

    /// Returns `true` if the diagram has a non-empty title, at least two
    /// participants and at least one interaction.
    pub fn is_well_formed(&self) -> bool {
        !self.title.trim().is_empty()
            && self.participants.len() >= 2
            && !self.interactions.is_empty()
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{START_MARKER}")?;
        writeln!(f, "title \"{}\"", self.title)?;
        for participant in &self.participants {
            writeln!(f, "{participant}")?;
        }
        for interaction in &self.interactions {
            writeln!(f, "{interaction}")?;
        }
        write!(f, "{END_MARKER}")
    }
}
