//! Structural repair.
//!
//! The repairer scans a fragment line by line and keeps only what it can
//! recognize: the first title, participant declarations and interactions.
//! Everything else is discarded. The result is always a [`Diagram`], even for
//! input with nothing recognizable in it.

use log::{debug, trace};

use umlmend_core::{
    markers::Marker,
    semantic::{Diagram, Interaction, InteractionKind},
};

use crate::{
    arrow::{self, split_message},
    text::{after_leading_word, clean_title, starts_with_any_keyword, starts_with_keyword},
};

use super::{PARTICIPANT_KEYWORDS, declared_name, salvage_interaction};

/// Title used when the fragment has none.
pub const DEFAULT_TITLE: &str = "System Flow";

/// Declarations borrowed from structural diagrams, harvested as participant
/// names in [`RepairMode::Reconstruct`].
const CLASS_STYLE_KEYWORDS: [&str; 9] = [
    "class",
    "interface",
    "component",
    "node",
    "abstract",
    "enum",
    "object",
    "usecase",
    "rectangle",
];

/// How aggressively the repairer reconstructs a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepairMode {
    /// Keep recognized lines; never invent interactions.
    Rebuild,
    /// Also harvest names from class-style declarations, and synthesize a
    /// request/response pair when no interaction survived.
    Reconstruct,
}

/// A recognized fragment line.
#[derive(Debug)]
enum Salvaged {
    Title(String),
    Participant(String),
    Interaction(Interaction),
}

/// Line-by-line fragment reconstruction.
///
/// # Examples
///
/// ```
/// use umlmend_parser::repair::{RepairMode, StructuralRepairer};
///
/// let repairer = StructuralRepairer::new(RepairMode::Reconstruct);
/// let diagram = repairer.repair("class Cart {\nclass Payment {\n}");
///
/// assert_eq!(diagram.title(), "System Flow");
/// assert_eq!(diagram.interactions().len(), 2);
/// assert!(diagram.is_well_formed());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StructuralRepairer {
    mode: RepairMode,
}

impl StructuralRepairer {
    /// Create a repairer working in the given mode.
    pub fn new(mode: RepairMode) -> Self {
        Self { mode }
    }

    /// Rebuild `text` into a diagram from its recognizable lines.
    pub fn repair(&self, text: &str) -> Diagram {
        let mut title: Option<String> = None;
        let mut participants: Vec<String> = Vec::new();
        let mut interactions: Vec<Interaction> = Vec::new();

        for line in text.lines() {
            match self.salvage(line) {
                Some(Salvaged::Title(text)) => {
                    title.get_or_insert(text);
                }
                Some(Salvaged::Participant(name)) => participants.push(name),
                Some(Salvaged::Interaction(interaction)) => interactions.push(interaction),
                None => {
                    if !line.trim().is_empty() {
                        trace!(line; "Structural repair discarded line");
                    }
                }
            }
        }

        let mut diagram = Diagram::new(title.unwrap_or_else(|| DEFAULT_TITLE.to_string()));
        for name in participants {
            diagram.add_participant(name);
        }
        for interaction in interactions {
            diagram.add_interaction(interaction);
        }

        if self.mode == RepairMode::Reconstruct && diagram.interactions().is_empty() {
            synthesize_exchange(&mut diagram);
        }

        debug!(
            mode:? = self.mode,
            participants = diagram.participants().len(),
            interactions = diagram.interactions().len();
            "Structural repair finished"
        );
        diagram
    }

    fn participant_keyword(&self, line: &str) -> bool {
        starts_with_any_keyword(line, &PARTICIPANT_KEYWORDS)
            || (self.mode == RepairMode::Reconstruct
                && starts_with_any_keyword(line, &CLASS_STYLE_KEYWORDS))
    }

    /// Classifies one line leniently. Title-like lines take priority over
    /// declarations, declarations over interactions.
    fn salvage(&self, line: &str) -> Option<Salvaged> {
        if Marker::of_line(line).is_some() {
            return None;
        }

        if starts_with_keyword(line, "title") {
            let title = clean_title(after_leading_word(line));
            return (!title.is_empty()).then_some(Salvaged::Title(title));
        }

        let forward = arrow::find_forward(line);
        let reverse = arrow::find_reverse(line);

        if forward.is_none() && reverse.is_none() && self.participant_keyword(line) {
            return declared_name(line).map(Salvaged::Participant);
        }

        if let Some(found) = forward {
            let (target, message) = split_message(found.target);
            return salvage_interaction(found.source, target, message, found.kind)
                .map(Salvaged::Interaction);
        }
        if let Some(found) = reverse {
            let (source, message) = split_message(found.source);
            return salvage_interaction(source, found.target, message, found.kind)
                .map(Salvaged::Interaction);
        }

        None
    }
}

/// Adds one request/response pair between the first two participants.
fn synthesize_exchange(diagram: &mut Diagram) {
    let participants = diagram.participants();
    let (Some(first), Some(second)) = (participants.get_index(0), participants.get_index(1))
    else {
        return;
    };
    let (first, second) = (first.name().to_string(), second.name().to_string());

    for (from, to, kind) in [
        (&first, &second, InteractionKind::Synchronous),
        (&second, &first, InteractionKind::Response),
    ] {
        diagram.add_interaction(Interaction::new(
            from.as_str(),
            to.as_str(),
            kind.default_message(),
            kind,
        ));
    }
}
