//! The healing controller.
//!
//! Each fragment becomes a candidate driven through a small state machine:
//!
//! ```text
//! Fresh -> Attempt(1) -> Attempt(2) -> Attempt(3)
//!   |          |             |             |
//!   +----------+------+------+-------------+
//!                     v                    v
//!                  Healed              Exhausted -> fallback
//! ```
//!
//! `Fresh` sanitizes and validates without counting as an attempt. Attempt
//! `n` applies [`RepairLevel::for_attempt`]`(n)`, whose toolkit includes every
//! lower level, and validates again. The first valid result wins.

use std::fmt;

use log::{debug, trace, warn};

use umlmend_core::{
    markers::{END_MARKER, START_MARKER},
    semantic::Diagram,
};
use umlmend_parser::{
    InvalidReason, RawFragment, ValidationResult, check,
    repair::{RepairMode, StructuralRepairer, fix_tokens},
    sanitize,
};

use crate::fallback::fallback;

/// Upper bound on repair attempts after the initial sanitize pass.
pub const MAX_ATTEMPTS: u8 = 3;

/// The toolkit applied at a given point of the escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepairLevel {
    /// Sanitize only. Not counted as an attempt.
    Sanitize,
    /// Sanitize and fix common token-level mistakes.
    TokenFix,
    /// Token fixes, then a structural rebuild from recognized lines.
    Rebuild,
    /// Token fixes, then a structural reconstruction that may invent
    /// interactions.
    Reconstruct,
}

impl RepairLevel {
    /// Returns the level used by attempt number `attempt`. Attempt 0 is the
    /// sanitize pass; anything past the last level stays at
    /// [`RepairLevel::Reconstruct`].
    pub fn for_attempt(attempt: u8) -> Self {
        match attempt {
            0 => Self::Sanitize,
            1 => Self::TokenFix,
            2 => Self::Rebuild,
            _ => Self::Reconstruct,
        }
    }

    /// Returns the stable snake_case name of this level.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sanitize => "sanitize",
            Self::TokenFix => "token_fix",
            Self::Rebuild => "rebuild",
            Self::Reconstruct => "reconstruct",
        }
    }

    /// Applies this level's whole toolkit to `text`.
    fn apply(self, text: &str) -> String {
        match self {
            Self::Sanitize => sanitize(text),
            Self::TokenFix => fix_tokens(text),
            Self::Rebuild => StructuralRepairer::new(RepairMode::Rebuild)
                .repair(&fix_tokens(text))
                .to_string(),
            Self::Reconstruct => StructuralRepairer::new(RepairMode::Reconstruct)
                .repair(&fix_tokens(text))
                .to_string(),
        }
    }
}

impl fmt::Display for RepairLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// How the diagram for a fragment was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Valid after sanitization alone.
    Clean,
    /// Valid after the given number of repair attempts.
    Healed { attempts: u8 },
    /// Every level failed; the diagram is a fallback template.
    Fallback { reason: InvalidReason },
}

impl Outcome {
    /// Returns the stable snake_case name of this outcome.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Healed { .. } => "healed",
            Self::Fallback { .. } => "fallback",
        }
    }

    /// Returns `true` if the diagram was substituted from the fallback catalog.
    pub fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Verdict of one pass of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptRecord {
    level: RepairLevel,
    verdict: ValidationResult,
}

impl AttemptRecord {
    /// Returns the level that was applied.
    pub fn level(&self) -> RepairLevel {
        self.level
    }

    /// Returns the validation verdict for that level's output.
    pub fn verdict(&self) -> ValidationResult {
        self.verdict
    }
}

/// The final diagram for one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealedDiagram {
    ordinal: usize,
    diagram: Diagram,
    outcome: Outcome,
    attempts: Vec<AttemptRecord>,
}

impl HealedDiagram {
    /// Returns the ordinal of the fragment this diagram was produced for.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Returns the diagram.
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Returns how the diagram was obtained.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns every pass in order, starting with the sanitize pass.
    pub fn attempts(&self) -> &[AttemptRecord] {
        &self.attempts
    }
}

/// A fragment undergoing healing.
#[derive(Debug)]
struct Candidate {
    ordinal: usize,
    /// The fragment wrapped in markers. Every level starts from this text.
    source: String,
    /// Output of the latest pass.
    text: String,
    attempt: u8,
}

impl Candidate {
    fn new(fragment: &RawFragment<'_>) -> Self {
        let source = format!("{START_MARKER}\n{}\n{END_MARKER}", fragment.text());
        Self {
            ordinal: fragment.ordinal(),
            text: source.clone(),
            source,
            attempt: 0,
        }
    }

    fn run(&mut self, level: RepairLevel) -> Result<Diagram, InvalidReason> {
        self.text = level.apply(&self.source);
        trace!(
            ordinal = self.ordinal,
            level = level.as_str(),
            text = self.text.as_str();
            "Candidate rewritten"
        );
        check(&self.text)
    }
}

#[derive(Debug)]
enum State {
    Fresh,
    Attempt(u8),
    Healed(Diagram),
    Exhausted(InvalidReason),
}

/// Heal one fragment with at most `max_attempts` repair attempts.
///
/// Never fails: a fragment that no level can repair yields the fallback
/// template for its ordinal.
pub fn heal_fragment(fragment: &RawFragment<'_>, max_attempts: u8) -> HealedDiagram {
    let max_attempts = max_attempts.min(MAX_ATTEMPTS);
    let mut candidate = Candidate::new(fragment);
    let mut attempts = Vec::new();
    let mut state = State::Fresh;

    debug!(ordinal = candidate.ordinal, bytes = fragment.text().len(); "Healing fragment");

    loop {
        let level = match state {
            State::Fresh => RepairLevel::Sanitize,
            State::Attempt(attempt) => RepairLevel::for_attempt(attempt),
            State::Healed(diagram) => {
                let outcome = match candidate.attempt {
                    0 => Outcome::Clean,
                    n => Outcome::Healed { attempts: n },
                };
                debug!(ordinal = candidate.ordinal, outcome = outcome.as_str(); "Fragment healed");
                return HealedDiagram {
                    ordinal: candidate.ordinal,
                    diagram,
                    outcome,
                    attempts,
                };
            }
            State::Exhausted(reason) => {
                warn!(
                    ordinal = candidate.ordinal,
                    reason = reason.as_str();
                    "Healing exhausted, substituting fallback diagram"
                );
                return HealedDiagram {
                    ordinal: candidate.ordinal,
                    diagram: fallback(candidate.ordinal),
                    outcome: Outcome::Fallback { reason },
                    attempts,
                };
            }
        };

        let result = candidate.run(level);
        let verdict = match &result {
            Ok(_) => ValidationResult::Valid,
            Err(reason) => ValidationResult::Invalid(*reason),
        };
        debug!(
            ordinal = candidate.ordinal,
            level = level.as_str(),
            verdict:% = verdict;
            "Validated candidate"
        );
        attempts.push(AttemptRecord { level, verdict });

        state = match result {
            Ok(diagram) => State::Healed(diagram),
            Err(_) if candidate.attempt < max_attempts => {
                candidate.attempt += 1;
                State::Attempt(candidate.attempt)
            }
            Err(reason) => State::Exhausted(reason),
        };
    }
}
