//! Umlmend - validation and self-healing of generated sequence diagrams.
//!
//! Text produced by a generative model is scanned for diagram fragments. Each
//! fragment is sanitized, validated and, when invalid, repaired through a
//! bounded series of increasingly aggressive repair levels. A fragment that
//! cannot be repaired is replaced by a fallback template, so every non-blank
//! fragment yields exactly one valid diagram.

pub mod config;
pub mod export;
pub mod fallback;
pub mod heal;

mod error;

pub use umlmend_core::{identifier, markers, semantic};
pub use umlmend_parser::{
    Fragments, InvalidReason, RawFragment, ValidationResult, extract, sanitize, strip_fragments,
    validate,
};

pub use error::UmlmendError;
pub use heal::{AttemptRecord, HealedDiagram, Outcome, RepairLevel};

use std::{num::NonZeroUsize, panic, thread};

use log::{debug, info};

use config::AppConfig;
use heal::heal_fragment;

/// Heals every diagram fragment of a generated text.
///
/// # Examples
///
/// ```
/// use umlmend::{DiagramHealer, Outcome, config::AppConfig};
///
/// let text = "Here is the flow:\n\
///             @startuml\n\
///             title \"Ping\"\n\
///             participant A\n\
///             participant B\n\
///             A -> B : ping\n\
///             @enduml";
///
/// let healer = DiagramHealer::new(AppConfig::default());
/// let healed = healer.heal(text);
///
/// assert_eq!(healed.len(), 1);
/// assert_eq!(healed[0].outcome(), Outcome::Clean);
/// assert_eq!(healed[0].diagram().title(), "Ping");
/// ```
#[derive(Debug, Default)]
pub struct DiagramHealer {
    config: AppConfig,
}

impl DiagramHealer {
    /// Create a new healer with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including the repair budget
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Extract and heal every fragment of `text`.
    ///
    /// The result holds one entry per non-blank fragment, in fragment order.
    pub fn heal(&self, text: &str) -> Vec<HealedDiagram> {
        info!(bytes = text.len(); "Healing generated text");
        self.heal_fragments(extract(text))
    }

    /// Heal already extracted fragments.
    ///
    /// Blank fragments are dropped before healing. The output preserves the
    /// order of the input, also when fragments are healed in parallel.
    pub fn heal_fragments<'a, I>(&self, fragments: I) -> Vec<HealedDiagram>
    where
        I: IntoIterator<Item = RawFragment<'a>>,
    {
        let fragments: Vec<RawFragment<'a>> = fragments
            .into_iter()
            .filter(|fragment| {
                if fragment.is_blank() {
                    debug!(ordinal = fragment.ordinal(); "Dropping blank fragment");
                }
                !fragment.is_blank()
            })
            .collect();

        let healing = self.config.healing();
        let healed = if healing.parallel() && fragments.len() > 1 {
            heal_parallel(&fragments, healing.max_attempts())
        } else {
            fragments
                .iter()
                .map(|fragment| heal_fragment(fragment, healing.max_attempts()))
                .collect()
        };

        info!(
            fragments = healed.len(),
            fallbacks = healed.iter().filter(|h| h.outcome().is_fallback()).count();
            "Healing finished"
        );
        healed
    }
}

/// Heal fragments on scoped worker threads, one contiguous chunk per worker.
fn heal_parallel(fragments: &[RawFragment<'_>], max_attempts: u8) -> Vec<HealedDiagram> {
    let workers = thread::available_parallelism()
        .map_or(1, NonZeroUsize::get)
        .min(fragments.len());
    let chunk_size = fragments.len().div_ceil(workers.max(1));
    debug!(workers, chunk_size; "Healing in parallel");

    thread::scope(|scope| {
        let handles: Vec<_> = fragments
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|fragment| heal_fragment(fragment, max_attempts))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(healed) => healed,
                Err(payload) => panic::resume_unwind(payload),
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use config::HealingConfig;

    const MIXED: &str = "intro\n\
                         @startuml\n\
                         title \"Ping\"\n\
                         participant A\n\
                         participant B\n\
                         A -> B : ping\n\
                         @enduml\n\
                         @startuml\n\
                         @enduml\n\
                         @startuml\n\
                         junk\n\
                         @enduml\n\
                         @startuml\n\
                         Actor A\n\
                         participant B\n\
                         B <- A : ping\n\
                         title Hello\n\
                         @enduml";

    #[test]
    fn test_heal_drops_blank_fragments_and_keeps_ordinals() {
        let healed = DiagramHealer::default().heal(MIXED);

        let ordinals: Vec<usize> = healed.iter().map(HealedDiagram::ordinal).collect();
        assert_eq!(ordinals, [0, 2, 3]);
        assert_eq!(healed[0].outcome(), Outcome::Clean);
        assert!(healed[1].outcome().is_fallback());
        assert_eq!(healed[1].diagram(), &fallback::fallback(2));
        assert_eq!(healed[2].outcome(), Outcome::Healed { attempts: 1 });
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let text = MIXED.repeat(5);
        let sequential = DiagramHealer::default().heal(&text);
        let parallel = DiagramHealer::new(AppConfig::new(
            HealingConfig::new(3, true),
            Default::default(),
        ))
        .heal(&text);

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_heal_without_fragments() {
        assert!(DiagramHealer::default().heal("just prose").is_empty());
    }

    #[test]
    fn test_max_attempts_from_config() {
        let healer = DiagramHealer::new(AppConfig::default().with_max_attempts(0));
        let healed = healer.heal(MIXED);
        assert!(healed[2].outcome().is_fallback());
    }
}
