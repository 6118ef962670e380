//! Fallback diagram catalog.
//!
//! When healing is exhausted the fragment is replaced by one of a few
//! hand-authored sequence diagrams. The choice depends only on the fragment
//! ordinal, so the same input always yields the same substitutes.

use umlmend_core::semantic::{Diagram, Interaction, InteractionKind};

use InteractionKind::{Response, Synchronous};

/// Number of templates in the catalog.
pub const CATALOG_SIZE: usize = CATALOG.len();

struct Template {
    title: &'static str,
    participants: &'static [&'static str],
    interactions: &'static [(&'static str, &'static str, &'static str, InteractionKind)],
}

impl Template {
    fn to_diagram(&self) -> Diagram {
        let mut diagram = Diagram::new(self.title);
        for name in self.participants {
            diagram.add_participant(*name);
        }
        for (from, to, message, kind) in self.interactions {
            diagram.add_interaction(Interaction::new(*from, *to, *message, *kind));
        }
        diagram
    }
}

const CATALOG: [Template; 4] = [
    Template {
        title: "Request Processing Flow",
        participants: &["Client", "Server", "Database"],
        interactions: &[
            ("Client", "Server", "send request", Synchronous),
            ("Server", "Database", "query data", Synchronous),
            ("Database", "Server", "return rows", Response),
            ("Server", "Client", "send response", Response),
        ],
    },
    Template {
        title: "User Authentication Flow",
        participants: &["User", "AuthService", "TokenStore"],
        interactions: &[
            ("User", "AuthService", "submit credentials", Synchronous),
            ("AuthService", "TokenStore", "issue token", Synchronous),
            ("TokenStore", "AuthService", "token created", Response),
            ("AuthService", "User", "return session token", Response),
        ],
    },
    Template {
        title: "Data Synchronization Flow",
        participants: &["Scheduler", "SyncWorker", "Storage"],
        interactions: &[
            ("Scheduler", "SyncWorker", "start sync", Synchronous),
            ("SyncWorker", "Storage", "fetch changes", Synchronous),
            ("Storage", "SyncWorker", "changed records", Response),
            ("SyncWorker", "Scheduler", "sync complete", Response),
        ],
    },
    Template {
        title: "Event Notification Flow",
        participants: &["Publisher", "EventBus", "Subscriber"],
        interactions: &[
            ("Publisher", "EventBus", "publish event", Synchronous),
            ("EventBus", "Subscriber", "deliver event", Synchronous),
            ("Subscriber", "EventBus", "acknowledge", Response),
        ],
    },
];

/// Returns the fallback diagram for the fragment at `ordinal`.
///
/// # Examples
///
/// ```
/// use umlmend::fallback::{CATALOG_SIZE, fallback};
///
/// assert_eq!(fallback(1), fallback(1 + CATALOG_SIZE));
/// assert!(fallback(7).is_well_formed());
/// ```
pub fn fallback(ordinal: usize) -> Diagram {
    CATALOG[ordinal % CATALOG_SIZE].to_diagram()
}

#[cfg(test)]
mod tests {
    use umlmend_parser::{ValidationResult, validate};

    use super::*;

    #[test]
    fn test_every_template_validates() {
        for ordinal in 0..CATALOG_SIZE {
            let diagram = fallback(ordinal);
            assert!(diagram.is_well_formed());
            assert_eq!(
                validate(&diagram.to_string()),
                ValidationResult::Valid,
                "template {ordinal} must validate"
            );
        }
    }

    #[test]
    fn test_templates_are_distinct() {
        let titles: Vec<String> = (0..CATALOG_SIZE)
            .map(|ordinal| fallback(ordinal).title().to_string())
            .collect();
        for (idx, title) in titles.iter().enumerate() {
            assert!(!titles[idx + 1..].contains(title));
        }
    }

    #[test]
    fn test_selection_cycles() {
        assert_eq!(fallback(0).title(), "Request Processing Flow");
        assert_eq!(fallback(1).title(), "User Authentication Flow");
        assert_eq!(fallback(CATALOG_SIZE), fallback(0));
        assert_eq!(fallback(usize::MAX), fallback(usize::MAX % CATALOG_SIZE));
    }
}
