//! Named text rewrite rules.
//!
//! The sanitizer and the token-level repair toolkit are both expressed as an
//! ordered slice of [`RewriteRule`]s. Each rule is a total function over the
//! whole fragment text and can be exercised on its own.

use std::fmt;

use log::trace;

/// A single named, total text transformation.
#[derive(Clone, Copy)]
pub struct RewriteRule {
    name: &'static str,
    apply: fn(&str) -> String,
}

impl RewriteRule {
    /// Create a rule from a name and a rewrite function.
    pub const fn new(name: &'static str, apply: fn(&str) -> String) -> Self {
        Self { name, apply }
    }

    /// Returns the rule name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply this rule to `text`.
    pub fn apply(&self, text: &str) -> String {
        (self.apply)(text)
    }
}

impl fmt::Debug for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewriteRule")
            .field("name", &self.name)
            .finish()
    }
}

/// Apply `rules` to `text` in order, feeding each rule the previous output.
pub fn apply_rules(rules: &[RewriteRule], text: &str) -> String {
    rules.iter().fold(text.to_string(), |current, rule| {
        let next = rule.apply(&current);
        if next != current {
            trace!(rule = rule.name(); "Rewrite rule changed fragment");
        }
        next
    })
}
