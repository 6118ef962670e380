//! Text stages of the Umlmend healing pipeline.
//!
//! Generated text flows through these modules in order:
//!
//! 1. [`extract`] locates delimited diagram fragments.
//! 2. [`sanitize`] strips markup and normalizes titles and arrows.
//! 3. [`validate`] decides whether a fragment satisfies the diagram grammar.
//! 4. [`repair`] provides the token-level fixes and the structural repairer
//!    used by the healing controller in the `umlmend` crate.
//!
//! Every function here is pure and total: malformed input never produces an
//! error, only a different result.

pub mod extract;
pub mod line;
pub mod repair;
pub mod rules;
pub mod sanitize;
pub mod validate;

mod arrow;
mod text;

pub use extract::{Fragments, RawFragment, extract, strip_fragments};
pub use sanitize::sanitize;
pub use validate::{InvalidReason, ValidationResult, check, validate};
