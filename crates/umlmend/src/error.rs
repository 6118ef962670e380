//! Error types for Umlmend operations.
//!
//! Healing itself never fails. [`UmlmendError`] covers the surfaces around
//! it: reading input, loading configuration and writing diagrams.

use std::io;

use thiserror::Error;

/// The main error type for Umlmend operations.
#[derive(Debug, Error)]
pub enum UmlmendError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for UmlmendError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
