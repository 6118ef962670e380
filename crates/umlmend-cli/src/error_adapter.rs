//! Error adapter for converting UmlmendError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use umlmend::UmlmendError;

/// Adapter rendering a [`UmlmendError`] as a miette diagnostic.
///
/// None of the variants carry source locations, so only a code and help
/// text are provided.
pub struct ErrorAdapter<'a>(pub &'a UmlmendError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.0 {
            UmlmendError::Io(err) => Some(err),
            UmlmendError::Config(_) | UmlmendError::Export(_) => None,
        }
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            UmlmendError::Io(_) => "umlmend::io",
            UmlmendError::Config(_) => "umlmend::config",
            UmlmendError::Export(_) => "umlmend::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            UmlmendError::Io(_) => "check that the input file exists and is readable",
            UmlmendError::Config(_) => {
                "check the configuration file; healing.max_attempts must be between 0 and 3"
            }
            UmlmendError::Export(_) => "check that the output directory is writable",
        };
        Some(Box::new(help))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_codes() {
        let io_err = UmlmendError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let config_err = UmlmendError::Config("bad value".to_string());

        let io_code = ErrorAdapter(&io_err).code().map(|c| c.to_string());
        let config_code = ErrorAdapter(&config_err).code().map(|c| c.to_string());

        assert_eq!(io_code.as_deref(), Some("umlmend::io"));
        assert_eq!(config_code.as_deref(), Some("umlmend::config"));
    }

    #[test]
    fn test_display_and_source() {
        let err = UmlmendError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.to_string(), "I/O error: gone");
        assert!(std::error::Error::source(&adapter).is_some());
        assert!(adapter.help().is_some());
    }

    #[test]
    fn test_renders_with_graphical_handler() {
        let err = UmlmendError::Config("Validation error: too many attempts".to_string());
        let mut out = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut out, &ErrorAdapter(&err))
            .unwrap();

        assert!(out.contains("umlmend::config"));
        assert!(out.contains("too many attempts"));
    }
}
