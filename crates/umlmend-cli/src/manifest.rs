//! The run manifest.
//!
//! `manifest.toml` lists every written diagram together with how it was
//! obtained, so callers can tell generated diagrams from substitutes.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;

use umlmend::{HealedDiagram, Outcome, UmlmendError};

/// File name of the manifest inside the output directory.
pub const MANIFEST_FILE: &str = "manifest.toml";

#[derive(Debug, Serialize)]
pub struct Manifest {
    diagrams: Vec<ManifestEntry>,
}

#[derive(Debug, Serialize)]
struct ManifestEntry {
    ordinal: usize,
    title: String,
    file: String,
    outcome: &'static str,
    /// Repair attempts after the sanitize pass.
    attempts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
}

impl Manifest {
    /// Build the manifest for diagrams written to `paths`, in the same order.
    pub fn new(healed: &[HealedDiagram], paths: &[PathBuf]) -> Self {
        let diagrams = healed
            .iter()
            .zip(paths)
            .map(|(entry, path)| ManifestEntry {
                ordinal: entry.ordinal(),
                title: entry.diagram().title().to_string(),
                file: path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                outcome: entry.outcome().as_str(),
                attempts: entry.attempts().len().saturating_sub(1),
                reason: match entry.outcome() {
                    Outcome::Fallback { reason } => Some(reason.as_str()),
                    Outcome::Clean | Outcome::Healed { .. } => None,
                },
            })
            .collect();
        Self { diagrams }
    }

    /// Serialize the manifest as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`UmlmendError::Export`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, UmlmendError> {
        toml::to_string(self).map_err(|err| UmlmendError::Export(Box::new(err)))
    }

    /// Write the manifest into `dir` and return its path.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write(&self, dir: &Path) -> Result<PathBuf, UmlmendError> {
        let path = dir.join(MANIFEST_FILE);
        fs::write(&path, self.to_toml()?)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use umlmend::DiagramHealer;

    use super::*;

    #[test]
    fn test_manifest_entries() {
        let text = "@startuml\n\
                    title \"Ping\"\n\
                    participant A\n\
                    participant B\n\
                    A -> B : ping\n\
                    @enduml\n\
                    @startuml\n\
                    nothing here\n\
                    @enduml";
        let healed = DiagramHealer::default().heal(text);
        let paths = vec![PathBuf::from("out/diagram-1.puml"), PathBuf::from("out/diagram-2.puml")];

        let manifest = Manifest::new(&healed, &paths).to_toml().unwrap();

        assert!(manifest.contains("[[diagrams]]"));
        assert!(manifest.contains("title = \"Ping\""));
        assert!(manifest.contains("file = \"diagram-2.puml\""));
        assert!(manifest.contains("outcome = \"fallback\""));
        assert!(manifest.contains("reason = \"too_few_lines\""));
        assert!(manifest.contains("attempts = 3"));
    }
}
