//! Writing healed diagrams to disk.
//!
//! Each diagram is written in its canonical textual form, one file per
//! diagram, named by its 1-based position in the output.

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use log::{debug, info};
use thiserror::Error;

use crate::{UmlmendError, config::OutputConfig, heal::HealedDiagram};

/// Failure while writing diagram files.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Write every diagram into `dir` and return the written paths in order.
///
/// The directory is created if it does not exist. Existing files with the
/// same names are overwritten.
///
/// # Errors
///
/// Returns [`UmlmendError::Export`] if the directory cannot be created or a
/// file cannot be written.
pub fn write_diagrams(
    healed: &[HealedDiagram],
    dir: &Path,
    output: &OutputConfig,
) -> Result<Vec<PathBuf>, UmlmendError> {
    fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::with_capacity(healed.len());
    for (idx, entry) in healed.iter().enumerate() {
        let path = dir.join(output.file_name(idx + 1));
        fs::write(&path, format!("{}\n", entry.diagram())).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        debug!(
            path = path.display().to_string(),
            ordinal = entry.ordinal();
            "Diagram written"
        );
        paths.push(path);
    }

    info!(count = paths.len(); "Diagrams exported");
    Ok(paths)
}
