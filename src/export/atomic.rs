//! Output files that only appear once they are complete.
//!
//! Content is written to a temporary file next to the destination and
//! renamed over it on commit. Dropping a [`PendingFile`] without committing
//! removes the temporary file.

use std::fs::File;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Result, SmartPlotError};

pub struct PendingFile {
    file: NamedTempFile,
    dest: PathBuf,
}

impl PendingFile {
    /// Start a new output file for `dest`
    pub fn create(dest: &Path) -> Result<Self> {
        let dir = match dest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file = tempfile::Builder::new()
            .prefix(".smartplot-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| SmartPlotError::output(dest, e))?;

        Ok(Self {
            file,
            dest: dest.to_path_buf(),
        })
    }

    /// Path of the temporary file while it is being written
    pub fn temp_path(&self) -> &Path {
        self.file.path()
    }

    pub fn as_file_mut(&mut self) -> &mut File {
        self.file.as_file_mut()
    }

    /// Flush to disk and move into place
    pub fn commit(self) -> Result<PathBuf> {
        self.file
            .as_file()
            .sync_all()
            .map_err(|e| SmartPlotError::output(&self.dest, e))?;
        self.file
            .persist(&self.dest)
            .map_err(|e| SmartPlotError::output(&self.dest, e.error))?;
        tracing::debug!("Wrote {}", self.dest.display());
        Ok(self.dest)
    }
}

/// Commit files in order. If one fails, files already moved into place are
/// removed again and the remaining temp files are discarded.
pub fn commit_all(files: Vec<PendingFile>) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        match file.commit() {
            Ok(path) => written.push(path),
            Err(e) => {
                for path in &written {
                    if let Err(remove) = std::fs::remove_file(path) {
                        tracing::warn!("Could not remove {}: {}", path.display(), remove);
                    }
                }
                return Err(e);
            }
        }
    }
    Ok(written)
}
