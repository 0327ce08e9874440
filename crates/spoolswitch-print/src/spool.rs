// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transient spool file handed to the OS print action.
//
// One uniquely named `.txt` file per dispatch. The file is removed when the
// `SpoolFile` is dropped, on success and failure paths alike. Removal errors
// are swallowed (the OS temp area is cleaned eventually).

use std::path::{Path, PathBuf};

use tracing::{info, trace};

use spoolswitch_core::error::{PrintSwitchError, Result};

/// Filename prefix, so stray files are easy to identify in the temp folder.
const PREFIX: &str = "spoolswitch-";

/// Extension that selects the plain-text print handler.
const SUFFIX: &str = ".txt";

/// A spool file that deletes itself on drop.
#[derive(Debug)]
pub struct SpoolFile {
    path: PathBuf,
}

impl SpoolFile {
    /// Create an empty, uniquely named spool file in `dir`.
    pub fn create_in(dir: &Path) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(PREFIX)
            .suffix(SUFFIX)
            .tempfile_in(dir)?;
        // Close our handle so the print handler can open the file freely;
        // removal is ours from here on.
        let path = file.into_temp_path().keep().map_err(|e| e.error)?;
        trace!(path = %path.display(), "spool file created");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file contents with `bytes`.
    pub fn write(&self, bytes: &[u8]) -> Result<()> {
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}

impl Drop for SpoolFile {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => info!(path = %self.path.display(), "temporary file cleaned up"),
            Err(e) => {
                let err = PrintSwitchError::TempFileCleanupFailed(e.to_string());
                trace!(path = %self.path.display(), error = %err, "ignoring cleanup failure");
            }
        }
    }
}

/// Use the platform's native line endings for the spool file.
///
/// Windows text handlers expect CRLF; elsewhere `\n` is kept. Existing CRLF
/// pairs are not doubled.
pub fn native_line_endings(text: &str) -> String {
    if cfg!(windows) {
        text.replace("\r\n", "\n").replace('\n', "\r\n")
    } else {
        text.to_string()
    }
}
