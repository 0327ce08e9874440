// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for spoolswitch.

use thiserror::Error;

/// Top-level error type for all spoolswitch operations.
///
/// Only `PrintSubmissionFailed` ends a dispatch with a failure outcome once
/// the spool file exists. The printer-bookkeeping variants are logged and
/// absorbed by the dispatcher.
#[derive(Debug, Error)]
pub enum PrintSwitchError {
    // -- Printer bookkeeping (absorbed) --
    #[error("could not read the default printer: {0}")]
    PrinterQueryFailed(String),

    #[error("could not switch the default printer to '{printer}': {reason}")]
    PrinterSwitchFailed { printer: String, reason: String },

    #[error("could not restore the default printer to '{printer}': {reason}")]
    PrinterRestoreFailed { printer: String, reason: String },

    #[error("could not remove spool file: {0}")]
    TempFileCleanupFailed(String),

    // -- Submission (fatal) --
    #[error("print submission failed after {attempts} attempt(s): {last_error}")]
    PrintSubmissionFailed {
        attempts: u32,
        #[source]
        last_error: Box<PrintSwitchError>,
    },

    // -- Spool file / encoding --
    #[error("unsupported codepage '{0}': a legacy single- or double-byte encoding is required")]
    UnknownEncoding(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    // -- Configuration --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("printing is not available on this platform")]
    PlatformUnavailable,
}

impl PrintSwitchError {
    /// Whether this error ends a dispatch instead of being logged and absorbed.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::PrintSubmissionFailed { .. } | Self::Io(_) | Self::UnknownEncoding(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PrintSwitchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_submission_and_spool_errors_are_fatal() {
        let submission = PrintSwitchError::PrintSubmissionFailed {
            attempts: 3,
            last_error: Box::new(PrintSwitchError::Bridge("no association".into())),
        };
        assert!(submission.is_fatal());
        assert!(PrintSwitchError::UnknownEncoding("utf-8".into()).is_fatal());

        assert!(!PrintSwitchError::PrinterQueryFailed("rpc".into()).is_fatal());
        assert!(
            !PrintSwitchError::PrinterSwitchFailed {
                printer: "Label".into(),
                reason: "not found".into(),
            }
            .is_fatal()
        );
        assert!(!PrintSwitchError::TempFileCleanupFailed("busy".into()).is_fatal());
    }

    #[test]
    fn submission_failure_names_last_error() {
        let err = PrintSwitchError::PrintSubmissionFailed {
            attempts: 2,
            last_error: Box::new(PrintSwitchError::Bridge("access denied".into())),
        };
        let text = err.to_string();
        assert!(text.contains("2 attempt(s)"));
        assert!(text.contains("access denied"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
