// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operator-facing error messages.
//
// Every technical error maps to a one-line summary and a concrete thing to
// try. The CLI prints these instead of raw error chains.

use crate::error::PrintSwitchError;

/// Severity of an error from the operator's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Spooler busy, handler slow to start; running again may work.
    Transient,
    /// The operator must change something (printer name, file association).
    ActionRequired,
    /// Retrying will not help.
    Permanent,
}

/// A human-readable error with a plain summary and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    pub message: String,
    pub suggestion: String,
    /// Whether running the same command again might succeed.
    pub retriable: bool,
    pub severity: Severity,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n  {}", self.message, self.suggestion)?;
        if self.retriable {
            write!(f, "\n  Running the same command again may work.")?;
        }
        Ok(())
    }
}

/// Convert a `PrintSwitchError` into a `HumanError`.
pub fn humanize_error(err: &PrintSwitchError) -> HumanError {
    match err {
        PrintSwitchError::PrinterQueryFailed(_) => HumanError {
            message: "The current default printer could not be read.".into(),
            suggestion: "Check that a default printer is set in the system printer settings.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        PrintSwitchError::PrinterSwitchFailed { printer, .. } => HumanError {
            message: format!("Could not switch to printer '{printer}'."),
            suggestion: "Check the name after ::PRINTER:: matches an installed printer exactly.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PrintSwitchError::PrinterRestoreFailed { printer, .. } => HumanError {
            message: format!("The default printer was not switched back to '{printer}'."),
            suggestion: "Set it again by hand in the system printer settings.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PrintSwitchError::TempFileCleanupFailed(_) => HumanError {
            message: "A temporary print file was left behind.".into(),
            suggestion: "It is safe to delete it from the temp folder.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        PrintSwitchError::PrintSubmissionFailed { last_error, .. } => {
            humanize_submission(last_error)
        }

        PrintSwitchError::UnknownEncoding(label) => HumanError {
            message: format!("'{label}' is not a usable codepage."),
            suggestion: "Set \"codepage\" in config.json to a legacy encoding such as shift_jis or windows-1252.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PrintSwitchError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "The file couldn't be found.".into(),
                suggestion: "It may have been moved or deleted. Check the path and try again.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission denied while reading or writing a file.".into(),
                suggestion: "Check the file permissions and that the temp folder is writable.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::InvalidData => HumanError {
                message: "The input file is not valid UTF-8 text.".into(),
                suggestion: "Save the file as UTF-8 and try again.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "There was a problem reading or writing a file.".into(),
                suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                retriable: true,
                severity: Severity::Transient,
            },
        },

        PrintSwitchError::Config(_) | PrintSwitchError::Serialization(_) => HumanError {
            message: "The configuration file could not be used.".into(),
            suggestion: "Fix or delete config.json; defaults apply when it is missing.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PrintSwitchError::Bridge(detail) => humanize_submission_detail(detail),

        PrintSwitchError::PlatformUnavailable => HumanError {
            message: "Printing is not supported on this system.".into(),
            suggestion: "spoolswitch needs Windows or a CUPS-based system (Linux, macOS).".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

fn humanize_submission(last_error: &PrintSwitchError) -> HumanError {
    match last_error {
        PrintSwitchError::Bridge(detail) => humanize_submission_detail(detail),
        other => humanize_error(other),
    }
}

/// Map the text reported by the OS print pathway to a message.
fn humanize_submission_detail(detail: &str) -> HumanError {
    let lower = detail.to_ascii_lowercase();

    if lower.contains("no association") || lower.contains("no application") {
        HumanError {
            message: "No program is registered to print text files.".into(),
            suggestion: "Associate .txt files with a program that supports printing (e.g. Notepad).".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("unknown destination")
        || lower.contains("does not exist")
        || lower.contains("no default destination")
    {
        HumanError {
            message: "There is no printer to send the job to.".into(),
            suggestion: "Set a default printer, or name one with a ::PRINTER:: first line.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("scheduler is not running") || lower.contains("spooler") {
        HumanError {
            message: "The print spooler is not running.".into(),
            suggestion: "Start the print service and try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        }
    } else if lower.contains("access denied") || lower.contains("not authorized") {
        HumanError {
            message: "The system refused the print request.".into(),
            suggestion: "Check that your account is allowed to print to this printer.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        }
    } else {
        HumanError {
            message: "The document was not handed to the printer.".into(),
            suggestion: format!("Try again. If this keeps happening, print a test page from the system settings. (Detail: {detail})"),
            retriable: true,
            severity: Severity::Transient,
        }
    }
}
