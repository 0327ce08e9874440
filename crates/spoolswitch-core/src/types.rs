// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for spoolswitch.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Literal prefix of the first input line that names an override printer.
pub const PRINTER_DIRECTIVE: &str = "::PRINTER::";

/// Unique identifier for one dispatch call, used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bounded retry with doubling waits.
///
/// The wait before attempt `n + 1` (1-based `n`) is
/// `initial_wait * backoff_multiplier^(n - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total number of submission attempts, at least 1.
    pub max_retries: u32,
    /// Wait after the first failed attempt.
    pub initial_wait: Duration,
    /// Factor applied to the wait after every further failure.
    pub backoff_multiplier: u32,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_wait: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            initial_wait,
            backoff_multiplier: 2,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub job_id: JobId,
    /// Printer requested by the input directive, if any. Kept after a failed
    /// switch; `printer_switched` tells whether it was actually used.
    pub target_printer: Option<String>,
    /// Whether the OS default printer was switched to `target_printer`.
    pub printer_switched: bool,
    /// Whether the original default printer was put back afterwards.
    pub restored: bool,
    /// Submission attempts made, including the successful one.
    pub attempts: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
