// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The print dispatcher.
//
// One call: parse the printer directive, create the spool file, switch the
// default printer, write the body, submit with retry, let the spooler
// settle, then put the default printer back and delete the spool file.
//
// The spool file and the printer override are guards: whatever step fails,
// the override is undone first and the file removed second (reverse order
// of acquisition). Only a submission that never succeeded is reported as an
// error; printer bookkeeping failures are logged and absorbed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, info_span, warn};

use spoolswitch_bridge::traits::{DocumentLauncher, PrinterRegistry};
use spoolswitch_core::config::DispatchConfig;
use spoolswitch_core::error::{PrintSwitchError, Result};
use spoolswitch_core::types::{DispatchReport, JobId, RetryPolicy};

use crate::directive::PrintRequest;
use crate::encoding::LegacyEncoder;
use crate::retry::{Pause, RetryDecision, ThreadPause, should_retry};
use crate::spool::{SpoolFile, native_line_endings};

/// Default wait between a successful submission and spool file removal.
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(5);

/// Sends text to the OS print pathway.
///
/// Calls must be serialized: two dispatches running at once race on the
/// OS-wide default printer.
pub struct PrintDispatcher<R, L, P = ThreadPause> {
    registry: R,
    launcher: L,
    pause: P,
    policy: RetryPolicy,
    settle: Duration,
    encoder: LegacyEncoder,
    spool_dir: PathBuf,
}

impl<R, L> PrintDispatcher<R, L, ThreadPause>
where
    R: PrinterRegistry,
    L: DocumentLauncher,
{
    /// Dispatcher with the stock settings: 3 attempts, 2 s initial wait,
    /// 5 s settle, Shift_JIS spool files in the OS temp directory.
    pub fn new(registry: R, launcher: L) -> Self {
        Self {
            registry,
            launcher,
            pause: ThreadPause,
            policy: RetryPolicy::default(),
            settle: DEFAULT_SETTLE,
            encoder: LegacyEncoder::default(),
            spool_dir: std::env::temp_dir(),
        }
    }

    /// Dispatcher configured from a `DispatchConfig`.
    ///
    /// Fails if the configured codepage is unknown or not a legacy one.
    pub fn from_config(registry: R, launcher: L, config: &DispatchConfig) -> Result<Self> {
        let encoder = LegacyEncoder::for_label(&config.codepage)?;
        Ok(Self::new(registry, launcher)
            .with_retry_policy(config.retry_policy())
            .with_settle_delay(config.settle_delay())
            .with_encoder(encoder))
    }
}

impl<R, L, P> PrintDispatcher<R, L, P>
where
    R: PrinterRegistry,
    L: DocumentLauncher,
    P: Pause,
{
    pub fn with_pause<Q: Pause>(self, pause: Q) -> PrintDispatcher<R, L, Q> {
        PrintDispatcher {
            registry: self.registry,
            launcher: self.launcher,
            pause,
            policy: self.policy,
            settle: self.settle,
            encoder: self.encoder,
            spool_dir: self.spool_dir,
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Wait after a successful submission. The OS print action returns
    /// before the handler has read the file; this delay is a heuristic, not
    /// a completion guarantee.
    pub fn with_settle_delay(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn with_encoder(mut self, encoder: LegacyEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn with_spool_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spool_dir = dir.into();
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Print `text` with the configured retry policy.
    pub fn dispatch(&self, text: &str) -> Result<DispatchReport> {
        self.dispatch_with(text, self.policy)
    }

    /// Print `text` with an explicit retry policy.
    ///
    /// Errors: `PrintSubmissionFailed` when every attempt failed, or `Io`
    /// when the spool file could not be created or written (nothing was
    /// submitted in that case).
    pub fn dispatch_with(&self, text: &str, policy: RetryPolicy) -> Result<DispatchReport> {
        let job_id = JobId::new();
        let span = info_span!("dispatch", job = %job_id);
        let _enter = span.enter();
        let started_at = Utc::now();

        let request = PrintRequest::parse(text);
        if let Some(printer) = &request.target_printer {
            info!(printer = %printer, "target printer detected");
        }

        // Guards drop in reverse order: printer restored, then file removed.
        let spool = SpoolFile::create_in(&self.spool_dir)?;
        let mut printer = PrinterOverride::capture(&self.registry);
        if let Some(target) = request.target_printer.as_deref() {
            printer.switch_to(target);
        }

        info!(codepage = self.encoder.name(), "preparing print job");
        spool.write(&self.encoder.encode(&native_line_endings(&request.body)))?;

        let attempts = self.submit_with_retry(spool.path(), &policy)?;

        info!(settle_ms = self.settle.as_millis(), "waiting for print spooling");
        self.pause.pause(self.settle);

        let printer_switched = printer.is_switched();
        let restored = printer.restore();

        Ok(DispatchReport {
            job_id,
            target_printer: request.target_printer,
            printer_switched,
            restored,
            attempts,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Submit `path` until it succeeds or the policy is exhausted. Returns
    /// the number of attempts made.
    fn submit_with_retry(&self, path: &Path, policy: &RetryPolicy) -> Result<u32> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            if attempt > 1 {
                info!(attempt, max = policy.max_retries, "retry attempt");
            }

            let err = match self.launcher.print_file(path) {
                Ok(()) => {
                    info!(attempt, "print job sent successfully");
                    return Ok(attempt);
                }
                Err(err) => err,
            };
            warn!(attempt, error = %err, "error executing print command");

            match should_retry(attempt, policy) {
                RetryDecision::RetryAfter(delay) => self.pause.pause(delay),
                RetryDecision::Exhausted => {
                    let err = PrintSwitchError::PrintSubmissionFailed {
                        attempts: attempt,
                        last_error: Box::new(err),
                    };
                    error!(error = %err, "failed to send print job");
                    return Err(err);
                }
            }
        }
    }
}

/// Temporary switch of the OS default printer.
///
/// Restoration happens only if the original default was read AND the switch
/// succeeded. It runs at most once, either through `restore` or on drop.
struct PrinterOverride<'a, R: PrinterRegistry> {
    registry: &'a R,
    original: Option<String>,
    switched_to: Option<String>,
}

impl<'a, R: PrinterRegistry> PrinterOverride<'a, R> {
    fn capture(registry: &'a R) -> Self {
        let original = match registry.default_printer() {
            Ok(name) => {
                info!(printer = %name, "current default printer");
                Some(name)
            }
            Err(e) => {
                let err = PrintSwitchError::PrinterQueryFailed(e.to_string());
                warn!(error = %err, "default printer will not be restored");
                None
            }
        };
        Self {
            registry,
            original,
            switched_to: None,
        }
    }

    fn switch_to(&mut self, target: &str) {
        info!(printer = %target, "switching default printer");
        match self.registry.set_default_printer(target) {
            Ok(()) => self.switched_to = Some(target.to_string()),
            Err(e) => {
                let err = PrintSwitchError::PrinterSwitchFailed {
                    printer: target.to_string(),
                    reason: e.to_string(),
                };
                warn!(error = %err, "falling back to current default printer");
            }
        }
    }

    fn is_switched(&self) -> bool {
        self.switched_to.is_some()
    }

    /// Put the original default back. Returns whether it was restored.
    fn restore(&mut self) -> bool {
        let (Some(original), Some(_)) = (self.original.take(), self.switched_to.take()) else {
            return false;
        };
        info!(printer = %original, "restoring default printer");
        match self.registry.set_default_printer(&original) {
            Ok(()) => true,
            Err(e) => {
                let err = PrintSwitchError::PrinterRestoreFailed {
                    printer: original,
                    reason: e.to_string(),
                };
                warn!(error = %err, "default printer left switched");
                false
            }
        }
    }
}

impl<R: PrinterRegistry> Drop for PrinterOverride<'_, R> {
    fn drop(&mut self) {
        self.restore();
    }
}
