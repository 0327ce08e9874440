// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for targets with neither the Win32 spooler nor CUPS.
//
// Every call returns `PlatformUnavailable`; the dispatcher absorbs the
// registry failures and reports the submission failure.

use std::path::Path;

use spoolswitch_core::error::{PrintSwitchError, Result};

use crate::traits::*;

/// No-op bridge returned on unsupported platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "unsupported (stub)"
    }
}

impl PrinterRegistry for StubBridge {
    fn default_printer(&self) -> Result<String> {
        tracing::warn!("PrinterRegistry::default_printer called on stub bridge");
        Err(PrintSwitchError::PlatformUnavailable)
    }

    fn set_default_printer(&self, _name: &str) -> Result<()> {
        tracing::warn!("PrinterRegistry::set_default_printer called on stub bridge");
        Err(PrintSwitchError::PlatformUnavailable)
    }
}

impl DocumentLauncher for StubBridge {
    fn print_file(&self, _path: &Path) -> Result<()> {
        tracing::warn!("DocumentLauncher::print_file called on stub bridge");
        Err(PrintSwitchError::PlatformUnavailable)
    }
}
