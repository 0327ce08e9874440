// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// spoolswitch — Native printing bridges.
//
// Defines the capability traits the dispatcher consumes and picks the
// implementation for the target OS: the Win32 print spooler and shell on
// Windows, the CUPS command-line tools elsewhere on Unix, and a stub that
// refuses everything on other targets.

pub mod traits;

#[cfg(windows)]
pub mod windows;

#[cfg(unix)]
pub mod cups;

#[cfg(not(any(windows, unix)))]
pub mod stub;

pub use traits::{DocumentLauncher, PlatformBridge, PrinterRegistry};

/// Returns the bridge implementation for the target operating system.
pub fn platform_bridge() -> Box<dyn PlatformBridge> {
    #[cfg(windows)]
    {
        Box::new(windows::WindowsBridge)
    }
    #[cfg(unix)]
    {
        Box::new(cups::CupsBridge::new())
    }
    #[cfg(not(any(windows, unix)))]
    {
        Box::new(stub::StubBridge)
    }
}
