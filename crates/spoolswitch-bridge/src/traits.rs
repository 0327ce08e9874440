// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the OS printing primitives.
//
// The dispatcher only ever talks to these traits, so tests drive it with
// in-memory fakes and never touch the real default printer.

use std::path::Path;

use spoolswitch_core::error::Result;

/// Unified bridge that groups the native capabilities the dispatcher needs.
pub trait PlatformBridge: PrinterRegistry + DocumentLauncher {
    /// Human-readable platform name (e.g. "Windows", "CUPS").
    fn platform_name(&self) -> &str;
}

/// The OS-wide default printer setting.
///
/// This is shared mutable state outside the process: nothing here locks it,
/// so two callers switching printers at once will race.
pub trait PrinterRegistry {
    /// Name of the current default printer.
    fn default_printer(&self) -> Result<String>;

    /// Make `name` the default printer. Fails for unknown or inaccessible
    /// printers.
    fn set_default_printer(&self, name: &str) -> Result<()>;
}

/// Hands a file to the OS "print" action for its type.
pub trait DocumentLauncher {
    /// Ask the OS to print `path` on the default printer.
    ///
    /// Returns once the request has been handed off; the document may still
    /// be spooling (or fail later) when this returns `Ok`.
    fn print_file(&self, path: &Path) -> Result<()>;
}

impl<T: PrinterRegistry + ?Sized> PrinterRegistry for &T {
    fn default_printer(&self) -> Result<String> {
        (**self).default_printer()
    }

    fn set_default_printer(&self, name: &str) -> Result<()> {
        (**self).set_default_printer(name)
    }
}

impl<T: DocumentLauncher + ?Sized> DocumentLauncher for &T {
    fn print_file(&self, path: &Path) -> Result<()> {
        (**self).print_file(path)
    }
}

impl<T: PrinterRegistry + ?Sized> PrinterRegistry for Box<T> {
    fn default_printer(&self) -> Result<String> {
        (**self).default_printer()
    }

    fn set_default_printer(&self, name: &str) -> Result<()> {
        (**self).set_default_printer(name)
    }
}

impl<T: DocumentLauncher + ?Sized> DocumentLauncher for Box<T> {
    fn print_file(&self, path: &Path) -> Result<()> {
        (**self).print_file(path)
    }
}
