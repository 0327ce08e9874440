// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Windows bridge via windows-sys.
//
// The default printer is read and written through the spooler API
// (GetDefaultPrinterW / SetDefaultPrinterW). Submission uses the shell
// "print" verb (ShellExecuteW), which launches whatever program is
// registered to print the file's type and lets it talk to the spooler.
//
// All strings cross the FFI boundary as NUL-terminated UTF-16 buffers that
// live for the duration of the call.

#![cfg(windows)]

use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use tracing::debug;
use windows_sys::Win32::Graphics::Printing::{GetDefaultPrinterW, SetDefaultPrinterW};
use windows_sys::Win32::UI::Shell::ShellExecuteW;
use windows_sys::Win32::UI::WindowsAndMessaging::SW_HIDE;

use spoolswitch_core::error::{PrintSwitchError, Result};

use crate::traits::*;

/// Bridge backed by the Win32 spooler and shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsBridge;

impl PlatformBridge for WindowsBridge {
    fn platform_name(&self) -> &str {
        "Windows"
    }
}

impl PrinterRegistry for WindowsBridge {
    fn default_printer(&self) -> Result<String> {
        let mut len: u32 = 0;
        // First call only reports the required buffer size (in u16s, NUL included).
        // SAFETY: a null buffer with a valid length pointer is the documented size query.
        unsafe { GetDefaultPrinterW(ptr::null_mut(), &mut len) };
        if len == 0 {
            return Err(os_error("GetDefaultPrinterW"));
        }

        let mut buf = vec![0u16; len as usize];
        // SAFETY: `buf` holds exactly `len` u16s and outlives the call.
        let ok = unsafe { GetDefaultPrinterW(buf.as_mut_ptr(), &mut len) };
        if ok == 0 {
            return Err(os_error("GetDefaultPrinterW"));
        }

        let end = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
        Ok(String::from_utf16_lossy(&buf[..end]))
    }

    fn set_default_printer(&self, name: &str) -> Result<()> {
        let wide_name = wide(OsStr::new(name));
        // SAFETY: `wide_name` is NUL-terminated and outlives the call.
        let ok = unsafe { SetDefaultPrinterW(wide_name.as_ptr()) };
        if ok == 0 {
            return Err(os_error("SetDefaultPrinterW"));
        }
        Ok(())
    }
}

impl DocumentLauncher for WindowsBridge {
    fn print_file(&self, path: &Path) -> Result<()> {
        let verb = wide(OsStr::new("print"));
        let file = wide(path.as_os_str());
        let dir = wide(OsStr::new("."));

        // SAFETY: every pointer is a NUL-terminated buffer alive across the
        // call, or null where the API allows it.
        let instance = unsafe {
            ShellExecuteW(
                ptr::null_mut(),
                verb.as_ptr(),
                file.as_ptr(),
                ptr::null(),
                dir.as_ptr(),
                SW_HIDE,
            )
        };

        // ShellExecute reports success as any value greater than 32.
        let code = instance as isize;
        if code <= 32 {
            return Err(PrintSwitchError::Bridge(format!(
                "ShellExecute: {} ({code})",
                shell_error_name(code)
            )));
        }
        debug!(path = %path.display(), "print verb dispatched");
        Ok(())
    }
}

fn wide(s: &OsStr) -> Vec<u16> {
    s.encode_wide().chain(std::iter::once(0)).collect()
}

fn os_error(call: &str) -> PrintSwitchError {
    PrintSwitchError::Bridge(format!("{call}: {}", std::io::Error::last_os_error()))
}

/// Names for the documented ShellExecute failure codes.
fn shell_error_name(code: isize) -> &'static str {
    match code {
        0 | 8 => "out of memory",
        2 => "file not found",
        3 => "path not found",
        5 => "access denied",
        11 => "bad executable format",
        26 => "sharing violation",
        27 => "incomplete file association",
        28 => "DDE timeout",
        29 => "DDE transaction failed",
        30 => "DDE busy",
        31 => "no association",
        32 => "DLL not found",
        _ => "unknown error",
    }
}
