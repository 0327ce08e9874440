// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// CUPS bridge for Linux, macOS and the BSDs.
//
// Drives the stock CUPS client tools:
//
//   lpstat -d          read the default destination
//   lpoptions -d NAME  set the (per-user) default destination
//   lp FILE            submit a file to the default destination
//
// The tools run with `LC_ALL=C` so their output can be parsed, and without
// `LPDEST`/`PRINTER`, which would take precedence over the lpoptions default.

#![cfg(unix)]

use std::path::Path;
use std::process::Command;

use tracing::debug;

use spoolswitch_core::error::{PrintSwitchError, Result};

use crate::traits::*;

/// Bridge backed by the CUPS command-line client.
#[derive(Debug, Clone)]
pub struct CupsBridge {
    lpstat: String,
    lpoptions: String,
    lp: String,
}

impl Default for CupsBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl CupsBridge {
    pub fn new() -> Self {
        Self {
            lpstat: "lpstat".into(),
            lpoptions: "lpoptions".into(),
            lp: "lp".into(),
        }
    }

    /// Use alternative tool binaries (e.g. absolute paths on systems where
    /// CUPS lives outside `PATH`).
    pub fn with_tools(
        lpstat: impl Into<String>,
        lpoptions: impl Into<String>,
        lp: impl Into<String>,
    ) -> Self {
        Self {
            lpstat: lpstat.into(),
            lpoptions: lpoptions.into(),
            lp: lp.into(),
        }
    }
}

impl PlatformBridge for CupsBridge {
    fn platform_name(&self) -> &str {
        "CUPS"
    }
}

impl PrinterRegistry for CupsBridge {
    fn default_printer(&self) -> Result<String> {
        let out = run_tool(&self.lpstat, &["-d"])?;
        parse_default_destination(&out)
    }

    fn set_default_printer(&self, name: &str) -> Result<()> {
        run_tool(&self.lpoptions, &["-d", name])?;
        Ok(())
    }
}

impl DocumentLauncher for CupsBridge {
    fn print_file(&self, path: &Path) -> Result<()> {
        let path = path.to_str().ok_or_else(|| {
            PrintSwitchError::Bridge(format!("non UTF-8 spool path: {}", path.display()))
        })?;
        let out = run_tool(&self.lp, &["--", path])?;
        if let Some(request) = parse_request_id(&out) {
            debug!(request, "lp accepted job");
        }
        Ok(())
    }
}

/// Run a CUPS tool and return its trimmed stdout.
fn run_tool(program: &str, args: &[&str]) -> Result<String> {
    let output = tool_command(program, args)
        .output()
        .map_err(|e| PrintSwitchError::Bridge(format!("{program}: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr.trim();
        return Err(PrintSwitchError::Bridge(if detail.is_empty() {
            format!("{program} {args:?} exited with {}", output.status)
        } else {
            detail.to_string()
        }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn tool_command(program: &str, args: &[&str]) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .env("LC_ALL", "C")
        .env_remove("LPDEST")
        .env_remove("PRINTER");
    cmd
}

/// Extract the destination name from `lpstat -d` output.
fn parse_default_destination(output: &str) -> Result<String> {
    output
        .lines()
        .find_map(|line| line.trim().strip_prefix("system default destination:"))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            let detail = output.trim();
            PrintSwitchError::Bridge(if detail.is_empty() {
                "no system default destination".into()
            } else {
                detail.to_string()
            })
        })
}

/// Extract "Office-42" from "request id is Office-42 (1 file(s))".
fn parse_request_id(output: &str) -> Option<&str> {
    output
        .strip_prefix("request id is ")?
        .split_whitespace()
        .next()
}
