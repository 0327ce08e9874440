// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dispatch configuration, loaded from `config.json` in the data directory
// with a couple of environment overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PrintSwitchError, Result};
use crate::types::RetryPolicy;

/// Name of the config file inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Tunables for one dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Total submission attempts (clamped to at least 1).
    pub max_retries: u32,
    /// Seconds to wait after the first failed attempt; doubles afterwards.
    pub initial_wait_secs: f64,
    /// Seconds to wait after a successful submission before the spool file
    /// is deleted, so the spooler has a chance to read it.
    pub settle_secs: f64,
    /// Encoding label for the spool file (WHATWG label, e.g. "shift_jis",
    /// "windows-1252").
    pub codepage: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_wait_secs: 2.0,
            settle_secs: 5.0,
            codepage: "shift_jis".into(),
        }
    }
}

impl DispatchConfig {
    /// Load `config.json` from `data_dir`, then apply environment overrides.
    ///
    /// A missing file yields defaults. A malformed file is logged and also
    /// yields defaults, so a broken config never blocks printing.
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(CONFIG_FILE);
        let mut config = if path.exists() {
            Self::load_from(&path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                Self::default()
            })
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Load a config file, failing on I/O or parse errors.
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(data_dir)?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(data_dir.join(CONFIG_FILE), json)?;
        Ok(())
    }

    /// Apply `SPOOLSWITCH_MAX_RETRIES` / `SPOOLSWITCH_CODEPAGE` overrides.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("SPOOLSWITCH_MAX_RETRIES") {
            match raw.trim().parse::<u32>() {
                Ok(n) => self.max_retries = n,
                Err(_) => warn!(value = %raw, "ignoring invalid SPOOLSWITCH_MAX_RETRIES"),
            }
        }
        if let Some(label) = lookup("SPOOLSWITCH_CODEPAGE") {
            if !label.trim().is_empty() {
                self.codepage = label.trim().to_string();
            }
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, secs) in [
            ("initial_wait_secs", self.initial_wait_secs),
            ("settle_secs", self.settle_secs),
        ] {
            // Also refuses NaN, infinities and values past `Duration::MAX`.
            if Duration::try_from_secs_f64(secs).is_err() {
                return Err(PrintSwitchError::Config(format!(
                    "{name} must be a non-negative number of seconds, got {secs}"
                )));
            }
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, secs(self.initial_wait_secs))
    }

    pub fn settle_delay(&self) -> Duration {
        secs(self.settle_secs)
    }
}

fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}

/// Resolve the spoolswitch data directory.
///
/// `$SPOOLSWITCH_HOME` wins, then `%APPDATA%\spoolswitch` on Windows, then
/// `$XDG_CONFIG_HOME/spoolswitch`, then `~/.config/spoolswitch`.
pub fn data_dir() -> PathBuf {
    if let Ok(home) = std::env::var("SPOOLSWITCH_HOME") {
        return PathBuf::from(home);
    }
    base_dir().join("spoolswitch")
}

fn base_dir() -> PathBuf {
    if cfg!(windows) {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata);
        }
    }
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
        return PathBuf::from(home).join(".config");
    }
    std::env::temp_dir()
}
