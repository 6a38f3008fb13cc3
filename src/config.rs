// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::estimator::{DEFAULT_PAYMENT_SCALE, Estimator};
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "MortgageQuote", "mortgage-quote"));

pub const DEFAULT_API_URL: &str = "http://localhost:8080/mortgage-loan";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
const MAX_PAYMENT_SCALE: u32 = 10;

pub const ENV_API_URL: &str = "MORTGAGE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "MORTGAGE_TIMEOUT_SECS";
pub const ENV_PAYMENT_SCALE: &str = "MORTGAGE_PAYMENT_SCALE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
    pub payment_scale: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            payment_scale: DEFAULT_PAYMENT_SCALE,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.json"))
}

impl Config {
    /// Defaults, then the user's config file, then the environment.
    pub fn load() -> Result<Self> {
        let cfg = match config_path() {
            Ok(path) => Self::from_file(&path)?,
            Err(e) => {
                warn!("{e:#}; using default configuration");
                Self::default()
            }
        };
        cfg.with_env(|key| std::env::var(key).ok()).validated()
    }

    /// A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Read config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Parse config {}", path.display()))
    }

    /// Override fields from `lookup` (normally the process environment).
    /// Unparseable values are ignored with a warning.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        override_parsed(&lookup, ENV_TIMEOUT_SECS, &mut self.timeout_secs);
        override_parsed(&lookup, ENV_PAYMENT_SCALE, &mut self.payment_scale);
        self
    }

    pub fn validated(self) -> Result<Self> {
        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be at least 1"));
        }
        if self.payment_scale > MAX_PAYMENT_SCALE {
            return Err(anyhow!(
                "payment_scale {} is larger than {}",
                self.payment_scale,
                MAX_PAYMENT_SCALE
            ));
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn estimator(&self) -> Estimator {
        Estimator::with_scale(self.payment_scale)
    }
}

fn override_parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut T)
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(v) => *slot = v,
        Err(e) => warn!("Invalid {key} value '{raw}': {e}; keeping {slot}"),
    }
}
