// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Fintrack", "fintrack"));

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const ENV_API_URL: &str = "FINTRACK_API_URL";
pub const ENV_TIMEOUT: &str = "FINTRACK_TIMEOUT_SECS";
pub const ENV_DATA_DIR: &str = "FINTRACK_DATA_DIR";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: Url,
    pub timeout: Duration,
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolves settings from an explicit API override, then the
    /// environment, then defaults.
    pub fn load(api_override: Option<&str>) -> Result<Self> {
        let api = match api_override {
            Some(a) => a.to_string(),
            None => std::env::var(ENV_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        };
        let api_base = parse_api_base(&api)?;

        let timeout = match std::env::var(ENV_TIMEOUT) {
            Ok(s) => {
                let secs: u64 = s
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid {} '{}'", ENV_TIMEOUT, s))?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let data_dir = match std::env::var_os(ENV_DATA_DIR) {
            Some(p) => PathBuf::from(p),
            None => default_data_dir()?,
        };

        Ok(Self {
            api_base,
            timeout,
            data_dir,
        })
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

/// Parses the server root. A trailing slash is enforced so relative
/// endpoint paths join under it instead of replacing its last segment.
pub fn parse_api_base(s: &str) -> Result<Url> {
    let mut s = s.trim().to_string();
    if !s.ends_with('/') {
        s.push('/');
    }
    let url = Url::parse(&s).with_context(|| format!("Invalid API URL '{}'", s))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("API URL '{}' cannot be used as a base", s);
    }
    Ok(url)
}
