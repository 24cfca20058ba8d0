// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::ContigFilterError;

/// Name under which the module is registered; also the deploy config section.
pub const SERVICE_NAME: &str = "landContigFilter";

pub const CALLBACK_URL_VAR: &str = "SDK_CALLBACK_URL";
pub const DEPLOY_CONFIG_VAR: &str = "KB_DEPLOYMENT_CONFIG";
pub const AUTH_TOKEN_VAR: &str = "KB_AUTH_TOKEN";

const DEFAULT_SERVICE_VER: &str = "release";

/// Process configuration, read once at start-up and handed to the module explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub callback_url: String,
    pub scratch: PathBuf,
    pub token: Option<String>,
    pub service_ver: String,
}

impl Config {
    pub fn new(callback_url: &str, scratch: &Path) -> Self {
        Config {
            callback_url: callback_url.to_string(),
            scratch: scratch.to_path_buf(),
            token: None,
            service_ver: String::from(DEFAULT_SERVICE_VER),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Builds the configuration from the SDK environment. Explicit values (e.g. from the command
    /// line) take precedence over the environment.
    pub fn from_env(
        callback_url: Option<String>,
        scratch: Option<PathBuf>,
        deploy_config: Option<PathBuf>,
    ) -> Result<Self, ContigFilterError> {
        let callback_url = match callback_url {
            Some(url) => url,
            None => env::var(CALLBACK_URL_VAR).map_err(|_| {
                ContigFilterError::Config(format!("{} is not set", CALLBACK_URL_VAR))
            })?,
        };
        let scratch = match scratch {
            Some(path) => path,
            None => {
                let path = match deploy_config {
                    Some(path) => path,
                    None => env::var(DEPLOY_CONFIG_VAR).map(PathBuf::from).map_err(|_| {
                        ContigFilterError::Config(format!(
                            "no scratch directory given and {} is not set",
                            DEPLOY_CONFIG_VAR
                        ))
                    })?,
                };
                scratch_from_deploy_config(&path)?
            }
        };
        let token = env::var(AUTH_TOKEN_VAR).ok();
        Ok(Config::new(&callback_url, &scratch).with_token(token))
    }
}

fn scratch_from_deploy_config(path: &Path) -> Result<PathBuf, ContigFilterError> {
    let text = fs::read_to_string(path).map_err(|e| {
        ContigFilterError::Config(format!("Error reading {}: {}", path.display(), e))
    })?;
    let section = parse_ini_section(&text, SERVICE_NAME);
    section
        .get("scratch")
        .map(PathBuf::from)
        .ok_or_else(|| {
            ContigFilterError::Config(format!(
                "{}: no 'scratch' key in [{}]",
                path.display(),
                SERVICE_NAME
            ))
        })
}

/// Key/value pairs of one `[section]` of an INI-style deploy config.
pub fn parse_ini_section(text: &str, wanted: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    let mut in_section = false;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = name.trim() == wanted;
            continue;
        }
        if !in_section {
            continue;
        }
        // Whichever delimiter comes first separates the key, so values may contain the other.
        if let Some(at) = line.find(['=', ':']) {
            let (key, value) = (&line[..at], &line[at + 1..]);
            values.insert(key.trim().to_lowercase(), value.trim().to_string());
        }
    }
    values
}
