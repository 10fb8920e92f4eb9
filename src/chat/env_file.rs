//! Reader for `KEY=VALUE` credential files such as `~/.soonerai.env`.
//!
//! Parsing is delegated to `dotenvy`; values are collected into an
//! [`EnvFile`] instead of being exported into the process environment.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name of the credentials file in the home directory.
pub const ENV_FILE_NAME: &str = ".soonerai.env";

/// Variables read from an env file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    vars: HashMap<String, String>,
}

impl EnvFile {
    /// Parses env-file text.
    ///
    /// Lines that do not parse are skipped with a warning. A later assignment
    /// wins over an earlier one.
    pub fn parse(text: &str) -> Self {
        let mut vars = HashMap::new();
        for item in dotenvy::from_read_iter(text.as_bytes()) {
            match item {
                Ok((key, value)) => {
                    vars.insert(key, value);
                }
                Err(err) => tracing::warn!(error = %err, "skipping env line"),
            }
        }
        Self { vars }
    }

    /// Reads and parses the file at `path`. A missing file reads as empty.
    pub fn load(path: &Path) -> Result<Self> {
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(dotenvy::Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "env file not found");
                return Ok(Self::default());
            }
            Err(dotenvy::Error::Io(err)) => {
                return Err(Error::io(format!("failed to read {}", path.display()), err));
            }
            Err(err) => {
                return Err(Error::configuration(
                    format!("failed to load {}: {err}", path.display()),
                    None,
                ));
            }
        };

        let mut vars = HashMap::new();
        for item in iter {
            match item {
                Ok((key, value)) => {
                    vars.insert(key, value);
                }
                Err(dotenvy::Error::Io(err)) => {
                    return Err(Error::io(format!("failed to read {}", path.display()), err));
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping env line")
                }
            }
        }
        Ok(Self { vars })
    }

    /// Looks up one variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

/// `~/.soonerai.env`, or a relative `.soonerai.env` when there is no home directory.
pub fn default_env_path() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(ENV_FILE_NAME),
        None => PathBuf::from(ENV_FILE_NAME),
    }
}
