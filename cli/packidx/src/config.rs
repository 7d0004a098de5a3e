//! `packidx.toml` discovery and settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use packidx_index::DEFAULT_INDEX_FILE;

/// Name of the optional configuration file.
pub const CONFIG_FILE: &str = "packidx.toml";

/// Environment variable overriding the external mappings validator program.
pub const MAPPINGS_PROGRAM_ENV: &str = "PACKIDX_MAPPINGS_PROGRAM";

/// The top-level configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackidxConfig {
    /// Index location.
    #[serde(default)]
    pub index: IndexConfig,
    /// External pack content validator.
    #[serde(default)]
    pub mappings: MappingsConfig,
    /// Log filtering.
    #[serde(default)]
    pub log: LogConfig,
}

/// `[index]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexConfig {
    /// Index file, relative to the directory holding `packidx.toml`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// `[mappings]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MappingsConfig {
    /// Program implementing content-level pack validation.
    #[serde(default = "default_mappings_program")]
    pub program: String,
    /// Arguments placed before `--file <manifest>`.
    #[serde(default = "default_mappings_args")]
    pub args: Vec<String>,
}

impl Default for MappingsConfig {
    fn default() -> Self {
        MappingsConfig {
            program: default_mappings_program(),
            args: default_mappings_args(),
        }
    }
}

fn default_mappings_program() -> String {
    "pack-tool".to_string()
}

fn default_mappings_args() -> Vec<String> {
    vec!["mappings".to_string(), "validate".to_string()]
}

/// `[log]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    /// A `tracing` filter directive such as `info` or `packidx_index=debug`.
    #[serde(default)]
    pub filter: Option<String>,
}

/// Configuration together with the directory it was found in.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: PackidxConfig,
    /// `None` when no `packidx.toml` was found and defaults apply.
    pub dir: Option<PathBuf>,
}

impl PackidxConfig {
    /// Search upward from `start_dir` for a `packidx.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config: PackidxConfig = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a configuration from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing packidx.toml")
    }
}

impl LoadedConfig {
    /// Load `packidx.toml` from `start_dir` or its ancestors, falling back to
    /// defaults when none exists.
    pub fn discover(start_dir: &Path) -> Result<Self> {
        match PackidxConfig::find_and_load(start_dir)? {
            Some((config, dir)) => {
                tracing::debug!(dir = %dir.display(), "loaded {CONFIG_FILE}");
                Ok(LoadedConfig {
                    config,
                    dir: Some(dir),
                })
            }
            None => Ok(LoadedConfig::default()),
        }
    }

    /// Index file to validate.
    ///
    /// An explicit path wins, then `[index].path` resolved against the
    /// config directory, then `index.json` in `cwd`.
    pub fn index_path(&self, explicit: Option<&Path>, cwd: &Path) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match (&self.config.index.path, &self.dir) {
            (Some(path), Some(dir)) => dir.join(path),
            (Some(path), None) => cwd.join(path),
            (None, _) => cwd.join(DEFAULT_INDEX_FILE),
        }
    }

    /// External mappings validator program, honoring an environment override.
    pub fn mappings_program(&self, env_override: Option<String>) -> String {
        env_override
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| self.config.mappings.program.clone())
    }

    /// Leading arguments passed to the mappings validator.
    pub fn mappings_args(&self) -> &[String] {
        &self.config.mappings.args
    }

    /// Configured log filter directive.
    pub fn log_filter(&self) -> Option<&str> {
        self.config.log.filter.as_deref()
    }
}
