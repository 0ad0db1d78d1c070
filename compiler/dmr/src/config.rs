//! Command-line options shared by the commands that read a compiled world.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DmrConfig {
    /// The compiled-definition JSON file.
    pub compiled: PathBuf,
    /// Root directory for resource paths. Defaults to the directory holding
    /// the compiled file.
    pub resources: PathBuf,
    /// Positional arguments after the compiled file.
    pub arguments: Vec<String>,
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing compiled file")]
    MissingCompiledFile,
    #[error("option '{option}' requires a value")]
    MissingValue { option: String },
    #[error("unknown option '{option}'")]
    UnknownOption { option: String },
}

impl DmrConfig {
    /// Parse the arguments following the command name.
    ///
    /// Accepts `--resources <dir>` and `--resources=<dir>` anywhere.
    pub fn parse(args: &[String]) -> Result<DmrConfig, ConfigError> {
        let mut resources = None;
        let mut positional = Vec::new();

        let mut args = args.iter();
        while let Some(arg) = args.next() {
            if arg == "--resources" {
                let value = args.next().ok_or_else(|| ConfigError::MissingValue {
                    option: arg.clone(),
                })?;
                resources = Some(PathBuf::from(value));
            } else if let Some(value) = arg.strip_prefix("--resources=") {
                resources = Some(PathBuf::from(value));
            } else if arg.starts_with("--") {
                return Err(ConfigError::UnknownOption {
                    option: arg.clone(),
                });
            } else {
                positional.push(arg.clone());
            }
        }

        let mut positional = positional.into_iter();
        let compiled = PathBuf::from(positional.next().ok_or(ConfigError::MissingCompiledFile)?);
        let resources = resources.unwrap_or_else(|| default_resource_root(&compiled));
        Ok(DmrConfig {
            compiled,
            resources,
            arguments: positional.collect(),
        })
    }
}

fn default_resource_root(compiled: &Path) -> PathBuf {
    match compiled.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
