//! CLI configuration file (v0.1)
//!
//! ```yaml
//! output:
//!   format: yaml
//!   sort_keys: true
//! ```
//!
//! Every field is optional; command-line flags override what is set here.

use std::path::Path as FsPath;

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::output_policy::OutputPolicy;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output: OutputPolicy,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &FsPath) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }
}
