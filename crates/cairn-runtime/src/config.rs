//! Evaluator configuration.
//!
//! Settings come from TOML with defaults for anything missing, then from
//! environment overrides:
//! - `CAIRN_STEP_LIMIT`: fixed-point iterations per top-level evaluation (`0` or `none` for no limit)
//! - `CAIRN_REPLACE_PASSES`: pass bound for `ReplaceRepeated` (`0` or `none` for no limit)
//! - `CAIRN_TRACE`: record evaluation steps (`1`/`true`/`yes`)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Default pass bound for `ReplaceRepeated`.
pub const DEFAULT_REPLACE_PASSES: usize = 65536;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Maximum fixed-point iterations for one top-level evaluation; `None` is unbounded.
    /// Every iteration at any nesting depth counts, including those spent on arguments.
    pub step_limit: Option<usize>,
    /// Maximum whole-expression passes of one `ReplaceRepeated` call; `None` is unbounded.
    /// Passes are counted separately from evaluator steps.
    pub replace_pass_limit: Option<usize>,
    /// Record [`crate::trace::TraceStep`]s while evaluating.
    pub trace: bool,
}

impl Default for EvalConfig {
    fn default() -> Self { Self { step_limit: None, replace_pass_limit: Some(DEFAULT_REPLACE_PASSES), trace: false } }
}

impl EvalConfig {
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file, then apply environment overrides and validate.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config: Self = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) { self.apply_overrides(|key| env::var(key).ok()); }

    /// Overrides from any key/value source; unparsable values are ignored.
    pub fn apply_overrides<F: Fn(&str) -> Option<String>>(&mut self, get: F) {
        if let Some(val) = get("CAIRN_STEP_LIMIT") {
            parse_limit(&val, &mut self.step_limit);
        }
        if let Some(val) = get("CAIRN_REPLACE_PASSES") {
            parse_limit(&val, &mut self.replace_pass_limit);
        }
        if let Some(val) = get("CAIRN_TRACE") {
            match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.trace = true,
                "0" | "false" | "no" => self.trace = false,
                _ => {}
            }
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.step_limit == Some(0) {
            return Err(ConfigError::Validation("step_limit must be greater than 0; omit it for no limit".to_string()));
        }
        if self.replace_pass_limit == Some(0) {
            return Err(ConfigError::Validation("replace_pass_limit must be greater than 0".to_string()));
        }
        Ok(())
    }
}

fn parse_limit(val: &str, slot: &mut Option<usize>) {
    let val = val.trim().to_ascii_lowercase();
    if val == "none" || val == "0" {
        *slot = None;
    } else if let Ok(n) = val.parse::<usize>() {
        *slot = Some(n);
    }
}
