//! TOML configuration for the undo history
//!
//! ```toml
//! [undo]
//! enable = true
//! finite = true
//! stack_size = 100
//!
//! [logging]
//! profile = "development"
//! ```
//!
//! Every key is optional.

use crate::stack::DEFAULT_UNDO_LIMIT;
use inverso_core::errors::{InversoError, Result};
use inverso_core::logging_facility::Profile;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const MAX_STACK_SIZE: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UndoConfig {
    pub undo: UndoSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UndoSection {
    pub enable: bool,
    /// When false the history is unbounded and `stack_size` is ignored
    pub finite: bool,
    pub stack_size: usize,
}

impl Default for UndoSection {
    fn default() -> Self {
        Self {
            enable: true,
            finite: true,
            stack_size: DEFAULT_UNDO_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub profile: Profile,
}

impl UndoConfig {
    /// Limit to hand to [`crate::UndoStack`]; 0 means unlimited
    pub fn undo_limit(&self) -> usize {
        if self.undo.finite {
            self.undo.stack_size
        } else {
            0
        }
    }

    /// # Errors
    ///
    /// `InvalidConfig` when a finite stack size is outside 1..=10000.
    pub fn validate(&self) -> Result<()> {
        if self.undo.finite && !(1..=MAX_STACK_SIZE).contains(&self.undo.stack_size) {
            return Err(config_error(format!(
                "undo.stack_size must be between 1 and {}, got {}",
                MAX_STACK_SIZE, self.undo.stack_size
            )));
        }
        Ok(())
    }
}

fn config_error(reason: impl Into<String>) -> InversoError {
    InversoError::InvalidConfig {
        reason: reason.into(),
    }
}

/// Parse and validate configuration text
///
/// # Errors
///
/// `InvalidConfig` on malformed TOML, unknown keys or out-of-range values.
pub fn parse_config_str(contents: &str) -> Result<UndoConfig> {
    let config: UndoConfig = toml::from_str(contents)
        .map_err(|e| config_error(format!("failed to parse config: {}", e)))?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a configuration file
///
/// # Errors
///
/// `Io` if the file cannot be read, otherwise as [`parse_config_str`].
pub fn parse_config_file(path: &Path) -> Result<UndoConfig> {
    let contents = fs::read_to_string(path).map_err(|e| InversoError::Io {
        message: format!("failed to read config {}: {}", path.display(), e),
    })?;
    let config = parse_config_str(&contents)?;
    tracing::debug!(
        component = module_path!(),
        op = "parse_config_file",
        path = %path.display(),
        undo_limit = config.undo_limit(),
        "Loaded undo configuration"
    );
    Ok(config)
}
