//! # Configuration
//!
//! Optional TOML configuration for the Roster binary.
//!
//! ```toml
//! data = "funcionarios.json"
//! minimum_wage = "1212.00"
//! raise_factor = "1.10"
//! remove_name = "João"
//! birthday_months = [10, 12]
//! ```
//!
//! Precedence: command-line flag > configuration file > built-in default.
//! Decimal values are written as strings so they are never read as floats.

use roster_core::primitives::{DEFAULT_MINIMUM_WAGE, DEFAULT_RAISE_FACTOR};
use roster_core::{Amount, Month, RaiseFactor, RosterError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";

/// Maximum size of a configuration file (64 KB).
const MAX_CONFIG_SIZE: u64 = 64 * 1024;

// =============================================================================
// FILE CONFIGURATION
// =============================================================================

/// The contents of a `roster.toml` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub data: Option<PathBuf>,
    pub minimum_wage: Option<Amount>,
    pub raise_factor: Option<RaiseFactor>,
    pub remove_name: Option<String>,
    pub birthday_months: Option<Vec<u8>>,
}

impl FileConfig {
    /// Parse TOML text.
    pub fn from_toml(text: &str) -> Result<Self, RosterError> {
        toml::from_str(text).map_err(|e| RosterError::ConfigError(e.to_string()))
    }

    /// Read a configuration file.
    pub fn from_path(path: &Path) -> Result<Self, RosterError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            RosterError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_SIZE {
            return Err(RosterError::ConfigError(format!(
                "'{}' exceeds maximum size of {} bytes",
                path.display(),
                MAX_CONFIG_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            RosterError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&text)
            .map_err(|e| RosterError::ConfigError(format!("'{}': {}", path.display(), e)))
    }

    /// Load the explicit file if given, otherwise `roster.toml` when present.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file simply yields the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, RosterError> {
        match explicit {
            Some(path) => Self::from_path(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    tracing::debug!("Using configuration file {}", DEFAULT_CONFIG_FILE);
                    Self::from_path(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

// =============================================================================
// RESOLVED SETTINGS
// =============================================================================

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Record source path; `None` means the bundled sample data.
    pub data: Option<PathBuf>,
    pub minimum_wage: Amount,
    pub raise_factor: RaiseFactor,
    pub remove_name: String,
    pub birthday_months: (Month, Month),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: None,
            minimum_wage: DEFAULT_MINIMUM_WAGE,
            raise_factor: DEFAULT_RAISE_FACTOR,
            remove_name: "João".to_string(),
            birthday_months: (Month::October, Month::December),
        }
    }
}

impl Settings {
    /// Resolve a file configuration over the defaults.
    ///
    /// `data_override` is the `--data` flag, which wins over the file.
    pub fn resolve(file: FileConfig, data_override: Option<PathBuf>) -> Result<Self, RosterError> {
        let defaults = Self::default();

        let birthday_months = match file.birthday_months {
            Some(months) => month_pair(&months)?,
            None => defaults.birthday_months,
        };

        let remove_name = match file.remove_name {
            Some(name) if name.trim().is_empty() => {
                return Err(RosterError::ConfigError(
                    "remove_name must not be empty".to_string(),
                ));
            }
            Some(name) => name,
            None => defaults.remove_name,
        };

        Ok(Self {
            data: data_override.or(file.data),
            minimum_wage: file.minimum_wage.unwrap_or(defaults.minimum_wage),
            raise_factor: file.raise_factor.unwrap_or(defaults.raise_factor),
            remove_name,
            birthday_months,
        })
    }
}

/// Convert a month number (1-12).
pub fn parse_month(number: u8) -> Result<Month, RosterError> {
    Month::try_from(number)
        .map_err(|_| RosterError::InvalidArgument(format!("month {} is not in 1-12", number)))
}

/// Convert exactly two month numbers.
pub fn month_pair(months: &[u8]) -> Result<(Month, Month), RosterError> {
    match months {
        [first, second] => Ok((parse_month(*first)?, parse_month(*second)?)),
        _ => Err(RosterError::InvalidArgument(format!(
            "expected exactly two months, got {}",
            months.len()
        ))),
    }
}

// =============================================================================
// TESTS
// =============================================================================
