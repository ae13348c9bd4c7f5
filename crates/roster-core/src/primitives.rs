//! # Fixed Primitives
//!
//! Constants compiled into the Roster CORE.
//!
//! These are the defaults of the bundled walkthrough report and the input
//! limits enforced by the record source.

use crate::amount::{Amount, RaiseFactor};

/// The minimum wage used when none is configured: `1212.00`.
pub const DEFAULT_MINIMUM_WAGE: Amount = Amount::from_hundredths(121_200);

/// The raise applied when none is configured: `1.10` (10%).
pub const DEFAULT_RAISE_FACTOR: RaiseFactor = RaiseFactor::from_normalized(11, 1);

/// Date pattern expected in the record source (`YYYY-MM-DD`).
pub const SOURCE_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum number of records accepted from a single source.
///
/// Sources longer than this are rejected instead of loaded partially.
pub const MAX_RECORDS: usize = 10_000;

/// Maximum length in bytes of a name or role.
pub const MAX_TEXT_LENGTH: usize = 256;

/// Maximum size in bytes of a record source read from disk (10 MB).
pub const MAX_SOURCE_BYTES: u64 = 10 * 1024 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_minimum_wage_is_1212() {
        assert_eq!(DEFAULT_MINIMUM_WAGE.to_string(), "1212.00");
    }

    #[test]
    fn default_raise_is_ten_percent() {
        assert_eq!(RaiseFactor::parse("1.10").ok(), Some(DEFAULT_RAISE_FACTOR));
    }
}
