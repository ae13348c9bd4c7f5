//! # roster-core
//!
//! The employee registry engine for Roster - THE LOGIC.
//!
//! This crate holds an ordered, in-memory collection of employee records
//! and the operations over it: removal by name, salary raises, grouping by
//! role, birthday-month filtering, oldest-employee lookup, alphabetical
//! sorting, salary totals and minimum-wage multiples.
//!
//! ## Architectural Constraints
//!
//! - Records enter only through validated parsing (`source`)
//! - Money is fixed-point (`amount`); there is no floating point anywhere
//! - The registry is an explicitly owned value, never global state
//! - Has NO async, NO network, NO console output (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod amount;
pub mod primitives;
pub mod registry;
pub mod source;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Employee, Person, RosterError};

// =============================================================================
// RE-EXPORTS: Registry Engine
// =============================================================================

pub use amount::{Amount, DecimalError, RaiseFactor};
pub use registry::{Registry, WageMultiple};
pub use source::{JsonSource, RecordSource};

// =============================================================================
// RE-EXPORTS: Dates
// =============================================================================

pub use chrono::{Month, NaiveDate};
