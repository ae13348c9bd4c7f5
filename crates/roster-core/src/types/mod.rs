//! # Core Type Definitions
//!
//! This module contains the data model of the Roster registry:
//! - Person and employee records (`Person`, `Employee`)
//! - Error types (`RosterError`)
//!
//! ## Invariants
//!
//! - A record's name and role are non-empty after trimming.
//! - Salaries are `Amount`s, so they always carry exactly two fractional digits.
//! - Records are only built through validating constructors.

use crate::amount::{Amount, DecimalError};
use crate::primitives::MAX_TEXT_LENGTH;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// PERSON
// =============================================================================

/// A named person with a date of birth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    name: String,
    birth_date: NaiveDate,
}

impl Person {
    /// Create a new person, rejecting blank or oversized names.
    pub fn new(name: impl Into<String>, birth_date: NaiveDate) -> Result<Self, RosterError> {
        let name = name.into();
        validate_text("name", &name)?;
        Ok(Self { name, birth_date })
    }

    /// The person's name as given by the record source.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The person's date of birth.
    #[must_use]
    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Whole years elapsed between the birth date and `today`.
    ///
    /// Returns `None` when `today` is before the birth date.
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        today.years_since(self.birth_date)
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

// =============================================================================
// EMPLOYEE
// =============================================================================

/// An employee record: a person with a salary and a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    #[serde(flatten)]
    person: Person,
    salary: Amount,
    role: String,
}

impl Employee {
    /// Create a new employee record.
    ///
    /// Fails with `RosterError::DataFormat` if the name or role is blank
    /// or longer than `MAX_TEXT_LENGTH` bytes.
    pub fn new(
        name: impl Into<String>,
        birth_date: NaiveDate,
        salary: Amount,
        role: impl Into<String>,
    ) -> Result<Self, RosterError> {
        let person = Person::new(name, birth_date)?;
        let role = role.into();
        validate_text("role", &role)?;
        Ok(Self {
            person,
            salary,
            role,
        })
    }

    #[must_use]
    pub fn person(&self) -> &Person {
        &self.person
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.person.name()
    }

    #[must_use]
    pub fn birth_date(&self) -> NaiveDate {
        self.person.birth_date()
    }

    #[must_use]
    pub fn salary(&self) -> Amount {
        self.salary
    }

    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Replace the salary. Only the registry raises salaries.
    pub(crate) fn set_salary(&mut self, salary: Amount) {
        self.salary = salary;
    }
}

fn validate_text(field: &str, value: &str) -> Result<(), RosterError> {
    if value.trim().is_empty() {
        return Err(RosterError::DataFormat(format!("field `{field}` is empty")));
    }
    if value.len() > MAX_TEXT_LENGTH {
        return Err(RosterError::DataFormat(format!(
            "field `{field}` exceeds {MAX_TEXT_LENGTH} bytes"
        )));
    }
    Ok(())
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Roster system.
///
/// - No silent failures: a source that cannot be read is reported, never skipped
/// - Use `Result<T, RosterError>` for fallible operations
/// - The CORE never panics
#[derive(Debug, Error)]
pub enum RosterError {
    /// The record source is malformed (missing field, wrong type, bad date or number).
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// An operation received an argument outside its domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An I/O error occurred while reading a source.
    #[error("I/O error: {0}")]
    IoError(String),

    /// The configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<DecimalError> for RosterError {
    fn from(e: DecimalError) -> Self {
        Self::InvalidArgument(e.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn employee_rejects_blank_name() {
        let result = Employee::new("   ", date(1980, 5, 12), Amount::ZERO, "Analista");
        assert!(matches!(result, Err(RosterError::DataFormat(_))));
    }

    #[test]
    fn employee_rejects_blank_role() {
        let result = Employee::new("João", date(1980, 5, 12), Amount::ZERO, "");
        assert!(matches!(result, Err(RosterError::DataFormat(_))));
    }

    #[test]
    fn has_name_ignores_case() {
        let person = Person::new("João", date(1980, 5, 12)).expect("person");
        assert!(person.has_name("joão"));
        assert!(person.has_name("JOÃO"));
        assert!(!person.has_name("joao"));
    }

    #[test]
    fn age_counts_whole_years() {
        let person = Person::new("Maria", date(1975, 9, 23)).expect("person");
        assert_eq!(person.age_on(date(2025, 9, 22)), Some(49));
        assert_eq!(person.age_on(date(2025, 9, 23)), Some(50));
        assert_eq!(person.age_on(date(1970, 1, 1)), None);
    }

    #[test]
    fn employee_serializes_with_camel_case_fields() {
        let employee = Employee::new(
            "Caio",
            date(1990, 12, 1),
            Amount::from_hundredths(250_000),
            "Analista",
        )
        .expect("employee");

        let json = serde_json::to_string(&employee).expect("serialize");
        assert_eq!(
            json,
            r#"{"name":"Caio","birthDate":"1990-12-01","salary":"2500.00","role":"Analista"}"#
        );
    }
}
