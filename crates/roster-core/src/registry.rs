//! # Registry Module
//!
//! The in-memory employee registry and the operations over it.
//!
//! - Insertion order is preserved; only `remove` and `apply_raise` mutate
//! - Queries borrow from the registry and never reorder it
//! - Loading is all-or-nothing: a failed source leaves the contents untouched
//!
//! The registry is a plain owned value. Callers construct it, load it, and
//! pass it by reference to whatever needs it.

use crate::amount::{Amount, RaiseFactor};
use crate::source::RecordSource;
use crate::{Employee, RosterError};
use chrono::{Datelike, Month};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

// =============================================================================
// WAGE MULTIPLE
// =============================================================================

/// How many minimum wages one employee earns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WageMultiple {
    pub name: String,
    /// `salary / base wage`, rounded half-up to two digits.
    pub multiple: Amount,
}

impl fmt::Display for WageMultiple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Nome: {} - {} salários mínimos.",
            self.name, self.multiple
        )
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// An ordered, in-memory collection of employee records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    employees: Vec<Employee>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding `employees` in the given order.
    #[must_use]
    pub fn from_employees(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    /// Replace the contents with already-validated records.
    pub fn load(&mut self, records: Vec<Employee>) -> &[Employee] {
        self.employees = records;
        &self.employees
    }

    /// Replace the contents with the records of `source`.
    ///
    /// On error the registry keeps its previous contents.
    /// Returns the number of records loaded.
    pub fn load_from<S: RecordSource>(&mut self, source: &S) -> Result<usize, RosterError> {
        let records = source.read_records()?;
        Ok(self.load(records).len())
    }

    /// All records in registry order.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// First record whose name matches case-insensitively.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.person().has_name(name))
    }

    /// Remove every record whose name matches case-insensitively.
    ///
    /// Removing an unknown name is a no-op.
    pub fn remove(&mut self, name: &str) -> &[Employee] {
        self.employees.retain(|e| !e.person().has_name(name));
        &self.employees
    }

    /// Multiply every salary by `factor`, rounding half-up to two digits.
    pub fn apply_raise(&mut self, factor: RaiseFactor) -> &[Employee] {
        for employee in &mut self.employees {
            let raised = employee.salary().scale_by(factor);
            employee.set_salary(raised);
        }
        &self.employees
    }

    /// Records grouped by role.
    ///
    /// Roles appear in order of first occurrence; records keep their
    /// relative order within each group.
    #[must_use]
    pub fn group_by_role(&self) -> IndexMap<&str, Vec<&Employee>> {
        let mut groups: IndexMap<&str, Vec<&Employee>> = IndexMap::new();
        for employee in &self.employees {
            groups.entry(employee.role()).or_default().push(employee);
        }
        groups
    }

    /// Records born in either of the two months.
    #[must_use]
    pub fn filter_by_birth_month(&self, first: Month, second: Month) -> Vec<&Employee> {
        let months = [first.number_from_month(), second.number_from_month()];
        self.employees
            .iter()
            .filter(|e| months.contains(&e.birth_date().month()))
            .collect()
    }

    /// The record with the earliest birth date.
    ///
    /// Ties go to the record that comes first; `None` when empty.
    #[must_use]
    pub fn oldest(&self) -> Option<&Employee> {
        self.employees.iter().min_by_key(|e| e.birth_date())
    }

    /// Records ordered by name (case-sensitive, stable).
    #[must_use]
    pub fn sorted_by_name(&self) -> Vec<&Employee> {
        let mut sorted: Vec<&Employee> = self.employees.iter().collect();
        sorted.sort_by(|a, b| a.name().cmp(b.name()));
        sorted
    }

    /// Exact sum of all current salaries.
    #[must_use]
    pub fn total_salary(&self) -> Amount {
        self.employees.iter().map(Employee::salary).sum()
    }

    /// `salary / base_wage` for every record, in registry order.
    ///
    /// Fails with `RosterError::InvalidArgument` when `base_wage` is zero.
    pub fn minimum_wage_multiples(
        &self,
        base_wage: Amount,
    ) -> Result<Vec<WageMultiple>, RosterError> {
        if base_wage == Amount::ZERO {
            return Err(RosterError::InvalidArgument(
                "minimum wage must be greater than zero".to_string(),
            ));
        }

        Ok(self
            .employees
            .iter()
            .filter_map(|e| {
                e.salary().ratio(base_wage).map(|multiple| WageMultiple {
                    name: e.name().to_string(),
                    multiple,
                })
            })
            .collect())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JsonSource;
    use chrono::NaiveDate;

    fn employee(name: &str, ymd: (i32, u32, u32), salary: &str, role: &str) -> Employee {
        let date = NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).expect("date");
        Employee::new(name, date, Amount::parse(salary).expect("salary"), role).expect("employee")
    }

    fn sample() -> Registry {
        Registry::from_employees(vec![
            employee("João", (1980, 5, 12), "2000.00", "Analista"),
            employee("Maria", (1975, 9, 23), "3000.00", "Gerente"),
            employee("Caio", (1990, 12, 1), "2500.00", "Analista"),
        ])
    }

    fn names(employees: &[&Employee]) -> Vec<String> {
        employees.iter().map(|e| e.name().to_string()).collect()
    }

    #[test]
    fn remove_matches_any_case() {
        let mut registry = sample();
        let remaining = registry.remove("JOÃO");
        assert_eq!(remaining.len(), 2);
        assert!(registry.find("joão").is_none());
    }

    #[test]
    fn remove_removes_every_match() {
        let mut registry = sample();
        registry.load(vec![
            employee("Ana", (1980, 1, 1), "1.00", "X"),
            employee("ana", (1981, 1, 1), "1.00", "X"),
            employee("Bia", (1982, 1, 1), "1.00", "X"),
        ]);
        assert_eq!(registry.remove("ANA").len(), 1);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut registry = sample();
        let before = registry.clone();
        registry.remove("Pedro");
        assert_eq!(registry, before);
    }

    #[test]
    fn find_and_remove_share_name_matching() {
        let mut registry = sample();
        let found = registry.find("MARIA").map(|e| e.name().to_string());
        assert_eq!(found.as_deref(), Some("Maria"));
        assert!(registry.find("Mari").is_none());

        registry.remove("maria");
        assert!(registry.find("Maria").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn raise_rounds_every_salary() {
        let mut registry = sample();
        let factor = RaiseFactor::parse("1.10").expect("factor");
        let salaries: Vec<String> = registry
            .apply_raise(factor)
            .iter()
            .map(|e| e.salary().to_string())
            .collect();
        assert_eq!(salaries, vec!["2200.00", "3300.00", "2750.00"]);
    }

    #[test]
    fn group_keeps_first_occurrence_order() {
        let registry = sample();
        let groups = registry.group_by_role();
        let roles: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(roles, vec!["Analista", "Gerente"]);
        assert_eq!(names(&groups["Analista"]), vec!["João", "Caio"]);
    }

    #[test]
    fn filter_by_birth_month_keeps_order() {
        let registry = sample();
        let found = registry.filter_by_birth_month(Month::September, Month::May);
        assert_eq!(names(&found), vec!["João", "Maria"]);
    }

    #[test]
    fn filter_same_month_twice() {
        let registry = sample();
        let found = registry.filter_by_birth_month(Month::December, Month::December);
        assert_eq!(names(&found), vec!["Caio"]);
    }

    #[test]
    fn oldest_prefers_first_on_tie() {
        let registry = Registry::from_employees(vec![
            employee("Primeiro", (1970, 1, 1), "1.00", "X"),
            employee("Segundo", (1970, 1, 1), "1.00", "X"),
        ]);
        assert_eq!(registry.oldest().map(Employee::name), Some("Primeiro"));
    }

    #[test]
    fn oldest_of_empty_is_none() {
        assert!(Registry::new().oldest().is_none());
    }

    #[test]
    fn sort_is_case_sensitive() {
        let registry = Registry::from_employees(vec![
            employee("beto", (1970, 1, 1), "1.00", "X"),
            employee("Carla", (1970, 1, 1), "1.00", "X"),
            employee("Ana", (1970, 1, 1), "1.00", "X"),
        ]);
        assert_eq!(names(&registry.sorted_by_name()), vec!["Ana", "Carla", "beto"]);
    }

    #[test]
    fn total_of_empty_is_zero() {
        assert_eq!(Registry::new().total_salary(), Amount::ZERO);
    }

    #[test]
    fn wage_multiple_line() {
        let registry = sample();
        let lines: Vec<String> = registry
            .minimum_wage_multiples(Amount::parse("1212.00").expect("wage"))
            .expect("multiples")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(lines[0], "Nome: João - 1.65 salários mínimos.");
        assert_eq!(lines[1], "Nome: Maria - 2.48 salários mínimos.");
    }

    #[test]
    fn zero_minimum_wage_is_invalid() {
        let result = sample().minimum_wage_multiples(Amount::ZERO);
        assert!(matches!(result, Err(RosterError::InvalidArgument(_))));
    }

    #[test]
    fn failed_load_keeps_contents() {
        let mut registry = sample();
        let bad = JsonSource::from_bytes(r#"[{"name":"X"}]"#);
        assert!(registry.load_from(&bad).is_err());
        assert_eq!(registry, sample());
    }
}
