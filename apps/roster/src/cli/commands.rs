//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Commands build an `Output` instead of printing directly, so the same
//! code path serves the binary and the tests.

use super::Commands;
use crate::config::{Settings, month_pair};
use crate::report::{
    self, RoleGroup, SEPARATOR, Walkthrough, employee_block, format_money, group_block,
    oldest_line, raised_line,
};
use roster_core::primitives::MAX_SOURCE_BYTES;
use roster_core::{JsonSource, NaiveDate, Registry, RosterError};
use serde_json::json;
use std::path::{Path, PathBuf};

/// Sample record source compiled into the binary.
pub const BUNDLED_DATA: &str = include_str!("../../data/funcionarios.json");

// =============================================================================
// OUTPUT
// =============================================================================

/// What a command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Report lines for the console.
    Lines(Vec<String>),
    /// A JSON document (`--json-mode`).
    Json(serde_json::Value),
}

impl Output {
    /// Print to stdout.
    pub fn print(&self) {
        match self {
            Self::Lines(lines) => {
                for line in lines {
                    println!("{}", line);
                }
            }
            Self::Json(value) => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// Validate an input file path.
///
/// Resolves `..` and symlinks, and ensures the path is an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, RosterError> {
    let canonical = path.canonicalize().map_err(|e| {
        RosterError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(RosterError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), RosterError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| RosterError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(RosterError::DataFormat(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Load the registry from `path`, or from the bundled sample when `None`.
///
/// Any failure is returned; callers must not run queries without a registry.
pub fn load_registry(path: Option<&Path>) -> Result<Registry, RosterError> {
    let (source, origin) = match path {
        Some(path) => {
            let validated = validate_file_path(path)?;
            validate_file_size(&validated, MAX_SOURCE_BYTES)?;
            (
                JsonSource::from_path(&validated)?,
                validated.display().to_string(),
            )
        }
        None => (
            JsonSource::from_bytes(BUNDLED_DATA),
            "bundled sample".to_string(),
        ),
    };

    let mut registry = Registry::new();
    let count = registry.load_from(&source).inspect_err(|e| {
        tracing::error!("Failed to load employees from {}: {}", origin, e);
    })?;
    tracing::info!("Loaded {} employees from {}", count, origin);

    Ok(registry)
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Run one command against a loaded registry.
pub fn run_command(
    registry: &mut Registry,
    settings: &Settings,
    command: &Commands,
    json_mode: bool,
    today: NaiveDate,
) -> Result<Output, RosterError> {
    match command {
        Commands::Report => cmd_report(registry, settings, json_mode, today),
        Commands::List => Ok(cmd_list(registry, json_mode)),
        Commands::Remove { name } => {
            let name = name.as_deref().unwrap_or(&settings.remove_name);
            Ok(cmd_remove(registry, name, json_mode))
        }
        Commands::Raise { factor } => {
            let factor = factor.unwrap_or(settings.raise_factor);
            Ok(cmd_raise(registry, factor, json_mode))
        }
        Commands::Group => Ok(cmd_group(registry, json_mode)),
        Commands::Birthdays { months } => {
            let months = match months {
                Some(numbers) => month_pair(numbers)?,
                None => settings.birthday_months,
            };
            Ok(cmd_birthdays(registry, months, json_mode))
        }
        Commands::Oldest => Ok(cmd_oldest(registry, today, json_mode)),
        Commands::Sorted => Ok(cmd_sorted(registry, json_mode)),
        Commands::Total => Ok(cmd_total(registry, json_mode)),
        Commands::MinWage { base } => {
            let base = base.unwrap_or(settings.minimum_wage);
            cmd_min_wage(registry, base, json_mode)
        }
    }
}

// =============================================================================
// REPORT COMMAND
// =============================================================================

/// Run the full walkthrough.
pub fn cmd_report(
    registry: &mut Registry,
    settings: &Settings,
    json_mode: bool,
    today: NaiveDate,
) -> Result<Output, RosterError> {
    let walkthrough = Walkthrough::run(registry, settings, today)?;

    if json_mode {
        return Ok(Output::Json(json!(walkthrough)));
    }
    Ok(Output::Lines(walkthrough.render()))
}

// =============================================================================
// LIST COMMANDS
// =============================================================================

/// List all employees in registry order.
pub fn cmd_list(registry: &Registry, json_mode: bool) -> Output {
    if json_mode {
        return Output::Json(json!({ "employees": registry.employees() }));
    }
    Output::Lines(employee_block(
        "Lista de Funcionários:",
        registry.employees(),
    ))
}

/// List all employees in name order.
pub fn cmd_sorted(registry: &Registry, json_mode: bool) -> Output {
    let sorted = registry.sorted_by_name();

    if json_mode {
        return Output::Json(json!({ "employees": sorted }));
    }
    Output::Lines(employee_block("Funcionários em ordem alfabética", sorted))
}

// =============================================================================
// MUTATION COMMANDS
// =============================================================================

/// Remove employees by name.
pub fn cmd_remove(registry: &mut Registry, name: &str, json_mode: bool) -> Output {
    let before = registry.len();
    let remaining = registry.remove(name);
    let removed = before - remaining.len();
    tracing::info!("Removed {} employee(s) named {}", removed, name);

    if json_mode {
        return Output::Json(json!({
            "removed": removed,
            "employees": remaining
        }));
    }

    let mut lines = vec![format!("Removendo Funcionário {}...", name)];
    lines.extend(employee_block("Lista de Funcionários:", remaining));
    Output::Lines(lines)
}

/// Apply a raise to every salary.
pub fn cmd_raise(
    registry: &mut Registry,
    factor: roster_core::RaiseFactor,
    json_mode: bool,
) -> Output {
    tracing::info!("Applying raise factor {}", factor);
    let employees = registry.apply_raise(factor);

    if json_mode {
        return Output::Json(json!({
            "factor": factor,
            "employees": employees
        }));
    }

    let heading = match report::raise_percent(factor) {
        Some(percent) => format!("Salários atualizados com {}% de aumento:", percent),
        None => format!("Salários atualizados com fator {}:", factor),
    };
    let mut lines = vec![heading];
    lines.extend(employees.iter().map(raised_line));
    lines.push(SEPARATOR.to_string());
    Output::Lines(lines)
}

// =============================================================================
// QUERY COMMANDS
// =============================================================================

/// Group employees by role.
pub fn cmd_group(registry: &Registry, json_mode: bool) -> Output {
    let groups: Vec<RoleGroup> = registry
        .group_by_role()
        .into_iter()
        .map(|(role, members)| RoleGroup {
            role: role.to_string(),
            employees: members.into_iter().cloned().collect(),
        })
        .collect();

    if json_mode {
        return Output::Json(json!({ "groups": groups }));
    }

    let mut lines = vec!["Funcionários agrupados por função:".to_string()];
    lines.extend(group_block(
        groups
            .iter()
            .map(|g| (g.role.as_str(), g.employees.as_slice())),
    ));
    lines.push(SEPARATOR.to_string());
    Output::Lines(lines)
}

/// Employees born in either month.
pub fn cmd_birthdays(
    registry: &Registry,
    months: (roster_core::Month, roster_core::Month),
    json_mode: bool,
) -> Output {
    let (first, second) = months;
    let found = registry.filter_by_birth_month(first, second);

    if json_mode {
        return Output::Json(json!({
            "months": [first.number_from_month(), second.number_from_month()],
            "employees": found
        }));
    }

    let title = format!(
        "Funcionários com aniversário em {} e {}",
        report::month_name(first),
        report::month_name(second)
    );
    Output::Lines(employee_block(&title, found))
}

/// The oldest employee and their age.
pub fn cmd_oldest(registry: &Registry, today: NaiveDate, json_mode: bool) -> Output {
    let oldest = registry.oldest();

    if json_mode {
        return Output::Json(json!({
            "employee": oldest,
            "age": oldest.and_then(|e| e.person().age_on(today))
        }));
    }

    let line = match oldest {
        Some(employee) => oldest_line(employee, employee.person().age_on(today)),
        None => "Nenhum funcionário cadastrado.".to_string(),
    };
    Output::Lines(vec![line, SEPARATOR.to_string()])
}

/// Sum of all salaries.
pub fn cmd_total(registry: &Registry, json_mode: bool) -> Output {
    let total = registry.total_salary();

    if json_mode {
        return Output::Json(json!({ "total_salary": total }));
    }
    Output::Lines(vec![
        format!(
            "Total dos salários dos funcionários: {}",
            format_money(total)
        ),
        SEPARATOR.to_string(),
    ])
}

/// Minimum-wage multiples for every employee.
pub fn cmd_min_wage(
    registry: &Registry,
    base: roster_core::Amount,
    json_mode: bool,
) -> Result<Output, RosterError> {
    let multiples = registry.minimum_wage_multiples(base)?;

    if json_mode {
        return Ok(Output::Json(json!({
            "minimum_wage": base,
            "multiples": multiples
        })));
    }

    let mut lines = vec!["Quantidade de salários mínimos por funcionário:".to_string()];
    lines.extend(multiples.iter().map(ToString::to_string));
    Ok(Output::Lines(lines))
}
