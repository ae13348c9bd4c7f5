//! # Report Rendering
//!
//! Human-readable pt-BR output for the console.
//!
//! - Dates as `DD/MM/YYYY`
//! - Money as `R$ 1.234,56` (period groups thousands, comma separates cents)
//! - Sections closed by a line of fifty dashes
//!
//! `Walkthrough` captures every step of the default report so it can be
//! rendered as text or serialized as JSON from the same run.

use crate::config::Settings;
use num_format::{CustomFormat, Grouping, ToFormattedString};
use roster_core::{
    Amount, Employee, Month, NaiveDate, RaiseFactor, Registry, RosterError, WageMultiple,
};
use serde::{Serialize, Serializer};

/// Closes every report section.
pub const SEPARATOR: &str = "--------------------------------------------------";

const MONTH_NAMES: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

// =============================================================================
// FORMATTING
// =============================================================================

/// `1234567.80` -> `1.234.567,80`
#[must_use]
pub fn format_decimal(amount: Amount) -> String {
    let units = amount.units();
    let grouped = CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator(".")
        .build()
        .map(|format| units.to_formatted_string(&format))
        .unwrap_or_else(|_| units.to_string());
    format!("{},{:02}", grouped, amount.cents())
}

/// `1234.50` -> `R$ 1.234,50`
#[must_use]
pub fn format_money(amount: Amount) -> String {
    format!("R$ {}", format_decimal(amount))
}

/// `1980-05-12` -> `12/05/1980`
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Portuguese month name.
#[must_use]
pub fn month_name(month: Month) -> &'static str {
    MONTH_NAMES[month.number_from_month() as usize - 1]
}

/// Percentage added by a raise: `1.10` -> `10`, `1.055` -> `5,5`.
///
/// Factors below one have no increase to show and yield `None`.
#[must_use]
pub fn raise_percent(factor: RaiseFactor) -> Option<String> {
    let hundred = Amount::from_hundredths(10_000);
    let raised = hundred.scale_by(factor).hundredths();
    let increase = Amount::from_hundredths(raised.checked_sub(hundred.hundredths())?);
    if increase.cents() == 0 {
        Some(increase.units().to_string())
    } else {
        let text = format_decimal(increase);
        Some(text.trim_end_matches('0').to_string())
    }
}

/// `Nome: X | Data de Nascimento: DD/MM/YYYY | Salário: R$ … | Função: Y`
#[must_use]
pub fn employee_line(employee: &Employee) -> String {
    format!(
        "Nome: {} | Data de Nascimento: {} | Salário: {} | Função: {}",
        employee.name(),
        format_date(employee.birth_date()),
        format_money(employee.salary()),
        employee.role()
    )
}

/// Member line inside a role group (role is already the heading).
#[must_use]
pub fn member_line(employee: &Employee) -> String {
    format!(
        "  Nome: {} | Data de Nascimento: {} | Salário: {}",
        employee.name(),
        format_date(employee.birth_date()),
        format_money(employee.salary())
    )
}

/// `Nome: X - Novo Salário: R$ …`
#[must_use]
pub fn raised_line(employee: &Employee) -> String {
    format!(
        "Nome: {} - Novo Salário: {}",
        employee.name(),
        format_money(employee.salary())
    )
}

/// A titled employee list followed by the separator.
#[must_use]
pub fn employee_block<'a>(
    title: &str,
    employees: impl IntoIterator<Item = &'a Employee>,
) -> Vec<String> {
    let mut lines = vec![title.to_string()];
    lines.extend(employees.into_iter().map(employee_line));
    lines.push(SEPARATOR.to_string());
    lines
}

/// `Função: R` headings, each followed by its members.
#[must_use]
pub fn group_block<'a, I>(groups: I) -> Vec<String>
where
    I: IntoIterator<Item = (&'a str, &'a [Employee])>,
{
    let mut lines = Vec::new();
    for (role, members) in groups {
        lines.push(format!("Função: {}", role));
        lines.extend(members.iter().map(member_line));
    }
    lines
}

/// `Funcionário com maior idade: X - N anos.`
#[must_use]
pub fn oldest_line(employee: &Employee, age: Option<u32>) -> String {
    match age {
        Some(years) => format!(
            "Funcionário com maior idade: {} - {} anos.",
            employee.name(),
            years
        ),
        None => format!("Funcionário com maior idade: {}", employee.name()),
    }
}

// =============================================================================
// WALKTHROUGH
// =============================================================================

/// Employees sharing one role.
#[derive(Debug, Clone, Serialize)]
pub struct RoleGroup {
    pub role: String,
    pub employees: Vec<Employee>,
}

/// The oldest employee and their age on the report date.
#[derive(Debug, Clone, Serialize)]
pub struct OldestEmployee {
    pub employee: Employee,
    pub age: Option<u32>,
}

/// Snapshot of every step of the default report.
#[derive(Debug, Clone, Serialize)]
pub struct Walkthrough {
    pub loaded: Vec<Employee>,
    pub removed_name: String,
    pub after_removal: Vec<Employee>,
    pub raise_factor: RaiseFactor,
    pub after_raise: Vec<Employee>,
    pub by_role: Vec<RoleGroup>,
    #[serde(serialize_with = "month_numbers")]
    pub birthday_months: (Month, Month),
    pub birthdays: Vec<Employee>,
    pub oldest: Option<OldestEmployee>,
    pub sorted: Vec<Employee>,
    pub total_salary: Amount,
    pub minimum_wage: Amount,
    pub minimum_wage_multiples: Vec<WageMultiple>,
}

impl Walkthrough {
    /// Run every registry operation in order.
    ///
    /// Removal and raise mutate `registry`; the later steps see those changes.
    pub fn run(
        registry: &mut Registry,
        settings: &Settings,
        today: NaiveDate,
    ) -> Result<Self, RosterError> {
        let loaded = registry.employees().to_vec();

        tracing::debug!("Removing employees named {}", settings.remove_name);
        let after_removal = registry.remove(&settings.remove_name).to_vec();

        tracing::debug!("Applying raise factor {}", settings.raise_factor);
        let after_raise = registry.apply_raise(settings.raise_factor).to_vec();

        let by_role = registry
            .group_by_role()
            .into_iter()
            .map(|(role, members)| RoleGroup {
                role: role.to_string(),
                employees: members.into_iter().cloned().collect(),
            })
            .collect();

        let (first, second) = settings.birthday_months;
        let birthdays = registry
            .filter_by_birth_month(first, second)
            .into_iter()
            .cloned()
            .collect();

        let oldest = registry.oldest().map(|e| OldestEmployee {
            employee: e.clone(),
            age: e.person().age_on(today),
        });

        let sorted = registry.sorted_by_name().into_iter().cloned().collect();
        let total_salary = registry.total_salary();
        let minimum_wage_multiples = registry.minimum_wage_multiples(settings.minimum_wage)?;

        Ok(Self {
            loaded,
            removed_name: settings.remove_name.clone(),
            after_removal,
            raise_factor: settings.raise_factor,
            after_raise,
            by_role,
            birthday_months: (first, second),
            birthdays,
            oldest,
            sorted,
            total_salary,
            minimum_wage: settings.minimum_wage,
            minimum_wage_multiples,
        })
    }

    /// Render the console report.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();

        lines.push("Adicionando Funcionários...".to_string());
        lines.extend(employee_block("Lista de Funcionários:", &self.loaded));

        lines.push(format!("Removendo Funcionário {}...", self.removed_name));
        lines.extend(employee_block("Lista de Funcionários:", &self.after_removal));

        lines.push("Adicionando aumento de salarios...".to_string());
        lines.push(match raise_percent(self.raise_factor) {
            Some(percent) => format!("Salários atualizados com {}% de aumento:", percent),
            None => format!("Salários atualizados com fator {}:", self.raise_factor),
        });
        lines.extend(self.after_raise.iter().map(raised_line));
        lines.push(SEPARATOR.to_string());

        lines.push("Agrupando Funcionários por função...".to_string());
        lines.push("Funcionários agrupados por função:".to_string());
        lines.extend(group_block(
            self.by_role
                .iter()
                .map(|g| (g.role.as_str(), g.employees.as_slice())),
        ));
        lines.push(SEPARATOR.to_string());

        let months = self.month_names();
        lines.push(format!(
            "Filtrando funcionários com aniversário em {}...",
            months
        ));
        lines.extend(employee_block(
            &format!("Funcionários com aniversário em {}", months),
            &self.birthdays,
        ));

        lines.push("Descobrindo funcionário com a maior idade...".to_string());
        if let Some(oldest) = &self.oldest {
            lines.push(oldest_line(&oldest.employee, oldest.age));
        }
        lines.push(SEPARATOR.to_string());

        lines.push("Organizando funcionários em ordem alfabética...".to_string());
        lines.extend(employee_block(
            "Funcionários em ordem alfabética",
            &self.sorted,
        ));

        lines.push("Calculando total dos salários dos funcionários".to_string());
        lines.push(format!(
            "Total dos salários dos funcionários: {}",
            format_money(self.total_salary)
        ));
        lines.push(SEPARATOR.to_string());

        lines.push("Verificando a quantidade de salários mínimos por funcionário...".to_string());
        lines.push("Quantidade de salários mínimos por funcionário:".to_string());
        lines.extend(self.minimum_wage_multiples.iter().map(ToString::to_string));

        lines
    }

    fn month_names(&self) -> String {
        let (first, second) = self.birthday_months;
        format!("{} e {}", month_name(first), month_name(second))
    }
}

/// Months serialize as their numbers (`[10, 12]`).
fn month_numbers<S: Serializer>(
    months: &(Month, Month),
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let (first, second) = months;
    [first.number_from_month(), second.number_from_month()].serialize(serializer)
}

// =============================================================================
// TESTS
// =============================================================================
