//! # Roster CLI Module
//!
//! This module implements the CLI interface for Roster.
//!
//! ## Available Commands
//!
//! - `report` - Full walkthrough of every operation (default)
//! - `list` - Print all employees
//! - `remove` - Remove employees by name
//! - `raise` - Apply a salary raise
//! - `group` - Group employees by role
//! - `birthdays` - Filter employees by birth month
//! - `oldest` - Show the oldest employee
//! - `sorted` - Sort employees by name
//! - `total` - Sum all salaries
//! - `min-wage` - Show how many minimum wages each employee earns
//!
//! Every command loads the record source first. If loading fails the
//! command is not run.

mod commands;

use crate::config::{FileConfig, Settings};
use clap::{Parser, Subcommand};
use roster_core::{Amount, RaiseFactor, RosterError};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Roster - Employee Registry
///
/// Loads employee records and reports on them: removals, raises, role
/// groups, birthdays, the oldest employee, totals and minimum-wage multiples.
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the employee record source (JSON). Defaults to the bundled sample
    #[arg(short = 'd', long, global = true)]
    pub data: Option<PathBuf>,

    /// Path to the configuration file (default: roster.toml when present)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run every operation in sequence and print the full report
    Report,

    /// List all employees
    List,

    /// Remove every employee with the given name (case-insensitive)
    Remove {
        /// Name to remove (default: configured remove_name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Multiply every salary by a factor
    Raise {
        /// Raise factor, e.g. 1.10 for 10% (default: configured raise_factor)
        #[arg(short, long)]
        factor: Option<RaiseFactor>,
    },

    /// Group employees by role
    Group,

    /// List employees born in either of two months
    Birthdays {
        /// Two month numbers, 1-12 (default: configured birthday_months)
        #[arg(short, long, num_args = 2, value_parser = clap::value_parser!(u8).range(1..=12))]
        months: Option<Vec<u8>>,
    },

    /// Show the oldest employee
    Oldest,

    /// List employees in alphabetical order
    Sorted,

    /// Show the sum of all salaries
    Total,

    /// Show how many minimum wages each employee earns
    MinWage {
        /// Minimum wage, e.g. 1212.00 (default: configured minimum_wage)
        #[arg(short, long)]
        base: Option<Amount>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), RosterError> {
    let file = FileConfig::discover(cli.config.as_deref())?;
    let settings = Settings::resolve(file, cli.data)?;

    let mut registry = load_registry(settings.data.as_deref())?;

    let command = cli.command.unwrap_or(Commands::Report);
    let today = chrono::Local::now().date_naive();
    let output = run_command(&mut registry, &settings, &command, cli.json_mode, today)?;
    output.print();

    Ok(())
}
