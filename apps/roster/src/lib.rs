//! # Roster - Employee Registry Binary
//!
//! Library half of the `roster` binary: command-line surface, configuration
//! and pt-BR report rendering on top of `roster-core`.

pub mod cli;
pub mod config;
pub mod report;
