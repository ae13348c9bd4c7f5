//! # Roster - Employee Registry
//!
//! The main binary for the Roster employee registry.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                apps/roster (THE BINARY)               │
//! │                                                      │
//! │  ┌─────────────┐   ┌─────────────┐   ┌────────────┐  │
//! │  │    CLI      │   │   Config    │   │   Report   │  │
//! │  │   (clap)    │   │   (toml)    │   │   (pt-BR)  │  │
//! │  └──────┬──────┘   └──────┬──────┘   └─────┬──────┘  │
//! │         └─────────────────┼────────────────┘         │
//! │                           ▼                          │
//! │                   ┌───────────────┐                  │
//! │                   │  roster-core  │                  │
//! │                   │  (THE LOGIC)  │                  │
//! │                   └───────────────┘                  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Full report over the bundled sample
//! roster
//!
//! # Single operations over your own data
//! roster --data funcionarios.json raise --factor 1.05
//! roster birthdays --months 5 9
//! roster --json-mode min-wage --base 1320.00
//! ```

use clap::Parser;
use roster::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose);

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing on stderr. ROSTER_LOG_FORMAT=json enables machine-parseable output.
fn init_tracing(verbose: bool) {
    let log_format = std::env::var("ROSTER_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if verbose {
        "roster=debug"
    } else {
        "roster=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Print the Roster startup banner.
fn print_banner() {
    println!(
        r#"
  ┬─┐┌─┐┌─┐┌┬┐┌─┐┬─┐
  ├┬┘│ │└─┐ │ ├┤ ├┬┘
  ┴└─└─┘└─┘ ┴ └─┘┴└─

  Employee Registry v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
