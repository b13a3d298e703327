//! `totokit` - validate, generate and count system-play combinations.
//!
//! Requests are TOML files (see [`totokit_core::DrawRequest`]); the
//! three subcommands share the same input surface. Logs go to stderr
//! and follow `RUST_LOG`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use totokit_core::{DrawRequest, Summary};
use totokit_engine::{count_feasible, generate, validate};

#[derive(Parser)]
#[command(name = "totokit", version, about = "System-play combination engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a request against every constraint axis.
    Validate {
        /// Path to a TOML request file.
        #[arg(long)]
        request: PathBuf,
    },
    /// Generate a batch of combinations.
    Generate {
        /// Path to a TOML request file.
        #[arg(long)]
        request: PathBuf,
        /// Emit one JSON object per combination instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Count every combination the request admits.
    Count {
        /// Path to a TOML request file.
        #[arg(long)]
        request: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Validate { request } => {
            let req = DrawRequest::load(&request)?;
            let plan = validate(&req).map_err(blamed)?;
            println!(
                "ok: {} candidates available, {} slots to fill",
                plan.available.len(),
                plan.required.total
            );
            Ok(())
        }
        Command::Generate { request, json } => {
            let req = DrawRequest::load(&request)?;
            let plan = validate(&req).map_err(blamed)?;
            let batch = generate(&plan)?;
            info!(requested = plan.count, produced = batch.len(), "batch ready");

            for combo in &batch {
                let summary = combo.summary(&plan.info);
                if json {
                    let line = serde_json::json!({
                        "numbers": combo.numbers(),
                        "sum": summary.sum,
                        "average": summary.average,
                        "odd_even": summary.odd_even(),
                        "low_high": summary.low_high(),
                        "decades": summary.decades,
                    });
                    println!("{line}");
                } else {
                    print_text(combo.to_string(), &summary);
                }
            }
            Ok(())
        }
        Command::Count { request } => {
            let req = DrawRequest::load(&request)?;
            let plan = validate(&req).map_err(blamed)?;
            println!("{}", count_feasible(&plan));
            Ok(())
        }
    }
}

fn print_text(numbers: String, summary: &Summary) {
    let decades: Vec<String> = summary
        .decades
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(idx, count)| format!("{}:{count}", Summary::decade_label(idx)))
        .collect();
    println!(
        "{numbers}  | sum {} avg {} odd/even {} low/high {} [{}]",
        summary.sum,
        summary.average,
        summary.odd_even(),
        summary.low_high(),
        decades.join(" ")
    );
}

fn blamed(violation: totokit_core::RuleViolation) -> Box<dyn std::error::Error> {
    format!("{:?}: {violation}", violation.field).into()
}
