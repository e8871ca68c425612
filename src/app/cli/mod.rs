//! CLI Adapter.

use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::app::api::{self, DeployOptions, DeployReport, PlanReport};
use crate::app::logging;
use crate::domain::{AppError, DeploymentSpec, exit_code};

#[derive(Parser)]
#[command(name = "flowdeploy")]
#[command(version)]
#[command(
    about = "Register flow deployments and their schedules with an orchestration service",
    long_about = None
)]
struct Cli {
    /// Emit debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register every flow entry in the config document
    #[clap(visible_alias = "d")]
    Deploy {
        /// Path to the YAML config document
        config: PathBuf,
        /// Resolve and print deployments without calling the API
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the resolved deployment specs without calling the API
    #[clap(visible_alias = "p")]
    Plan {
        /// Path to the YAML config document
        config: PathBuf,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<i32, AppError> = match cli.command {
        Commands::Deploy { config, dry_run } => run_deploy(&config, dry_run),
        Commands::Plan { config } => run_plan(&config),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn run_deploy(config: &Path, dry_run: bool) -> Result<i32, AppError> {
    let report = api::deploy(config, DeployOptions { dry_run })?;
    print_deploy_report(&report, dry_run);
    Ok(if report.has_failures() { exit_code::ENTRY_FAILURES } else { 0 })
}

fn print_deploy_report(report: &DeployReport, dry_run: bool) {
    if dry_run {
        println!("=== DRY RUN ===");
        for spec in report.outcomes.iter().filter_map(|outcome| outcome.spec.as_ref()) {
            print_dry_run_spec(spec);
        }
    }

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(receipt) if dry_run => println!("✅ Validated deployment '{}'", receipt.name),
            Ok(receipt) => match &receipt.deployment_id {
                Some(id) => println!("✅ Registered deployment '{}' ({})", receipt.name, id),
                None => println!("✅ Registered deployment '{}'", receipt.name),
            },
            Err(err) => println!("❌ {}: {}", outcome.identity, err),
        }
    }

    let total = report.outcomes.len();
    let succeeded = report.succeeded().count();
    let verb = if dry_run { "Validated" } else { "Registered" };
    println!("{} {} of {} deployment(s)", verb, succeeded, total);
}

fn print_dry_run_spec(spec: &DeploymentSpec) {
    println!("Would register deployment '{}':", spec.name);
    println!("  Entrypoint: {}", spec.entrypoint);
    println!("  Work pool: {}", spec.work_pool);
    match &spec.schedule {
        Some(schedule) => println!("  Schedule: {}", schedule.describe()),
        None => println!("  Schedule: none"),
    }
    println!("  Parameters: {}", spec.parameters.as_ref().map_or(0, |p| p.len()));
}

fn run_plan(config: &Path) -> Result<i32, AppError> {
    let report = api::plan(config)?;
    print_plan_report(&report)?;
    Ok(if report.has_failures() { exit_code::ENTRY_FAILURES } else { 0 })
}

fn print_plan_report(report: &PlanReport) -> Result<(), AppError> {
    if let Some(rendered) = render_plan(report)? {
        print!("{}", rendered);
    }

    for (identity, err) in report.failures() {
        println!("❌ {}: {}", identity, err);
    }
    Ok(())
}

/// YAML for the resolved specs, or `None` when no entry resolved.
fn render_plan(report: &PlanReport) -> Result<Option<String>, AppError> {
    let specs: Vec<_> = report.specs().collect();
    if specs.is_empty() {
        return Ok(None);
    }
    serde_yaml::to_string(&specs).map(Some).map_err(output_error)
}

/// Rendering failures are output errors, not configuration errors.
fn output_error(err: serde_yaml::Error) -> AppError {
    AppError::Io(io::Error::other(format!("Failed to render plan: {}", err)))
}
