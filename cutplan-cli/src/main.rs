//! cutplan - CLI tool to compute plank purchase and cut plans.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cutplan_core::export::{
    cut_plan_markdown, purchase_plan_markdown, write_cut_list_csv, write_purchase_csv,
};
use cutplan_core::{plan_project, validate_input, Project};

/// Output format for the computed plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Markdown,
    Csv,
    Json,
}

/// Compute the cheapest plank purchase and cut plan for a project file.
#[derive(Parser, Debug)]
#[command(name = "cutplan")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input project JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "markdown")]
    format: Format,

    /// Override the project's saw kerf in millimeters
    #[arg(long)]
    kerf: Option<u64>,

    /// Validate only, don't compute a plan
    #[arg(long)]
    validate: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Processing: {}", args.input.display());

    let mut project = Project::load(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    if let Some(kerf) = args.kerf {
        project.settings.saw_kerf_mm = kerf;
    }

    let validation = validate_input(
        &project.catalog,
        &project.required_pieces,
        &project.settings,
    );

    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    for err in &validation.errors {
        error!("{}", err);
    }
    if !validation.passed {
        anyhow::bail!("Validation failed");
    }

    // Validate-only mode
    if args.validate {
        info!("Validation passed");
        return Ok(());
    }

    let report = plan_project(&project)?;

    info!(
        "Planned {} plank(s), {} purchase line(s)",
        report.planks.len(),
        report.purchase_plan.len()
    );
    for message in &report.errors {
        warn!("{}", message);
    }

    let unit = project.settings.unit_system;
    let rendered = match args.format {
        Format::Markdown => {
            let mut text =
                purchase_plan_markdown(&report.purchase_plan, unit, &project.settings.currency);
            text.push_str("\n\n");
            text.push_str(&cut_plan_markdown(
                &report.planks,
                &project.required_pieces,
                unit,
            ));
            text.push('\n');
            text
        }
        Format::Csv => {
            let mut buffer = Vec::new();
            write_purchase_csv(&mut buffer, &report.purchase_plan)?;
            write_cut_list_csv(&mut buffer, &report.planks)?;
            String::from_utf8(buffer)?
        }
        Format::Json => {
            let mut text = serde_json::to_string_pretty(&report)?;
            text.push('\n');
            text
        }
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Generated: {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
