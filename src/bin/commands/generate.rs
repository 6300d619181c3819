use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clap::Args;
use prettytable::{Table, format, row};
use tracing::warn;

use bio_mutate::config::Settings;
use bio_mutate::ops::{GenerationConfig, GenerationReport, OutputNamer, select_and_emit};

use crate::commands::{MappingInputs, print_boxed_label, resolve_mapping, run_with_spinner};

/// Full pipeline: map the mutations and write one model per selected plan.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub inputs: MappingInputs,
    /// Maximum number of models to write; larger plan sets are sampled at random.
    #[arg(short = 'n', long = "nummodels", value_name = "N")]
    pub num_models: usize,
    /// Seed for the random down-selection.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
    /// Number of worker threads used to write models.
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,
}

pub fn run(args: &GenerateArgs, settings: &Settings) -> Result<()> {
    if args.num_models == 0 {
        bail!("--nummodels must be at least 1.");
    }

    let mapping = resolve_mapping(&args.inputs, &settings.alignment)?;
    if mapping.plans.is_empty() {
        warn!("no mutation could be placed on the structure; nothing to write");
        return Ok(());
    }

    let config = GenerationConfig {
        max_models: args.num_models,
        seed: args.seed.or(settings.generation.seed),
        threads: args.threads.or(settings.generation.threads),
        generator: settings.generation.generator.clone(),
    };
    let namer = OutputNamer::new(&mapping.structure_path);

    let report = run_with_spinner("Writing mutated structures", || {
        Ok(select_and_emit(
            &mapping.structure,
            mapping.plans,
            &namer,
            &config,
        ))
    })?;

    print_report(&report)?;

    if report.written_count() == 0 {
        bail!(
            "All {} selected mutations failed; no model was written.",
            report.failure_count()
        );
    }

    Ok(())
}

fn print_report(report: &GenerationReport) -> Result<()> {
    let mut stderr = io::stderr().lock();

    print_boxed_label(&mut stderr, "Generated Models")?;
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["Mutation", "Residue", "Change", "Output"]);
    for outcome in &report.outcomes {
        let plan = &outcome.plan;
        let output = match &outcome.result {
            Ok(path) => path.display().to_string(),
            Err(e) => format!("failed: {}", e),
        };
        table.add_row(row![
            plan.label(),
            plan.residue_id(),
            format!("{} -> {}", plan.source(), plan.target()),
            output
        ]);
    }
    table
        .print(&mut stderr)
        .context("Failed to render generation summary")?;
    writeln!(
        &mut stderr,
        "{} written, {} failed",
        report.written_count(),
        report.failure_count()
    )?;

    Ok(())
}
