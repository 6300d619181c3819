use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};

use bio_mutate::config::Settings;

use crate::commands::{Mapping, MappingInputs, print_boxed_label, resolve_mapping};

/// Dry run that lists every validated mutation plan.
#[derive(Debug, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub inputs: MappingInputs,
}

pub fn run(args: &PlanArgs, settings: &Settings) -> Result<()> {
    let mapping = resolve_mapping(&args.inputs, &settings.alignment)?;
    print_plans(&mapping)
}

fn print_plans(mapping: &Mapping) -> Result<()> {
    let mut stdout = io::stdout().lock();

    print_boxed_label(&mut stdout, &format!("Mutation Plans for {}", mapping.reference.name))?;
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["Mutation", "Residue", "Source", "Target", "Tissue", "Histology"]);
    for plan in &mapping.plans {
        let provenance = plan.provenance();
        table.add_row(row![
            plan.label(),
            plan.residue_id(),
            plan.source(),
            plan.target(),
            provenance.tissue,
            provenance.histology
        ]);
    }
    table
        .print(&mut stdout)
        .context("Failed to render plan table")?;
    writeln!(
        &mut stdout,
        "{} plans; {} of {} reference positions mapped (alignment score {})",
        mapping.plans.len(),
        mapping.map.mapped_count(),
        mapping.map.len(),
        mapping.map.score()
    )?;

    Ok(())
}
