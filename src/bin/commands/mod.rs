use std::io::{self as stdio, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bio_mutate::config::Settings;
use bio_mutate::io::{load_mutations, load_pdb_structure, load_references};
use bio_mutate::ops::{
    GlobalAligner, Scoring, SequenceMap, build_estimated_sequence, build_plans, estimated_length,
    map_structure, select_matching_reference,
};
use bio_mutate::{MutationPlan, ReferenceSequence, Structure};

pub mod generate;
pub mod plan;
pub mod sequence;

/// Inputs shared by every command that maps mutations onto a structure.
#[derive(Debug, Clone, Args)]
pub struct MappingInputs {
    /// Gene identifier the mutations and reference sequences belong to.
    #[arg(short, long, value_name = "ID")]
    pub gene: String,
    /// Structure file; `.pdb` is appended when the path has no extension.
    #[arg(short, long, value_name = "FILE")]
    pub pdb: PathBuf,
    /// Tab-separated mutation export with an `AA Mutation` column.
    #[arg(short, long, value_name = "FILE")]
    pub mutations: PathBuf,
    /// Multi-FASTA file with candidate reference sequences.
    #[arg(short, long, value_name = "FILE")]
    pub references: PathBuf,
}

/// Everything resolved before any model is written.
pub struct Mapping {
    pub structure_path: PathBuf,
    pub structure: Structure,
    pub reference: ReferenceSequence,
    pub map: SequenceMap,
    pub plans: Vec<MutationPlan>,
}

/// Installs the stderr log subscriber; `RUST_LOG` takes precedence unless `quiet` is set.
pub fn init_tracing(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stdio::stderr)
        .with_target(false)
        .init();
}

pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}

/// Appends the `.pdb` extension to paths that have none.
pub fn resolve_structure_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("pdb")
    }
}

/// Loads all inputs, selects the reference sequence, aligns it, and builds the mutation plans.
pub fn resolve_mapping(inputs: &MappingInputs, scoring: &Scoring) -> Result<Mapping> {
    let gene = inputs.gene.trim();
    if gene.is_empty() {
        bail!("Gene identifier must not be empty.");
    }

    let structure_path = resolve_structure_path(&inputs.pdb);
    let structure = load_pdb_structure(&structure_path)
        .with_context(|| format!("Failed to load structure {}", structure_path.display()))?;
    info!(path = %structure_path.display(), "loaded {}", structure);

    let records = load_mutations(&inputs.mutations).with_context(|| {
        format!("Failed to read mutations from {}", inputs.mutations.display())
    })?;
    let candidates = load_references(&inputs.references).with_context(|| {
        format!(
            "Failed to read reference sequences from {}",
            inputs.references.display()
        )
    })?;
    info!(
        gene,
        mutations = records.len(),
        references = candidates.len(),
        "loaded mutation sources"
    );

    let estimated = build_estimated_sequence(
        estimated_length(&candidates),
        records.iter().map(|r| r.name.as_str()),
    )
    .context("Failed to estimate the reference sequence from the mutation list")?;
    let reference = select_matching_reference(&estimated, &candidates)
        .with_context(|| format!("No reference sequence of {} matches its mutations", gene))?
        .clone();
    info!(reference = %reference.name, length = reference.len(), "selected reference sequence");

    let aligner = GlobalAligner::new(*scoring);
    let map = run_with_spinner("Aligning reference sequence to structure", || {
        map_structure(&aligner, &reference.sequence, &structure)
            .context("Failed to align the reference sequence to the structure")
    })?;
    info!(
        score = map.score(),
        mapped = map.mapped_count(),
        "aligned {} reference positions",
        map.len()
    );

    let plans = build_plans(&records, &map, &structure).context("Failed to build mutation plans")?;

    Ok(Mapping {
        structure_path,
        structure,
        reference,
        map,
        plans,
    })
}

/// Wraps long-running operations with a spinner rendered to stderr.
pub fn run_with_spinner<T, F>(message: &str, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());

    let result = work();

    match &result {
        Ok(_) => spinner.finish_with_message(format!("{} ✓", message)),
        Err(_) => spinner.abandon_with_message(format!("{} ✗", message)),
    }

    result
}

pub fn print_boxed_label<W: Write>(writer: &mut W, title: &str) -> stdio::Result<()> {
    let inner = format!(" {title} ");
    let width = inner.chars().count();
    writeln!(writer, "╭{}╮", "─".repeat(width))?;
    writeln!(writer, "│{}│", inner)?;
    writeln!(writer, "╰{}╯", "─".repeat(width))?;
    Ok(())
}
