//! One-structure-per-mutation generation.
//!
//! Every selected plan is applied to a private clone of the base structure and written next to
//! the input file. Plans are independent, so they are processed through the parallel iterator
//! abstraction; outcomes are reported in plan order and a failing plan never stops the others.

use crate::io;
use crate::model::mutation::MutationPlan;
use crate::model::structure::Structure;
use crate::ops::error::Error;
use crate::ops::mutate::mutate_residue;
use crate::utils::parallel::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Controls how many models are produced and how they are written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Upper bound on the number of structures written.
    pub max_models: usize,
    /// Seed for the random down-selection; a fresh seed is drawn when absent.
    pub seed: Option<u64>,
    /// Worker threads used for writing; the global pool is used when absent.
    pub threads: Option<usize>,
    /// Written as a `Generated by` remark at the top of every output file.
    pub generator: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_models: 10,
            seed: None,
            threads: None,
            generator: Some(format!("bio-mutate {}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

/// Derives output paths of the form `<base>.<mutation>.<ext>` from the input structure path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNamer {
    dir: PathBuf,
    stem: String,
    extension: Option<String>,
}

impl OutputNamer {
    pub fn new(structure_path: &Path) -> Self {
        Self {
            dir: structure_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            stem: structure_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            extension: structure_path
                .extension()
                .map(|s| s.to_string_lossy().into_owned()),
        }
    }

    /// Output path for `plan`, with the mutation name lower-cased.
    pub fn path_for(&self, plan: &MutationPlan) -> PathBuf {
        let label = plan.label().to_lowercase();
        let file_name = match &self.extension {
            Some(ext) => format!("{}.{}.{}", self.stem, label, ext),
            None => format!("{}.{}", self.stem, label),
        };
        self.dir.join(file_name)
    }
}

/// Result of one plan.
#[derive(Debug)]
pub struct PlanOutcome {
    pub plan: MutationPlan,
    pub result: Result<PathBuf, Error>,
}

/// Per-plan results of a generation run, in plan order.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub outcomes: Vec<PlanOutcome>,
}

impl GenerationReport {
    pub fn written(&self) -> impl Iterator<Item = (&MutationPlan, &Path)> {
        self.outcomes.iter().filter_map(|outcome| match &outcome.result {
            Ok(path) => Some((&outcome.plan, path.as_path())),
            Err(_) => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (&MutationPlan, &Error)> {
        self.outcomes.iter().filter_map(|outcome| match &outcome.result {
            Ok(_) => None,
            Err(e) => Some((&outcome.plan, e)),
        })
    }

    pub fn written_count(&self) -> usize {
        self.written().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Picks at most `max` plans uniformly at random without replacement, preserving plan order.
pub fn select_plans(plans: Vec<MutationPlan>, max: usize, seed: Option<u64>) -> Vec<MutationPlan> {
    if plans.len() <= max {
        return plans;
    }

    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut chosen = rand::seq::index::sample(&mut rng, plans.len(), max).into_vec();
    chosen.sort_unstable();

    debug!(seed, available = plans.len(), selected = max, "down-selected plans");

    let mut chosen = chosen.into_iter().peekable();
    plans
        .into_iter()
        .enumerate()
        .filter_map(|(idx, plan)| {
            if chosen.peek() == Some(&idx) {
                chosen.next();
                Some(plan)
            } else {
                None
            }
        })
        .collect()
}

/// Writes one mutated copy of `structure` per plan.
pub fn emit(
    structure: &Structure,
    plans: &[MutationPlan],
    namer: &OutputNamer,
    config: &GenerationConfig,
) -> GenerationReport {
    let generator = config.generator.as_deref();

    let outcomes = with_pool(config.threads, || {
        plans
            .par_iter()
            .map(|plan| PlanOutcome {
                plan: plan.clone(),
                result: write_variant(structure, plan, namer, generator),
            })
            .collect::<Vec<_>>()
    });

    for outcome in &outcomes {
        match &outcome.result {
            Ok(path) => info!(mutation = %outcome.plan, path = %path.display(), "wrote model"),
            Err(e) => error!(mutation = %outcome.plan, "failed to generate model: {}", e),
        }
    }

    GenerationReport { outcomes }
}

/// Down-selects `plans` to the configured maximum and writes the survivors.
pub fn select_and_emit(
    structure: &Structure,
    plans: Vec<MutationPlan>,
    namer: &OutputNamer,
    config: &GenerationConfig,
) -> GenerationReport {
    let selected = select_plans(plans, config.max_models, config.seed);
    info!(models = selected.len(), "generating mutated structures");
    emit(structure, &selected, namer, config)
}

fn write_variant(
    base: &Structure,
    plan: &MutationPlan,
    namer: &OutputNamer,
    generator: Option<&str>,
) -> Result<PathBuf, Error> {
    let mut variant = base.clone();
    mutate_residue(&mut variant, plan)?;
    let path = namer.path_for(plan);
    io::save_pdb_structure(&path, &variant, generator)?;
    Ok(path)
}

#[cfg(feature = "parallel")]
fn with_pool<T, F>(threads: Option<usize>, job: F) -> T
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    let Some(threads) = threads else {
        return job();
    };
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(job),
        Err(e) => {
            tracing::warn!("could not build a {}-thread pool, using the global pool: {}", threads, e);
            job()
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn with_pool<T, F>(_threads: Option<usize>, job: F) -> T
where
    F: FnOnce() -> T,
{
    job()
}
