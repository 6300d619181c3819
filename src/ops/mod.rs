//! Operations that turn a structure and a list of reported mutations into mutated models.
//!
//! The pipeline runs leaf to root: [`build_estimated_sequence`] and
//! [`select_matching_reference`] identify the reference isoform the mutations refer to,
//! [`map_structure`] aligns that reference against the structure to bridge the two numbering
//! schemes, [`build_plans`] validates and deduplicates the mutations, and [`select_and_emit`]
//! writes one mutated copy of the structure per plan via [`mutate_residue`]. All stages share
//! a common error type.

mod align;
mod error;
mod generate;
mod mutate;
mod plan;
mod sequence;

pub use align::{
    Alignment, Column, GlobalAligner, Scoring, SequenceMap, align_and_map, map_structure,
    structure_track,
};

pub use sequence::{
    build_estimated_sequence, estimated_length, matches_estimate, parse_mutation_name,
    select_matching_reference,
};

pub use plan::build_plans;

pub use mutate::mutate_residue;

pub use generate::{
    GenerationConfig, GenerationReport, OutputNamer, PlanOutcome, emit, select_and_emit,
    select_plans,
};

pub use error::Error;
