//! # BioMutate
//!
//! **BioMutate** maps reported missense mutations of a gene onto an experimental protein structure and writes one mutated structure file per mutation. Mutation positions refer to a reference protein sequence while structure files carry their own residue numbering and gaps; the crate reconciles the two by global sequence alignment before touching any coordinates.
//!
//! ## Features
//!
//! - **Faithful PDB round-trip** – A fixed-column reader and writer that keep every atom field and the occupancy/B-factor tail byte-for-byte while renumbering serials densely; chains are lettered by terminator records.
//! - **Reference isoform selection** – The source residues named by the mutations pin down which of several candidate reference sequences the mutation list was reported against.
//! - **Alignment-based numbering bridge** – An affine-gap global aligner maps every reference position onto a structure residue id, leaving positions the structure lacks unmapped.
//! - **Validated, immutable plans** – Mutations are checked against the reference and the structure, deduplicated by position and target, and frozen into `MutationPlan` values in deterministic order.
//! - **Side-chain truncation with provenance** – Each variant keeps only the backbone and beta carbon of the mutated residue and records the mutation's provenance as remarks.

mod model;
mod utils;

pub mod config;
pub mod io;
pub mod ops;

pub use model::atom::Atom;
pub use model::mutation::{
    MutationName, MutationPlan, MutationRecord, Provenance, ReferenceSequence,
};
pub use model::residue::Residue;
pub use model::structure::{MAX_CHAINS, Structure};
pub use model::types::{AminoAcid, GAP, Point, is_backbone_title, one_letter_code};
