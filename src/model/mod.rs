//! Core data structures for fixed-column protein structures and mutation bookkeeping.
//!
//! This module defines atoms, residues, and structures as they are read from and written back to
//! PDB-style files, together with the mutation records and plans that drive model generation.

pub mod atom;
pub mod mutation;
pub mod residue;
pub mod structure;
pub mod types;
