//! IO front-end for structures and the upstream mutation/sequence inputs.
//!
//! Structures are read from and written to the fixed-column PDB format. Mutation tables arrive as
//! tab-separated exports and candidate reference sequences as multi-FASTA files; both are parsed
//! into model types so the operations layer never touches raw text.

mod error;
mod fasta;
mod pdb;
mod table;

pub use pdb::reader::{load as load_pdb_structure, read as read_pdb_structure};
pub use pdb::writer::{save as save_pdb_structure, write_structure as write_pdb_structure};

pub use table::{load_mutations, read_mutations};

pub use fasta::{load_references, read_references};

pub use error::Error;
