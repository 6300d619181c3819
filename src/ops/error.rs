use crate::model::types::AminoAcid;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("residue {res_id} not found in structure")]
    ResidueNotFound { res_id: i32 },

    #[error("residue {res_id} is '{found}', expected '{expected}'")]
    ResidueMismatch {
        res_id: i32,
        expected: AminoAcid,
        found: String,
    },

    #[error("none of {candidates} reference sequences matches the estimated sequence ({length} residues)")]
    NoMatchingReference { candidates: usize, length: usize },

    #[error("alignment failed: {reason}")]
    AlignmentFailed { reason: String },

    #[error("malformed mutation name '{name}': {reason}")]
    MalformedMutation { name: String, reason: String },

    #[error("mutation '{name}' refers to position {position}, beyond sequence length {length}")]
    PositionOutOfRange {
        name: String,
        position: usize,
        length: usize,
    },

    #[error("'{code}' is not a standard amino acid")]
    UnsupportedAminoAcid { code: char },

    #[error(transparent)]
    Io(#[from] crate::io::Error),
}

impl Error {
    pub fn residue_mismatch(res_id: i32, expected: AminoAcid, found: impl Into<String>) -> Self {
        Self::ResidueMismatch {
            res_id,
            expected,
            found: found.into(),
        }
    }

    pub fn alignment_failed(reason: impl Into<String>) -> Self {
        Self::AlignmentFailed {
            reason: reason.into(),
        }
    }

    pub fn malformed_mutation(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedMutation {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
