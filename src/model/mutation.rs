//! Mutation records as delivered by the variant source, and the validated plans derived from them.
//!
//! A [`MutationRecord`] is a raw table row: its name is still expressed in the coordinate system
//! of a reference protein sequence. A [`MutationPlan`] is the resolved, structure-addressable form
//! produced once the record has been checked against the alignment and the structure; it is
//! immutable after construction.

use super::types::AminoAcid;
use std::fmt;
use std::str::FromStr;

/// Parsed missense notation such as `G12R` (an optional `p.` prefix is accepted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MutationName {
    /// One-letter amino acid found in the reference sequence.
    pub source: char,
    /// 1-based position within the reference sequence.
    pub position: usize,
    /// One-letter amino acid introduced by the mutation.
    pub target: char,
}

impl fmt::Display for MutationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.source, self.position, self.target)
    }
}

impl FromStr for MutationName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.trim();
        let body = body.strip_prefix("p.").unwrap_or(body);

        let digits_start = body
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| format!("Invalid mutation name: {}", s))?;
        let digits_end = body[digits_start..]
            .find(|c: char| !c.is_ascii_digit())
            .map(|offset| digits_start + offset)
            .ok_or_else(|| format!("Invalid mutation name: {}", s))?;

        let source = single_letter(&body[..digits_start])
            .ok_or_else(|| format!("Invalid source amino acid in mutation name: {}", s))?;
        let target = single_letter(&body[digits_end..])
            .ok_or_else(|| format!("Invalid target amino acid in mutation name: {}", s))?;
        let position = body[digits_start..digits_end]
            .parse::<usize>()
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| format!("Invalid position in mutation name: {}", s))?;

        Ok(Self {
            source: source.to_ascii_uppercase(),
            position,
            target: target.to_ascii_uppercase(),
        })
    }
}

fn single_letter(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c),
        _ => None,
    }
}

/// Annotation fields carried from the variant source into the output remarks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    pub somatic_status: String,
    pub transcript: String,
    pub zygosity: String,
    pub tissue: String,
    pub histology: String,
}

/// One row of the external mutation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    /// Raw mutation notation, e.g. `p.G12R`.
    pub name: String,
    pub provenance: Provenance,
}

impl MutationRecord {
    pub fn new(name: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            name: name.into(),
            provenance,
        }
    }
}

/// A validated mutation bound to a concrete residue id of the structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationPlan {
    name: MutationName,
    residue_id: i32,
    source: AminoAcid,
    target: AminoAcid,
    provenance: Provenance,
}

impl MutationPlan {
    pub fn new(
        name: MutationName,
        residue_id: i32,
        source: AminoAcid,
        target: AminoAcid,
        provenance: Provenance,
    ) -> Self {
        Self {
            name,
            residue_id,
            source,
            target,
            provenance,
        }
    }

    /// Human-readable name such as `G12R`.
    pub fn label(&self) -> String {
        self.name.to_string()
    }

    pub fn name(&self) -> &MutationName {
        &self.name
    }

    /// Position within the reference sequence.
    pub fn position(&self) -> usize {
        self.name.position
    }

    /// Residue id within the structure.
    pub fn residue_id(&self) -> i32 {
        self.residue_id
    }

    pub fn source(&self) -> AminoAcid {
        self.source
    }

    pub fn target(&self) -> AminoAcid {
        self.target
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}

impl fmt::Display for MutationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {} -> {})",
            self.name,
            self.residue_id,
            self.source.name(),
            self.target.name()
        )
    }
}

/// Candidate reference protein sequence identified by its FASTA header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSequence {
    pub name: String,
    pub sequence: String,
}

impl ReferenceSequence {
    pub fn new(name: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
