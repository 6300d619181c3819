//! Reference sequence selection from mutation annotations.
//!
//! The variant source reports mutations against one transcript of a gene, while the sequence
//! source may return several isoforms. The source residues named by the mutations pin down enough
//! of the transcript's sequence to tell the candidates apart.

use crate::model::mutation::{MutationName, ReferenceSequence};
use crate::model::types::GAP;
use crate::ops::error::Error;
use tracing::debug;

/// Parses a raw mutation name, turning a malformed one into [`Error::MalformedMutation`].
pub fn parse_mutation_name(raw: &str) -> Result<MutationName, Error> {
    raw.parse::<MutationName>()
        .map_err(|reason| Error::malformed_mutation(raw, reason))
}

/// Length used for the estimated sequence: the longest candidate.
pub fn estimated_length(candidates: &[ReferenceSequence]) -> usize {
    candidates.iter().map(ReferenceSequence::len).max().unwrap_or(0)
}

/// Builds a gap-filled sequence of `length` residues carrying each mutation's source amino acid
/// at its position, with trailing gaps removed.
///
/// # Errors
///
/// Fails on a malformed name or a position past `length`.
pub fn build_estimated_sequence<'a, I>(length: usize, names: I) -> Result<String, Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sequence = vec![GAP; length];

    for raw in names {
        let name = parse_mutation_name(raw)?;
        let slot = sequence
            .get_mut(name.position - 1)
            .ok_or_else(|| Error::PositionOutOfRange {
                name: raw.to_string(),
                position: name.position,
                length,
            })?;
        *slot = name.source;
    }

    while sequence.last() == Some(&GAP) {
        sequence.pop();
    }

    Ok(sequence.into_iter().collect())
}

/// Whether `candidate` agrees with every known residue of `estimated`.
pub fn matches_estimate(estimated: &str, candidate: &str) -> bool {
    candidate.len() >= estimated.len()
        && estimated
            .bytes()
            .zip(candidate.bytes())
            .all(|(e, c)| e == GAP as u8 || e == c)
}

/// Returns the first candidate consistent with `estimated`.
///
/// # Errors
///
/// Returns [`Error::NoMatchingReference`] when no candidate matches.
pub fn select_matching_reference<'a>(
    estimated: &str,
    candidates: &'a [ReferenceSequence],
) -> Result<&'a ReferenceSequence, Error> {
    for candidate in candidates {
        if matches_estimate(estimated, &candidate.sequence) {
            debug!(reference = %candidate.name, "reference sequence matches estimate");
            return Ok(candidate);
        }
        debug!(reference = %candidate.name, "reference sequence rejected");
    }

    Err(Error::NoMatchingReference {
        candidates: candidates.len(),
        length: estimated.len(),
    })
}
