//! Global sequence alignment and the reference-to-structure coordinate bridge.
//!
//! Mutation positions are expressed in the numbering of a reference protein sequence, whereas the
//! structure file uses its own residue ids and usually misses some residues. Aligning the
//! reference against the structure-derived sequence yields, for each reference position, the
//! residue id that occupies it in the structure (or nothing when the structure has a gap there).
//!
//! The aligner is a Needleman–Wunsch/Gotoh dynamic program with affine gap costs: a gap of length
//! `k` costs `gap_open + k * gap_extend`, which degenerates to a linear penalty when `gap_open`
//! is zero.

use crate::model::structure::Structure;
use crate::model::types::GAP;
use crate::ops::error::Error;
use serde::Deserialize;
use tracing::debug;

/// Substitution and gap scores used by [`GlobalAligner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scoring {
    /// Score for two identical residues.
    pub match_score: i32,
    /// Score for two different residues.
    pub mismatch_score: i32,
    /// Added once per gap.
    pub gap_open: i32,
    /// Added for every position a gap spans.
    pub gap_extend: i32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            match_score: 2,
            mismatch_score: -1,
            gap_open: 0,
            gap_extend: -2,
        }
    }
}

impl Scoring {
    fn substitution(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}

/// One column of a pairwise alignment: indices into the reference and structure sequences.
///
/// `None` on either side marks a gap in that sequence.
pub type Column = (Option<usize>, Option<usize>);

/// Best-scoring end-to-end alignment of two sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub score: i32,
    pub columns: Vec<Column>,
}

impl Alignment {
    /// Renders both tracks with [`GAP`] in gap columns.
    pub fn tracks(&self, reference: &str, other: &str) -> (String, String) {
        let reference = reference.as_bytes();
        let other = other.as_bytes();
        self.columns
            .iter()
            .map(|&(r, o)| {
                (
                    r.map_or(GAP, |i| reference[i] as char),
                    o.map_or(GAP, |j| other[j] as char),
                )
            })
            .unzip()
    }
}

const NEG_INF: i32 = i32::MIN / 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Match,
    RefOnly,
    OtherOnly,
}

/// Global aligner with affine gap penalties.
#[derive(Debug, Clone, Default)]
pub struct GlobalAligner {
    scoring: Scoring,
}

struct Matrices {
    cols: usize,
    m: Vec<i32>,
    x: Vec<i32>,
    y: Vec<i32>,
}

impl Matrices {
    fn idx(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    // Ties favour gaps so that a run of repeated residues is closed off at its end.
    fn best(&self, i: usize, j: usize) -> (i32, State) {
        let k = self.idx(i, j);
        let mut best = (self.x[k], State::RefOnly);
        if self.y[k] > best.0 {
            best = (self.y[k], State::OtherOnly);
        }
        if self.m[k] > best.0 {
            best = (self.m[k], State::Match);
        }
        best
    }
}

impl GlobalAligner {
    pub fn new(scoring: Scoring) -> Self {
        Self { scoring }
    }

    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    /// Aligns `reference` against `other` end to end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlignmentFailed`] when either sequence is empty.
    pub fn align(&self, reference: &str, other: &str) -> Result<Alignment, Error> {
        if reference.is_empty() || other.is_empty() {
            return Err(Error::alignment_failed(format!(
                "cannot align empty sequence (reference: {}, structure: {})",
                reference.len(),
                other.len()
            )));
        }

        let a = reference.as_bytes();
        let b = other.as_bytes();
        let matrices = self.fill(a, b);
        let (score, _) = matrices.best(a.len(), b.len());
        let columns = self.trace_back(&matrices, a, b);

        debug!(
            score,
            columns = columns.len(),
            "aligned {} against {} residues",
            a.len(),
            b.len()
        );

        Ok(Alignment { score, columns })
    }

    fn fill(&self, a: &[u8], b: &[u8]) -> Matrices {
        let rows = a.len() + 1;
        let cols = b.len() + 1;
        let open = self.scoring.gap_open + self.scoring.gap_extend;
        let extend = self.scoring.gap_extend;

        let mut mx = Matrices {
            cols,
            m: vec![NEG_INF; rows * cols],
            x: vec![NEG_INF; rows * cols],
            y: vec![NEG_INF; rows * cols],
        };

        mx.m[0] = 0;
        for i in 1..rows {
            let k = mx.idx(i, 0);
            mx.x[k] = self.scoring.gap_open + i as i32 * extend;
        }
        for j in 1..cols {
            let k = mx.idx(0, j);
            mx.y[k] = self.scoring.gap_open + j as i32 * extend;
        }

        for i in 1..rows {
            for j in 1..cols {
                let k = mx.idx(i, j);
                let diag = mx.idx(i - 1, j - 1);
                let up = mx.idx(i - 1, j);
                let left = mx.idx(i, j - 1);

                let diag_best = mx.m[diag].max(mx.x[diag]).max(mx.y[diag]);
                mx.m[k] = diag_best + self.scoring.substitution(a[i - 1], b[j - 1]);

                mx.x[k] = (mx.x[up] + extend)
                    .max(mx.m[up] + open)
                    .max(mx.y[up] + open);

                mx.y[k] = (mx.y[left] + extend)
                    .max(mx.m[left] + open)
                    .max(mx.x[left] + open);
            }
        }

        mx
    }

    fn trace_back(&self, mx: &Matrices, a: &[u8], b: &[u8]) -> Vec<Column> {
        let open = self.scoring.gap_open + self.scoring.gap_extend;
        let extend = self.scoring.gap_extend;

        let (mut i, mut j) = (a.len(), b.len());
        let (_, mut state) = mx.best(i, j);
        let mut columns = Vec::with_capacity(i + j);

        while i > 0 || j > 0 {
            if i == 0 {
                state = State::OtherOnly;
            } else if j == 0 {
                state = State::RefOnly;
            }

            let k = mx.idx(i, j);
            match state {
                State::Match => {
                    columns.push((Some(i - 1), Some(j - 1)));
                    i -= 1;
                    j -= 1;
                    state = mx.best(i, j).1;
                }
                State::RefOnly => {
                    columns.push((Some(i - 1), None));
                    let up = mx.idx(i - 1, j);
                    state = if mx.x[up] + extend == mx.x[k] {
                        State::RefOnly
                    } else if mx.m[up] + open == mx.x[k] {
                        State::Match
                    } else {
                        State::OtherOnly
                    };
                    i -= 1;
                }
                State::OtherOnly => {
                    columns.push((None, Some(j - 1)));
                    let left = mx.idx(i, j - 1);
                    state = if mx.y[left] + extend == mx.y[k] {
                        State::OtherOnly
                    } else if mx.m[left] + open == mx.y[k] {
                        State::Match
                    } else {
                        State::RefOnly
                    };
                    j -= 1;
                }
            }
        }

        columns.reverse();
        columns
    }
}

/// Per-reference-position view of an alignment against a structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceMap {
    reference: Vec<char>,
    aligned: Vec<char>,
    residue_ids: Vec<i32>,
    score: i32,
}

impl SequenceMap {
    /// Number of reference positions covered.
    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// Real residue id for every reference index, `0` where the structure has a gap.
    pub fn residue_ids(&self) -> &[i32] {
        &self.residue_ids
    }

    /// Residue id aligned to the 1-based reference `position`, if any.
    pub fn residue_id(&self, position: usize) -> Option<i32> {
        position
            .checked_sub(1)
            .and_then(|idx| self.residue_ids.get(idx))
            .copied()
            .filter(|id| *id != 0)
    }

    /// Reference residue at the 1-based `position`.
    pub fn reference_code(&self, position: usize) -> Option<char> {
        position
            .checked_sub(1)
            .and_then(|idx| self.reference.get(idx))
            .copied()
    }

    /// Structure residue aligned to the 1-based reference `position`, [`GAP`] where unmapped.
    pub fn structure_code(&self, position: usize) -> Option<char> {
        position
            .checked_sub(1)
            .and_then(|idx| self.aligned.get(idx))
            .copied()
    }

    /// Number of reference positions that land on a structure residue.
    pub fn mapped_count(&self) -> usize {
        self.residue_ids.iter().filter(|id| **id != 0).count()
    }
}

/// Aligns `reference` against `structure_sequence` and maps every reference position to a
/// residue id.
///
/// The `k`-th symbol of `structure_sequence` (counting from 1, placeholders included) is taken
/// to be residue `base_offset + k`. Reference positions aligned to an alignment gap map to `0`.
pub fn align_and_map(
    aligner: &GlobalAligner,
    reference: &str,
    structure_sequence: &str,
    base_offset: i32,
) -> Result<SequenceMap, Error> {
    let alignment = aligner.align(reference, structure_sequence)?;
    let ref_bytes = reference.as_bytes();
    let other_bytes = structure_sequence.as_bytes();

    let mut map = SequenceMap {
        reference: Vec::with_capacity(ref_bytes.len()),
        aligned: Vec::with_capacity(ref_bytes.len()),
        residue_ids: Vec::with_capacity(ref_bytes.len()),
        score: alignment.score,
    };

    let mut consumed = 0i32;
    for (r, o) in alignment.columns {
        if o.is_some() {
            consumed += 1;
        }
        let Some(r) = r else { continue };

        map.reference.push(ref_bytes[r] as char);
        match o {
            Some(j) => {
                map.aligned.push(other_bytes[j] as char);
                map.residue_ids.push(base_offset + consumed);
            }
            None => {
                map.aligned.push(GAP);
                map.residue_ids.push(0);
            }
        }
    }

    Ok(map)
}

/// Structure-derived sequence with its leading placeholder run removed, plus the residue id
/// offset of its first symbol.
///
/// [`Structure::sequence`] starts at residue id 1, so a structure whose first residue is 35
/// begins with 34 placeholders that would otherwise be aligned as if they were residues.
pub fn structure_track(structure: &Structure) -> (String, i32) {
    let sequence = structure.sequence();
    let lead = structure.residue_base_offset().max(0);
    let skip = (lead as usize).min(sequence.len());
    (sequence[skip..].to_string(), skip as i32)
}

/// Maps `reference` onto the residue ids of `structure`.
pub fn map_structure(
    aligner: &GlobalAligner,
    reference: &str,
    structure: &Structure,
) -> Result<SequenceMap, Error> {
    let (track, offset) = structure_track(structure);
    align_and_map(aligner, reference, &track, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::types::Point;

    fn aligner() -> GlobalAligner {
        GlobalAligner::default()
    }

    fn structure_with(residues: &[(i32, &str)]) -> Structure {
        let mut structure = Structure::new();
        for (serial, (id, name)) in residues.iter().enumerate() {
            structure.add_atom(
                serial + 1,
                Atom::new(" CA ", name, 'A', *id, Point::origin()),
            );
        }
        structure
    }

    #[test]
    fn default_scoring_matches_documented_values() {
        let scoring = Scoring::default();
        assert_eq!(scoring.match_score, 2);
        assert_eq!(scoring.mismatch_score, -1);
        assert_eq!(scoring.gap_open, 0);
        assert_eq!(scoring.gap_extend, -2);
    }

    #[test]
    fn identical_sequences_align_without_gaps() {
        let alignment = aligner().align("MKTAYIAK", "MKTAYIAK").unwrap();

        assert_eq!(alignment.score, 16);
        assert!(alignment.columns.iter().all(|(r, o)| r.is_some() && o.is_some()));
    }

    #[test]
    fn repeated_residue_gap_closes_the_run() {
        let alignment = aligner().align("MAAG", "MAG").unwrap();
        let (reference, other) = alignment.tracks("MAAG", "MAG");

        assert_eq!(reference, "MAAG");
        assert_eq!(other, "MA-G");
        assert_eq!(alignment.score, 4);
    }

    #[test]
    fn maps_reference_positions_to_residue_ids() {
        let map = align_and_map(&aligner(), "MAAG", "MAG", 0).unwrap();

        assert_eq!(map.residue_ids(), &[1, 2, 0, 3]);
        assert_eq!(map.residue_id(1), Some(1));
        assert_eq!(map.residue_id(3), None);
        assert_eq!(map.residue_id(4), Some(3));
        assert_eq!(map.residue_id(0), None);
        assert_eq!(map.residue_id(5), None);
        assert_eq!(map.reference_code(3), Some('A'));
        assert_eq!(map.structure_code(3), Some(GAP));
        assert_eq!(map.mapped_count(), 3);
    }

    #[test]
    fn base_offset_shifts_residue_ids() {
        let map = align_and_map(&aligner(), "MAAG", "MAG", 99).unwrap();
        assert_eq!(map.residue_ids(), &[100, 101, 0, 102]);
    }

    #[test]
    fn structure_overhang_does_not_consume_reference_positions() {
        let map = align_and_map(&aligner(), "KTAY", "GGKTAY", 0).unwrap();

        assert_eq!(map.len(), 4);
        assert_eq!(map.residue_ids(), &[3, 4, 5, 6]);
    }

    #[test]
    fn affine_open_penalty_prefers_a_single_gap() {
        let scoring = Scoring {
            gap_open: -10,
            gap_extend: -1,
            ..Scoring::default()
        };
        let alignment = GlobalAligner::new(scoring)
            .align("AAACCCGGG", "AAAGGG")
            .unwrap();
        let (_, other) = alignment.tracks("AAACCCGGG", "AAAGGG");

        assert_eq!(other, "AAA---GGG");
        assert_eq!(alignment.score, 12 - 10 - 3);
    }

    #[test]
    fn empty_input_fails() {
        let err = aligner().align("", "MAG").unwrap_err();
        assert!(matches!(err, Error::AlignmentFailed { .. }));
        assert!(aligner().align("MAG", "").is_err());
    }

    #[test]
    fn structure_track_skips_leading_placeholders() {
        let structure = structure_with(&[(3, "MET"), (4, "ALA"), (6, "GLY")]);
        let (track, offset) = structure_track(&structure);

        assert_eq!(structure.sequence(), "--MA-G");
        assert_eq!(track, "MA-G");
        assert_eq!(offset, 2);
    }

    #[test]
    fn map_structure_handles_internal_missing_residue() {
        let structure = structure_with(&[(3, "MET"), (4, "ALA"), (6, "GLY"), (7, "LYS")]);
        let map = map_structure(&aligner(), "MAEGK", &structure).unwrap();

        assert_eq!(map.residue_ids(), &[3, 4, 5, 6, 7]);
        assert_eq!(map.structure_code(3), Some(GAP));
    }

    #[test]
    fn map_structure_ignores_non_positive_residue_ids() {
        let structure = structure_with(&[(-1, "GLY"), (0, "SER"), (1, "MET"), (2, "ALA")]);
        let map = map_structure(&aligner(), "MA", &structure).unwrap();

        assert_eq!(map.residue_ids(), &[1, 2]);
    }
}
