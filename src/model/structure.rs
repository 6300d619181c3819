use super::atom::Atom;
use super::residue::Residue;
use super::types::GAP;
use std::collections::BTreeMap;
use std::fmt;

/// Number of chain letters available (`A` through `Z`).
pub const MAX_CHAINS: u8 = 26;

/// In-memory image of a fixed-column structure file.
///
/// Atoms are keyed by their serial number and iterate in ascending serial order. A parallel
/// residue map records the residue name first seen for each residue id. Remarks are free-text
/// provenance lines written ahead of the atom records on save.
///
/// Cloning produces a fully independent copy, which is how mutated variants are derived from a
/// shared base structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    atoms: BTreeMap<usize, Atom>,
    residues: BTreeMap<i32, Residue>,
    pub remarks: Vec<String>,
    residue_range: Option<(i32, i32)>,
    chain_index: u8,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an atom under `serial`, registering its residue on first sight.
    ///
    /// Returns `false` without modifying the structure if the serial is already taken. The
    /// residue name of an already-known residue id is never revisited.
    pub fn add_atom(&mut self, serial: usize, atom: Atom) -> bool {
        if self.atoms.contains_key(&serial) {
            return false;
        }

        let id = atom.residue_id;
        self.residue_range = Some(match self.residue_range {
            Some((min, max)) => (min.min(id), max.max(id)),
            None => (id, id),
        });
        self.residues
            .entry(id)
            .or_insert_with(|| Residue::new(id, &atom.residue_name));

        self.atoms.insert(serial, atom);
        true
    }

    pub fn atom(&self, serial: usize) -> Option<&Atom> {
        self.atoms.get(&serial)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Iterates `(serial, atom)` pairs in ascending serial order.
    pub fn iter_atoms(&self) -> impl Iterator<Item = (usize, &Atom)> {
        self.atoms.iter().map(|(serial, atom)| (*serial, atom))
    }

    pub fn residue_atoms(&self, residue_id: i32) -> impl Iterator<Item = &Atom> {
        self.atoms
            .values()
            .filter(move |atom| atom.residue_id == residue_id)
    }

    /// Keeps only the atoms for which `keep` returns `true`; the closure may edit kept atoms.
    pub(crate) fn retain_atoms<F>(&mut self, mut keep: F)
    where
        F: FnMut(&mut Atom) -> bool,
    {
        self.atoms.retain(|_, atom| keep(atom));
    }

    pub fn residue(&self, id: i32) -> Option<&Residue> {
        self.residues.get(&id)
    }

    pub(crate) fn residue_mut(&mut self, id: i32) -> Option<&mut Residue> {
        self.residues.get_mut(&id)
    }

    pub fn residue_exists(&self, id: i32) -> bool {
        self.residues.contains_key(&id)
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn iter_residues(&self) -> impl Iterator<Item = &Residue> {
        self.residues.values()
    }

    /// Smallest and largest residue id seen, or `None` for an empty structure.
    pub fn residue_range(&self) -> Option<(i32, i32)> {
        self.residue_range
    }

    /// Offset that converts a 1-based sequence position into this structure's residue ids.
    ///
    /// Equals the minimum residue id minus one; an empty structure reports `0`.
    pub fn residue_base_offset(&self) -> i32 {
        self.residue_range.map_or(0, |(min, _)| min - 1)
    }

    /// Number of distinct chain letters carried by the atoms.
    pub fn chain_count(&self) -> usize {
        let mut ids: Vec<char> = self.atoms.values().map(|atom| atom.chain_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    /// Number of chain terminators consumed so far.
    pub fn chain_index(&self) -> u8 {
        self.chain_index
    }

    /// Letter assigned to atoms read after the current number of terminators.
    ///
    /// Returns `None` once all [`MAX_CHAINS`] letters are exhausted.
    pub fn current_chain_id(&self) -> Option<char> {
        (self.chain_index < MAX_CHAINS).then(|| (b'A' + self.chain_index) as char)
    }

    pub(crate) fn begin_next_chain(&mut self) {
        self.chain_index = self.chain_index.saturating_add(1);
    }

    pub fn add_remark(&mut self, remark: impl Into<String>) {
        self.remarks.push(remark.into());
    }

    /// One-letter sequence implied by residue ids `1..=max`.
    ///
    /// Ids without a residue become [`GAP`]. The scan stops at the first residue whose name has
    /// no one-letter code, which marks the end of the protein part of the file.
    pub fn sequence(&self) -> String {
        let max = match self.residue_range {
            Some((_, max)) => max,
            None => return String::new(),
        };

        let mut sequence = String::new();
        for id in 1..=max {
            match self.residues.get(&id) {
                None => sequence.push(GAP),
                Some(residue) => match residue.code() {
                    Some(code) => sequence.push(code),
                    None => break,
                },
            }
        }
        sequence
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Structure {{ chains: {}, residues: {}, atoms: {} }}",
            self.chain_count(),
            self.residue_count(),
            self.atom_count()
        )
    }
}
