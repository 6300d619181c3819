use super::types::{AminoAcid, one_letter_code};
use std::fmt;

/// Residue-type entry kept alongside the atom map for O(1) lookups by residue id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub id: i32,
    /// Upper-cased, trimmed three-letter name recorded from the first atom seen.
    pub name: String,
}

impl Residue {
    pub fn new(id: i32, name: &str) -> Self {
        Self {
            id,
            name: name.trim().to_ascii_uppercase(),
        }
    }

    pub fn code(&self) -> Option<char> {
        one_letter_code(&self.name)
    }

    pub fn amino_acid(&self) -> Option<AminoAcid> {
        self.code().and_then(AminoAcid::from_code)
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_name() {
        let residue = Residue::new(3, " hie");
        assert_eq!(residue.name, "HIE");
        assert_eq!(residue.code(), Some('H'));
        assert_eq!(residue.amino_acid(), Some(AminoAcid::HIS));
    }

    #[test]
    fn unknown_residue_has_no_code() {
        let residue = Residue::new(90, "HOH");
        assert_eq!(residue.code(), None);
        assert_eq!(residue.amino_acid(), None);
        assert_eq!(residue.to_string(), "HOH-90");
    }
}
