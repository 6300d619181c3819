//! Fixed-column atom representation used by the structure model.
//!
//! Atoms keep their identifiers exactly as they appear in the source file (four-character
//! titles, raw residue names, the opaque occupancy/B-factor/element tail) so a structure can be
//! written back without disturbing columns the model does not interpret.

use super::types::Point;
use smol_str::SmolStr;
use std::fmt;

/// One atom record.
///
/// The serial number is not stored here; [`Structure`](super::structure::Structure) owns the
/// serial-keyed map and renumbers atoms densely on save.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Four-character atom title, untrimmed (e.g. `" CA "`).
    pub title: SmolStr,
    /// Alternate-location indicator (`' '` when absent).
    pub alt_loc: char,
    /// Three-character residue name as written in the atom record.
    pub residue_name: SmolStr,
    /// Chain letter assigned at load time from the terminator count.
    pub chain_id: char,
    /// Residue sequence number.
    pub residue_id: i32,
    /// Cartesian coordinates measured in ångströms.
    pub pos: Point,
    /// Columns 55-79 carried through verbatim.
    pub tail: String,
}

impl Atom {
    /// Creates a new atom with a blank alternate location and an empty tail.
    ///
    /// # Arguments
    ///
    /// * `title` - Four-character atom title such as `" CA "`.
    /// * `residue_name` - Three-letter residue name.
    /// * `chain_id` - Chain letter.
    /// * `residue_id` - Residue sequence number.
    /// * `pos` - Cartesian coordinates in ångströms.
    pub fn new(title: &str, residue_name: &str, chain_id: char, residue_id: i32, pos: Point) -> Self {
        Self {
            title: SmolStr::new(title),
            alt_loc: ' ',
            residue_name: SmolStr::new(residue_name),
            chain_id,
            residue_id,
            pos,
            tail: String::new(),
        }
    }

    /// Attaches the verbatim trailing columns.
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }

    /// Title with the fixed-width padding removed.
    pub fn name(&self) -> &str {
        self.title.trim()
    }

    pub fn is_backbone(&self) -> bool {
        super::types::is_backbone_title(&self.title)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Atom {{ name: \"{}\", residue: {}-{}, chain: {}, pos: [{:.3}, {:.3}, {:.3}] }}",
            self.name(),
            self.residue_name.trim(),
            self.residue_id,
            self.chain_id,
            self.pos.x,
            self.pos.y,
            self.pos.z
        )
    }
}
