use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;

pub type Point = Point3<f64>;

/// Placeholder emitted for residue ids that are absent from a structure.
pub const GAP: char = '-';

/// Atom titles shared by every amino acid's main chain, in their fixed-width file form.
pub const BACKBONE_TITLES: [&str; 4] = [" N  ", " C  ", " CA ", " O  "];

/// Fixed-width title of the beta carbon.
pub const BETA_CARBON_TITLE: &str = " CB ";

/// The twenty standard amino acids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AminoAcid {
    ALA,
    ARG,
    ASN,
    ASP,
    CYS,
    GLN,
    GLU,
    GLY,
    HIS,
    ILE,
    LEU,
    LYS,
    MET,
    PHE,
    PRO,
    SER,
    THR,
    TRP,
    TYR,
    VAL,
}

impl AminoAcid {
    /// Resolves a one-letter code (case-insensitive) into a standard amino acid.
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'A' => Some(AminoAcid::ALA),
            'R' => Some(AminoAcid::ARG),
            'N' => Some(AminoAcid::ASN),
            'D' => Some(AminoAcid::ASP),
            'C' => Some(AminoAcid::CYS),
            'Q' => Some(AminoAcid::GLN),
            'E' => Some(AminoAcid::GLU),
            'G' => Some(AminoAcid::GLY),
            'H' => Some(AminoAcid::HIS),
            'I' => Some(AminoAcid::ILE),
            'L' => Some(AminoAcid::LEU),
            'K' => Some(AminoAcid::LYS),
            'M' => Some(AminoAcid::MET),
            'F' => Some(AminoAcid::PHE),
            'P' => Some(AminoAcid::PRO),
            'S' => Some(AminoAcid::SER),
            'T' => Some(AminoAcid::THR),
            'W' => Some(AminoAcid::TRP),
            'Y' => Some(AminoAcid::TYR),
            'V' => Some(AminoAcid::VAL),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            AminoAcid::ALA => 'A',
            AminoAcid::ARG => 'R',
            AminoAcid::ASN => 'N',
            AminoAcid::ASP => 'D',
            AminoAcid::CYS => 'C',
            AminoAcid::GLN => 'Q',
            AminoAcid::GLU => 'E',
            AminoAcid::GLY => 'G',
            AminoAcid::HIS => 'H',
            AminoAcid::ILE => 'I',
            AminoAcid::LEU => 'L',
            AminoAcid::LYS => 'K',
            AminoAcid::MET => 'M',
            AminoAcid::PHE => 'F',
            AminoAcid::PRO => 'P',
            AminoAcid::SER => 'S',
            AminoAcid::THR => 'T',
            AminoAcid::TRP => 'W',
            AminoAcid::TYR => 'Y',
            AminoAcid::VAL => 'V',
        }
    }

    /// Residue name written into a structure when a residue is mutated into this amino acid.
    ///
    /// Histidine is emitted in its neutral epsilon-protonated form (`HIE`) so the output stays
    /// compatible with force-field tooling that expects an explicit tautomer.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            AminoAcid::HIS => "HIE",
            other => other.name(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AminoAcid::ALA => "ALA",
            AminoAcid::ARG => "ARG",
            AminoAcid::ASN => "ASN",
            AminoAcid::ASP => "ASP",
            AminoAcid::CYS => "CYS",
            AminoAcid::GLN => "GLN",
            AminoAcid::GLU => "GLU",
            AminoAcid::GLY => "GLY",
            AminoAcid::HIS => "HIS",
            AminoAcid::ILE => "ILE",
            AminoAcid::LEU => "LEU",
            AminoAcid::LYS => "LYS",
            AminoAcid::MET => "MET",
            AminoAcid::PHE => "PHE",
            AminoAcid::PRO => "PRO",
            AminoAcid::SER => "SER",
            AminoAcid::THR => "THR",
            AminoAcid::TRP => "TRP",
            AminoAcid::TYR => "TYR",
            AminoAcid::VAL => "VAL",
        }
    }

    /// Glycine is the only standard amino acid without a beta carbon.
    pub fn has_beta_carbon(&self) -> bool {
        *self != AminoAcid::GLY
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AminoAcid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        one_letter_code(s)
            .and_then(AminoAcid::from_code)
            .ok_or_else(|| format!("Invalid amino acid: {}", s))
    }
}

/// Maps a three-letter residue name onto its one-letter code.
///
/// Besides the twenty standard names this accepts common protonation-state variants and the
/// `ASX`/`GLX` ambiguity codes. Anything else (ligands, waters, modified residues) yields `None`.
pub fn one_letter_code(residue_name: &str) -> Option<char> {
    let code = match residue_name.trim().to_ascii_uppercase().as_str() {
        "ALA" => 'A',
        "ARG" => 'R',
        "ASN" => 'N',
        "ASH" | "ASP" => 'D',
        "ASX" => 'B',
        "CYM" | "CYS" => 'C',
        "GLH" | "GLU" => 'E',
        "GLN" => 'Q',
        "GLX" => 'Z',
        "GLY" => 'G',
        "HID" | "HIE" | "HIP" | "HIS" => 'H',
        "ILE" => 'I',
        "LEU" => 'L',
        "LYN" | "LYS" => 'K',
        "MET" => 'M',
        "PHE" => 'F',
        "PRH" | "PRO" => 'P',
        "SER" => 'S',
        "THR" => 'T',
        "TRP" => 'W',
        "TYR" => 'Y',
        "VAL" => 'V',
        _ => return None,
    };
    Some(code)
}

/// Returns `true` for the four main-chain atom titles.
pub fn is_backbone_title(title: &str) -> bool {
    BACKBONE_TITLES.contains(&title)
}
