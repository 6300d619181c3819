use crate::io::error::Error;
use crate::model::{
    atom::Atom,
    structure::{MAX_CHAINS, Structure},
    types::Point,
};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const FORMAT: &str = "PDB";

/// Reads a structure from the fixed-column PDB format.
///
/// Only `ATOM`, `TER`, and `END` records are interpreted; every other record is skipped.
/// Chain letters are assigned from the number of `TER` records seen so far, and reading stops at
/// the first `END` record.
pub fn read<R: BufRead>(reader: R) -> Result<Structure, Error> {
    let mut structure = Structure::new();
    let mut line_num = 0;

    for line in reader.lines() {
        line_num += 1;
        let line = line.map_err(|e| Error::from_io(e, None))?;

        match record_header(&line) {
            "ATOM" => parse_atom_record(&line, line_num, &mut structure)?,
            "TER" => structure.begin_next_chain(),
            "END" => break,
            _ => {}
        }
    }

    Ok(structure)
}

/// Opens and reads a structure file.
pub fn load(path: &Path) -> Result<Structure, Error> {
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    read(BufReader::new(file)).map_err(|e| e.with_path(path))
}

fn record_header(line: &str) -> &str {
    line.get(..6).unwrap_or(line).trim()
}

fn field(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("")
}

fn parse_atom_record(line: &str, line_num: usize, structure: &mut Structure) -> Result<(), Error> {
    if line.len() < 54 {
        return Err(Error::parse(FORMAT, None, line_num, "Atom record too short"));
    }

    let serial = field(line, 6, 11)
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::parse(FORMAT, None, line_num, "Invalid atom serial number"))?;

    let title = field(line, 12, 16);
    let alt_loc = field(line, 16, 17).chars().next().unwrap_or(' ');
    let res_name = field(line, 17, 20);

    let res_seq = field(line, 22, 26)
        .trim()
        .parse::<i32>()
        .map_err(|_| Error::parse(FORMAT, None, line_num, "Invalid residue sequence number"))?;

    let x = parse_coordinate(field(line, 30, 38), line_num, "X")?;
    let y = parse_coordinate(field(line, 38, 46), line_num, "Y")?;
    let z = parse_coordinate(field(line, 46, 54), line_num, "Z")?;

    let chain_id = structure.current_chain_id().ok_or_else(|| {
        Error::inconsistent_data(
            FORMAT,
            None,
            format!(
                "atom {} on line {} belongs to chain #{}, only {} chains are supported",
                serial,
                line_num,
                structure.chain_index() as usize + 1,
                MAX_CHAINS
            ),
        )
    })?;

    let mut atom = Atom::new(title, res_name, chain_id, res_seq, Point::new(x, y, z))
        .with_tail(field(line, 54, 79));
    atom.alt_loc = alt_loc;

    if !structure.add_atom(serial, atom) {
        return Err(Error::parse(
            FORMAT,
            None,
            line_num,
            format!("Duplicate atom serial {}", serial),
        ));
    }

    Ok(())
}

fn parse_coordinate(value: &str, line_num: usize, axis: &str) -> Result<f64, Error> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::parse(FORMAT, None, line_num, format!("Invalid {} coordinate", axis)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::pdb::fixtures::PEPTIDE;
    use std::io::Cursor;

    fn read_str(content: &str) -> Result<Structure, Error> {
        read(Cursor::new(content.as_bytes()))
    }

    #[test]
    fn reads_atoms_until_end_record() {
        let structure = read_str(PEPTIDE).expect("peptide parses");

        assert_eq!(structure.atom_count(), 21);
        assert_eq!(structure.residue_count(), 4);
        assert_eq!(structure.residue_range(), Some((1, 4)));
        assert!(structure.atom(99).is_none(), "atoms after END must be ignored");
        assert!(structure.atom(23).is_none(), "HETATM records are skipped");
        assert_eq!(structure.chain_index(), 1);
    }

    #[test]
    fn parses_fixed_columns_verbatim() {
        let structure = read_str(PEPTIDE).unwrap();
        let atom = structure.atom(2).unwrap();

        assert_eq!(atom.title, " CA ");
        assert_eq!(atom.alt_loc, ' ');
        assert_eq!(atom.residue_name, "MET");
        assert_eq!(atom.chain_id, 'A');
        assert_eq!(atom.residue_id, 1);
        assert!((atom.pos.x + 4.696).abs() < 1e-9);
        assert!((atom.pos.y - 9.726).abs() < 1e-9);
        assert!((atom.pos.z - 6.969).abs() < 1e-9);
        assert_eq!(atom.tail, "  1.00 20.00           C");
    }

    #[test]
    fn residue_map_records_trimmed_upper_case_names() {
        let content = "\
ATOM      1  N   hid A   7       0.000   0.000   0.000  1.00 20.00           N
ATOM      2  CA  ALA A   7       1.000   0.000   0.000  1.00 20.00           C
";
        let structure = read_str(content).unwrap();

        assert_eq!(structure.residue(7).unwrap().name, "HID");
        assert_eq!(structure.atom(2).unwrap().residue_name, "ALA");
    }

    #[test]
    fn terminators_advance_chain_letters() {
        let content = "\
ATOM      1  CA  ALA X   1       0.000   0.000   0.000  1.00 20.00           C
TER       2      ALA X   1
ATOM      3  CA  GLY Y   2       1.000   0.000   0.000  1.00 20.00           C
TER       4      GLY Y   2
ATOM      5  CA  SER Z   3       2.000   0.000   0.000  1.00 20.00           C
END
";
        let structure = read_str(content).unwrap();

        assert_eq!(structure.atom(1).unwrap().chain_id, 'A');
        assert_eq!(structure.atom(3).unwrap().chain_id, 'B');
        assert_eq!(structure.atom(5).unwrap().chain_id, 'C');
    }

    #[test]
    fn duplicate_serial_is_a_parse_error() {
        let content = "\
ATOM      1  N   ALA A   1       0.000   0.000   0.000  1.00 20.00           N
ATOM      1  CA  ALA A   1       1.000   0.000   0.000  1.00 20.00           C
";
        let err = read_str(content).expect_err("duplicate serial must fail");

        match err {
            Error::Parse {
                line_number,
                details,
                ..
            } => {
                assert_eq!(line_number, 2);
                assert!(details.contains("Duplicate atom serial 1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_atom_record_is_rejected() {
        let err = read_str("ATOM      1  N   ALA A   1       0.000   0.000\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line_number: 1, .. }));
    }

    #[test]
    fn invalid_coordinate_is_rejected() {
        let content =
            "ATOM      1  N   ALA A   1       0.000   abcde   0.000  1.00 20.00           N\n";
        let err = read_str(content).unwrap_err();

        match err {
            Error::Parse { details, .. } => assert!(details.contains("Y coordinate")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn exhausting_chain_letters_fails_fast() {
        let mut content = String::new();
        for i in 0..27 {
            content.push_str(&format!(
                "ATOM  {:5}  CA  ALA A{:4}       0.000   0.000   0.000  1.00 20.00           C\n",
                i + 1,
                i + 1
            ));
            content.push_str("TER\n");
        }

        let err = read_str(&content).expect_err("27th chain must fail");
        assert!(matches!(err, Error::InconsistentData { .. }));
    }

    #[test]
    fn records_without_atoms_yield_empty_structure() {
        let structure = read_str("REMARK nothing here\nEND\n").unwrap();
        assert!(structure.is_empty());
        assert_eq!(structure.sequence(), "");
    }

    #[test]
    fn load_reports_missing_file_path() {
        let err = load(Path::new("/definitely/not/here.pdb")).unwrap_err();
        match err {
            Error::Io { path, .. } => {
                assert_eq!(path.as_deref(), Some(Path::new("/definitely/not/here.pdb")))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
