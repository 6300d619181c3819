use crate::io::error::Error;
use crate::model::{atom::Atom, structure::Structure};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a structure in the fixed-column PDB format.
///
/// Remarks come first (preceded by a `Generated by` remark when `generator` is given), then the
/// atoms in ascending serial order renumbered densely from 1. A `TER` record closes each chain and
/// the file ends with `END`.
pub fn write_structure<W: Write>(
    writer: W,
    structure: &Structure,
    generator: Option<&str>,
) -> Result<(), Error> {
    let mut ctx = WriterContext::new(writer);

    ctx.write_remarks(structure, generator)?;

    ctx.write_atoms(structure)?;

    ctx.write_end()?;

    Ok(())
}

/// Creates (or replaces) `path` with the serialized structure.
pub fn save(path: &Path, structure: &Structure, generator: Option<&str>) -> Result<(), Error> {
    let to_error = |e| Error::from_io(e, Some(path.to_path_buf()));

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    write_structure(&mut writer, structure, generator).map_err(|e| e.with_path(path))?;
    writer.flush().map_err(to_error)
}

struct WriterContext<W> {
    writer: W,
    current_serial: usize,
    current_chain: Option<char>,
}

impl<W: Write> WriterContext<W> {
    fn new(writer: W) -> Self {
        Self {
            writer,
            current_serial: 0,
            current_chain: None,
        }
    }

    fn write_remarks(&mut self, structure: &Structure, generator: Option<&str>) -> Result<(), Error> {
        if let Some(generator) = generator {
            writeln!(self.writer, "REMARK Generated by {}", generator)
                .map_err(|e| Error::from_io(e, None))?;
        }
        for remark in &structure.remarks {
            writeln!(self.writer, "REMARK {}", remark).map_err(|e| Error::from_io(e, None))?;
        }
        Ok(())
    }

    fn write_atoms(&mut self, structure: &Structure) -> Result<(), Error> {
        for (_, atom) in structure.iter_atoms() {
            if self.current_chain != Some(atom.chain_id) {
                if self.current_chain.is_some() {
                    self.write_ter_record()?;
                }
                self.current_chain = Some(atom.chain_id);
            }

            self.current_serial += 1;
            self.write_atom_record(self.current_serial, atom)?;
        }
        Ok(())
    }

    fn write_atom_record(&mut self, serial: usize, atom: &Atom) -> Result<(), Error> {
        writeln!(
            self.writer,
            "{:6}{:5} {:<4.4}{:1}{:<3.3} {:1}{:4}    {:8.3}{:8.3}{:8.3}{}",
            "ATOM",
            serial,
            atom.title.as_str(),
            atom.alt_loc,
            atom.residue_name.as_str(),
            atom.chain_id,
            atom.residue_id,
            atom.pos.x,
            atom.pos.y,
            atom.pos.z,
            atom.tail
        )
        .map_err(|e| Error::from_io(e, None))
    }

    fn write_ter_record(&mut self) -> Result<(), Error> {
        writeln!(self.writer, "{:6}{:5}", "TER", self.current_serial)
            .map_err(|e| Error::from_io(e, None))
    }

    fn write_end(&mut self) -> Result<(), Error> {
        self.write_ter_record()?;
        writeln!(self.writer, "END").map_err(|e| Error::from_io(e, None))
    }
}
