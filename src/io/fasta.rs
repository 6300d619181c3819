//! Reader for candidate reference protein sequences.

use crate::io::error::Error;
use crate::model::mutation::ReferenceSequence;
use bio::io::fasta;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const FORMAT: &str = "FASTA";

/// Reads reference sequences in file order.
///
/// Each candidate is named by its full header (identifier plus description). Sequences are
/// upper-cased, and a sequence identical to an earlier one is dropped.
pub fn read_references<R: Read>(reader: R) -> Result<Vec<ReferenceSequence>, Error> {
    let mut seen = HashSet::new();
    let mut references = Vec::new();

    for (index, result) in fasta::Reader::new(reader).records().enumerate() {
        let record = result.map_err(|e| Error::from_io(e, None))?;
        record.check().map_err(|msg| {
            Error::inconsistent_data(FORMAT, None, format!("record #{}: {}", index + 1, msg))
        })?;

        let sequence = String::from_utf8_lossy(record.seq()).to_ascii_uppercase();
        if !seen.insert(sequence.clone()) {
            continue;
        }

        let name = match record.desc() {
            Some(desc) => format!("{} {}", record.id(), desc),
            None => record.id().to_string(),
        };
        references.push(ReferenceSequence::new(name, sequence));
    }

    Ok(references)
}

/// Opens and reads a multi-FASTA file.
pub fn load_references(path: &Path) -> Result<Vec<ReferenceSequence>, Error> {
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    read_references(file).map_err(|e| e.with_path(path))
}
