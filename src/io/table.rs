//! Reader for tab-separated mutation exports.
//!
//! The table carries one missense mutation per row. Only the mutation column is mandatory; the
//! provenance columns are copied into each record when present and default to empty strings.

use crate::io::error::Error;
use crate::model::mutation::{MutationRecord, Provenance};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const FORMAT: &str = "TSV";

pub const MUTATION_COLUMN: &str = "AA Mutation";
pub const SOMATIC_STATUS_COLUMN: &str = "Somatic Status";
pub const TRANSCRIPT_COLUMN: &str = "Transcript";
pub const ZYGOSITY_COLUMN: &str = "Zygosity";
pub const TISSUE_COLUMN: &str = "Primary Tissue";
pub const HISTOLOGY_COLUMN: &str = "Histology";

struct Columns {
    mutation: usize,
    somatic_status: Option<usize>,
    transcript: Option<usize>,
    zygosity: Option<usize>,
    tissue: Option<usize>,
    histology: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Option<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Some(Self {
            mutation: find(MUTATION_COLUMN)?,
            somatic_status: find(SOMATIC_STATUS_COLUMN),
            transcript: find(TRANSCRIPT_COLUMN),
            zygosity: find(ZYGOSITY_COLUMN),
            tissue: find(TISSUE_COLUMN),
            histology: find(HISTOLOGY_COLUMN),
        })
    }

    fn provenance(&self, row: &StringRecord) -> Provenance {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .unwrap_or_default()
                .to_string()
        };
        Provenance {
            somatic_status: cell(self.somatic_status),
            transcript: cell(self.transcript),
            zygosity: cell(self.zygosity),
            tissue: cell(self.tissue),
            histology: cell(self.histology),
        }
    }
}

/// Reads mutation records in table order, skipping rows with an empty mutation cell.
pub fn read_mutations<R: Read>(reader: R) -> Result<Vec<MutationRecord>, Error> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    let columns = Columns::locate(&headers).ok_or_else(|| {
        Error::inconsistent_data(
            FORMAT,
            None,
            format!("missing required column '{}'", MUTATION_COLUMN),
        )
    })?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(csv_error)?;
        let name = row.get(columns.mutation).unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        records.push(MutationRecord::new(name, columns.provenance(&row)));
    }

    Ok(records)
}

/// Opens and reads a mutation table.
pub fn load_mutations(path: &Path) -> Result<Vec<MutationRecord>, Error> {
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    read_mutations(file).map_err(|e| e.with_path(path))
}

fn csv_error(err: csv::Error) -> Error {
    let line = err.position().map_or(0, |p| p.line() as usize);
    Error::parse(FORMAT, None, line, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
Gene Name\tAA Mutation\tSomatic Status\tTranscript\tZygosity\tPrimary Tissue\tHistology
TP53\tp.R175H\tConfirmed somatic variant\tENST00000269305\thet\tbreast\tcarcinoma
TP53\tp.G245S\tReported in another cancer sample\tENST00000269305\thom\tlung\tadenocarcinoma
TP53\t\tConfirmed somatic variant\tENST00000269305\thet\tskin\tmelanoma
";

    #[test]
    fn reads_records_with_provenance() {
        let records = read_mutations(TABLE.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "p.R175H");
        assert_eq!(records[0].provenance.somatic_status, "Confirmed somatic variant");
        assert_eq!(records[0].provenance.transcript, "ENST00000269305");
        assert_eq!(records[0].provenance.zygosity, "het");
        assert_eq!(records[0].provenance.tissue, "breast");
        assert_eq!(records[0].provenance.histology, "carcinoma");
        assert_eq!(records[1].name, "p.G245S");
        assert_eq!(records[1].provenance.tissue, "lung");
    }

    #[test]
    fn missing_provenance_columns_default_to_empty() {
        let table = "AA Mutation\tHistology\np.C10A\tglioma\n";
        let records = read_mutations(table.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].provenance.histology, "glioma");
        assert_eq!(records[0].provenance.tissue, "");
        assert_eq!(records[0].provenance.transcript, "");
    }

    #[test]
    fn missing_mutation_column_is_rejected() {
        let table = "Gene Name\tHistology\nTP53\tglioma\n";
        let err = read_mutations(table.as_bytes()).unwrap_err();

        assert!(matches!(err, Error::InconsistentData { .. }));
        assert!(err.to_string().contains("AA Mutation"));
    }

    #[test]
    fn short_rows_are_tolerated() {
        let table = "AA Mutation\tSomatic Status\tHistology\np.C10A\n";
        let records = read_mutations(table.as_bytes()).unwrap();

        assert_eq!(records[0].name, "p.C10A");
        assert_eq!(records[0].provenance.histology, "");
    }
}
