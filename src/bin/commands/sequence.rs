use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use bio_mutate::io::load_pdb_structure;

use crate::commands::resolve_structure_path;

const LINE_WIDTH: usize = 60;

/// Prints the structure-derived sequence.
#[derive(Debug, Args)]
pub struct SequenceArgs {
    /// Structure file; `.pdb` is appended when the path has no extension.
    #[arg(short, long, value_name = "FILE")]
    pub pdb: PathBuf,
}

pub fn run(args: &SequenceArgs) -> Result<()> {
    let path = resolve_structure_path(&args.pdb);
    let structure = load_pdb_structure(&path)
        .with_context(|| format!("Failed to load structure {}", path.display()))?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let sequence = structure.sequence();

    let mut stdout = io::stdout().lock();
    writeln!(stdout, ">{}", name)?;
    for line in sequence.as_bytes().chunks(LINE_WIDTH) {
        stdout.write_all(line)?;
        writeln!(stdout)?;
    }
    stdout.flush()?;

    Ok(())
}
