use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{generate, plan, sequence};

#[derive(Parser, Debug)]
#[command(
    name = "biomutate",
    about = "Maps reported missense mutations onto a protein structure and writes one mutated model per mutation.",
    version,
    author,
    arg_required_else_help = true
)]
struct Cli {
    /// Settings file (TOML) with alignment scoring and generation defaults.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Only report warnings and errors.
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Map the mutations onto the structure and write the mutated models.
    Generate(generate::GenerateArgs),
    /// List the mutations that would be modelled without writing any file.
    Plan(plan::PlanArgs),
    /// Print the one-letter sequence derived from a structure as FASTA.
    Sequence(sequence::SequenceArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::init_tracing(cli.quiet);

    match cli.command {
        Command::Generate(args) => {
            let settings = commands::load_settings(cli.config.as_deref())?;
            generate::run(&args, &settings)?;
        }
        Command::Plan(args) => {
            let settings = commands::load_settings(cli.config.as_deref())?;
            plan::run(&args, &settings)?;
        }
        Command::Sequence(args) => {
            sequence::run(&args)?;
        }
    }

    Ok(())
}
