//! The Obfuscator Command-Line Interface.
//!
//! Reads one C++ file, reshuffles its class members and writes the result.

use std::{path::PathBuf, process};

use clap::Parser;

use crate::{
    config::Settings,
    errors::{print_error, ObfuscatorError},
    transform::{read_source, Obfuscator},
};

pub mod output;

// ============================================================================
// CLI ARGUMENTS - Command-line argument definitions
// ============================================================================

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "obfuscator",
    version,
    about = "Obfuscate C++ code by regrouping and reshuffling class members."
)]
pub struct ObfuscatorArgs {
    /// Input *.cpp filename.
    pub filename: PathBuf,

    /// Output code filename.
    #[arg(short = 'o', value_name = "OUTPUT", default_value = "a.cpp")]
    pub output: PathBuf,

    /// Seed for the member shuffle; the same seed gives the same output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Settings file (YAML or JSON).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Spaces per indentation level.
    #[arg(long)]
    pub indent: Option<usize>,

    /// Print the parsed top-level elements instead of writing the output file.
    #[arg(long)]
    pub ast: bool,

    /// Do not print the summary line.
    #[arg(short, long)]
    pub quiet: bool,
}

impl ObfuscatorArgs {
    /// Settings file values with command-line overrides applied.
    pub fn settings(&self) -> Result<Settings, ObfuscatorError> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(indent) = self.indent {
            settings.indent = indent;
        }
        Ok(settings)
    }
}

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    let args = ObfuscatorArgs::parse();
    if let Err(e) = execute(&args) {
        print_error(e);
        process::exit(1);
    }
}

pub fn execute(args: &ObfuscatorArgs) -> Result<(), ObfuscatorError> {
    let mut obfuscator = Obfuscator::new(args.settings()?);

    if args.ast {
        let source = read_source(&args.filename)?;
        let elements = obfuscator.parse(&source);
        output::print_elements(&mut obfuscator, &elements);
        return Ok(());
    }

    let result = obfuscator.obfuscate_file(&args.filename, &args.output)?;
    if !args.quiet {
        output::print_summary(&args.filename, &args.output, &result);
    }
    Ok(())
}
