//! CLI definition and exit-code mapping.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use fea_merge::{CombinedFeatures, Merger};
use log::info;

use crate::{
    designspace::{Designspace, LoadError},
    io::FeatureFile,
    masters::load_masters,
};

/// Failures that end a run, each with its own exit code.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Designspace(#[from] LoadError),

    #[error("{0}")]
    Merge(#[from] fea_merge::Error),

    #[error("{0} master(s) could not be loaded (--strict)")]
    Strict(usize),

    #[error("{0:#}")]
    Write(anyhow::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Designspace(_) => 3,
            Self::Merge(_) | Self::Strict(_) => 4,
            Self::Write(_) => 5,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Parser, Debug)]
#[command(name = "fea-merge", version)]
#[command(about = "Combine the features.fea of every designspace master into one variable feature file")]
#[command(after_help = "Example:\n  fea-merge MyFont.designspace variable_features.fea")]
pub struct Cli {
    /// Input .designspace file
    #[arg(value_name = "DESIGNSPACE")]
    pub designspace: PathBuf,
    /// Output feature file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
    /// Fail instead of skipping masters that cannot be loaded
    #[arg(long)]
    pub strict: bool,
    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
    /// Suppress output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub masters: usize,
    pub skipped: usize,
    pub classes: usize,
    pub kern_rules: usize,
    pub other_features: usize,
}

impl Summary {
    fn new(masters: usize, skipped: usize, combined: &CombinedFeatures) -> Self {
        Self {
            masters,
            skipped,
            classes: combined.classes.len(),
            kern_rules: combined.kern_rules.len(),
            other_features: combined.passthrough.len(),
        }
    }
}

impl Cli {
    /// Default log filter for the chosen verbosity; `RUST_LOG` still wins.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    pub fn run(&self) -> ExitCode {
        match self.execute() {
            Ok(summary) => {
                if !self.quiet {
                    println!("Variable features saved to: {}", self.output.display());
                    println!("Masters processed: {} ({} skipped)", summary.masters, summary.skipped);
                    println!("Classes combined: {}", summary.classes);
                    println!("Kern rules: {}", summary.kern_rules);
                    println!("Other feature blocks: {}", summary.other_features);
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::from(e.exit_code())
            }
        }
    }

    /// Load, merge, and write. Nothing is written unless the merge succeeds.
    pub fn execute(&self) -> CliResult<Summary> {
        let designspace = Designspace::load(&self.designspace)?;
        info!(
            "Merging features from {} sources in {}",
            designspace.sources.len(),
            designspace.path.display()
        );

        let report = load_masters(&designspace.sources);
        if self.strict && !report.all_loaded() {
            return Err(CliError::Strict(report.warnings.len()));
        }

        let merger = Merger::default();
        let combined = merger.merge(&report.masters)?;
        let text = combined.render(merger.options());

        let output = FeatureFile::new(&self.output);
        output.write(&text).map_err(CliError::Write)?;
        info!("Wrote {} bytes to {}", text.len(), output.path().display());

        Ok(Summary::new(report.masters.len(), report.warnings.len(), &combined))
    }
}
