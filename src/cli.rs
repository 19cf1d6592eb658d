use std::path::PathBuf;

use clap::{command, Parser};

use crate::logging::LogLevel;

#[derive(Debug, Parser)]
#[command(
    author,
    about = "litdict: rewrite Python `dict(...)` constructor calls as dict literals."
)]
#[command(version)]
pub struct Cli {
    /// Python file to transform.
    #[arg(required = true)]
    pub file: PathBuf,
    /// Byte offset of the caret position within the file.
    #[arg(short, long)]
    pub offset: usize,
    /// Report whether the intention is available at the offset, without
    /// rewriting anything.
    #[arg(long)]
    pub check: bool,
    /// Write the transformed source back to the file instead of stdout.
    #[arg(short, long)]
    pub write: bool,
    /// Enable verbose logging.
    #[arg(short, long, group = "verbosity")]
    pub verbose: bool,
    /// Only log errors.
    #[arg(short, long, group = "verbosity")]
    pub quiet: bool,
    /// Disable all logging.
    #[arg(short, long, group = "verbosity")]
    pub silent: bool,
}

impl Cli {
    pub fn log_level(&self) -> LogLevel {
        if self.silent {
            LogLevel::Silent
        } else if self.quiet {
            LogLevel::Quiet
        } else if self.verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Default
        }
    }
}
