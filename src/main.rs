use std::fs;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::warn;

use litdict::cli::Cli;
use litdict::logging::set_up_logging;
use litdict::{DictConstructorToLiteral, Document, Intention};

fn inner_main() -> Result<ExitCode> {
    let cli = Cli::parse();
    set_up_logging(cli.log_level())?;

    let contents = fs::read_to_string(&cli.file)?;
    let mut document = Document::parse(&contents, &cli.file.to_string_lossy())?;
    let intention = DictConstructorToLiteral;

    if cli.check {
        return Ok(if intention.is_available(&document, cli.offset) {
            println!("{}", intention.text());
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    if intention.apply(&mut document, cli.offset)? {
        if cli.write {
            fs::write(&cli.file, document.contents())?;
        } else {
            print!("{}", document.contents());
        }
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("No convertible `dict(...)` call at offset {}", cli.offset);
        Ok(ExitCode::FAILURE)
    }
}

fn main() -> ExitCode {
    match inner_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:?}", "error".red().bold());
            ExitCode::FAILURE
        }
    }
}
