#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # algo
//!
//! Command line front end for the Algo interpreter.
//!
//! `algo run <file>` checks and executes a program, `algo check <file>` only
//! validates it, and `algo info <file>` prints a JSON description of it.

use std::{io, process::ExitCode};

use algo::{Interpreter, config, source};
use anyhow::{Context, Result};
use bpaf::*;
use colored::Colorize;
use dotenvy::dotenv;
use tabled::Table;
use tracing::metadata::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Check and run a file
    Run(String),
    /// Check a file without running it
    Check(String),
    /// Print a JSON description of a file
    Info(String),
}

/// Parsed command line.
#[derive(Debug, Clone)]
struct Options {
    /// log every executed statement
    verbose: bool,
    /// what to do
    cmd:     Cmd,
}

impl Cmd {
    /// The file the command operates on.
    fn file(&self) -> &str {
        match self {
            Cmd::Run(f) | Cmd::Check(f) | Cmd::Info(f) => f,
        }
    }
}

/// Parse the command line arguments and return the `Options`
fn options() -> Options {
    /// parses file name
    fn f() -> impl Parser<String> {
        positional("FILE").help("Path to an .algo file")
    }

    let run = construct!(Cmd::Run(f()))
        .to_options()
        .command("run")
        .help("Check an algorithm, then run it");

    let check = construct!(Cmd::Check(f()))
        .to_options()
        .command("check")
        .help("Check an algorithm and list its constants and variables");

    let info = construct!(Cmd::Info(f()))
        .to_options()
        .command("info")
        .help("Prints a JSON description of the algorithm as parsed");

    let verbose = short('v')
        .long("verbose")
        .help("Log every statement as it runs")
        .switch();
    let cmd = construct!([run, check, info]);

    construct!(Options { verbose, cmd })
        .to_options()
        .descr("Interpreter for the Algo pseudo-code language")
        .run()
}

fn main() -> Result<ExitCode> {
    dotenv().ok();

    let opts = options();
    let mut config = config::get().clone();
    if opts.verbose {
        config = config.with_log_level(LevelFilter::DEBUG);
    }

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(fmt)
        .with(config.log_level())
        .init();

    let path = match source::locate(opts.cmd.file()) {
        Ok(path) => path,
        Err(e) => {
            println!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let interpreter = Interpreter::new(config);
    let outcome = match opts.cmd {
        Cmd::Run(_) => interpreter.check_file(&path).and_then(|algorithm| {
            interpreter
                .run(&algorithm, io::stdin().lock(), io::stdout().lock())
                .map(|_| ())
        }),
        Cmd::Check(_) => interpreter.check_file(&path).map(|algorithm| {
            println!("Algorithm name is {}", algorithm.name());
            println!("{}", Table::new(algorithm.binding_rows()));
        }),
        Cmd::Info(_) => match interpreter.check_file(&path) {
            Ok(algorithm) => {
                let json = serde_json::to_string_pretty(&algorithm)
                    .context("Failed to serialize the algorithm")?;
                println!("{json}");
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("{} {e}", "[INTERPRETER]".red().bold());
            Ok(ExitCode::FAILURE)
        }
    }
}
