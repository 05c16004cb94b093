//! CLI command implementations.

use avm_assembler::{assemble, assemble_with, disassemble, AsmOptions, ErrorMode};
use avm_cli::logging::init_logging;
use avm_cli::{interpret, read_interactive, RunOptions};
use std::fs;
use std::io;

/// Assemble and execute a file, or stdin in interactive mode.
pub fn run(args: &[String]) -> Result<(), i32> {
    let mut mode = ErrorMode::FailFast;
    let mut verbose = false;
    let mut input: Option<&String> = None;

    for arg in args {
        match arg.as_str() {
            "--collect" => mode = ErrorMode::Collect,
            "--verbose" => verbose = true,
            flag if flag.starts_with('-') => {
                eprintln!("error: unknown flag '{flag}'");
                eprintln!("Usage: avm run [--collect] [--verbose] [FILE]");
                return Err(1);
            }
            _ if input.is_some() => {
                eprintln!("error: run takes at most one input file");
                return Err(1);
            }
            _ => input = Some(arg),
        }
    }

    init_logging(verbose);

    let (text, interactive) = match input {
        Some(path) => (read_source(path)?, false),
        None => {
            eprintln!("reading from stdin, end with ';;'");
            let text = read_interactive(io::stdin().lock()).map_err(|e| {
                eprintln!("error: cannot read stdin: {e}");
                1
            })?;
            (text, true)
        }
    };

    let options = RunOptions { interactive, mode };
    match interpret(&text, &options, io::stdout().lock()) {
        Ok(_) => Ok(()),
        Err(errors) => {
            report(&errors);
            match errors.first() {
                Some(e) if !e.is_assembly() => Err(3),
                _ => Err(2),
            }
        }
    }
}

/// Report every lexical and syntax error in a file without running it.
pub fn check(args: &[String]) -> Result<(), i32> {
    let input = single_input(args, "check")?;
    init_logging(false);
    let text = read_source(input)?;

    let options = AsmOptions {
        interactive: false,
        mode: ErrorMode::Collect,
    };
    match assemble_with(&text, &options) {
        Ok(program) => {
            println!("OK: {input} ({} instructions)", program.len());
            Ok(())
        }
        Err(errors) => {
            report(&errors);
            eprintln!("{} error(s) in {input}", errors.len());
            Err(2)
        }
    }
}

/// Print the canonical listing of a file.
pub fn fmt(args: &[String]) -> Result<(), i32> {
    let input = single_input(args, "fmt")?;
    init_logging(false);
    let text = read_source(input)?;

    let program = assemble(&text).map_err(|e| {
        eprintln!("error: {e}");
        2
    })?;
    print!("{}", disassemble(&program));
    Ok(())
}

fn single_input<'a>(args: &'a [String], command: &str) -> Result<&'a String, i32> {
    match args {
        [input] => Ok(input),
        _ => {
            eprintln!("error: {command} requires exactly one input file");
            eprintln!("Usage: avm {command} <FILE>");
            Err(1)
        }
    }
}

fn read_source(path: &str) -> Result<String, i32> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })
}

fn report<E: std::fmt::Display>(errors: &[E]) {
    for e in errors {
        eprintln!("error: {e}");
    }
}
