//! AVM CLI: run, check, and format stack-machine programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage or input error
//! - 2: Assembly errors
//! - 3: Runtime error

mod commands;

use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let rest = args.get(2..).unwrap_or(&[]);

    let result = match args.get(1).map(String::as_str) {
        None => commands::run(&[]),
        Some("run") => commands::run(rest),
        Some("check") => commands::check(rest),
        Some("fmt") => commands::fmt(rest),
        Some("--help" | "-h" | "help") => {
            print_usage();
            process::exit(0);
        }
        // A bare file or run flags.
        Some(_) => commands::run(&args[1..]),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: avm [command] [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run [--collect] [--verbose] [FILE]   Run FILE, or stdin until ';;' (default)");
    eprintln!("  check <FILE>                         Report every assembly error in FILE");
    eprintln!("  fmt <FILE>                           Print the canonical listing of FILE");
    eprintln!();
    eprintln!("Set RUST_LOG to control log output on stderr.");
}
