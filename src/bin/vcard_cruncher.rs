//! vcard-cruncher CLI
//!
//! Deduplicates one vCard 3.0 file and writes the kept contacts to
//! `processed_<name>` in the same directory.

use std::path::PathBuf;
use std::process;

use vcard_cruncher::{pipeline, TerminalPrompt};

/// Run configuration
struct Config {
    /// The vCard file to deduplicate
    input: PathBuf,
}

fn parse_args() -> Config {
    let args: Vec<String> = std::env::args().collect();
    let mut input: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!("vcard-cruncher - vCard contact deduplicator");
                println!();
                println!("USAGE:");
                println!("    vcard-cruncher <FILE>");
                println!();
                println!("ARGS:");
                println!("    <FILE>    vCard 3.0 file to deduplicate; the cleaned contacts are");
                println!("              written to processed_<FILE> in the same directory");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help    Print help information");
                process::exit(0);
            }
            arg if arg.starts_with('-') => {
                eprintln!("error: unknown argument: {arg}");
                process::exit(1);
            }
            arg => {
                if input.is_some() {
                    eprintln!("error: exactly one input file is expected");
                    process::exit(1);
                }
                input = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    let Some(input) = input else {
        eprintln!("error: missing input file (try --help)");
        process::exit(1);
    };

    Config { input }
}

fn main() {
    env_logger::init();

    let config = parse_args();

    match pipeline::run(&config.input, &mut TerminalPrompt) {
        Ok(summary) => {
            println!("\n--> Processed file path - {}", summary.output_path.display());
            println!("--> Total number of contacts - {}", summary.kept);
        }
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}
