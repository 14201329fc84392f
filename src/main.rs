use std::fs::File;
use std::process::ExitCode;

use clap::{ErrorKind, Parser};
use opts::*;
use rdiff_rust::{create_delta_file, create_signature_file, RdiffError, SignatureSet};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod opts;

const VERSION_MAJOR: &str = "0";
const VERSION_MINOR: &str = "2";
const VERSION_REV: &str = "0";

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let argv0 = std::env::args().next().unwrap_or_else(|| "rdiff-rust".into());
    println!("{argv0} v. {VERSION_MAJOR}.{VERSION_MINOR}.{VERSION_REV}");

    // `Opts::parse()` would let clap exit the process itself on a usage
    // error, with its own exit code (2), not the 1 this CLI promises for
    // missing/invalid arguments. `try_parse` keeps that decision here.
    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(err) => {
            // `--help`/`--version` are not usage errors; clap reports them
            // through the same `Err` path but they still mean success.
            // Anything else (missing or invalid arguments) is the exit-1
            // case this CLI's contract calls for.
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    print!("{err}");
                    ExitCode::SUCCESS
                }
                _ => {
                    eprint!("{err}");
                    ExitCode::FAILURE
                }
            };
            return code;
        }
    };

    if let Err(err) = run(opts) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(opts: Opts) -> Result<(), RdiffError> {
    match opts.subcmd {
        SubCommand::Signature(s) => {
            tracing::info!(unchanged_file = %s.unchanged_file.display(), signature_file = %s.signature_file.display(), "generating signature");
            create_signature_file(&s.unchanged_file, &s.signature_file)?;
        }
        SubCommand::Delta(d) => {
            tracing::info!(
                unchanged_file = %d.unchanged_file.display(),
                signature_file = %d.signature_file.display(),
                modified_file = %d.modified_file.display(),
                delta_file = %d.delta_file.display(),
                "generating delta"
            );
            let sig_file = File::open(&d.signature_file)?;
            let old_signature: SignatureSet = bincode::deserialize_from(sig_file)?;
            create_delta_file(&old_signature, &d.unchanged_file, &d.modified_file, &d.delta_file)?;
        }
    }

    Ok(())
}
