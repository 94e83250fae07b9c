// src/main.rs
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use taric_chapters::app::{self, RunConfig};
use taric_chapters::clipboard::{ClipboardSink, SystemClipboard};
use taric_chapters::utils::{self, AppError};

/// Command Line Interface for the TARIC chapter description extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// HTML file saved from the TARIC consultation page ("-" or omitted reads stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Also write the SQL tuples and a JSON run summary to this directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the tuples without touching the system clipboard
    #[arg(long)]
    no_clipboard: bool,

    /// Emit an empty result instead of failing when no descriptions match
    #[arg(long)]
    allow_empty: bool,

    /// Linux: keep serving the clipboard until something else is copied
    #[arg(long, conflicts_with = "no_clipboard")]
    hold_clipboard: bool,
}

fn run(args: Args) -> Result<(), AppError> {
    let config = RunConfig {
        input: args.input,
        output_dir: args.output_dir,
        allow_empty: args.allow_empty,
    };

    let mut system_clipboard = SystemClipboard::new(args.hold_clipboard);
    let clipboard: Option<&mut dyn ClipboardSink> = if args.no_clipboard {
        None
    } else {
        Some(&mut system_clipboard)
    };

    let stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    app::execute(&config, stdin, &mut stdout, clipboard)?;
    Ok(())
}

fn main() -> ExitCode {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting extraction for args: {:?}", args);

    // 3. Extract, print, copy, export
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
