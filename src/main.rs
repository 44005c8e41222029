use std::{
    fs,
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{ArgGroup, Parser};
use falsey::{
    config::{Config, DEFAULT_MAX_DEPTH},
    interpreter::io::ReaderSource,
    run_source_with_config,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// falsey interprets programs written in the FALSE stack language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["file", "code"])))]
struct Args {
    /// File that contains the program.
    file: Option<PathBuf>,

    /// Program text given inline instead of a file.
    #[arg(short, long, value_name = "TEXT")]
    code: Option<String>,

    /// Print the stack after the program finishes.
    #[arg(short, long)]
    print_stack: bool,

    /// Maximum nesting of running quotations.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

/// Installs a stderr logger when `RUST_LOG` is set.
fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)
                                                        .with_target(true)
                                                        .with_level(true))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let script = if let Some(code) = args.code {
        code
    } else if let Some(path) = &args.file {
        match fs::read_to_string(path) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", path.display());
                return ExitCode::FAILURE;
            },
        }
    } else {
        eprintln!("Either a file or --code must be supplied.");
        return ExitCode::FAILURE;
    };

    let config = Config { max_depth: args.max_depth };
    let mut out = BufWriter::new(io::stdout().lock());
    let result = run_source_with_config(&script, ReaderSource::new(io::stdin()), &mut out, config);
    let flushed = out.flush();

    match result {
        Ok(stack) => {
            if args.print_stack {
                println!("Stack: {stack}");
            }
            if let Err(e) = flushed {
                eprintln!("Failed to write output: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
