//! SVM - Stack Machine CLI
//!
//! Runs a source file, or starts an interactive REPL when no file is given.

mod repl;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use svm_core::vm::ops::stack_listing;
use svm_core::{Machine, ProgramLoader, StdConsole, SvmConfig};

use crate::repl::Repl;

#[derive(Parser, Debug)]
#[command(name = "svm", version)]
#[command(about = "Run stack machine programs")]
struct Cli {
    /// Source file to run (starts the REPL when omitted)
    file: Option<PathBuf>,

    /// Skip constant folding
    #[arg(long)]
    no_fold: bool,

    /// Abort a run after this many steps
    #[arg(long, value_name = "N")]
    step_limit: Option<u64>,

    /// Print the loaded program before running it
    #[arg(long)]
    dump: bool,

    /// Print the final stack after a file run
    #[arg(long)]
    stack: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> SvmConfig {
        SvmConfig {
            fold_constants: !self.no_fold,
            step_limit: self.step_limit,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config();

    match &cli.file {
        Some(path) => run_file(path, &config, &cli),
        None => {
            let result = Repl::new(config).and_then(|mut repl| repl.run());
            if let Err(e) = result {
                error!("REPL failed: {}", e);
                process::exit(1);
            }
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run_file(path: &Path, config: &SvmConfig, cli: &Cli) {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            error!("failed to read {}: {}", path.display(), e);
            process::exit(1);
        }
    };

    let program = match ProgramLoader::load(&source, config) {
        Ok(p) => p,
        Err(e) => {
            error!("failed to load {}: {}", path.display(), e);
            process::exit(1);
        }
    };
    info!(elements = program.len(), "loaded {}", path.display());

    if cli.dump {
        println!("{}", program);
    }

    let console = StdConsole::new(io::stdin().lock(), io::stdout().lock());
    let mut vm = Machine::with_config(config, program, console);
    let result = vm.run();
    let (stack, _) = vm.into_parts();

    if cli.stack {
        print!("{}", stack_listing(&stack));
    }

    match result {
        Ok(completion) => info!(?completion, "run complete"),
        Err(e) => {
            error!("runtime error: {}", e);
            process::exit(1);
        }
    }
}
