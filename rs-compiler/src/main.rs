use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rs_compiler::{CompileError, Config, RunMode, run};
use rs_utils::{PREFAB_ROOT_ENV, prefab_project_root};
use tracing::{Level, error, info};

#[derive(Parser, Debug)]
#[command(version, about = "Compile physics prefab models into add-on files")]
struct Cli {
    /// Add-on project root. Defaults to $PHYSICS_PREFAB_ROOT, then the current directory.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Config file to use instead of `<root>/prefabs.toml`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Leave source models in place after a successful run.
    #[arg(long)]
    keep_sources: bool,

    /// Compile and report without writing or deleting anything.
    #[arg(long)]
    check: bool,

    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .without_time()
        .compact()
        .init();

    match compile(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn compile(cli: &Cli) -> Result<(), CompileError> {
    let root = prefab_project_root(cli.root.as_deref());
    info!("project root {:?} (override with --root or {PREFAB_ROOT_ENV})", root);

    let mut config = Config::discover(&root, cli.config.as_deref())?;
    if cli.keep_sources {
        config.keep_sources = true;
    }

    let mode = if cli.check { RunMode::Check } else { RunMode::Write };
    let report = run(&root, &config, mode)?;
    for skipped in &report.skipped_constraints {
        info!(
            "skipped {}.{}: {}",
            skipped.prefab, skipped.constraint, skipped.reason
        );
    }
    Ok(())
}
