//! One compiler run: discover, read, compile, emit, write, delete.
//!
//! Every read and all compilation finish before the first write, and every write
//! finishes before the first source is deleted. Any read, parse or write error
//! stops the run at the stage it happened in, so a failed run never deletes.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use crossbeam::channel::unbounded;
use rs_emit::{Artifact, EmitError, Emitter, ensure_dir, write_artifacts};
use rs_model::{ModelError, ModelFile, load_model_file};
use rs_prefab::{BODY_PARENT, CONSTRAINT_PARENT, CompileContext, SkippedConstraint};
use thiserror::Error;
use tracing::{Level, debug, info, warn};

use crate::{Config, ConfigError, discover_sources};

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("a worker thread panicked")]
    WorkerPanicked,
}

impl CompileError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Write,
    /// Compile and emit in memory only. Nothing is written or deleted.
    Check,
}

/// What a run did. Paths are absolute (joined onto the project root).
#[derive(Debug, Default)]
pub struct RunReport {
    /// Sources that held physics bones and were compiled.
    pub compiled: Vec<PathBuf>,
    /// Sources without any physics bones; left alone.
    pub ignored: Vec<PathBuf>,
    pub prefabs: Vec<String>,
    pub skipped_constraints: Vec<SkippedConstraint>,
    /// Every artifact the run produced, written or not.
    pub artifacts: Vec<PathBuf>,
    pub written: Vec<PathBuf>,
    pub deleted: Vec<PathBuf>,
}

pub fn run(root: &Path, config: &Config, mode: RunMode) -> Result<RunReport, CompileError> {
    let mut report = RunReport::default();

    let source_dir = root.join(&config.source_dir);
    if !source_dir.is_dir() {
        warn!("source directory {:?} does not exist, nothing to compile", source_dir);
        return Ok(report);
    }
    let sources = discover_sources(&source_dir)?;
    debug!("found {} source files under {:?}", sources.len(), source_dir);

    let models = parallel_map(&sources, |path| load_model_file(path))?
        .into_iter()
        .collect::<Result<Vec<ModelFile>, ModelError>>()?;

    let mut ctx = CompileContext::new();
    for (path, model) in sources.into_iter().zip(models) {
        if !model.has_bones_under(&[BODY_PARENT, CONSTRAINT_PARENT]) {
            warn!("{:?} has no `{BODY_PARENT}` or `{CONSTRAINT_PARENT}` bones, skipping", path);
            report.ignored.push(path);
            continue;
        }
        ctx.add_model(model);
        report.compiled.push(path);
    }

    if tracing::enabled!(Level::DEBUG) {
        for prefab in &ctx.prefabs {
            match serde_json::to_string(prefab) {
                Ok(json) => debug!("compiled {json}"),
                Err(e) => warn!("{}: could not dump compiled prefab: {e}", prefab.id),
            }
        }
    }

    let emitter = Emitter::new(config.layout(), config.templates(root)?)
        .with_default_mass(config.default_mass);
    let per_prefab = ctx
        .prefabs
        .iter()
        .map(|prefab| emitter.emit_prefab(prefab))
        .collect::<Result<Vec<Vec<Artifact>>, EmitError>>()?;
    let index = emitter.emit_index(&ctx.prefabs);

    report.artifacts = per_prefab
        .iter()
        .flatten()
        .chain(std::iter::once(&index))
        .map(|artifact| root.join(&artifact.path))
        .collect();
    report.prefabs = ctx.prefabs.iter().map(|p| p.id.clone()).collect();
    report.skipped_constraints = ctx.skipped;

    if !report.skipped_constraints.is_empty() {
        warn!(
            "{} constraint(s) could not be built and were left out",
            report.skipped_constraints.len()
        );
    }

    if mode == RunMode::Check {
        info!(
            "checked {} prefab(s) from {} source(s), {} artifact(s) would be written",
            report.prefabs.len(),
            report.compiled.len(),
            report.artifacts.len()
        );
        return Ok(report);
    }

    for dir in emitter.layout.dirs() {
        ensure_dir(&root.join(dir))?;
    }
    for written in parallel_map(&per_prefab, |artifacts| write_artifacts(root, artifacts))? {
        report.written.extend(written?);
    }
    report
        .written
        .extend(write_artifacts(root, std::slice::from_ref(&index))?);

    if config.keep_sources {
        debug!("keeping sources");
    } else {
        report.deleted = delete_sources(&report.compiled, &report.written)?;
    }

    info!(
        "compiled {} prefab(s) from {} source(s): wrote {} file(s), deleted {}",
        report.prefabs.len(),
        report.compiled.len(),
        report.written.len(),
        report.deleted.len()
    );
    Ok(report)
}

/// Removes compiled sources, except any the run has just written over.
fn delete_sources(sources: &[PathBuf], written: &[PathBuf]) -> Result<Vec<PathBuf>, CompileError> {
    let outputs = written.iter().map(|p| file_key(p)).collect::<HashSet<_>>();
    let mut deleted = Vec::with_capacity(sources.len());
    for source in sources {
        if outputs.contains(&file_key(source)) {
            debug!("{:?} was overwritten by an output, not deleting", source);
            continue;
        }
        fs::remove_file(source).map_err(|e| CompileError::io(source, e))?;
        debug!("deleted {:?}", source);
        deleted.push(source.clone());
    }
    Ok(deleted)
}

fn file_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Runs `f` over `items` on a small pool of scoped workers fed by a channel.
/// Results come back in the order of `items`.
fn parallel_map<T, R, F>(items: &[T], f: F) -> Result<Vec<R>, CompileError>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }
    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(items.len());

    let (job_tx, job_rx) = unbounded::<usize>();
    let (result_tx, result_rx) = unbounded::<(usize, R)>();
    for idx in 0..items.len() {
        let _ = job_tx.send(idx);
    }
    drop(job_tx);

    let f = &f;
    crossbeam::thread::scope(|s| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            s.spawn(move |_| {
                while let Ok(idx) = job_rx.recv() {
                    if result_tx.send((idx, f(&items[idx]))).is_err() {
                        break;
                    }
                }
            });
        }
    })
    .map_err(|_| CompileError::WorkerPanicked)?;
    drop(result_tx);

    let mut results = result_rx.iter().collect::<Vec<_>>();
    if results.len() != items.len() {
        return Err(CompileError::WorkerPanicked);
    }
    results.sort_by_key(|(idx, _)| *idx);
    Ok(results.into_iter().map(|(_, r)| r).collect())
}
