use std::{
    collections::HashMap,
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
    thread,
    time::{Duration, SystemTime},
};

use eyre::WrapErr;
use rayon::prelude::*;
use tartak::{lexer::Tokenizer, parser, util::fmt::tree, util::UpToExt, Target};
use tracing::{debug, error, info, warn};

pub const SOURCE_EXTENSION: &str = "tartak";

/// Directories never searched for sources.
const SKIPPED_DIRS: &[&str] = &["node_modules", "target"];

pub fn is_source(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// The generated code for `foo.tartak` lives next to it, in `foo.tartak.ts`.
pub fn output_path(source: &Path) -> PathBuf {
    let mut name = OsString::from(source.as_os_str());
    name.push(".ts");
    PathBuf::from(name)
}

pub fn compile_file(source: &Path, target: Target) -> eyre::Result<PathBuf> {
    let src = fs::read_to_string(source)
        .wrap_err_with(|| format!("failed to read {}", source.display()))?;
    let code = tartak::compile(&src, target)?;
    let output = output_path(source);
    fs::write(&output, code).wrap_err_with(|| format!("failed to write {}", output.display()))?;
    Ok(output)
}

/// Finds every source under `root`, in a stable order. A file root is
/// returned as is when it is a source.
pub fn collect_sources(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    if root.is_file() {
        if is_source(root) {
            sources.push(root.to_owned());
        }
        return Ok(sources);
    }
    collect_dir(root, &mut sources)?;
    sources.sort();
    Ok(sources)
}

fn collect_dir(dir: &Path, sources: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') || SKIPPED_DIRS.contains(&&*name) {
                continue;
            }
            collect_dir(&path, sources)?;
        } else if is_source(&path) {
            sources.push(path);
        }
    }
    Ok(())
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub compiled: usize,
    pub failed: usize,
}

/// Compiles every source in parallel. A failure is logged and doesn't stop
/// the other files.
pub fn compile_all(sources: &[PathBuf], target: Target) -> Summary {
    let failed = sources
        .par_iter()
        .filter(|source| match compile_file(source, target) {
            Ok(output) => {
                info!("compiled {} to {}", source.display(), output.display());
                false
            }
            Err(error) => {
                error!("failed to compile {}: {error:#}", source.display());
                true
            }
        })
        .count();
    Summary {
        compiled: sources.len() - failed,
        failed,
    }
}

/// Watches sources by polling their modification times.
pub struct Watcher {
    root: PathBuf,
    interval: Duration,
    seen: HashMap<PathBuf, SystemTime>,
}

impl Watcher {
    /// Starts watching, treating the current state of every source as seen.
    pub fn new(root: &Path, interval: Duration) -> io::Result<Watcher> {
        let mut watcher = Watcher {
            root: root.to_owned(),
            interval,
            seen: HashMap::new(),
        };
        watcher.poll()?;
        Ok(watcher)
    }

    /// Returns the sources that appeared or were modified since the last poll.
    /// Sources whose metadata can't be read are skipped until they can, and
    /// removed sources are forgotten.
    pub fn poll(&mut self) -> io::Result<Vec<PathBuf>> {
        let sources = collect_sources(&self.root)?;
        let mut changed = Vec::new();
        for source in &sources {
            let modified = match fs::metadata(source).and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(error) => {
                    warn!("skipping {}: {error}", source.display());
                    continue;
                }
            };
            if self.seen.insert(source.clone(), modified) != Some(modified) {
                changed.push(source.clone());
            }
        }
        self.seen.retain(|path, _| sources.contains(path));
        Ok(changed)
    }

    pub fn run(mut self, target: Target) -> eyre::Result<()> {
        info!("watching {} for changes", self.root.display());
        loop {
            thread::sleep(self.interval);
            let changed = match self.poll() {
                Ok(changed) => changed,
                Err(error) => {
                    warn!("failed to scan {}: {error}", self.root.display());
                    continue;
                }
            };
            if changed.is_empty() {
                continue;
            }
            debug!(count = changed.len(), "sources changed");
            compile_all(&changed, target);
        }
    }
}

/// Renders the syntax tree of a source.
pub fn emit_ast(src: &str) -> eyre::Result<String> {
    let program = parser::parse_program(src)?;
    Ok(tree::print_program_string(&program))
}

/// Renders the token stream of a source, one token per line, up to the
/// first error.
pub fn emit_tokens(src: &str) -> String {
    let mut out = String::new();
    for token in Tokenizer::new(src).up_to(Result::is_err) {
        let line = match token {
            Ok(token) => format!("{token:?}"),
            Err(error) => format!("error: {error}"),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}
