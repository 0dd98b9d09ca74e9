use std::fs;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use walkdir::WalkDir;

use crate::collect::collect_links;
use crate::config::ReplacementTable;
use crate::patch::apply_patches;
use crate::types::{DocumentResult, LinkFinding, Outcome};

/// File names containing this are treated as markup templates (`index.html`, `footer.html.ejs`).
const MARKUP_NAME_INDICATOR: &str = "html";

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("cannot scan {}", path.display())]
    Discover {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not valid UTF-8", path.display())]
    NotUtf8 { path: PathBuf },
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: html::ParseError,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProcessError {
    pub fn path(&self) -> &Path {
        match self {
            ProcessError::Discover { path, .. }
            | ProcessError::Read { path, .. }
            | ProcessError::NotUtf8 { path }
            | ProcessError::Parse { path, .. }
            | ProcessError::Write { path, .. } => path,
        }
    }
}

pub fn is_markup_file_name(name: &str) -> bool {
    html::contains_ignore_ascii_case(name, MARKUP_NAME_INDICATOR)
}

/// Recursively list regular files under `root` whose name marks them as markup, sorted by
/// path. Unreadable entries below the root are logged and skipped.
pub fn discover_markup_files(root: &Path) -> Result<Vec<PathBuf>, ProcessError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(ProcessError::Discover {
                    path: root.to_path_buf(),
                    source,
                });
            }
            Err(err) => {
                log::warn!("skipping unreadable entry: {err}");
                continue;
            }
        };
        if entry.file_type().is_file()
            && entry.file_name().to_str().is_some_and(is_markup_file_name)
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Parse `raw`, collect its links, and patch them against `raw`.
pub fn rewrite_document(
    raw: &str,
    table: &ReplacementTable,
) -> Result<(Vec<LinkFinding>, Outcome), html::ParseError> {
    let doc = html::parse(raw)?;
    let findings = collect_links(&doc);
    // The tree is only needed to find links; patching works on the source text.
    drop(doc);

    if findings.is_empty() {
        return Ok((findings, Outcome::Unchanged));
    }
    let patched = apply_patches(raw, &findings, table);
    let outcome = if patched == raw {
        Outcome::Unchanged
    } else {
        Outcome::Rewritten(patched)
    };
    Ok((findings, outcome))
}

/// Read, rewrite, and (unless `dry_run`) overwrite one file.
pub fn process_file(
    path: &Path,
    table: &ReplacementTable,
    dry_run: bool,
) -> Result<DocumentResult, ProcessError> {
    let bytes = fs::read(path).map_err(|source| ProcessError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = String::from_utf8(bytes).map_err(|_| ProcessError::NotUtf8 {
        path: path.to_path_buf(),
    })?;

    let (findings, outcome) =
        rewrite_document(&raw, table).map_err(|source| ProcessError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if let Outcome::Rewritten(text) = &outcome {
        if dry_run {
            log::info!("{}: would rewrite {} link(s)", path.display(), findings.len());
        } else {
            write_atomic(path, text).map_err(|source| ProcessError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            log::info!("{}: rewrote {} link(s)", path.display(), findings.len());
        }
    }

    Ok(DocumentResult {
        path: path.to_path_buf(),
        findings: findings.len(),
        outcome,
    })
}

/// Replace `path` with `contents` in one step: write a sibling temp file, then rename it over
/// the original. The original's permissions are carried over.
pub fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let permissions = fs::metadata(path)?.permissions();

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.as_file().set_permissions(permissions)?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[derive(Clone, Copy, Debug)]
pub struct BatchOptions {
    pub jobs: NonZeroUsize,
    pub dry_run: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            jobs: thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
            dry_run: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub rewritten: usize,
    pub failed: usize,
}

/// Process `files` on up to `options.jobs` worker threads.
///
/// Files are independent; a failure is logged and counted against that file only. `processed`
/// counts every file handed in, failed or not. Results are tallied while workers run, through a
/// channel holding at most one pending result per worker, so rewritten texts are released as
/// soon as they are counted.
pub fn run_batch(
    files: &[PathBuf],
    table: &ReplacementTable,
    options: BatchOptions,
) -> BatchSummary {
    let next = AtomicUsize::new(0);
    let workers = options.jobs.get().min(files.len()).max(1);
    let (tx, rx) = mpsc::sync_channel::<Result<DocumentResult, ProcessError>>(workers);
    let mut summary = BatchSummary {
        processed: files.len(),
        ..BatchSummary::default()
    };

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let next = &next;
            scope.spawn(move || {
                loop {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    let Some(path) = files.get(index) else {
                        break;
                    };
                    if tx.send(process_file(path, table, options.dry_run)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        for result in rx {
            summary.record(result);
        }
    });

    summary
}

impl BatchSummary {
    fn record(&mut self, result: Result<DocumentResult, ProcessError>) {
        match result {
            Ok(result) => {
                if result.is_rewritten() {
                    self.rewritten += 1;
                } else {
                    log::debug!(
                        "{}: no changes ({} link(s) found)",
                        result.path.display(),
                        result.findings
                    );
                }
            }
            Err(err) => {
                self.failed += 1;
                log::error!("{}", error_chain(&err));
            }
        }
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
