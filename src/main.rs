use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use link_rewrite::{BatchOptions, ReplacementTable, discover_markup_files, run_batch};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Rewrite social icon, privacy policy and contractor license links in HTML templates.
#[derive(Debug, Parser)]
#[command(name = "link-rewriter", version)]
struct Cli {
    /// Directory scanned recursively for files whose name contains "html".
    root: PathBuf,

    /// TOML replacement table (keys: twitter, instagram, facebook, linkedin, privacyPolicy,
    /// stateContractor). Missing keys blank the link.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of files processed concurrently [default: available parallelism].
    #[arg(long, short)]
    jobs: Option<NonZeroUsize>,

    /// Report what would change without writing files.
    #[arg(long)]
    dry_run: bool,

    /// Log link-level diagnostics.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let table = match &cli.config {
        Some(path) => ReplacementTable::load(path)?,
        None => ReplacementTable::default(),
    };

    let files = discover_markup_files(&cli.root)
        .with_context(|| format!("discovering templates under {}", cli.root.display()))?;
    log::debug!("found {} template(s)", files.len());

    let mut options = BatchOptions::default();
    if let Some(jobs) = cli.jobs {
        options.jobs = jobs;
    }
    options.dry_run = cli.dry_run;

    let summary = run_batch(&files, &table, options);
    if summary.failed > 0 {
        log::warn!("{} file(s) failed", summary.failed);
    }
    log::info!("{} file(s) rewritten", summary.rewritten);

    println!("processed {}", summary.processed);
    println!("done");
    Ok(())
}
