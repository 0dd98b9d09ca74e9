//! Finds social icon and footer text links in HTML templates and rewrites their `href`s in
//! the original source text.
//!
//! The pipeline per document is `html::parse` → [`collect_links`] → [`apply_patches`]. The
//! parsed tree is only used to locate links; patching is plain substring replacement on the
//! raw text, so everything else in the file is left byte-for-byte as it was.

pub mod anchor;
pub mod collect;
pub mod config;
pub mod matchers;
pub mod patch;
pub mod process;

mod types;

pub use crate::anchor::{anchor_href, resolve_anchor};
pub use crate::collect::{collect_links, collect_links_all};
pub use crate::config::{ConfigError, ReplacementTable};
pub use crate::patch::{apply_patches, normalize_href};
pub use crate::process::{
    BatchOptions, BatchSummary, ProcessError, discover_markup_files, process_file,
    rewrite_document, run_batch,
};
pub use crate::types::{DocumentResult, LinkFinding, LinkKind, Outcome};
