//! # gyre
//!
//! **Circular-import detector for TypeScript/JavaScript workspaces** - finds the
//! import loops that break module initialization at runtime.
//!
//! A cycle through a barrel re-export rarely fails at build time; it fails in
//! production as an `undefined` binding when one module in the loop loads before
//! the other. gyre walks the real import graph on disk and reports every loop
//! once, in a form diffable across runs.
//!
//! ## Features
//!
//! - **Cycle Detection** - Depth-bounded DFS with minimal-cycle extraction and
//!   rotation-invariant dedup hashes
//! - **TS/JS Resolution** - Relative specifiers, alias prefixes, extension
//!   fallbacks, and barrel (`index.*`) directory imports
//! - **Warm Cache** - mtime-size fingerprints skip re-parsing unchanged files
//! - **CI Friendly** - JSON reports and a `--fail-on-cycles` exit gate
//! - **Config File** - Optional `.gyre/config.toml` for aliases, extensions,
//!   and scan settings
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,no_run
//! use gyre::{FileSystemCache, Options, find_all_circular_dependencies, get_cycle_hash};
//! use std::path::Path;
//!
//! let options = Options::new("/repo/web", 32);
//! let mut cache = FileSystemCache::new();
//!
//! let cycles =
//!     find_all_circular_dependencies(Path::new("/repo/web/src/app.ts"), &options, &mut cache);
//! for cycle in &cycles {
//!     println!("{}", get_cycle_hash(cycle));
//! }
//! ```
//!
//! ## Running Full Analysis
//!
//! ```rust,no_run
//! use gyre::args::ParsedArgs;
//! use std::path::PathBuf;
//!
//! // Walk a workspace and print the report, as the CLI does
//! let mut parsed = ParsedArgs::default();
//! parsed.report_all_cycles = true;
//!
//! let roots = vec![PathBuf::from(".")];
//! gyre::run_cycle_analyzer(&roots, &parsed).unwrap();
//! ```
//!
//! ## CLI Usage
//!
//! For command-line usage, install with `cargo install gyre` and run:
//!
//! ```bash
//! gyre                       # Scan the current directory
//! gyre web api               # Multiple roots, one deduplicated report
//! gyre --json                # Machine-readable report
//! gyre --fail-on-cycles      # CI gate: exit 1 when any cycle exists
//! gyre -I '**/generated/**'  # Keep generated code out of the graph
//! ```

#![doc(html_root_url = "https://docs.rs/gyre/0.3.2")]

// ============================================================================
// Core Modules
// ============================================================================

/// Import-graph analysis for TypeScript and JavaScript.
///
/// # Submodules
///
/// - [`analyzer::extract`] - Regex import extraction with cache reuse
/// - [`analyzer::resolve`] - Specifier-to-file resolution
/// - [`analyzer::cycles`] - Depth-bounded cycle detection and hashing
/// - [`analyzer::output`] - Human and JSON report rendering
/// - [`analyzer::runner`] - Per-root orchestration for the CLI
pub mod analyzer;

/// Command-line argument parsing.
///
/// Contains the [`ParsedArgs`](args::ParsedArgs) struct and
/// [`parse_args`](args::parse_args) function.
pub mod args;

/// The per-run filesystem cache.
///
/// One [`FileSystemCache`](cache::FileSystemCache) carries every memoized
/// answer for a run: extracted imports keyed by mtime-size fingerprints,
/// existence probes, compiled ignore globs, and the set of already
/// reported cycle hashes.
pub mod cache;

/// Terminal color utilities.
pub mod colors;

/// Optional `.gyre/config.toml` support.
pub mod config;

/// Filesystem utilities: the source walk, gitignore checks via the `git`
/// binary, extension matching, and lexical path normalization.
pub mod fs_utils;

/// Progress spinner and duration/count formatting for the scan phase.
pub mod progress;

/// Common types used throughout the crate.
///
/// # Key Types
///
/// - [`Options`] - Analysis configuration shared by every core call
/// - [`ImportInfo`] - One extracted import edge
/// - [`Cycle`] - A closed walk, first and last element equal
pub mod types;

// ============================================================================
// Re-exports for convenience
// ============================================================================

/// Analysis options.
pub use types::Options;

/// Color mode (Auto, Always, Never).
pub use types::ColorMode;

/// Output format (Human, Json).
pub use types::OutputMode;

/// One extracted import edge.
pub use types::ImportInfo;

/// A closed walk in the import graph.
pub use types::Cycle;

/// The per-run cache.
pub use cache::FileSystemCache;

/// Run the full analyzer the way the CLI does.
pub use analyzer::run_cycle_analyzer;

/// Detect cycles reachable from one file.
pub use analyzer::find_all_circular_dependencies;

/// Strip the lead-in prefix from a raw cycle.
pub use analyzer::get_minimal_cycle;

/// Canonical dedup hash for a cycle.
pub use analyzer::get_cycle_hash;

/// Extract the imports of one file through the cache.
pub use analyzer::get_file_imports;

/// Resolve one specifier against the workspace.
pub use analyzer::resolve_import_path;

/// One deduplicated cycle, serializable.
pub use analyzer::CycleReport;

/// Everything a run learned about one root.
pub use analyzer::RunReport;
