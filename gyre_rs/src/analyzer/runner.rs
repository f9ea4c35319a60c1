//! Run orchestration: option assembly from flags and config, the file
//! walk, detection, cross-root dedup, and report emission.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::cycles::{find_all_circular_dependencies, get_cycle_hash, get_minimal_cycle};
use super::output::{CycleReport, RunReport, print_human, print_json};
use crate::args::ParsedArgs;
use crate::cache::FileSystemCache;
use crate::colors::Painter;
use crate::config::GyreConfig;
use crate::fs_utils::{GitIgnore, gather_files};
use crate::progress::{Spinner, format_count, format_duration};
use crate::types::{DEFAULT_MAX_DEPTH, Options, OutputMode};

/// Merges flag and config settings into per-root options. Flags win over
/// config, config over built-ins. Config aliases replace the default
/// table rather than extending it; ignore globs from both sources apply.
fn build_options(workspace_root: &Path, parsed: &ParsedArgs) -> Options {
    let config = GyreConfig::load(workspace_root);

    let mut max_depth = parsed
        .max_depth
        .or(config.scan.max_depth)
        .unwrap_or(DEFAULT_MAX_DEPTH);
    if max_depth == 0 {
        // Only reachable through the config file; the flag parser
        // rejects zero itself.
        eprintln!("[gyre][warn] scan.max_depth must be at least 1; using {DEFAULT_MAX_DEPTH}");
        max_depth = DEFAULT_MAX_DEPTH;
    }

    let mut options = Options::new(workspace_root, max_depth);
    options.report_all_cycles =
        parsed.report_all_cycles || config.scan.report_all_cycles.unwrap_or(false);
    if let Some(extensions) = &parsed.extensions {
        options.extensions = extensions.clone();
    } else if !config.resolve.extensions.is_empty() {
        options.extensions = config.resolve.extensions.clone();
    }
    if !config.resolve.barrels.is_empty() {
        options.barrel_exports = config.resolve.barrels.clone();
    }
    if !config.resolve.aliases.is_empty() {
        options.aliases = config.resolve.aliases.clone();
    }
    options.ignore_patterns = config.scan.ignore.clone();
    options
        .ignore_patterns
        .extend(parsed.ignore_patterns.iter().cloned());
    options.use_gitignore = parsed.use_gitignore;
    options.color = parsed.color;
    options.output = parsed.output;
    options.verbose = parsed.verbose;
    options
}

/// Analyzes every root in order with one shared cache and prints the
/// requested report. Returns how many distinct cycles were found so the
/// caller can turn the count into an exit code.
///
/// The cache is shared deliberately: overlapping roots reuse extraction
/// results, and a loop reachable from two roots is still reported once.
pub fn run_cycle_analyzer(root_list: &[PathBuf], parsed: &ParsedArgs) -> io::Result<usize> {
    let painter = Painter::new(parsed.color);
    let mut cache = FileSystemCache::new();
    let mut reports: Vec<RunReport> = Vec::new();

    for root in root_list {
        let workspace_root = root.canonicalize()?;
        let options = build_options(&workspace_root, parsed);
        let git = if options.use_gitignore {
            GitIgnore::discover(&workspace_root)
        } else {
            None
        };

        let started = Instant::now();
        let spinner = (options.output == OutputMode::Human)
            .then(|| Spinner::new(&format!("Scanning {}...", root.display())));

        let mut files: Vec<PathBuf> = Vec::new();
        gather_files(&workspace_root, &options, &mut cache, git.as_ref(), &mut files)?;

        if let Some(spinner) = &spinner {
            spinner.set_message(&format!(
                "Analyzing {}...",
                format_count(files.len(), "file", "files")
            ));
        }

        let mut cycles: Vec<CycleReport> = Vec::new();
        for file in &files {
            for raw in find_all_circular_dependencies(file, &options, &mut cache) {
                let minimal = get_minimal_cycle(&raw);
                let hash = get_cycle_hash(&minimal);
                if cache.mark_reported(&hash) {
                    cycles.push(CycleReport::new(&minimal, &workspace_root, hash));
                }
            }
        }

        if let Some(spinner) = &spinner {
            let message = format!(
                "Scanned {} in {}",
                format_count(files.len(), "file", "files"),
                format_duration(started.elapsed())
            );
            if cycles.is_empty() {
                spinner.finish_success(&message);
            } else {
                spinner.finish_warning(&message);
            }
        }

        let report = RunReport {
            root: root.display().to_string(),
            files_scanned: files.len(),
            cycles,
        };
        if options.output == OutputMode::Human {
            if root_list.len() > 1 {
                println!("{}", painter.header(&format!("{}:", report.root)));
            }
            print_human(&report, painter);
        }
        reports.push(report);
    }

    if parsed.output == OutputMode::Json {
        print_json(&reports);
    }
    if parsed.verbose {
        let (hits, fresh) = cache.scan_stats();
        eprintln!("[gyre] cache: {hits} hits, {fresh} fresh scans");
    }

    Ok(reports.iter().map(|report| report.cycles.len()).sum())
}
