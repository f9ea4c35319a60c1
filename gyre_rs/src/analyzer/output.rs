//! Report types and rendering: a colored human listing or one JSON
//! document covering every analyzed root.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::colors::Painter;
use crate::progress::format_count;

/// Cycles longer than this render as head and tail with an elision.
const TRUNCATE_ABOVE: usize = 12;

/// One deduplicated cycle. `files` are workspace-relative display paths
/// with the repeated file last; `length` counts distinct members.
#[derive(Debug, Serialize)]
pub struct CycleReport {
    pub files: Vec<String>,
    pub length: usize,
    pub hash: String,
}

impl CycleReport {
    pub fn new(cycle: &[PathBuf], workspace_root: &Path, hash: String) -> Self {
        let files: Vec<String> = cycle
            .iter()
            .map(|path| display_path(path, workspace_root))
            .collect();
        let length = if cycle.len() > 1 && cycle.first() == cycle.last() {
            cycle.len() - 1
        } else {
            cycle.len()
        };
        CycleReport {
            files,
            length,
            hash,
        }
    }
}

/// Everything the run learned about one root.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub root: String,
    pub files_scanned: usize,
    pub cycles: Vec<CycleReport>,
}

/// Workspace-relative rendering; paths outside the root stay absolute.
pub fn display_path(path: &Path, workspace_root: &Path) -> String {
    path.strip_prefix(workspace_root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Joins a cycle for display. Long cycles keep five files from each end
/// and elide the middle so one degenerate loop cannot flood a terminal.
pub fn format_cycle(files: &[String]) -> String {
    if files.len() <= TRUNCATE_ABOVE {
        return files.join(" -> ");
    }
    let head = files[..5].join(" -> ");
    let tail = files[files.len() - 5..].join(" -> ");
    let hidden = files.len() - 10;
    format!("{head} -> ... ({hidden} intermediate) ... -> {tail}")
}

pub fn print_human(report: &RunReport, painter: Painter) {
    if report.cycles.is_empty() {
        println!("{}", painter.ok("No circular imports detected."));
        return;
    }
    println!(
        "{}",
        painter.warn(&format!(
            "Circular imports detected ({}):",
            format_count(report.cycles.len(), "cycle", "cycles")
        ))
    );
    for (i, cycle) in report.cycles.iter().enumerate() {
        println!(
            "  Cycle {}: {}",
            painter.number(i + 1),
            format_cycle(&cycle.files)
        );
    }
}

pub fn print_json(reports: &[RunReport]) {
    let payload = serde_json::to_string_pretty(reports).expect("report serialization");
    println!("{payload}");
}
