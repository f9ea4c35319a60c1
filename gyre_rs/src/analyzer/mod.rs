//! Import-graph analysis: extraction, resolution, cycle detection, and
//! run orchestration.

pub mod cycles;
pub mod extract;
pub mod output;
mod regexes;
pub mod resolve;
pub mod runner;

pub use cycles::{find_all_circular_dependencies, get_cycle_hash, get_minimal_cycle};
pub use extract::get_file_imports;
pub use output::{CycleReport, RunReport};
pub use resolve::resolve_import_path;
pub use runner::run_cycle_analyzer;
