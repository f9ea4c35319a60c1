use std::collections::HashMap;
use std::path::PathBuf;

/// File extensions tried when a specifier has no direct on-disk match.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Directory-index filenames tried after the extension chain fails.
pub const DEFAULT_BARRELS: &[&str] = &["index.ts", "index.tsx", "index.js", "index.jsx"];

/// Depth bound used by the CLI when neither flag nor config sets one.
/// The detector itself requires an explicit value.
pub const DEFAULT_MAX_DEPTH: usize = 32;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutputMode {
    Human,
    Json,
}

/// Analysis options shared by the extractor, the resolver, and the
/// cycle detector. Built once per run by the CLI (or by hand in
/// library usage) and passed by reference into every core call.
#[derive(Clone)]
pub struct Options {
    pub workspace_root: PathBuf,
    /// DFS depth bound. Branches entered deeper than this contribute no
    /// cycles. Must be at least 1.
    pub max_depth: usize,
    /// When false, a file stops expanding its remaining imports once one
    /// cycle has been found through it.
    pub report_all_cycles: bool,
    pub extensions: Vec<String>,
    pub barrel_exports: Vec<String>,
    /// Specifier prefix -> workspace-relative directory, e.g. "@app" -> "src".
    pub aliases: HashMap<String, String>,
    /// Glob patterns whose matches are excluded from the graph entirely.
    pub ignore_patterns: Vec<String>,
    pub use_gitignore: bool,
    pub color: ColorMode,
    pub output: OutputMode,
    pub verbose: bool,
}

impl Options {
    /// Baseline options for a workspace. `max_depth` is deliberately a
    /// required argument: there is no universally right bound, so callers
    /// pick one (the CLI passes [`DEFAULT_MAX_DEPTH`]).
    pub fn new(workspace_root: impl Into<PathBuf>, max_depth: usize) -> Self {
        Options {
            workspace_root: workspace_root.into(),
            max_depth,
            report_all_cycles: false,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            barrel_exports: DEFAULT_BARRELS.iter().map(|s| s.to_string()).collect(),
            aliases: default_aliases(),
            ignore_patterns: Vec::new(),
            use_gitignore: false,
            color: ColorMode::Auto,
            output: OutputMode::Human,
            verbose: false,
        }
    }
}

/// Alias table used when no config overrides it: `@app` and `@src`
/// both point at the conventional `src` root.
pub fn default_aliases() -> HashMap<String, String> {
    let mut aliases = HashMap::new();
    aliases.insert("@app".to_string(), "src".to_string());
    aliases.insert("@src".to_string(), "src".to_string());
    aliases
}

/// One import edge extracted from a file. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportInfo {
    /// Resolved absolute path inside the workspace.
    pub path: PathBuf,
    /// The specifier exactly as written in the source.
    pub source: String,
    /// True for `import('...')`; dynamic edges are recorded but never
    /// traversed by the cycle detector.
    pub dynamic: bool,
}

impl ImportInfo {
    pub fn new(path: PathBuf, source: &str, dynamic: bool) -> Self {
        ImportInfo {
            path,
            source: source.to_string(),
            dynamic,
        }
    }
}

/// A closed walk in the import graph: first and last element are equal.
pub type Cycle = Vec<PathBuf>;
