//! Run-scoped cache shared by the extractor and the cycle detector.
//!
//! One `FileSystemCache` is created per analysis run and passed `&mut` into
//! every core call. Existence checks are memoized for the whole run; import
//! lists are memoized per file behind an mtime-size fingerprint; compiled
//! glob patterns and reported-cycle hashes are memoized without invalidation.
//! Reads are never memoized.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use globset::{Glob, GlobMatcher};

use crate::types::ImportInfo;

#[derive(Default)]
pub struct FileSystemCache {
    /// Absolute file path -> extracted imports, textual order.
    pub(crate) dependencies: HashMap<PathBuf, Vec<ImportInfo>>,
    /// Absolute path -> existence, memoized for the whole run.
    pub(crate) file_exists: HashMap<PathBuf, bool>,
    /// Absolute path -> "mtime-size" fingerprint guarding `dependencies`.
    pub(crate) file_hashes: HashMap<PathBuf, String>,
    /// Glob pattern -> compiled matcher; `None` marks a malformed pattern
    /// that warned once and never matches.
    pub(crate) compiled_patterns: HashMap<String, Option<GlobMatcher>>,
    /// Canonical hashes of cycles already surfaced this run.
    pub(crate) reported_cycles: HashSet<String>,
    pub(crate) cache_hits: usize,
    pub(crate) fresh_scans: usize,
}

impl FileSystemCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets all memoized state in place. Watch-style hosts call this
    /// between runs so edited files are never served stale.
    pub fn clear(&mut self) {
        self.dependencies.clear();
        self.file_exists.clear();
        self.file_hashes.clear();
        self.compiled_patterns.clear();
        self.reported_cycles.clear();
        self.cache_hits = 0;
        self.fresh_scans = 0;
    }

    /// Memoized existence probe: true when a regular file sits at `path`.
    /// Directories answer false so directory imports fall through to the
    /// barrel chain. The first answer for a path sticks for the rest of
    /// the run; runs are short-lived by contract.
    pub fn exists(&mut self, path: &Path) -> bool {
        if let Some(&found) = self.file_exists.get(path) {
            return found;
        }
        let found = path.is_file();
        self.file_exists.insert(path.to_path_buf(), found);
        found
    }

    /// True while the stored fingerprint for `path` still matches the
    /// file on disk. A missing stored hash or a failed stat is stale.
    pub fn is_cache_valid(&self, path: &Path) -> bool {
        match (self.file_hashes.get(path), fingerprint(path)) {
            (Some(stored), Some(current)) => *stored == current,
            _ => false,
        }
    }

    pub fn cached_imports(&self, path: &Path) -> Option<&[ImportInfo]> {
        self.dependencies.get(path).map(Vec::as_slice)
    }

    /// Stores a freshly extracted import list. `fingerprint` is the stat
    /// taken alongside the read; `None` (file vanished mid-scan) drops any
    /// stored hash so the next call re-extracts.
    pub fn store_imports(
        &mut self,
        path: &Path,
        imports: Vec<ImportInfo>,
        fingerprint: Option<String>,
    ) {
        match fingerprint {
            Some(fp) => {
                self.file_hashes.insert(path.to_path_buf(), fp);
            }
            None => {
                self.file_hashes.remove(path);
            }
        }
        self.dependencies.insert(path.to_path_buf(), imports);
    }

    /// Compiled matcher for `pattern`, memoized per pattern string. A
    /// malformed pattern warns once on stderr and yields `None` from then
    /// on, so it can never match anything.
    pub fn matcher(&mut self, pattern: &str) -> Option<&GlobMatcher> {
        if !self.compiled_patterns.contains_key(pattern) {
            let compiled = match Glob::new(pattern) {
                Ok(glob) => Some(glob.compile_matcher()),
                Err(err) => {
                    eprintln!("[gyre][warn] invalid glob '{}': {}", pattern, err);
                    None
                }
            };
            self.compiled_patterns.insert(pattern.to_string(), compiled);
        }
        self.compiled_patterns
            .get(pattern)
            .and_then(|m| m.as_ref())
    }

    /// True when `path` matches any of `patterns`. Callers pass
    /// workspace-relative paths so root-anchored globs behave.
    pub fn is_ignored(&mut self, path: &Path, patterns: &[String]) -> bool {
        for pattern in patterns {
            if let Some(matcher) = self.matcher(pattern)
                && matcher.is_match(path)
            {
                return true;
            }
        }
        false
    }

    /// Records a canonical cycle hash. Returns true when this loop has not
    /// been reported before in this run.
    pub fn mark_reported(&mut self, hash: &str) -> bool {
        self.reported_cycles.insert(hash.to_string())
    }

    /// (cache hits, fresh scans) observed by the extractor so far.
    pub fn scan_stats(&self) -> (usize, usize) {
        (self.cache_hits, self.fresh_scans)
    }
}

/// Raw read, deliberately unmemoized. Contents may change between calls
/// within one run; staleness is the fingerprint's job, not this one's.
pub fn read_file(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// `"{mtime_secs}-{size}"` for the file at `path`, or `None` when the
/// stat fails (deleted mid-run, permissions). Seconds granularity is
/// enough because size participates too.
pub fn fingerprint(path: &Path) -> Option<String> {
    let meta = fs::metadata(path).ok()?;
    let mtime = meta
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0);
    Some(format!("{}-{}", mtime, meta.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn exists_is_memoized_for_the_run() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "a.ts", "export {};\n");

        let mut cache = FileSystemCache::new();
        assert!(cache.exists(&file));

        fs::remove_file(&file).unwrap();
        // Memoized answer survives the deletion.
        assert!(cache.exists(&file));

        let mut fresh = FileSystemCache::new();
        assert!(!fresh.exists(&file));
    }

    #[test]
    fn exists_answers_false_for_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("pages")).unwrap();

        let mut cache = FileSystemCache::new();
        assert!(!cache.exists(&dir.path().join("pages")));
    }

    #[test]
    fn fingerprint_encodes_mtime_and_size() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "a.ts", "12345");

        let fp = fingerprint(&file).unwrap();
        let (mtime, size) = fp.split_once('-').unwrap();
        assert!(mtime.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(size, "5");

        assert_eq!(fingerprint(&dir.path().join("missing.ts")), None);
    }

    #[test]
    fn cache_validity_follows_fingerprint() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "a.ts", "import './b';\n");

        let mut cache = FileSystemCache::new();
        assert!(!cache.is_cache_valid(&file));

        cache.store_imports(&file, Vec::new(), fingerprint(&file));
        assert!(cache.is_cache_valid(&file));

        // A longer rewrite changes the size, so the fingerprint changes
        // even within the same mtime second.
        write_file(&dir, "a.ts", "import './b';\nimport './c';\n");
        assert!(!cache.is_cache_valid(&file));
    }

    #[test]
    fn storing_without_fingerprint_drops_the_hash() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "a.ts", "export {};\n");

        let mut cache = FileSystemCache::new();
        cache.store_imports(&file, Vec::new(), fingerprint(&file));
        assert!(cache.is_cache_valid(&file));

        cache.store_imports(&file, Vec::new(), None);
        assert!(!cache.is_cache_valid(&file));
    }

    #[test]
    fn malformed_pattern_never_matches_and_is_memoized_once() {
        let mut cache = FileSystemCache::new();
        let patterns = vec!["a{".to_string()];

        assert!(!cache.is_ignored(Path::new("a"), &patterns));
        assert!(!cache.is_ignored(Path::new("a{"), &patterns));
        assert_eq!(cache.compiled_patterns.len(), 1);
        assert!(cache.compiled_patterns.get("a{").unwrap().is_none());
    }

    #[test]
    fn patterns_compile_once_and_match() {
        let mut cache = FileSystemCache::new();
        let patterns = vec!["**/generated/**".to_string(), "*.stories.tsx".to_string()];

        assert!(cache.is_ignored(Path::new("src/generated/api.ts"), &patterns));
        assert!(cache.is_ignored(Path::new("Button.stories.tsx"), &patterns));
        assert!(!cache.is_ignored(Path::new("src/app.ts"), &patterns));
        assert_eq!(cache.compiled_patterns.len(), 2);

        // Repeated checks reuse the compiled matchers.
        assert!(cache.is_ignored(Path::new("src/generated/api.ts"), &patterns));
        assert_eq!(cache.compiled_patterns.len(), 2);
    }

    #[test]
    fn mark_reported_dedups() {
        let mut cache = FileSystemCache::new();
        assert!(cache.mark_reported("a.ts -> b.ts"));
        assert!(!cache.mark_reported("a.ts -> b.ts"));
        assert!(cache.mark_reported("a.ts -> c.ts"));
    }

    #[test]
    fn clear_resets_everything() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "a.ts", "export {};\n");

        let mut cache = FileSystemCache::new();
        cache.exists(&file);
        cache.store_imports(&file, Vec::new(), fingerprint(&file));
        cache.matcher("*.ts");
        cache.mark_reported("a -> b");
        cache.cache_hits = 3;
        cache.fresh_scans = 1;

        cache.clear();
        assert!(cache.dependencies.is_empty());
        assert!(cache.file_exists.is_empty());
        assert!(cache.file_hashes.is_empty());
        assert!(cache.compiled_patterns.is_empty());
        assert!(cache.reported_cycles.is_empty());
        assert_eq!(cache.scan_stats(), (0, 0));
    }

    #[test]
    fn read_file_reports_errors_instead_of_caching() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "a.ts", "one");

        assert_eq!(read_file(&file).unwrap(), "one");
        write_file(&dir, "a.ts", "two!");
        assert_eq!(read_file(&file).unwrap(), "two!");

        assert!(read_file(dir.path()).is_err());
        assert!(read_file(&dir.path().join("gone.ts")).is_err());
    }
}
