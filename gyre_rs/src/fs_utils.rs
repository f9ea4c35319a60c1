use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::process::{Command, Stdio};

use crate::cache::FileSystemCache;
use crate::types::Options;

/// Build-artifact directories skipped by the walker regardless of
/// ignore patterns. Hidden directories are skipped separately.
pub const DEFAULT_SKIP_DIRS: &[&str] = &["node_modules", "dist", "build", "out", "coverage"];

/// Checks paths against .gitignore by shelling out to git. Constructed
/// once per root; absent when the root is not inside a work tree.
pub struct GitIgnore {
    repo_root: PathBuf,
}

impl GitIgnore {
    pub fn discover(root: &Path) -> Option<Self> {
        let output = Command::new("git")
            .arg("-C")
            .arg(root)
            .arg("rev-parse")
            .arg("--show-toplevel")
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let top = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if top.is_empty() {
            return None;
        }
        Some(GitIgnore {
            repo_root: PathBuf::from(top),
        })
    }

    pub fn ignored(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.repo_root).unwrap_or(path);
        if relative.as_os_str().is_empty() {
            return false;
        }
        Command::new("git")
            .arg("-C")
            .arg(&self.repo_root)
            .arg("check-ignore")
            .arg("-q")
            .arg(relative)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

pub fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lower = ext.to_ascii_lowercase();
            extensions.iter().any(|want| want == &lower)
        })
        .unwrap_or(false)
}

/// Lexical path normalization: resolves `.` and `..` components without
/// touching the filesystem. Resolution candidates frequently do not exist
/// yet, so `canonicalize` is not an option here.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

fn is_skipped_dir(name: &str) -> bool {
    DEFAULT_SKIP_DIRS.contains(&name)
}

/// Collects candidate source files under `dir`, sorted for deterministic
/// runs. Filters: hidden entries, artifact directories, the run's ignore
/// globs (matched workspace-relative through the pattern cache), optional
/// gitignore, and the extension list.
pub fn gather_files(
    dir: &Path,
    options: &Options,
    cache: &mut FileSystemCache,
    git: Option<&GitIgnore>,
    files: &mut Vec<PathBuf>,
) -> io::Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|entry| !is_hidden(&entry.file_name().to_string_lossy()))
        .collect();

    entries.sort_by_key(|entry| entry.file_name().to_string_lossy().to_lowercase());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        let relative = path
            .strip_prefix(&options.workspace_root)
            .unwrap_or(&path)
            .to_path_buf();
        if cache.is_ignored(&relative, &options.ignore_patterns) {
            continue;
        }
        if options.use_gitignore
            && let Some(checker) = git
            && checker.ignored(&path)
        {
            continue;
        }

        if path.is_file() {
            if matches_extension(&path, &options.extensions) {
                files.push(path);
            }
            continue;
        }
        if path.is_dir() && !is_skipped_dir(&name) {
            gather_files(&path, options, cache, git, files)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Options;
    use tempfile::TempDir;

    fn options_for(root: &Path) -> Options {
        Options::new(root, 8)
    }

    #[test]
    fn normalize_resolves_dots_lexically() {
        assert_eq!(
            normalize_path(Path::new("/ws/src/a/../b.ts")),
            PathBuf::from("/ws/src/b.ts")
        );
        assert_eq!(
            normalize_path(Path::new("/ws/src/./x/./y.ts")),
            PathBuf::from("/ws/src/x/y.ts")
        );
        assert_eq!(
            normalize_path(Path::new("/ws/../../etc")),
            PathBuf::from("/etc")
        );
        assert_eq!(normalize_path(Path::new("a/./b")), PathBuf::from("a/b"));
        assert_eq!(normalize_path(Path::new("../a")), PathBuf::from("../a"));
    }

    #[test]
    fn gather_files_filters_extension_hidden_and_artifacts() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src/deep")).unwrap();
        fs::create_dir_all(root.join("node_modules/react")).unwrap();
        fs::create_dir_all(root.join(".cache")).unwrap();
        fs::write(root.join("src/app.ts"), "export {};").unwrap();
        fs::write(root.join("src/deep/util.tsx"), "export {};").unwrap();
        fs::write(root.join("src/readme.md"), "# no").unwrap();
        fs::write(root.join(".hidden.ts"), "export {};").unwrap();
        fs::write(root.join("node_modules/react/index.js"), "x").unwrap();
        fs::write(root.join(".cache/stale.ts"), "x").unwrap();

        let options = options_for(root);
        let mut cache = FileSystemCache::new();
        let mut files = Vec::new();
        gather_files(root, &options, &mut cache, None, &mut files).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(names, vec!["src/app.ts", "src/deep/util.tsx"]);
    }

    #[test]
    fn gather_files_honors_ignore_globs() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src/generated")).unwrap();
        fs::write(root.join("src/app.ts"), "export {};").unwrap();
        fs::write(root.join("src/generated/api.ts"), "export {};").unwrap();

        let mut options = options_for(root);
        options.ignore_patterns = vec!["**/generated/**".to_string()];
        let mut cache = FileSystemCache::new();
        let mut files = Vec::new();
        gather_files(root, &options, &mut cache, None, &mut files).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["app.ts"]);
    }

    #[test]
    fn gitignore_discovery_fails_outside_a_repo() {
        let tmp = TempDir::new().unwrap();
        // No .git anywhere under a fresh tempdir root.
        if let Some(checker) = GitIgnore::discover(tmp.path()) {
            // Running inside some parent repo: the checker must still
            // answer without error for arbitrary paths.
            let _ = checker.ignored(&tmp.path().join("x.ts"));
        }
    }
}
