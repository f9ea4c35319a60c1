//! Specifier resolution: maps the string inside an import statement to an
//! absolute workspace path, or classifies it as external.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cache::FileSystemCache;
use crate::fs_utils::normalize_path;
use crate::types::Options;

/// Resolves `specifier` as written in `importing_file`.
///
/// Policy, in order:
/// 1. Relative (`./x`, `../x`): joined to the importing file's directory,
///    then the literal/extension/barrel chain.
/// 2. Aliased (a configured prefix such as `@app`): mapped to its
///    workspace-relative directory, same fallback chain.
/// 3. Anything else is external and returns `None`; cycles through
///    third-party packages are not actionable.
///
/// An in-workspace specifier always resolves to `Some` path, even when
/// nothing exists on disk: the literal candidate is returned and the
/// caller's read simply finds no file there.
pub fn resolve_import_path(
    specifier: &str,
    importing_file: &Path,
    options: &Options,
    cache: &mut FileSystemCache,
) -> Option<PathBuf> {
    if specifier.starts_with('.') {
        let parent = importing_file.parent()?;
        return Some(resolve_with_fallbacks(
            parent.join(specifier),
            options,
            cache,
        ));
    }
    if let Some((target, rest)) = match_alias(specifier, &options.aliases) {
        let mut base = options.workspace_root.join(target);
        if !rest.is_empty() {
            base = base.join(rest);
        }
        return Some(resolve_with_fallbacks(base, options, cache));
    }
    None
}

/// Longest configured alias matching `specifier` exactly or as a `/`
/// separated prefix. Returns the mapped directory and the remainder.
fn match_alias<'a>(
    specifier: &'a str,
    aliases: &'a HashMap<String, String>,
) -> Option<(&'a str, &'a str)> {
    let mut best: Option<(&'a str, &'a str, usize)> = None;
    for (alias, target) in aliases {
        let rest = if specifier == alias {
            Some("")
        } else {
            specifier
                .strip_prefix(alias.as_str())
                .and_then(|r| r.strip_prefix('/'))
        };
        if let Some(rest) = rest
            && best.is_none_or(|(_, _, len)| alias.len() > len)
        {
            best = Some((target.as_str(), rest, alias.len()));
        }
    }
    best.map(|(target, rest, _)| (target, rest))
}

/// The shared fallback chain: literal path first, then each extension
/// appended (appended, not substituted, so `./api.v2` can become
/// `api.v2.ts`), then each barrel filename as a directory index. Misses
/// return the normalized literal path unchanged.
fn resolve_with_fallbacks(base: PathBuf, options: &Options, cache: &mut FileSystemCache) -> PathBuf {
    let literal = normalize_path(&base);
    if cache.exists(&literal) {
        return literal;
    }
    for ext in &options.extensions {
        let mut joined = literal.as_os_str().to_os_string();
        joined.push(".");
        joined.push(ext);
        let candidate = PathBuf::from(joined);
        if cache.exists(&candidate) {
            return candidate;
        }
    }
    for barrel in &options.barrel_exports {
        let candidate = literal.join(barrel);
        if cache.exists(&candidate) {
            return candidate;
        }
    }
    literal
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_project() -> TempDir {
        let tmp = TempDir::new().expect("temp dir");
        let root = tmp.path();
        fs::create_dir_all(root.join("src/pages")).expect("mkdir pages");
        fs::create_dir_all(root.join("src/widgets")).expect("mkdir widgets");
        fs::write(root.join("src/app.ts"), "export {};").unwrap();
        fs::write(root.join("src/util.ts"), "export {};").unwrap();
        fs::write(root.join("src/api.v2.ts"), "export {};").unwrap();
        fs::write(root.join("src/pages/index.ts"), "export {};").unwrap();
        fs::write(root.join("src/widgets/index.tsx"), "export {};").unwrap();
        fs::write(root.join("lib.ts"), "export {};").unwrap();
        tmp
    }

    fn setup(tmp: &TempDir) -> (Options, FileSystemCache, PathBuf) {
        let options = Options::new(tmp.path(), 8);
        let cache = FileSystemCache::new();
        let app = tmp.path().join("src/app.ts");
        (options, cache, app)
    }

    #[test]
    fn relative_literal_with_extension() {
        let tmp = create_test_project();
        let (options, mut cache, app) = setup(&tmp);
        let resolved = resolve_import_path("./util.ts", &app, &options, &mut cache);
        assert_eq!(resolved, Some(tmp.path().join("src/util.ts")));
    }

    #[test]
    fn relative_appends_extensions_in_order() {
        let tmp = create_test_project();
        let (options, mut cache, app) = setup(&tmp);
        let resolved = resolve_import_path("./util", &app, &options, &mut cache);
        assert_eq!(resolved, Some(tmp.path().join("src/util.ts")));
    }

    #[test]
    fn extension_is_appended_not_substituted() {
        let tmp = create_test_project();
        let (options, mut cache, app) = setup(&tmp);
        let resolved = resolve_import_path("./api.v2", &app, &options, &mut cache);
        assert_eq!(resolved, Some(tmp.path().join("src/api.v2.ts")));
    }

    #[test]
    fn directory_import_falls_through_to_barrel() {
        let tmp = create_test_project();
        let (options, mut cache, app) = setup(&tmp);
        assert_eq!(
            resolve_import_path("./pages", &app, &options, &mut cache),
            Some(tmp.path().join("src/pages/index.ts"))
        );
        // index.ts missing, next barrel filename wins.
        assert_eq!(
            resolve_import_path("./widgets", &app, &options, &mut cache),
            Some(tmp.path().join("src/widgets/index.tsx"))
        );
    }

    #[test]
    fn parent_traversal_is_normalized() {
        let tmp = create_test_project();
        let (options, mut cache, app) = setup(&tmp);
        let resolved = resolve_import_path("../lib", &app, &options, &mut cache);
        assert_eq!(resolved, Some(tmp.path().join("lib.ts")));
    }

    #[test]
    fn alias_maps_into_src() {
        let tmp = create_test_project();
        let (options, mut cache, app) = setup(&tmp);
        assert_eq!(
            resolve_import_path("@app/util", &app, &options, &mut cache),
            Some(tmp.path().join("src/util.ts"))
        );
        assert_eq!(
            resolve_import_path("@src/pages", &app, &options, &mut cache),
            Some(tmp.path().join("src/pages/index.ts"))
        );
    }

    #[test]
    fn longest_alias_wins() {
        let tmp = create_test_project();
        let (mut options, mut cache, app) = setup(&tmp);
        options
            .aliases
            .insert("@app/pages".to_string(), "src/pages".to_string());
        let resolved = resolve_import_path("@app/pages", &app, &options, &mut cache);
        assert_eq!(resolved, Some(tmp.path().join("src/pages/index.ts")));
    }

    #[test]
    fn externals_resolve_to_none() {
        let tmp = create_test_project();
        let (options, mut cache, app) = setup(&tmp);
        assert_eq!(
            resolve_import_path("react", &app, &options, &mut cache),
            None
        );
        // Scoped package without a configured alias stays external.
        assert_eq!(
            resolve_import_path("@angular/core", &app, &options, &mut cache),
            None
        );
    }

    #[test]
    fn miss_returns_the_literal_path() {
        let tmp = create_test_project();
        let (options, mut cache, app) = setup(&tmp);
        let resolved = resolve_import_path("./nope", &app, &options, &mut cache);
        assert_eq!(resolved, Some(tmp.path().join("src/nope")));
    }
}
