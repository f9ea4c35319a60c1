//! Import extraction: textual scan of one file, resolved and cached.

use std::path::Path;

use super::regexes;
use super::resolve::resolve_import_path;
use crate::cache::{self, FileSystemCache};
use crate::types::{ImportInfo, Options};

/// Returns the import edges of `file` in textual order, serving the cached
/// list whenever the stored mtime-size fingerprint still matches the disk.
///
/// Reads go through [`cache::read_file`] and any I/O failure degrades to an
/// empty list: one unreadable file must not abort the surrounding run. The
/// failed read drops the stored fingerprint, so a file that reappears is
/// re-extracted on the next call.
pub fn get_file_imports(
    file: &Path,
    options: &Options,
    cache: &mut FileSystemCache,
) -> Vec<ImportInfo> {
    if cache.is_cache_valid(file)
        && let Some(cached) = cache.cached_imports(file)
    {
        let list = cached.to_vec();
        cache.cache_hits += 1;
        return list;
    }

    cache.fresh_scans += 1;
    // Stat before read: if the file changes in between, the stored
    // fingerprint is the older one and the next call re-extracts.
    let fingerprint = cache::fingerprint(file);
    let text = match cache::read_file(file) {
        Ok(text) => text,
        Err(err) => {
            if options.verbose {
                eprintln!("[gyre] unreadable {}: {}", file.display(), err);
            }
            cache.store_imports(file, Vec::new(), None);
            return Vec::new();
        }
    };

    let imports = scan_imports(&text, file, options, cache);
    cache.store_imports(file, imports.clone(), fingerprint);
    imports
}

/// Scans `text` for the five recognized edge shapes, merges the matches by
/// byte offset so the result follows source order, then resolves each
/// specifier. External and ignored targets are dropped.
fn scan_imports(
    text: &str,
    file: &Path,
    options: &Options,
    cache: &mut FileSystemCache,
) -> Vec<ImportInfo> {
    let mut found: Vec<(usize, String, bool)> = Vec::new();

    for caps in regexes::regex_import().captures_iter(text) {
        if let (Some(whole), Some(spec)) = (caps.get(0), caps.get(2)) {
            found.push((whole.start(), spec.as_str().to_string(), false));
        }
    }
    for caps in regexes::regex_side_effect_import().captures_iter(text) {
        if let (Some(whole), Some(spec)) = (caps.get(0), caps.get(1)) {
            found.push((whole.start(), spec.as_str().to_string(), false));
        }
    }
    for caps in regexes::regex_reexport_star().captures_iter(text) {
        if let (Some(whole), Some(spec)) = (caps.get(0), caps.get(1)) {
            found.push((whole.start(), spec.as_str().to_string(), false));
        }
    }
    for caps in regexes::regex_reexport_named().captures_iter(text) {
        if let (Some(whole), Some(spec)) = (caps.get(0), caps.get(2)) {
            found.push((whole.start(), spec.as_str().to_string(), false));
        }
    }
    for caps in regexes::regex_dynamic_import().captures_iter(text) {
        if let (Some(whole), Some(spec)) = (caps.get(0), caps.get(1)) {
            found.push((whole.start(), spec.as_str().to_string(), true));
        }
    }

    found.sort_by_key(|(offset, _, _)| *offset);

    let mut imports = Vec::new();
    for (_, specifier, dynamic) in found {
        let Some(resolved) = resolve_import_path(&specifier, file, options, cache) else {
            continue;
        };
        let relative = resolved
            .strip_prefix(&options.workspace_root)
            .unwrap_or(resolved.as_path());
        if cache.is_ignored(relative, &options.ignore_patterns) {
            continue;
        }
        imports.push(ImportInfo::new(resolved, &specifier, dynamic));
    }
    imports
}
