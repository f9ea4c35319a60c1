//! Circular import detection via depth-bounded depth-first search.
//!
//! Walks the live import graph from a start file, recording every closed
//! walk back into the current traversal path. Raw cycles carry the prefix
//! that led into the loop; callers strip it with [`get_minimal_cycle`] and
//! deduplicate across start files with [`get_cycle_hash`].

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::extract::get_file_imports;
use crate::cache::FileSystemCache;
use crate::types::{Cycle, Options};

/// Interned file nodes. Frames and the visited/on-path sets work with
/// small ids; paths are materialized only when a cycle is recorded.
#[derive(Default)]
struct NodeArena {
    paths: Vec<PathBuf>,
    ids: HashMap<PathBuf, usize>,
}

impl NodeArena {
    fn intern(&mut self, path: &Path) -> usize {
        if let Some(&id) = self.ids.get(path) {
            return id;
        }
        let id = self.paths.len();
        self.paths.push(path.to_path_buf());
        self.ids.insert(path.to_path_buf(), id);
        id
    }

    fn path(&self, id: usize) -> &Path {
        &self.paths[id]
    }
}

/// One frame of the explicit DFS stack: a file on the current path, its
/// outgoing static edges, and a cursor over them.
struct Frame {
    node: usize,
    edges: Vec<usize>,
    next: usize,
    /// Cycle count when this frame was entered; the short-circuit for
    /// `report_all_cycles = false` compares against it.
    cycles_at_entry: usize,
}

/// Finds cycles reachable from `start_file`.
///
/// Search semantics:
/// - A candidate entered deeper than `options.max_depth` is pruned
///   (`start_file` sits at depth 0).
/// - A candidate already on the current path closes a cycle; the path
///   plus the repeated file is recorded and the node is not expanded.
/// - A candidate visited earlier in this search is never re-expanded, so
///   dense diamond graphs yield at least one cycle per branch rather
///   than every simple cycle.
/// - Edges are walked in textual order; dynamic imports are skipped.
/// - With `report_all_cycles` unset, every frame stops expanding its
///   remaining edges once a cycle has surfaced at or below it.
///
/// Missing or unreadable files contribute no edges and the search walks
/// on. The only hard stop is the `max_depth >= 1` precondition.
pub fn find_all_circular_dependencies(
    start_file: &Path,
    options: &Options,
    cache: &mut FileSystemCache,
) -> Vec<Cycle> {
    assert!(options.max_depth >= 1, "max_depth must be at least 1");

    let mut arena = NodeArena::default();
    let mut cycles: Vec<Cycle> = Vec::new();
    let mut visited: HashSet<usize> = HashSet::new();
    let mut on_path: HashSet<usize> = HashSet::new();
    let mut stack: Vec<Frame> = Vec::new();

    let start = arena.intern(start_file);
    visited.insert(start);
    on_path.insert(start);
    stack.push(Frame {
        node: start,
        edges: static_edges(start_file, options, cache, &mut arena),
        next: 0,
        cycles_at_entry: 0,
    });

    while let Some(frame) = stack.last_mut() {
        let exhausted = frame.next >= frame.edges.len()
            || (!options.report_all_cycles && cycles.len() > frame.cycles_at_entry);
        if exhausted {
            on_path.remove(&frame.node);
            stack.pop();
            continue;
        }

        let candidate = frame.edges[frame.next];
        frame.next += 1;

        // The candidate would sit at depth == stack.len().
        if stack.len() > options.max_depth {
            continue;
        }
        if on_path.contains(&candidate) {
            let mut cycle: Cycle = stack
                .iter()
                .map(|f| arena.path(f.node).to_path_buf())
                .collect();
            cycle.push(arena.path(candidate).to_path_buf());
            cycles.push(cycle);
            continue;
        }
        if visited.contains(&candidate) {
            continue;
        }

        visited.insert(candidate);
        on_path.insert(candidate);
        let candidate_path = arena.path(candidate).to_path_buf();
        let entry_count = cycles.len();
        stack.push(Frame {
            node: candidate,
            edges: static_edges(&candidate_path, options, cache, &mut arena),
            next: 0,
            cycles_at_entry: entry_count,
        });
    }

    cycles
}

/// Outgoing static edges of `file`, interned. Dynamic imports are
/// recorded by the extractor but never traversed here.
fn static_edges(
    file: &Path,
    options: &Options,
    cache: &mut FileSystemCache,
    arena: &mut NodeArena,
) -> Vec<usize> {
    get_file_imports(file, options, cache)
        .into_iter()
        .filter(|import| !import.dynamic)
        .map(|import| arena.intern(&import.path))
        .collect()
}

/// Strips the non-cyclic prefix off a raw cycle: scans left to right and
/// returns the slice from the first repeated file to its repeat,
/// inclusive. A sequence with no repeat comes back unchanged.
pub fn get_minimal_cycle(cycle: &[PathBuf]) -> Cycle {
    let mut first_seen: HashMap<&Path, usize> = HashMap::new();
    for (idx, file) in cycle.iter().enumerate() {
        if let Some(&first) = first_seen.get(file.as_path()) {
            return cycle[first..=idx].to_vec();
        }
        first_seen.insert(file, idx);
    }
    cycle.to_vec()
}

/// Canonical signature of the loop inside `cycle`: the minimal cycle's
/// ring rotated to start at its lexicographically smallest member, joined
/// with `" -> "`. The same loop entered anywhere hashes identically.
pub fn get_cycle_hash(cycle: &[PathBuf]) -> String {
    let minimal = get_minimal_cycle(cycle);
    let ring = if minimal.len() > 1 && minimal.first() == minimal.last() {
        &minimal[..minimal.len() - 1]
    } else {
        &minimal[..]
    };
    if ring.is_empty() {
        return String::new();
    }
    let pivot = ring
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let rotated: Vec<String> = (0..ring.len())
        .map(|i| ring[(pivot + i) % ring.len()].display().to_string())
        .collect();
    rotated.join(" -> ")
}
