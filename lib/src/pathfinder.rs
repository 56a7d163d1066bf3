use ahash::{AHashMap, AHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::collections::hash_map::Entry;
use tracing::trace;

use crate::grid::{Cell, Direction, Grid};
use crate::snake::Snake;

/// Order in which neighbors enter the frontier. Equal-f ties are resolved by
/// insertion order, so this decides which of several shortest paths is taken.
const NEIGHBOR_ORDER: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

/// Manhattan distance, admissible and consistent on this grid.
#[inline]
pub fn heuristic(from: Cell, to: Cell) -> u32 {
    from.manhattan_distance(to)
}

#[derive(Debug, Clone, Copy)]
struct SearchNode {
    g: u32,
    h: u32,
    parent: Option<Cell>,
    /// Insertion sequence, kept across relaxations.
    seq: u64,
    closed: bool,
}

impl SearchNode {
    fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// Frontier entry. Relaxing a node pushes a fresh entry; outdated ones are
/// recognised by their `g` and skipped on pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    seq: u64,
    g: u32,
    cell: Cell,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: lowest (f, seq) must compare greatest
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    /// Cells from start to goal inclusive, or just `[start]` when unreachable.
    pub path: Vec<Cell>,
    /// Number of nodes moved to the closed set.
    pub expanded: usize,
}

impl Search {
    pub fn found(&self) -> bool {
        self.path.len() > 1
    }

    pub fn first_step(&self) -> Option<Direction> {
        match self.path.as_slice() {
            [from, to, ..] => Direction::between(*from, *to),
            _ => None,
        }
    }
}

/// Shortest path from `start` to `goal` avoiding every cell of `obstacles`.
///
/// Returns the path start-first. When no path exists the result is `[start]`,
/// which callers must tell apart from arrival by comparing `start` and `goal`.
pub fn find_path(grid: &Grid, start: Cell, goal: Cell, obstacles: &Snake) -> Vec<Cell> {
    search(grid, start, goal, obstacles).path
}

pub fn search(grid: &Grid, start: Cell, goal: Cell, obstacles: &Snake) -> Search {
    let blocked: AHashSet<Cell> = obstacles.iter().copied().collect();
    let mut nodes: AHashMap<Cell, SearchNode> = AHashMap::with_capacity(grid.area().min(1024));
    let mut open = BinaryHeap::new();

    let h = heuristic(start, goal);
    nodes.insert(
        start,
        SearchNode {
            g: 0,
            h,
            parent: None,
            seq: 0,
            closed: false,
        },
    );
    open.push(OpenEntry {
        f: h,
        seq: 0,
        g: 0,
        cell: start,
    });
    let mut next_seq = 1;
    let mut expanded = 0;

    while let Some(entry) = open.pop() {
        let Some(node) = nodes.get_mut(&entry.cell) else {
            continue;
        };
        if node.closed || node.g != entry.g {
            continue;
        }
        node.closed = true;
        expanded += 1;

        if entry.cell == goal {
            let path = reconstruct(&nodes, goal);
            trace!(expanded, length = path.len(), "path found");
            return Search { path, expanded };
        }

        for direction in NEIGHBOR_ORDER {
            let next = entry.cell.shifted(direction);
            if !grid.in_bounds(next) || blocked.contains(&next) {
                continue;
            }
            let g = entry.g + 1;
            match nodes.entry(next) {
                Entry::Occupied(mut occupied) => {
                    let known = occupied.get_mut();
                    if known.closed || g >= known.g {
                        continue;
                    }
                    known.g = g;
                    known.parent = Some(entry.cell);
                    open.push(OpenEntry {
                        f: known.f(),
                        seq: known.seq,
                        g,
                        cell: next,
                    });
                }
                Entry::Vacant(vacant) => {
                    let node = vacant.insert(SearchNode {
                        g,
                        h: heuristic(next, goal),
                        parent: Some(entry.cell),
                        seq: next_seq,
                        closed: false,
                    });
                    open.push(OpenEntry {
                        f: node.f(),
                        seq: next_seq,
                        g,
                        cell: next,
                    });
                    next_seq += 1;
                }
            }
        }
    }

    trace!(expanded, "no path");
    Search {
        path: vec![start],
        expanded,
    }
}

fn reconstruct(nodes: &AHashMap<Cell, SearchNode>, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(parent) = nodes.get(&current).and_then(|node| node.parent) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}
