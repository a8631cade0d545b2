//! A* pathfinding on the navigation grid
//!
//! Eight-directional search with octile costs. Diagonal moves are only taken
//! when both orthogonal neighbours are walkable, so paths never squeeze
//! through a blocked corner.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::f32::consts::SQRT_2;

use glam::Vec2;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::grid::{Cell, NavGrid};
use super::mask::NavMask;

/// Neighbour offsets: cardinals first, then diagonals
const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// Result of a grid search
#[derive(Debug, Clone)]
pub struct GridPath {
    /// Cells from start to goal, both included
    pub cells: Vec<Cell>,
    /// Total octile cost of the path
    pub cost: f32,
    /// Number of nodes expanded during the search
    pub expanded: usize,
}

/// Octile distance between two cells (cardinal 1, diagonal sqrt 2)
#[must_use]
pub fn octile_distance(a: Cell, b: Cell) -> f32 {
    let dx = (a.x - b.x).abs() as f32;
    let dy = (a.y - b.y).abs() as f32;
    (dx + dy) + (SQRT_2 - 2.0) * dx.min(dy)
}

/// Search node stored in the arena
#[derive(Debug, Clone)]
struct Node {
    cell: Cell,
    g: f32,
    h: f32,
    parent: Option<usize>,
    closed: bool,
}

impl Node {
    fn f(&self) -> f32 {
        self.g + self.h
    }
}

/// Open-set entry referencing an arena node
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: f32,
    h: f32,
    g: f32,
    node: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap: lowest f, then lowest h, then oldest node
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Walkable neighbours of a cell with their step cost
fn neighbors(grid: &NavGrid, cell: Cell) -> SmallVec<[(Cell, f32); 8]> {
    let mut result = SmallVec::new();

    for (dx, dy) in DIRECTIONS {
        let next = Cell::new(cell.x + dx, cell.y + dy);
        if !grid.is_walkable(next) {
            continue;
        }

        let diagonal = dx != 0 && dy != 0;
        if diagonal
            && (!grid.is_walkable(Cell::new(cell.x + dx, cell.y))
                || !grid.is_walkable(Cell::new(cell.x, cell.y + dy)))
        {
            continue;
        }

        result.push((next, if diagonal { SQRT_2 } else { 1.0 }));
    }

    result
}

/// Find a minimal-cost cell path using A*.
///
/// Returns `None` when either endpoint is blocked or the open set runs dry
/// before reaching `goal`.
#[must_use]
pub fn find_path(grid: &NavGrid, start: Cell, goal: Cell) -> Option<GridPath> {
    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        return None;
    }

    let mut nodes: Vec<Node> = Vec::new();
    let mut index: FxHashMap<Cell, usize> = FxHashMap::default();
    let mut open_set = BinaryHeap::new();
    let mut expanded = 0;

    let h = octile_distance(start, goal);
    nodes.push(Node {
        cell: start,
        g: 0.0,
        h,
        parent: None,
        closed: false,
    });
    index.insert(start, 0);
    open_set.push(OpenEntry {
        f: h,
        h,
        g: 0.0,
        node: 0,
    });

    while let Some(entry) = open_set.pop() {
        let current = entry.node;

        // Stale entry: node already expanded or improved since pushed
        if nodes[current].closed || entry.g > nodes[current].g {
            continue;
        }
        nodes[current].closed = true;
        expanded += 1;

        if nodes[current].cell == goal {
            let cost = nodes[current].g;
            return Some(GridPath {
                cells: reconstruct(&nodes, current),
                cost,
                expanded,
            });
        }

        let cell = nodes[current].cell;
        let g_current = nodes[current].g;

        for (next, step_cost) in neighbors(grid, cell) {
            let tentative_g = g_current + step_cost;

            let next_index = match index.get(&next) {
                Some(&existing) => {
                    let node = &mut nodes[existing];
                    if node.closed || tentative_g >= node.g {
                        continue;
                    }
                    node.g = tentative_g;
                    node.parent = Some(current);
                    existing
                }
                None => {
                    let id = nodes.len();
                    nodes.push(Node {
                        cell: next,
                        g: tentative_g,
                        h: octile_distance(next, goal),
                        parent: Some(current),
                        closed: false,
                    });
                    index.insert(next, id);
                    id
                }
            };

            let node = &nodes[next_index];
            open_set.push(OpenEntry {
                f: node.f(),
                h: node.h,
                g: node.g,
                node: next_index,
            });
        }
    }

    None
}

/// Walk parent links back from `goal` and reverse
fn reconstruct(nodes: &[Node], goal: usize) -> Vec<Cell> {
    let mut path = Vec::new();
    let mut current = Some(goal);

    while let Some(id) = current {
        path.push(nodes[id].cell);
        current = nodes[id].parent;
    }

    path.reverse();
    path
}

/// Plan a world-space path between two already clamped points.
///
/// Each cell of the A* result becomes its center point, clamped into the mask
/// with `padding`. The result is not smoothed.
#[must_use]
pub fn plan_world_path(
    grid: &NavGrid,
    mask: &NavMask,
    start: Vec2,
    end: Vec2,
    padding: f32,
) -> Option<Vec<Vec2>> {
    let path = find_path(grid, grid.world_to_cell(start), grid.world_to_cell(end))?;

    Some(
        path.cells
            .iter()
            .map(|&cell| mask.clamp_to_bounds(grid.cell_center(cell), padding))
            .collect(),
    )
}
