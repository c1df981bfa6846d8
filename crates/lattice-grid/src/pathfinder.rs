//! A* search over a coordinate map.
//!
//! The search walks only the four natural directions and only enters cells
//! whose tag is in the caller's traversable set (the goal cell is always
//! enterable, so paths can end on exits). Costs are Euclidean: `g` is the
//! accumulated step distance from the start and `h` the straight-line
//! distance to the goal.
//!
//! The frontier is a plain list scanned front to back. A strictly cheaper
//! node always wins; a node tying the current best replaces it only when a
//! roll against `randomness` succeeds. With `randomness = 0` the first-seen
//! cheapest node is expanded, giving the same route on every run. Higher
//! values bend routes while staying reproducible for a fixed RNG stream.

use lattice_common::{Direction, GridPos, TagSet};
use tracing::trace;

use crate::map::CoordinateMap;

/// Two `f` scores closer than this are treated as a tie.
const F_EPSILON: f32 = 1e-4;

/// An ordered run of positions from start to goal. Empty means "no path".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    positions: Vec<GridPos>,
}

impl Path {
    /// The positions from start to goal.
    #[must_use]
    pub fn positions(&self) -> &[GridPos] {
        &self.positions
    }

    /// Whether no route was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of cells on the path, endpoints included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// First position.
    #[must_use]
    pub fn start(&self) -> Option<GridPos> {
        self.positions.first().copied()
    }

    /// Last position.
    #[must_use]
    pub fn end(&self) -> Option<GridPos> {
        self.positions.last().copied()
    }

    /// Positions strictly between start and goal.
    #[must_use]
    pub fn interior(&self) -> &[GridPos] {
        if self.positions.len() < 2 {
            return &[];
        }
        &self.positions[1..self.positions.len() - 1]
    }

    /// Iterates positions from start to goal.
    pub fn iter(&self) -> impl Iterator<Item = &GridPos> {
        self.positions.iter()
    }
}

impl From<Vec<GridPos>> for Path {
    fn from(positions: Vec<GridPos>) -> Self {
        Self { positions }
    }
}

/// Per-cell search bookkeeping.
#[derive(Debug, Clone, Copy)]
struct Node {
    g: f32,
    f: f32,
    parent: Option<usize>,
    open: bool,
    closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f32::INFINITY,
            f: f32::INFINITY,
            parent: None,
            open: false,
            closed: false,
        }
    }
}

/// Finds a 4-connected route from `start` to `end` through `traversable` cells.
///
/// Returns an empty [`Path`] when either endpoint is off the grid or the
/// frontier runs dry. `randomness` is clamped to `[0, 1]`; callers wanting
/// reproducible routes reseed `rng` right before calling.
#[must_use]
pub fn find_path(
    map: &CoordinateMap,
    start: GridPos,
    end: GridPos,
    traversable: TagSet,
    randomness: f32,
    rng: &mut fastrand::Rng,
) -> Path {
    let (Some(start_idx), Some(end_idx)) = (map.index_of(start), map.index_of(end)) else {
        trace!("Path request {start} -> {end} leaves the grid");
        return Path::default();
    };
    if start_idx == end_idx {
        return Path::from(vec![start]);
    }

    let randomness = randomness.clamp(0.0, 1.0);
    let mut nodes = vec![Node::default(); map.len()];
    let mut frontier: Vec<usize> = vec![start_idx];
    nodes[start_idx] = Node {
        g: 0.0,
        f: start.distance(end),
        parent: None,
        open: true,
        closed: false,
    };

    while !frontier.is_empty() {
        let slot = select_best(&frontier, &nodes, randomness, rng);
        let current_idx = frontier.remove(slot);
        let current = map.position_at(current_idx);
        nodes[current_idx].open = false;
        nodes[current_idx].closed = true;

        if current_idx == end_idx {
            return reconstruct(map, &nodes, end_idx);
        }

        for direction in Direction::NATURAL {
            let next = current.step(direction);
            let Some(next_idx) = map.index_of(next) else {
                continue;
            };
            if nodes[next_idx].closed {
                continue;
            }
            let enterable = next_idx == end_idx
                || map.tag_at(next).is_some_and(|tag| traversable.contains(tag));
            if !enterable {
                continue;
            }

            let g = nodes[current_idx].g + current.distance(next);
            if g >= nodes[next_idx].g {
                continue;
            }
            let node = &mut nodes[next_idx];
            node.g = g;
            node.f = g + next.distance(end);
            node.parent = Some(current_idx);
            if !node.open {
                node.open = true;
                frontier.push(next_idx);
            }
        }
    }

    trace!("No path from {start} to {end}");
    Path::default()
}

/// Picks the frontier slot to expand next.
fn select_best(
    frontier: &[usize],
    nodes: &[Node],
    randomness: f32,
    rng: &mut fastrand::Rng,
) -> usize {
    let mut best = 0;
    let mut best_f = nodes[frontier[0]].f;
    for (slot, idx) in frontier.iter().enumerate().skip(1) {
        let f = nodes[*idx].f;
        if f < best_f - F_EPSILON {
            best = slot;
            best_f = f;
        } else if f <= best_f + F_EPSILON && randomness > 0.0 && rng.f32() < randomness {
            best = slot;
            best_f = best_f.min(f);
        }
    }
    best
}

fn reconstruct(map: &CoordinateMap, nodes: &[Node], end_idx: usize) -> Path {
    let mut positions = vec![map.position_at(end_idx)];
    let mut cursor = nodes[end_idx].parent;
    while let Some(idx) = cursor {
        positions.push(map.position_at(idx));
        cursor = nodes[idx].parent;
    }
    positions.reverse();
    Path::from(positions)
}
