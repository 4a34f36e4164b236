use core::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use npc_core::Vec2;
use tracing::debug;

use crate::{Cell, GridWorld, Navigator};

/// Search record for one grid cell, created lazily the first time the cell is reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub cell: Cell,
    pub position: Vec2,
    pub g_cost: f32,
    pub h_cost: f32,
    pub parent: Option<Cell>,
}

impl Node {
    fn unvisited(cell: Cell, position: Vec2) -> Self {
        Self {
            cell,
            position,
            g_cost: f32::INFINITY,
            h_cost: 0.0,
            parent: None,
        }
    }

    pub fn f_cost(&self) -> f32 {
        self.g_cost + self.h_cost
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: f32,
    tie: u64,
    idx: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap; equal f pops FIFO.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.tie.cmp(&self.tie))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* over a shared [`GridWorld`].
///
/// The grid sits behind a lock so one pathfinder can be shared (via `Arc`) by many planning agents
/// while walkability edits still happen between ticks. Queries take the read lock for the
/// duration of a single search.
#[derive(Debug)]
pub struct AStarPathfinder {
    world: RwLock<GridWorld>,
}

impl AStarPathfinder {
    pub fn new(world: GridWorld) -> Self {
        Self {
            world: RwLock::new(world),
        }
    }

    pub fn world(&self) -> RwLockReadGuard<'_, GridWorld> {
        self.world.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn world_mut(&self) -> RwLockWriteGuard<'_, GridWorld> {
        self.world.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_walkable(&self, x: i32, y: i32, walkable: bool) {
        self.world_mut().set_walkable(x, y, walkable);
    }

    pub fn into_world(self) -> GridWorld {
        self.world
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Shortest 8-connected path between two world positions.
    ///
    /// Returns the origin corner of every cell on the path, start and goal cells included. An
    /// empty result means either endpoint is blocked (or off the grid) or the goal is unreachable.
    pub fn find_path(&self, start: Vec2, goal: Vec2) -> Vec<Vec2> {
        Self::search(&self.world(), start, goal)
    }

    /// Run a search directly against a grid without going through the lock.
    pub fn search(world: &GridWorld, start: Vec2, goal: Vec2) -> Vec<Vec2> {
        let start_cell = world.world_to_grid(start);
        let goal_cell = world.world_to_grid(goal);

        let (Some(start_idx), Some(goal_idx)) = (
            walkable_index(world, start_cell),
            walkable_index(world, goal_cell),
        ) else {
            debug!(?start_cell, ?goal_cell, "find_path rejected: endpoint not walkable");
            return Vec::new();
        };

        let goal_pos = world.grid_to_world(goal_cell);
        let mut nodes: Vec<Option<Node>> = vec![None; world.cell_count()];
        let mut closed = vec![false; world.cell_count()];
        let mut open = BinaryHeap::new();
        let mut tie = 0u64;

        let start_pos = world.grid_to_world(start_cell);
        let h = start_pos.distance(goal_pos);
        nodes[start_idx] = Some(Node {
            cell: start_cell,
            position: start_pos,
            g_cost: 0.0,
            h_cost: h,
            parent: None,
        });
        open.push(OpenEntry {
            f: h,
            tie,
            idx: start_idx,
        });

        let mut expanded = 0usize;
        while let Some(OpenEntry { idx, .. }) = open.pop() {
            if closed[idx] {
                continue;
            }
            closed[idx] = true;
            expanded += 1;

            let Some(current) = nodes[idx] else {
                continue;
            };

            if idx == goal_idx {
                let path = reconstruct(world, &nodes, current);
                debug!(
                    ?start_cell,
                    ?goal_cell,
                    expanded,
                    len = path.len(),
                    "find_path succeeded"
                );
                return path;
            }

            for next in world.neighbors(current.cell) {
                let Some(next_idx) = world.index(next) else {
                    continue;
                };
                if closed[next_idx] {
                    continue;
                }

                let next_pos = world.grid_to_world(next);
                let tentative = current.g_cost + current.position.distance(next_pos);
                let node = nodes[next_idx].get_or_insert_with(|| Node::unvisited(next, next_pos));
                if tentative < node.g_cost {
                    node.g_cost = tentative;
                    node.h_cost = next_pos.distance(goal_pos);
                    node.parent = Some(current.cell);

                    tie += 1;
                    open.push(OpenEntry {
                        f: node.f_cost(),
                        tie,
                        idx: next_idx,
                    });
                }
            }
        }

        debug!(?start_cell, ?goal_cell, expanded, "find_path failed: goal unreachable");
        Vec::new()
    }
}

impl Navigator for AStarPathfinder {
    fn find_path(&self, start: Vec2, goal: Vec2) -> Vec<Vec2> {
        AStarPathfinder::find_path(self, start, goal)
    }
}

fn walkable_index(world: &GridWorld, cell: Cell) -> Option<usize> {
    if world.is_walkable(cell.x, cell.y) {
        world.index(cell)
    } else {
        None
    }
}

fn reconstruct(world: &GridWorld, nodes: &[Option<Node>], goal: Node) -> Vec<Vec2> {
    let mut path = vec![goal.position];
    let mut parent = goal.parent;
    while let Some(cell) = parent {
        let Some(node) = world.index(cell).and_then(|idx| nodes[idx]) else {
            break;
        };
        path.push(node.position);
        parent = node.parent;
    }
    path.reverse();
    path
}
