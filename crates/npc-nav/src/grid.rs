use npc_core::Vec2;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{NavError, Result};

/// Integer grid coordinate. May lie outside the grid; such cells are never walkable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// Fixed expansion order for determinism: column by column, dx = -1..=1, dy = -1..=1.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Fixed-size walkability map.
///
/// All cells start walkable. The map owns no agents and only changes through `set_walkable`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid"))]
pub struct GridWorld {
    width: u32,
    height: u32,
    cell_size: f32,
    walkable: Vec<bool>,
}

impl GridWorld {
    pub fn new(width: u32, height: u32, cell_size: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(NavError::EmptyGrid { width, height });
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(NavError::InvalidCellSize(cell_size));
        }
        Ok(Self {
            width,
            height,
            cell_size,
            walkable: vec![true; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.walkable.len()
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as i64) < i64::from(self.width)
            && (cell.y as i64) < i64::from(self.height)
    }

    /// Row-major index of an in-bounds cell.
    pub fn index(&self, cell: Cell) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(cell.y as usize * self.width as usize + cell.x as usize)
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.index(Cell::new(x, y))
            .map(|idx| self.walkable[idx])
            .unwrap_or(false)
    }

    /// Out-of-bounds edits are ignored.
    pub fn set_walkable(&mut self, x: i32, y: i32, walkable: bool) {
        if let Some(idx) = self.index(Cell::new(x, y)) {
            trace!(x, y, walkable, "grid cell edited");
            self.walkable[idx] = walkable;
        }
    }

    /// Mark every cell of the rectangle `[x0, x1] x [y0, y1]` (inclusive).
    pub fn set_walkable_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, walkable: bool) {
        for y in y0.min(y1)..=y0.max(y1) {
            for x in x0.min(x1)..=x0.max(x1) {
                self.set_walkable(x, y, walkable);
            }
        }
    }

    /// World position of a cell's origin corner.
    pub fn grid_to_world(&self, cell: Cell) -> Vec2 {
        Vec2::new(
            cell.x as f32 * self.cell_size,
            cell.y as f32 * self.cell_size,
        )
    }

    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        Vec2::new(
            (cell.x as f32 + 0.5) * self.cell_size,
            (cell.y as f32 + 0.5) * self.cell_size,
        )
    }

    /// Cell containing a world position. Negative coordinates floor to negative cells, which are
    /// out of bounds.
    pub fn world_to_grid(&self, position: Vec2) -> Cell {
        Cell::new(
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    /// Walkable 8-connected neighbors. Diagonal moves are allowed even when both orthogonal cells
    /// beside the diagonal are blocked.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dx, dy)| Cell::new(cell.x + dx, cell.y + dy))
            .filter(move |n| self.is_walkable(n.x, n.y))
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawGrid {
    width: u32,
    height: u32,
    cell_size: f32,
    walkable: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for GridWorld {
    type Error = NavError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        let mut grid = GridWorld::new(raw.width, raw.height, raw.cell_size)?;
        if raw.walkable.len() != grid.walkable.len() {
            return Err(NavError::CellCountMismatch {
                expected: grid.walkable.len(),
                actual: raw.walkable.len(),
            });
        }
        grid.walkable = raw.walkable;
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_skip_out_of_bounds_and_blocked() {
        let mut grid = GridWorld::new(3, 3, 1.0).expect("grid");
        assert_eq!(grid.neighbors(Cell::new(0, 0)).count(), 3);
        assert_eq!(grid.neighbors(Cell::new(1, 1)).count(), 8);

        grid.set_walkable(0, 1, false);
        let n: Vec<_> = grid.neighbors(Cell::new(0, 0)).collect();
        assert_eq!(n, vec![Cell::new(1, 0), Cell::new(1, 1)]);
    }
}
