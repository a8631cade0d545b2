//! Uniform-cell rasterization of a navigability mask
//!
//! Built once when the scene starts and read many times by the planner.

use glam::Vec2;

use super::mask::NavMask;

/// A grid cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Create a cell coordinate
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A 2D navigation grid sampled from a mask
#[derive(Debug, Clone)]
pub struct NavGrid {
    /// Width in cells
    width: usize,
    /// Height in cells
    height: usize,
    /// Cell size in world units (pixels)
    cell_size: f32,
    /// Walkable cells (true = walkable)
    cells: Vec<bool>,
}

impl NavGrid {
    /// Create a grid with every cell walkable
    #[must_use]
    pub fn new(width: usize, height: usize, cell_size: f32) -> Self {
        Self {
            width,
            height,
            cell_size,
            cells: vec![true; width * height],
        }
    }

    /// Rasterize a mask, sampling walkability at each cell's center point.
    ///
    /// Returns `None` for the degraded (absent) mask, which has no extent to
    /// rasterize.
    #[must_use]
    pub fn build(mask: &NavMask, cell_size: f32) -> Option<Self> {
        if !mask.exists() || cell_size <= 0.0 {
            return None;
        }

        let width = (mask.width() as f32 / cell_size).ceil() as usize;
        let height = (mask.height() as f32 / cell_size).ceil() as usize;

        let mut grid = Self::new(width, height, cell_size);
        for gy in 0..height {
            for gx in 0..width {
                let center = grid.cell_center(Cell::new(gx as i32, gy as i32));
                grid.cells[gy * width + gx] = mask.is_walkable(center);
            }
        }

        log::info!("Built {width}x{height} navigation grid ({cell_size}px cells)");
        Some(grid)
    }

    /// Width in cells
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell size in world units
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Set a cell's walkability
    pub fn set_walkable(&mut self, cell: Cell, walkable: bool) {
        if let Some(index) = self.index(cell) {
            self.cells[index] = walkable;
        }
    }

    /// Check if a cell is walkable; cells outside the grid never are
    #[must_use]
    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|index| self.cells[index])
    }

    /// Convert world position to grid coordinates
    #[must_use]
    pub fn world_to_cell(&self, pos: Vec2) -> Cell {
        Cell::new(
            (pos.x / self.cell_size).floor() as i32,
            (pos.y / self.cell_size).floor() as i32,
        )
    }

    /// Convert grid coordinates to world position (center of cell)
    #[must_use]
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        Vec2::new(
            (cell.x as f32 + 0.5) * self.cell_size,
            (cell.y as f32 + 0.5) * self.cell_size,
        )
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if cell.x < 0 || cell.y < 0 {
            return None;
        }
        let (x, y) = (cell.x as usize, cell.y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::test_util::mask_from_ascii;

    #[test]
    fn test_build_rounds_dimensions_up() {
        let mask = NavMask::from_brightness(100, 64, vec![255; 6400], 128);
        let grid = NavGrid::build(&mask, 32.0).unwrap();

        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 2);
        // Center of the last column (112, 16) lies outside the 100px image
        assert!(!grid.is_walkable(Cell::new(3, 0)));
        assert!(grid.is_walkable(Cell::new(2, 1)));
    }

    #[test]
    fn test_build_samples_cell_centers() {
        let mask = mask_from_ascii(&["..#", "#..", "..."], 32);
        let grid = NavGrid::build(&mask, 32.0).unwrap();

        assert!(grid.is_walkable(Cell::new(0, 0)));
        assert!(!grid.is_walkable(Cell::new(2, 0)));
        assert!(!grid.is_walkable(Cell::new(0, 1)));
        assert!(grid.is_walkable(Cell::new(1, 1)));
    }

    #[test]
    fn test_out_of_grid_is_blocked() {
        let grid = NavGrid::new(3, 3, 1.0);

        assert!(!grid.is_walkable(Cell::new(-1, 0)));
        assert!(!grid.is_walkable(Cell::new(0, 3)));
        assert!(grid.is_walkable(Cell::new(2, 2)));
    }

    #[test]
    fn test_absent_mask_builds_nothing() {
        assert!(NavGrid::build(&NavMask::absent(), 32.0).is_none());
    }

    #[test]
    fn test_world_cell_conversion() {
        let grid = NavGrid::new(10, 10, 32.0);

        assert_eq!(grid.world_to_cell(Vec2::new(40.0, 95.9)), Cell::new(1, 2));
        assert_eq!(grid.world_to_cell(Vec2::new(-1.0, 0.0)), Cell::new(-1, 0));
        assert_eq!(grid.cell_center(Cell::new(1, 2)), Vec2::new(48.0, 80.0));
    }
}
