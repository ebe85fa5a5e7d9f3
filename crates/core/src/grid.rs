//! Grid module - manages the playing field
//!
//! The field is a `height × width` matrix of cells whose outermost ring is
//! always [`Cell::Border`]. Storage is a flat row-major vector.
//! Coordinates: (row, col) where row 0 is the top border and col 0 the left
//! border. Obstacles, food and temporal items only ever land on Empty
//! interior cells.

use std::time::Duration;

use tracing::{debug, trace};

use crate::items::ItemRegistry;
use crate::rng::GameRng;
use crate::types::{Cell, Direction, ItemKind, Pos, PLACEMENT_ATTEMPTS};

/// The playing field
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    height: u16,
    width: u16,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a bordered grid with an empty interior
    pub fn new(height: u16, width: u16) -> Self {
        let mut grid = Self {
            height,
            width,
            cells: vec![Cell::Empty; height as usize * width as usize],
        };

        for col in 0..width {
            grid.set(Pos::new(0, col), Cell::Border);
            grid.set(Pos::new(height.saturating_sub(1), col), Cell::Border);
        }
        for row in 0..height {
            grid.set(Pos::new(row, 0), Cell::Border);
            grid.set(Pos::new(row, width.saturating_sub(1)), Cell::Border);
        }

        grid
    }

    /// Create a bordered grid and scatter its obstacles.
    ///
    /// The obstacle count is `floor(interior_cells * permill / 1000)`; each
    /// one is placed at a uniformly random Empty interior cell.
    pub fn initialize(height: u16, width: u16, permill_obstacles: u16, rng: &mut GameRng) -> Self {
        let mut grid = Self::new(height, width);
        let wanted = grid.obstacle_quota(permill_obstacles);
        let placed = (0..wanted).filter(|_| grid.add_obstacle(rng)).count();
        debug!(height, width, permill_obstacles, wanted, placed, "grid initialized");
        grid
    }

    /// Number of obstacles a field of this size gets for `permill`
    pub fn obstacle_quota(&self, permill: u16) -> usize {
        self.interior_len() * permill as usize / 1000
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.row >= self.height || pos.col >= self.width {
            return None;
        }
        Some(pos.row as usize * self.width as usize + pos.col as usize)
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Number of interior (non-border) cells
    pub fn interior_len(&self) -> usize {
        self.height.saturating_sub(2) as usize * self.width.saturating_sub(2) as usize
    }

    /// Get cell at `pos`. Returns None if out of bounds
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Set cell at `pos`. Returns false if out of bounds
    pub fn set(&mut self, pos: Pos, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether `pos` lies on the outer ring
    pub fn is_edge(&self, pos: Pos) -> bool {
        pos.row == 0
            || pos.col == 0
            || pos.row + 1 >= self.height
            || pos.col + 1 >= self.width
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Count cells holding exactly `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Iterate interior positions in row-major order
    pub fn interior(&self) -> impl Iterator<Item = Pos> + '_ {
        (1..self.height.saturating_sub(1))
            .flat_map(move |row| (1..self.width.saturating_sub(1)).map(move |col| Pos::new(row, col)))
    }

    /// Pick a uniformly random Empty interior cell.
    ///
    /// Returns None iff the interior has no Empty cell left.
    pub fn random_empty_cell(&self, rng: &mut GameRng) -> Option<Pos> {
        let empty: Vec<Pos> = self
            .interior()
            .filter(|&pos| self.get(pos) == Some(Cell::Empty))
            .collect();
        if empty.is_empty() {
            return None;
        }
        Some(empty[rng.index(empty.len())])
    }

    /// At least two of the four orthogonal neighbours are neither Border
    /// nor Obstacle, so whatever lands on `pos` can be reached and left.
    pub fn has_exit(&self, pos: Pos) -> bool {
        let open = Direction::ALL
            .iter()
            .filter_map(|&dir| pos.step(dir))
            .filter(|&n| matches!(self.get(n), Some(c) if !c.is_blocking()))
            .count();
        open >= 2
    }

    /// Place food on a random Empty cell with an exit.
    ///
    /// Gives up after [`PLACEMENT_ATTEMPTS`] tries; the game simply goes on
    /// without the food.
    pub fn place_food(&mut self, rng: &mut GameRng) -> Option<Pos> {
        let pos = self.find_item_cell(rng);
        match pos {
            Some(pos) => {
                self.set(pos, Cell::Food);
                trace!(row = pos.row, col = pos.col, "food placed");
            }
            None => debug!("no room for food"),
        }
        pos
    }

    /// Place a temporal item and register its expiry at `now + duration`.
    ///
    /// Same soft-fail policy as [`Grid::place_food`].
    pub fn place_temporal_item(
        &mut self,
        registry: &mut ItemRegistry,
        kind: ItemKind,
        duration: Duration,
        now: Duration,
        rng: &mut GameRng,
    ) -> Option<Pos> {
        let pos = self.find_item_cell(rng);
        match pos {
            Some(pos) => {
                self.set(pos, kind.cell());
                registry.add(pos, kind, duration, now);
                trace!(kind = kind.as_str(), row = pos.row, col = pos.col, "item placed");
            }
            None => debug!(kind = kind.as_str(), "no room for item"),
        }
        pos
    }

    /// Move every obstacle to a fresh random Empty cell.
    ///
    /// Returns how many obstacles were cleared. Placement skips the exit
    /// check, exactly like the initial layout.
    pub fn regenerate_obstacles(&mut self, rng: &mut GameRng) -> usize {
        let cleared = self.clear_obstacles();
        let placed = (0..cleared).filter(|_| self.add_obstacle(rng)).count();
        debug!(cleared, placed, "obstacles regenerated");
        cleared
    }

    fn find_item_cell(&self, rng: &mut GameRng) -> Option<Pos> {
        (0..PLACEMENT_ATTEMPTS)
            .filter_map(|_| self.random_empty_cell(rng))
            .find(|&pos| self.has_exit(pos))
    }

    fn add_obstacle(&mut self, rng: &mut GameRng) -> bool {
        match self.random_empty_cell(rng) {
            Some(pos) => self.set(pos, Cell::Obstacle),
            None => false,
        }
    }

    fn clear_obstacles(&mut self) -> usize {
        let mut cleared = 0;
        for cell in self.cells.iter_mut().filter(|c| **c == Cell::Obstacle) {
            *cell = Cell::Empty;
            cleared += 1;
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(10, 12);
        assert_eq!(grid.index(Pos::new(0, 0)), Some(0));
        assert_eq!(grid.index(Pos::new(0, 11)), Some(11));
        assert_eq!(grid.index(Pos::new(1, 0)), Some(12));
        assert_eq!(grid.index(Pos::new(9, 11)), Some(119));
        assert_eq!(grid.index(Pos::new(10, 0)), None);
        assert_eq!(grid.index(Pos::new(0, 12)), None);
    }

    #[test]
    fn test_new_grid_has_border_ring_only() {
        let grid = Grid::new(6, 7);
        assert_eq!(grid.count(Cell::Border), 2 * 7 + 2 * 4);
        assert_eq!(grid.count(Cell::Empty), 4 * 5);
        for pos in grid.interior() {
            assert!(!grid.is_edge(pos));
        }
    }

    #[test]
    fn test_find_item_cell_rejects_boxed_in_cell() {
        // 3x3 interior with one free cell boxed in by obstacles and border.
        let mut grid = Grid::new(5, 5);
        for pos in grid.interior().collect::<Vec<_>>() {
            grid.set(pos, Cell::Obstacle);
        }
        grid.set(Pos::new(1, 1), Cell::Empty);

        let mut rng = GameRng::new(1);
        assert_eq!(grid.find_item_cell(&mut rng), None);
    }

    #[test]
    fn test_clear_obstacles_counts() {
        let mut grid = Grid::new(6, 6);
        grid.set(Pos::new(1, 1), Cell::Obstacle);
        grid.set(Pos::new(2, 3), Cell::Obstacle);
        assert_eq!(grid.clear_obstacles(), 2);
        assert_eq!(grid.count(Cell::Obstacle), 0);
    }
}
