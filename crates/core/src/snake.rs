//! Snake module - body, facing direction and locomotion
//!
//! The body is a double-ended queue of positions with the tail at the front
//! and the head at the back. The snake keeps the grid in sync with its body:
//! the head cell always holds `Head(player)`, every other segment holds
//! `SnakeBody`.

use std::collections::VecDeque;

use crate::grid::Grid;
use crate::rng::GameRng;
use crate::types::{Cell, Direction, PlayerId, Pos};

/// Minimum distance between a spawn point and the border ring
const SPAWN_MARGIN: u16 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Pos>,
    direction: Direction,
    player: PlayerId,
}

impl Snake {
    /// Spawn a one-segment snake at a random Empty cell at least two cells
    /// away from every border, facing a random direction.
    ///
    /// Returns None if that region has no Empty cell.
    pub fn spawn(grid: &mut Grid, player: PlayerId, rng: &mut GameRng) -> Option<Self> {
        let rows = SPAWN_MARGIN..grid.height().saturating_sub(SPAWN_MARGIN);
        let cols = SPAWN_MARGIN..grid.width().saturating_sub(SPAWN_MARGIN);
        let candidates: Vec<Pos> = rows
            .flat_map(|row| cols.clone().map(move |col| Pos::new(row, col)))
            .filter(|&pos| grid.get(pos) == Some(Cell::Empty))
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let pos = candidates[rng.index(candidates.len())];
        let direction = rng.direction();
        Some(Self::place(grid, player, pos, direction))
    }

    /// Put a one-segment snake at `pos`
    pub fn place(grid: &mut Grid, player: PlayerId, pos: Pos, direction: Direction) -> Self {
        Self::from_body(grid, player, &[pos], direction)
    }

    /// Build a snake from explicit segments, tail first and head last.
    ///
    /// Panics on an empty body.
    pub fn from_body(grid: &mut Grid, player: PlayerId, body: &[Pos], direction: Direction) -> Self {
        assert!(!body.is_empty(), "a snake needs at least a head");
        let body: VecDeque<Pos> = body.iter().copied().collect();
        for (i, &pos) in body.iter().enumerate() {
            let cell = if i + 1 == body.len() {
                Cell::Head(player)
            } else {
                Cell::SnakeBody
            };
            grid.set(pos, cell);
        }
        Self {
            body,
            direction,
            player,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn head(&self) -> Pos {
        self.body[self.body.len() - 1]
    }

    /// The segment right behind the head, if the snake is longer than one
    pub fn neck(&self) -> Option<Pos> {
        self.body.len().checked_sub(2).map(|i| self.body[i])
    }

    pub fn tail(&self) -> Pos {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Segments from tail to head
    pub fn body(&self) -> impl Iterator<Item = Pos> + '_ {
        self.body.iter().copied()
    }

    /// Move one cell in the facing direction and report what was entered.
    ///
    /// The returned cell is the content of the target before the move. On a
    /// fatal kind nothing is mutated. Bumping into the own neck (a 180°
    /// turn) reverses the snake and retries once instead of killing it.
    pub fn advance(&mut self, grid: &mut Grid) -> Cell {
        let mut reversed = false;
        loop {
            let next = match self.head().step(self.direction) {
                Some(pos) => pos,
                None => return Cell::Border,
            };
            let entered = grid.get(next).unwrap_or(Cell::Border);

            match entered {
                Cell::Shortener => {
                    self.drop_front_half(grid);
                    self.slide_to(grid, next);
                }
                Cell::Empty | Cell::Decelerator | Cell::BonusPoints => {
                    self.slide_to(grid, next);
                }
                Cell::Food => {
                    self.push_head(grid, next);
                }
                Cell::SnakeBody if !reversed && self.neck() == Some(next) => {
                    self.direction = self.direction.opposite();
                    reversed = true;
                    continue;
                }
                Cell::SnakeBody | Cell::Head(_) | Cell::Border | Cell::Obstacle => {}
            }

            return entered;
        }
    }

    fn push_head(&mut self, grid: &mut Grid, pos: Pos) {
        grid.set(self.head(), Cell::SnakeBody);
        grid.set(pos, Cell::Head(self.player));
        self.body.push_back(pos);
    }

    fn pop_tail(&mut self, grid: &mut Grid) {
        if let Some(tail) = self.body.pop_front() {
            grid.set(tail, Cell::Empty);
        }
    }

    fn slide_to(&mut self, grid: &mut Grid, pos: Pos) {
        self.push_head(grid, pos);
        self.pop_tail(grid);
    }

    /// Drop `floor(len / 2)` segments from the tail end
    fn drop_front_half(&mut self, grid: &mut Grid) {
        for _ in 0..self.body.len() / 2 {
            self.pop_tail(grid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neck_of_single_segment_is_none() {
        let mut grid = Grid::new(8, 8);
        let snake = Snake::place(&mut grid, PlayerId::One, Pos::new(3, 3), Direction::East);
        assert_eq!(snake.neck(), None);
        assert_eq!(snake.head(), snake.tail());
    }

    #[test]
    fn test_from_body_marks_grid() {
        let mut grid = Grid::new(8, 8);
        let body = [Pos::new(3, 2), Pos::new(3, 3), Pos::new(3, 4)];
        let snake = Snake::from_body(&mut grid, PlayerId::Two, &body, Direction::East);

        assert_eq!(grid.get(Pos::new(3, 2)), Some(Cell::SnakeBody));
        assert_eq!(grid.get(Pos::new(3, 3)), Some(Cell::SnakeBody));
        assert_eq!(grid.get(Pos::new(3, 4)), Some(Cell::Head(PlayerId::Two)));
        assert_eq!(snake.neck(), Some(Pos::new(3, 3)));
        assert_eq!(snake.tail(), Pos::new(3, 2));
    }

    #[test]
    fn test_drop_front_half_keeps_head() {
        let mut grid = Grid::new(8, 10);
        let body: Vec<Pos> = (1..=5).map(|c| Pos::new(2, c)).collect();
        let mut snake = Snake::from_body(&mut grid, PlayerId::One, &body, Direction::East);

        snake.drop_front_half(&mut grid);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Pos::new(2, 5));
        assert_eq!(grid.get(Pos::new(2, 1)), Some(Cell::Empty));
        assert_eq!(grid.get(Pos::new(2, 2)), Some(Cell::Empty));
    }
}
