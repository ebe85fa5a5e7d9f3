//! Temporal item tests - expiry on a simulated clock

use std::time::Duration;

use term_snake::core::{Grid, ItemRegistry};
use term_snake::types::{Cell, ItemKind, Pos};

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

fn place(grid: &mut Grid, items: &mut ItemRegistry, pos: Pos, kind: ItemKind, dur: u64, now: u64) {
    grid.set(pos, kind.cell());
    items.add(pos, kind, secs(dur), secs(now));
}

#[test]
fn test_item_expires_on_simulated_clock() {
    let mut grid = Grid::new(8, 8);
    let mut items = ItemRegistry::new();
    let pos = Pos::new(3, 3);
    place(&mut grid, &mut items, pos, ItemKind::Shortener, 5, 0);

    assert_eq!(items.sweep_expired(&mut grid, secs(4)), 0);
    assert_eq!(grid.get(pos), Some(Cell::Shortener));

    assert_eq!(items.sweep_expired(&mut grid, secs(5)), 1);
    assert_eq!(grid.get(pos), Some(Cell::Empty));
    assert!(items.is_empty());
}

#[test]
fn test_only_expired_items_are_swept() {
    let mut grid = Grid::new(8, 8);
    let mut items = ItemRegistry::new();
    place(&mut grid, &mut items, Pos::new(2, 2), ItemKind::Shortener, 5, 0);
    place(&mut grid, &mut items, Pos::new(2, 4), ItemKind::Decelerator, 7, 0);
    place(&mut grid, &mut items, Pos::new(4, 4), ItemKind::BonusPoints, 5, 1);

    assert_eq!(items.sweep_expired(&mut grid, secs(6)), 2);
    assert_eq!(items.len(), 1);
    assert_eq!(grid.get(Pos::new(2, 4)), Some(Cell::Decelerator));
    assert_eq!(grid.get(Pos::new(2, 2)), Some(Cell::Empty));
    assert_eq!(grid.get(Pos::new(4, 4)), Some(Cell::Empty));
}

#[test]
fn test_stale_expiry_does_not_clear_replaced_cell() {
    let mut grid = Grid::new(8, 8);
    let mut items = ItemRegistry::new();
    let pos = Pos::new(3, 3);
    place(&mut grid, &mut items, pos, ItemKind::BonusPoints, 5, 0);

    // Eaten and then walked over: the cell now holds a snake.
    grid.set(pos, Cell::SnakeBody);
    assert_eq!(items.sweep_expired(&mut grid, secs(10)), 0);
    assert_eq!(grid.get(pos), Some(Cell::SnakeBody));
    assert!(items.is_empty());
}

#[test]
fn test_stale_expiry_keeps_other_item_kind() {
    let mut grid = Grid::new(8, 8);
    let mut items = ItemRegistry::new();
    let pos = Pos::new(3, 3);
    place(&mut grid, &mut items, pos, ItemKind::Shortener, 1, 0);
    // A decelerator later landed on the same cell.
    grid.set(pos, Cell::Decelerator);

    items.sweep_expired(&mut grid, secs(2));
    assert_eq!(grid.get(pos), Some(Cell::Decelerator));
}

#[test]
fn test_pause_extension_delays_expiry() {
    let mut grid = Grid::new(8, 8);
    let mut items = ItemRegistry::new();
    let pos = Pos::new(3, 3);
    place(&mut grid, &mut items, pos, ItemKind::Decelerator, 7, 0);

    items.extend_all(secs(10));
    assert_eq!(items.sweep_expired(&mut grid, secs(16)), 0);
    assert_eq!(items.sweep_expired(&mut grid, secs(17)), 1);
}

#[test]
fn test_remove_at_forgets_eaten_item() {
    let mut grid = Grid::new(8, 8);
    let mut items = ItemRegistry::new();
    let pos = Pos::new(3, 3);
    place(&mut grid, &mut items, pos, ItemKind::Shortener, 5, 0);

    let removed = items.remove_at(pos).unwrap();
    assert_eq!(removed.kind, ItemKind::Shortener);
    assert!(items.is_empty());
    assert_eq!(items.remove_at(pos), None);
}
