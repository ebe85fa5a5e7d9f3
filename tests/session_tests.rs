//! Session tests - tick semantics, scoring, items, pause and death

use std::time::Duration;

use term_snake::core::{
    GameConfig, GameOutcome, GameSession, Grid, ItemSettings, SessionState, Snake, TickEvent,
};
use term_snake::types::{
    Cell, Command, Direction, PlayerId, Pos, POINTS_DECELERATOR, POINTS_EXTRA_POINTS,
    POINTS_FOOD, POINTS_SHORTENER,
};

const RARE: ItemSettings = ItemSettings {
    duration_secs: 5,
    one_in: u32::MAX,
};

fn config(height: u16, width: u16) -> GameConfig {
    GameConfig {
        height,
        width,
        permill_obstacles: 0,
        shortener: RARE,
        decelerator: RARE,
        bonus_points: RARE,
        map_change: false,
        ..GameConfig::default()
    }
}

struct Layout<'a> {
    snakes: &'a [(PlayerId, &'a [Pos], Direction)],
    cells: &'a [(Pos, Cell)],
}

fn session(config: GameConfig, layout: Layout<'_>) -> GameSession {
    let mut grid = Grid::new(config.height, config.width);
    for &(pos, cell) in layout.cells {
        grid.set(pos, cell);
    }
    let snakes: Vec<Snake> = layout
        .snakes
        .iter()
        .map(|&(player, body, dir)| Snake::from_body(&mut grid, player, body, dir))
        .collect();
    GameSession::from_parts(config, grid, snakes, 7)
}

fn steer(player: PlayerId, direction: Direction) -> TickEvent {
    TickEvent::Command(Command::Steer { player, direction })
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_food_end_to_end_on_small_field() {
    let mut game = session(
        config(10, 10),
        Layout {
            snakes: &[(PlayerId::One, &[Pos::new(5, 5)], Direction::East)],
            cells: &[(Pos::new(5, 6), Cell::Food)],
        },
    );

    let report = game.tick(TickEvent::Timeout, ms(300));

    assert_eq!(report.moves.len(), 1);
    assert_eq!(report.moves[0].entered, Cell::Food);
    assert_eq!(report.moves[0].points, POINTS_FOOD);
    assert_eq!(game.score(PlayerId::One), 10);

    let snake = game.snake(PlayerId::One).unwrap();
    assert_eq!(snake.len(), 2);
    assert_eq!(snake.head(), Pos::new(5, 6));

    // A fresh food appeared elsewhere and the game sped up.
    assert_eq!(game.grid().count(Cell::Food), 1);
    assert_eq!(game.delay_ms(), 300 - 10);
    assert_eq!(game.state(), SessionState::Running);
}

#[test]
fn test_border_collision_ends_game_without_points() {
    let mut game = session(
        config(10, 10),
        Layout {
            snakes: &[(PlayerId::One, &[Pos::new(5, 8)], Direction::East)],
            cells: &[],
        },
    );

    let report = game.tick(TickEvent::Timeout, ms(300));
    assert_eq!(report.state, SessionState::Ended);
    assert_eq!(game.state(), SessionState::Ended);
    assert_eq!(
        game.outcome(),
        Some(GameOutcome::Died {
            player: PlayerId::One,
            cause: Cell::Border
        })
    );
    assert_eq!(game.score(PlayerId::One), 0);

    // Ended sessions ignore further ticks.
    let report = game.tick(TickEvent::Timeout, ms(600));
    assert!(report.moves.is_empty());
    assert_eq!(game.snake(PlayerId::One).unwrap().head(), Pos::new(5, 8));
}

#[test]
fn test_obstacle_collision_ends_game() {
    let mut game = session(
        config(10, 10),
        Layout {
            snakes: &[(PlayerId::One, &[Pos::new(4, 4)], Direction::South)],
            cells: &[(Pos::new(5, 4), Cell::Obstacle)],
        },
    );
    game.tick(TickEvent::Timeout, ms(300));
    assert!(matches!(
        game.outcome(),
        Some(GameOutcome::Died {
            cause: Cell::Obstacle,
            ..
        })
    ));
}

#[test]
fn test_item_points_and_delay_effects() {
    let mut cfg = config(10, 12);
    cfg.starting_delay_ms = 300;
    cfg.step_delay_ms = 10;
    let mut game = session(
        cfg,
        Layout {
            snakes: &[(PlayerId::One, &[Pos::new(2, 1), Pos::new(2, 2)], Direction::East)],
            cells: &[
                (Pos::new(2, 3), Cell::Food),
                (Pos::new(2, 4), Cell::Food),
                (Pos::new(2, 5), Cell::Decelerator),
                (Pos::new(2, 6), Cell::BonusPoints),
                (Pos::new(2, 7), Cell::Shortener),
            ],
        },
    );

    game.tick(TickEvent::Timeout, ms(0));
    game.tick(TickEvent::Timeout, ms(300));
    assert_eq!(game.delay_ms(), 280);
    assert_eq!(game.snake(PlayerId::One).unwrap().len(), 4);

    game.tick(TickEvent::Timeout, ms(600));
    assert_eq!(game.delay_ms(), 300);

    game.tick(TickEvent::Timeout, ms(900));
    assert_eq!(game.snake(PlayerId::One).unwrap().len(), 4);

    game.tick(TickEvent::Timeout, ms(1200));
    assert_eq!(game.snake(PlayerId::One).unwrap().len(), 2);
    assert_eq!(game.snake(PlayerId::One).unwrap().head(), Pos::new(2, 7));

    assert_eq!(
        game.score(PlayerId::One),
        2 * POINTS_FOOD + POINTS_DECELERATOR + POINTS_EXTRA_POINTS + POINTS_SHORTENER
    );
}

#[test]
fn test_delay_never_drops_below_minimum() {
    let mut cfg = config(10, 12);
    cfg.starting_delay_ms = 125;
    cfg.minimum_delay_ms = 120;
    cfg.step_delay_ms = 10;
    let mut game = session(
        cfg,
        Layout {
            snakes: &[(PlayerId::One, &[Pos::new(2, 2)], Direction::East)],
            cells: &[(Pos::new(2, 3), Cell::Food), (Pos::new(2, 4), Cell::Food)],
        },
    );

    game.tick(TickEvent::Timeout, ms(0));
    assert_eq!(game.delay_ms(), 120);
    game.tick(TickEvent::Timeout, ms(120));
    assert_eq!(game.delay_ms(), 120);
}

#[test]
fn test_steer_turns_and_moves_only_that_player() {
    let mut cfg = config(12, 12);
    cfg.two_players = true;
    let mut game = session(
        cfg,
        Layout {
            snakes: &[
                (PlayerId::One, &[Pos::new(3, 3)], Direction::East),
                (PlayerId::Two, &[Pos::new(8, 8)], Direction::West),
            ],
            cells: &[],
        },
    );

    let report = game.tick(steer(PlayerId::Two, Direction::North), ms(10));
    assert_eq!(report.moves.len(), 1);
    assert_eq!(report.moves[0].player, PlayerId::Two);
    assert_eq!(game.snake(PlayerId::Two).unwrap().head(), Pos::new(7, 8));
    assert_eq!(game.snake(PlayerId::One).unwrap().head(), Pos::new(3, 3));
}

#[test]
fn test_timeout_moves_both_players() {
    let mut cfg = config(12, 12);
    cfg.two_players = true;
    let mut game = session(
        cfg,
        Layout {
            snakes: &[
                (PlayerId::One, &[Pos::new(3, 3)], Direction::East),
                (PlayerId::Two, &[Pos::new(8, 8)], Direction::West),
            ],
            cells: &[],
        },
    );

    let report = game.tick(TickEvent::Timeout, ms(300));
    assert_eq!(report.moves.len(), 2);
    assert_eq!(game.snake(PlayerId::One).unwrap().head(), Pos::new(3, 4));
    assert_eq!(game.snake(PlayerId::Two).unwrap().head(), Pos::new(8, 7));
}

#[test]
fn test_unbound_key_moves_player_one_only() {
    let mut cfg = config(12, 12);
    cfg.two_players = true;
    let mut game = session(
        cfg,
        Layout {
            snakes: &[
                (PlayerId::One, &[Pos::new(3, 3)], Direction::East),
                (PlayerId::Two, &[Pos::new(8, 8)], Direction::West),
            ],
            cells: &[],
        },
    );

    game.tick(TickEvent::Unbound, ms(50));
    assert_eq!(game.snake(PlayerId::One).unwrap().head(), Pos::new(3, 4));
    assert_eq!(game.snake(PlayerId::Two).unwrap().head(), Pos::new(8, 8));
}

#[test]
fn test_head_on_collision_kills_the_mover() {
    let mut cfg = config(10, 12);
    cfg.two_players = true;
    let mut game = session(
        cfg,
        Layout {
            snakes: &[
                (PlayerId::One, &[Pos::new(4, 3)], Direction::East),
                (PlayerId::Two, &[Pos::new(4, 5)], Direction::West),
            ],
            cells: &[],
        },
    );

    // One steps to (4,4); Two then runs into One's head.
    game.tick(TickEvent::Timeout, ms(300));
    assert_eq!(
        game.outcome(),
        Some(GameOutcome::Died {
            player: PlayerId::Two,
            cause: Cell::Head(PlayerId::One)
        })
    );
}

#[test]
fn test_pause_freezes_and_resume_extends_items() {
    let mut cfg = config(12, 12);
    cfg.shortener = ItemSettings {
        duration_secs: 5,
        one_in: 1,
    };
    cfg.decelerator = ItemSettings {
        duration_secs: 7,
        one_in: 1,
    };
    cfg.bonus_points = ItemSettings {
        duration_secs: 5,
        one_in: 1,
    };
    let mut game = session(
        cfg,
        Layout {
            snakes: &[(PlayerId::One, &[Pos::new(5, 2)], Direction::East)],
            cells: &[(Pos::new(5, 3), Cell::Food)],
        },
    );

    game.tick(TickEvent::Timeout, Duration::ZERO);
    assert_eq!(game.items().len(), 3);
    let head = game.snake(PlayerId::One).unwrap().head();

    // Pausing moves nobody.
    let report = game.tick(TickEvent::Command(Command::Pause), Duration::from_secs(1));
    assert!(report.moves.is_empty());
    assert_eq!(game.state(), SessionState::Paused);
    assert!(game.tick(TickEvent::Timeout, Duration::from_secs(3)).moves.is_empty());
    assert_eq!(game.snake(PlayerId::One).unwrap().head(), head);

    assert_eq!(game.resume(Duration::from_secs(11)), Duration::from_secs(10));
    assert_eq!(game.state(), SessionState::Running);

    // Shortener and bonus now expire at 15 s, the decelerator at 17 s.
    game.tick(TickEvent::Command(Command::Pause), Duration::from_secs(14));
    assert_eq!(game.items().len(), 3);
    game.resume(Duration::from_secs(14));

    let report = game.tick(TickEvent::Command(Command::Pause), Duration::from_secs(15));
    assert_eq!(report.expired, 2);
    assert_eq!(game.items().len(), 1);
    assert_eq!(game.grid().count(Cell::Decelerator), 1);
    assert_eq!(game.grid().count(Cell::Shortener), 0);
}

#[test]
fn test_map_change_reshuffles_obstacles() {
    let mut cfg = config(12, 12);
    cfg.map_change = true;
    cfg.score_step_map_change = 10;
    let obstacles = [
        (Pos::new(8, 8), Cell::Obstacle),
        (Pos::new(9, 2), Cell::Obstacle),
        (Pos::new(1, 9), Cell::Obstacle),
    ];
    let mut cells = obstacles.to_vec();
    cells.push((Pos::new(5, 5), Cell::Food));
    let mut game = session(
        cfg,
        Layout {
            snakes: &[(PlayerId::One, &[Pos::new(5, 4)], Direction::East)],
            cells: &cells,
        },
    );

    let report = game.tick(TickEvent::Timeout, ms(0));
    assert!(report.map_changed);
    assert_eq!(game.grid().count(Cell::Obstacle), 3);
    assert_eq!(game.grid().count(Cell::Food), 1);
}

#[test]
fn test_map_change_disabled_keeps_obstacles() {
    let mut cfg = config(12, 12);
    cfg.score_step_map_change = 10;
    let mut game = session(
        cfg,
        Layout {
            snakes: &[(PlayerId::One, &[Pos::new(5, 4)], Direction::East)],
            cells: &[(Pos::new(8, 8), Cell::Obstacle), (Pos::new(5, 5), Cell::Food)],
        },
    );

    let report = game.tick(TickEvent::Timeout, ms(0));
    assert!(!report.map_changed);
    assert_eq!(game.grid().get(Pos::new(8, 8)), Some(Cell::Obstacle));
}

#[test]
fn test_same_seed_same_game() {
    let run = || {
        let mut game = GameSession::new(
            GameConfig {
                height: 14,
                width: 20,
                ..GameConfig::default()
            },
            2024,
        )
        .unwrap();
        for i in 0..40 {
            game.tick(TickEvent::Timeout, ms(i * 300));
        }
        game.snapshot()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_snapshot_reflects_session() {
    let mut game = session(
        config(10, 10),
        Layout {
            snakes: &[(PlayerId::One, &[Pos::new(5, 5)], Direction::North)],
            cells: &[(Pos::new(4, 5), Cell::Food)],
        },
    );
    game.tick(TickEvent::Timeout, ms(300));

    let snap = game.snapshot();
    assert_eq!((snap.height, snap.width), (10, 10));
    assert_eq!(snap.cell(Pos::new(4, 5)), Some(Cell::Head(PlayerId::One)));
    assert_eq!(snap.direction(PlayerId::One), Some(Direction::North));
    assert_eq!(snap.direction(PlayerId::Two), None);
    assert_eq!(snap.score(PlayerId::One), POINTS_FOOD);
    assert!(snap.playable());
}
