//! Game session module - the tick state machine
//!
//! This module ties together the grid, the snakes, the temporal item
//! registry and the RNG. It owns scores and the tick delay, decides which
//! snakes move on each tick, and applies the consequence of whatever each
//! snake ran into.

use std::time::Duration;

use arrayvec::ArrayVec;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, GameConfig};
use crate::grid::Grid;
use crate::items::ItemRegistry;
use crate::rng::GameRng;
use crate::snake::Snake;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Running,
    Paused,
    Ended,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    /// The quit key was pressed
    Quit,
    /// `player` was the first to crash, into `cause`
    Died { player: PlayerId, cause: Cell },
}

/// What woke the main loop up for this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// The tick delay elapsed without a key press
    Timeout,
    /// A key bound to a command was pressed
    Command(Command),
    /// A key without a binding was pressed
    Unbound,
}

/// Which snakes move on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movers {
    All,
    Only(PlayerId),
    Nobody,
}

impl Movers {
    /// Timeouts move everybody, a steering key moves only its player and
    /// any other key nudges player one.
    pub fn for_event(event: TickEvent) -> Self {
        match event {
            TickEvent::Timeout => Movers::All,
            TickEvent::Command(Command::Steer { player, .. }) => Movers::Only(player),
            TickEvent::Command(Command::Pause) => Movers::Nobody,
            TickEvent::Unbound => Movers::Only(PlayerId::One),
        }
    }

    pub fn includes(self, player: PlayerId) -> bool {
        match self {
            Movers::All => true,
            Movers::Only(p) => p == player,
            Movers::Nobody => false,
        }
    }
}

/// One snake's move during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerMove {
    pub player: PlayerId,
    /// Cell content the snake ran into, before it moved
    pub entered: Cell,
    pub points: u32,
}

/// Everything that happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub moves: ArrayVec<PlayerMove, 2>,
    /// Expired items whose cells were cleared
    pub expired: usize,
    /// The obstacle layout was reshuffled
    pub map_changed: bool,
    pub state: SessionState,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no free cell to spawn player {0}")]
    NoSpawnCell(u8),
}

/// A running game
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    snakes: ArrayVec<Snake, 2>,
    items: ItemRegistry,
    scores: [u32; 2],
    delay_ms: u32,
    last_map_change_score: u32,
    state: SessionState,
    outcome: Option<GameOutcome>,
    paused_at: Option<Duration>,
    rng: GameRng,
}

impl GameSession {
    /// Build a fresh game: obstacles, one snake per player and a first food
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, SessionError> {
        config.validate()?;

        let mut rng = GameRng::new(seed);
        let mut grid = Grid::initialize(
            config.height,
            config.width,
            config.permill_obstacles,
            &mut rng,
        );

        let mut snakes = ArrayVec::new();
        for &player in config.players() {
            let snake = Snake::spawn(&mut grid, player, &mut rng)
                .ok_or(SessionError::NoSpawnCell(player.number()))?;
            snakes.push(snake);
        }
        grid.place_food(&mut rng);

        info!(
            seed,
            height = config.height,
            width = config.width,
            two_players = config.two_players,
            "session started"
        );
        Ok(Self::assemble(config, grid, snakes, rng))
    }

    /// Build a session around a prepared grid and snakes.
    ///
    /// Nothing is validated or placed; the caller owns the layout.
    pub fn from_parts(
        config: GameConfig,
        grid: Grid,
        snakes: impl IntoIterator<Item = Snake>,
        seed: u64,
    ) -> Self {
        let snakes = snakes.into_iter().take(2).collect();
        Self::assemble(config, grid, snakes, GameRng::new(seed))
    }

    fn assemble(config: GameConfig, grid: Grid, snakes: ArrayVec<Snake, 2>, rng: GameRng) -> Self {
        let delay_ms = config.starting_delay_ms;
        Self {
            config,
            grid,
            snakes,
            items: ItemRegistry::new(),
            scores: [0; 2],
            delay_ms,
            last_map_change_score: 0,
            state: SessionState::Running,
            outcome: None,
            paused_at: None,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn items(&self) -> &ItemRegistry {
        &self.items
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player.index()]
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    /// Current time the main loop waits for input before a timeout tick
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms as u64)
    }

    pub fn snake(&self, player: PlayerId) -> Option<&Snake> {
        self.snakes.iter().find(|s| s.player() == player)
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Turn a player's snake. Takes effect on its next move.
    pub fn steer(&mut self, player: PlayerId, direction: Direction) {
        if let Some(snake) = self.snakes.iter_mut().find(|s| s.player() == player) {
            snake.set_direction(direction);
        }
    }

    /// Run one tick at game time `now`.
    ///
    /// Does nothing unless the session is running.
    pub fn tick(&mut self, event: TickEvent, now: Duration) -> TickReport {
        let mut report = TickReport::default();
        if self.state != SessionState::Running {
            report.state = self.state;
            return report;
        }

        let movers = Movers::for_event(event);
        match event {
            TickEvent::Command(Command::Pause) => self.pause(now),
            TickEvent::Command(Command::Steer { player, direction }) => {
                self.steer(player, direction)
            }
            TickEvent::Timeout | TickEvent::Unbound => {}
        }

        report.expired = self.items.sweep_expired(&mut self.grid, now);

        for &player in self.config.players() {
            if self.state != SessionState::Running {
                break;
            }
            if !movers.includes(player) {
                continue;
            }
            if let Some(mv) = self.advance_player(player, now) {
                report.moves.push(mv);
                report.map_changed |= self.maybe_change_map(player, mv.points);
            }
        }

        report.state = self.state;
        report
    }

    /// Freeze the session at game time `now`
    pub fn pause(&mut self, now: Duration) {
        if self.state == SessionState::Running {
            self.state = SessionState::Paused;
            self.paused_at = Some(now);
            debug!(?now, "paused");
        }
    }

    /// Continue after a pause, pushing every item expiry back by the time
    /// spent paused. Returns that time.
    pub fn resume(&mut self, now: Duration) -> Duration {
        if self.state != SessionState::Paused {
            return Duration::ZERO;
        }
        let paused_for = self
            .paused_at
            .take()
            .map(|at| now.saturating_sub(at))
            .unwrap_or_default();
        self.items.extend_all(paused_for);
        self.state = SessionState::Running;
        debug!(?paused_for, "resumed");
        paused_for
    }

    /// End the session immediately
    pub fn quit(&mut self) {
        self.end(GameOutcome::Quit);
    }

    fn end(&mut self, outcome: GameOutcome) {
        if self.state == SessionState::Ended {
            return;
        }
        self.state = SessionState::Ended;
        self.outcome = Some(outcome);
        info!(?outcome, scores = ?self.scores, "session ended");
    }

    fn advance_player(&mut self, player: PlayerId, now: Duration) -> Option<PlayerMove> {
        let snake = self.snakes.iter_mut().find(|s| s.player() == player)?;
        let entered = snake.advance(&mut self.grid);
        let head = snake.head();

        if entered.is_fatal() {
            self.end(GameOutcome::Died {
                player,
                cause: entered,
            });
            return Some(PlayerMove {
                player,
                entered,
                points: 0,
            });
        }

        let points = match entered {
            Cell::Food => {
                self.on_food(now);
                POINTS_FOOD
            }
            Cell::Shortener => POINTS_SHORTENER,
            Cell::Decelerator => {
                self.delay_ms = self.config.starting_delay_ms;
                POINTS_DECELERATOR
            }
            Cell::BonusPoints => POINTS_EXTRA_POINTS,
            _ => 0,
        };

        if entered.item_kind().is_some() {
            self.items.remove_at(head);
        }
        if points > 0 {
            let score = &mut self.scores[player.index()];
            *score = score.saturating_add(points);
            debug!(player = player.number(), ?entered, points, score = *score, "scored");
        }

        Some(PlayerMove {
            player,
            entered,
            points,
        })
    }

    fn on_food(&mut self, now: Duration) {
        self.grid.place_food(&mut self.rng);

        self.delay_ms = self
            .delay_ms
            .saturating_sub(self.config.step_delay_ms)
            .max(self.config.minimum_delay_ms);

        for kind in ItemKind::ALL {
            let settings = self.config.item(kind);
            if self.rng.one_in(settings.one_in) {
                self.grid.place_temporal_item(
                    &mut self.items,
                    kind,
                    settings.duration(),
                    now,
                    &mut self.rng,
                );
            }
        }
    }

    fn maybe_change_map(&mut self, player: PlayerId, points: u32) -> bool {
        if points == 0 || !self.config.map_change || self.state == SessionState::Ended {
            return false;
        }
        let score = self.scores[player.index()];
        let threshold = self
            .last_map_change_score
            .saturating_add(self.config.score_step_map_change);
        if score < threshold {
            return false;
        }

        let moved = self.grid.regenerate_obstacles(&mut self.rng);
        self.last_map_change_score = score;
        info!(score, moved, "map changed");
        true
    }

    /// Fill a reusable snapshot with the current state
    pub fn snapshot_into(&self, snap: &mut GameSnapshot) {
        snap.height = self.grid.height();
        snap.width = self.grid.width();
        snap.cells.clear();
        snap.cells.extend_from_slice(self.grid.cells());
        snap.directions = [None; 2];
        for snake in &self.snakes {
            snap.directions[snake.player().index()] = Some(snake.direction());
        }
        snap.scores = self.scores;
        snap.two_players = self.config.two_players;
        snap.state = self.state;
        snap.outcome = self.outcome;
        snap.delay_ms = self.delay_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config(height: u16, width: u16) -> GameConfig {
        GameConfig {
            height,
            width,
            permill_obstacles: 0,
            map_change: false,
            ..GameConfig::default()
        }
    }

    #[test]
    fn movers_follow_event() {
        assert_eq!(Movers::for_event(TickEvent::Timeout), Movers::All);
        assert_eq!(
            Movers::for_event(TickEvent::Unbound),
            Movers::Only(PlayerId::One)
        );
        assert_eq!(
            Movers::for_event(TickEvent::Command(Command::Steer {
                player: PlayerId::Two,
                direction: Direction::North,
            })),
            Movers::Only(PlayerId::Two)
        );
        assert_eq!(
            Movers::for_event(TickEvent::Command(Command::Pause)),
            Movers::Nobody
        );
    }

    #[test]
    fn new_session_places_snakes_and_food() {
        let config = GameConfig {
            two_players: true,
            ..quiet_config(12, 12)
        };
        let session = GameSession::new(config, 42).unwrap();
        assert_eq!(session.grid().count(Cell::Head(PlayerId::One)), 1);
        assert_eq!(session.grid().count(Cell::Head(PlayerId::Two)), 1);
        assert_eq!(session.grid().count(Cell::Food), 1);
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.delay_ms(), DEFAULT_STARTING_DELAY_MS);
    }

    #[test]
    fn new_session_rejects_bad_config() {
        let config = quiet_config(3, 12);
        assert!(matches!(
            GameSession::new(config, 1),
            Err(SessionError::Config(ConfigError::FieldTooSmall { .. }))
        ));
    }

    #[test]
    fn quit_is_sticky() {
        let mut session = GameSession::new(quiet_config(10, 10), 5).unwrap();
        session.quit();
        assert_eq!(session.outcome(), Some(GameOutcome::Quit));
        let report = session.tick(TickEvent::Timeout, Duration::ZERO);
        assert!(report.moves.is_empty());
        assert_eq!(report.state, SessionState::Ended);
    }
}
