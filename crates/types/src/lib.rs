//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no external dependencies, so they can be
//! used by the simulation, the terminal view and the key map alike.
//!
//! # Field Coordinates
//!
//! Positions are `(row, col)` pairs. Row 0 is the top border and column 0 the
//! left border; the playable interior is `1..height-1` × `1..width-1`.
//!
//! # Points
//!
//! | Constant | Value | Awarded for |
//! |----------|-------|-------------|
//! | `POINTS_FOOD` | 10 | eating food |
//! | `POINTS_SHORTENER` | 15 | eating a shortener |
//! | `POINTS_DECELERATOR` | 5 | eating a decelerator |
//! | `POINTS_EXTRA_POINTS` | 50 | eating a bonus-points cell |
//!
//! # Defaults
//!
//! Every `DEFAULT_*` constant can be overridden from the command line.
//! Delays are in milliseconds, item durations in seconds and item
//! probabilities are "1 in N" chances rolled every time food is eaten.
//!
//! # Examples
//!
//! ```
//! use term_snake_types::{Cell, Direction, PlayerId, Pos};
//!
//! let pos = Pos::new(5, 5);
//! assert_eq!(pos.step(Direction::East), Some(Pos::new(5, 6)));
//! assert_eq!(Direction::North.opposite(), Direction::South);
//! assert!(Cell::Head(PlayerId::One).is_fatal());
//! ```

/// Default field height including borders
pub const DEFAULT_HEIGHT: u16 = 26;

/// Default field width including borders
pub const DEFAULT_WIDTH: u16 = 66;

/// Default obstacle density in parts per thousand of the interior
pub const DEFAULT_PERMILL_OBSTACLES: u16 = 10;

/// Default tick delay at the start of a game (ms)
pub const DEFAULT_STARTING_DELAY_MS: u32 = 300;

/// Default floor for the tick delay (ms)
pub const DEFAULT_MINIMUM_DELAY_MS: u32 = 120;

/// Default delay reduction per food eaten (ms)
pub const DEFAULT_STEP_DELAY_MS: u32 = 10;

/// Default shortener lifetime (s)
pub const DEFAULT_DURATION_SHORTENER_SECS: u64 = 5;

/// Default decelerator lifetime (s)
pub const DEFAULT_DURATION_DECELERATOR_SECS: u64 = 7;

/// Default bonus-points lifetime (s)
pub const DEFAULT_DURATION_EXTRA_POINTS_SECS: u64 = 5;

/// Default 1-in-N chance of a shortener after eating food
pub const DEFAULT_PROBABILITY_SHORTENER: u32 = 15;

/// Default 1-in-N chance of a decelerator after eating food
pub const DEFAULT_PROBABILITY_DECELERATOR: u32 = 10;

/// Default 1-in-N chance of a bonus-points cell after eating food
pub const DEFAULT_PROBABILITY_EXTRA_POINTS: u32 = 10;

/// Default score distance between obstacle reshuffles
pub const DEFAULT_SCORE_STEP_MAP_CHANGE: u32 = 200;

/// Default number of entries kept in the high-score file
pub const DEFAULT_MAX_STORED_SCORES: usize = 10;

/// High-score file location relative to `$HOME`
pub const DEFAULT_SCORE_FILE: &str = ".local/share/snake_scores.csv";

pub const POINTS_FOOD: u32 = 10;
pub const POINTS_SHORTENER: u32 = 15;
pub const POINTS_DECELERATOR: u32 = 5;
pub const POINTS_EXTRA_POINTS: u32 = 50;

/// Attempts made to find an item cell with an exit before giving up
pub const PLACEMENT_ATTEMPTS: u32 = 20;

/// Smallest field side that still leaves room to spawn a snake two cells
/// away from every border.
pub const MIN_FIELD_SIDE: u16 = 5;


/// The two possible players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Zero-based index, handy for per-player arrays
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// One-based number as shown to humans
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// Facing direction of a snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    West,
    South,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::West,
        Direction::South,
    ];

    /// The direction pointing the other way
    ///
    /// # Examples
    ///
    /// ```
    /// use term_snake_types::Direction;
    ///
    /// assert_eq!(Direction::East.opposite(), Direction::West);
    /// assert_eq!(Direction::South.opposite(), Direction::North);
    /// ```
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::South => Direction::North,
        }
    }
}

/// A field coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: u16,
    pub col: u16,
}

impl Pos {
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// The neighbouring position in `dir`, or `None` when it would leave
    /// the coordinate space. Upper bounds are checked by the grid.
    pub fn step(self, dir: Direction) -> Option<Pos> {
        match dir {
            Direction::North => self.row.checked_sub(1).map(|row| Pos::new(row, self.col)),
            Direction::South => self.row.checked_add(1).map(|row| Pos::new(row, self.col)),
            Direction::West => self.col.checked_sub(1).map(|col| Pos::new(self.row, col)),
            Direction::East => self.col.checked_add(1).map(|col| Pos::new(self.row, col)),
        }
    }
}

/// Kinds of time-limited items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Cuts the snake in half
    Shortener,
    /// Resets the tick delay to its starting value
    Decelerator,
    /// Awards extra points
    BonusPoints,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [
        ItemKind::Shortener,
        ItemKind::Decelerator,
        ItemKind::BonusPoints,
    ];

    /// The cell that represents this item on the field
    pub fn cell(self) -> Cell {
        match self {
            ItemKind::Shortener => Cell::Shortener,
            ItemKind::Decelerator => Cell::Decelerator,
            ItemKind::BonusPoints => Cell::BonusPoints,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Shortener => "shortener",
            ItemKind::Decelerator => "decelerator",
            ItemKind::BonusPoints => "bonus_points",
        }
    }
}

/// A cell of the playing field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Any snake segment other than a head
    SnakeBody,
    /// The head of the given player's snake
    Head(PlayerId),
    Border,
    Obstacle,
    Food,
    Shortener,
    Decelerator,
    BonusPoints,
}

impl Cell {
    /// True for walls a snake can never pass (border or obstacle)
    pub fn is_blocking(self) -> bool {
        matches!(self, Cell::Border | Cell::Obstacle)
    }

    /// The temporal item this cell holds, if any
    pub fn item_kind(self) -> Option<ItemKind> {
        match self {
            Cell::Shortener => Some(ItemKind::Shortener),
            Cell::Decelerator => Some(ItemKind::Decelerator),
            Cell::BonusPoints => Some(ItemKind::BonusPoints),
            _ => None,
        }
    }

    /// Entering this cell kills the snake.
    ///
    /// SnakeBody is fatal unless it is the mover's own neck; that case is
    /// resolved inside the snake before a kind is ever reported.
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            Cell::SnakeBody | Cell::Head(_) | Cell::Border | Cell::Obstacle
        )
    }
}

/// Player intents produced by the key map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Turn a player's snake
    Steer {
        player: PlayerId,
        direction: Direction,
    },
    /// Freeze the game until the next key press
    Pause,
}
