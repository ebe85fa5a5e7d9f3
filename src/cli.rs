//! Command-line options for the `snake` binary.

use std::path::PathBuf;

use clap::Parser;

use term_snake::core::{GameConfig, ItemSettings};
use term_snake::types::{
    DEFAULT_DURATION_DECELERATOR_SECS, DEFAULT_DURATION_EXTRA_POINTS_SECS,
    DEFAULT_DURATION_SHORTENER_SECS, DEFAULT_HEIGHT, DEFAULT_MAX_STORED_SCORES,
    DEFAULT_MINIMUM_DELAY_MS, DEFAULT_PERMILL_OBSTACLES, DEFAULT_PROBABILITY_DECELERATOR,
    DEFAULT_PROBABILITY_EXTRA_POINTS, DEFAULT_PROBABILITY_SHORTENER,
    DEFAULT_SCORE_STEP_MAP_CHANGE, DEFAULT_STARTING_DELAY_MS, DEFAULT_STEP_DELAY_MS,
    DEFAULT_WIDTH,
};

#[derive(Debug, Parser)]
#[command(
    name = "snake",
    version,
    about = "Snake for the terminal, for one or two players"
)]
pub struct Cli {
    /// Two players on one keyboard (letters vs. arrow keys).
    #[arg(short = '2', long)]
    pub two_players: bool,

    /// Size the field to fill the terminal.
    #[arg(short = 't', long, conflicts_with_all = ["height", "width"])]
    pub use_terminal_dimensions: bool,

    /// Field height in cells, border included.
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u16,

    /// Field width in cells, border included.
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: u16,

    /// Hide the keys panel next to the field.
    #[arg(short = 'k', long)]
    pub disable_keys_help: bool,

    /// Obstacles per thousand interior cells.
    #[arg(short = 'o', long, default_value_t = DEFAULT_PERMILL_OBSTACLES)]
    pub obstacles: u16,

    /// Delay between moves at the start, in milliseconds.
    #[arg(short = 's', long, default_value_t = DEFAULT_STARTING_DELAY_MS)]
    pub starting_delay: u32,

    /// Lower bound for the delay between moves, in milliseconds.
    #[arg(short = 'm', long, default_value_t = DEFAULT_MINIMUM_DELAY_MS)]
    pub minimum_delay: u32,

    /// Delay decrease per food eaten, in milliseconds.
    #[arg(short = 'S', long, default_value_t = DEFAULT_STEP_DELAY_MS)]
    pub step_delay: u32,

    /// Seconds a decelerator stays on the field.
    #[arg(short = 'd', long, default_value_t = DEFAULT_DURATION_DECELERATOR_SECS)]
    pub duration_decelerator: u64,

    /// Seconds a shortener stays on the field.
    #[arg(short = 'D', long, default_value_t = DEFAULT_DURATION_SHORTENER_SECS)]
    pub duration_shortener: u64,

    /// Seconds a bonus-points item stays on the field.
    #[arg(short = 'e', long, default_value_t = DEFAULT_DURATION_EXTRA_POINTS_SECS)]
    pub duration_extra_points: u64,

    /// A decelerator appears with probability 1/N per food eaten.
    #[arg(short = 'p', long, default_value_t = DEFAULT_PROBABILITY_DECELERATOR,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub probability_decelerator: u32,

    /// A shortener appears with probability 1/N per food eaten.
    #[arg(short = 'P', long, default_value_t = DEFAULT_PROBABILITY_SHORTENER,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub probability_shortener: u32,

    /// A bonus-points item appears with probability 1/N per food eaten.
    #[arg(short = 'E', long, default_value_t = DEFAULT_PROBABILITY_EXTRA_POINTS,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub probability_extra_points: u32,

    /// Points between obstacle reshuffles.
    #[arg(short = 'c', long, default_value_t = DEFAULT_SCORE_STEP_MAP_CHANGE,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub score_step_map_change: u32,

    /// Keep the obstacle layout for the whole game.
    #[arg(short = 'C', long)]
    pub disable_map_change: bool,

    /// Score file (default: ~/.local/share/snake_scores.csv).
    #[arg(short = 'f', long)]
    pub scorefile_path: Option<PathBuf>,

    /// Do not record or print top scores.
    #[arg(short = 'F', long)]
    pub disable_top_scores: bool,

    /// Number of marks kept in the score file.
    #[arg(short = 'M', long, default_value_t = DEFAULT_MAX_STORED_SCORES)]
    pub max_stored_scores: usize,

    /// Seed for the random source; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write diagnostics to this file (filter with RUST_LOG).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Session configuration for a field of `height` x `width` cells.
    pub fn game_config(&self, height: u16, width: u16) -> GameConfig {
        GameConfig {
            height,
            width,
            permill_obstacles: self.obstacles,
            starting_delay_ms: self.starting_delay,
            minimum_delay_ms: self.minimum_delay,
            step_delay_ms: self.step_delay,
            shortener: ItemSettings {
                duration_secs: self.duration_shortener,
                one_in: self.probability_shortener,
            },
            decelerator: ItemSettings {
                duration_secs: self.duration_decelerator,
                one_in: self.probability_decelerator,
            },
            bonus_points: ItemSettings {
                duration_secs: self.duration_extra_points,
                one_in: self.probability_extra_points,
            },
            score_step_map_change: self.score_step_map_change,
            map_change: !self.disable_map_change,
            two_players: self.two_players,
        }
    }
}
