//! Persistent high-score table.
//!
//! Scores live in a small `;`-separated file:
//!
//! ```text
//! score;player_name;date
//! 120;alice;1700000000
//! 40;bob;1700000100
//! ```
//!
//! Marks are kept sorted by descending score and the file is rewritten in
//! full after every insert. Dates are unix seconds and are shown in local
//! time when the table is printed.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use term_snake_types::DEFAULT_SCORE_FILE;

/// Field separator of the score file. Player names may not contain it.
pub const SEPARATOR: char = ';';

/// First line of every score file.
pub const HEADER: &str = "score;player_name;date";

const DATE_FORMAT: &str = "%d-%m-%Y %H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMark {
    pub score: u32,
    pub player_name: String,
    /// Unix seconds.
    pub date: i64,
}

impl ScoreMark {
    pub fn new(score: u32, player_name: impl Into<String>, date: i64) -> Self {
        Self {
            score,
            player_name: player_name.into(),
            date,
        }
    }

    /// Parse one `score;name;date` line.
    fn parse(line: &str) -> Option<Self> {
        let mut fields = line.splitn(3, SEPARATOR);
        let score = fields.next()?.trim().parse().ok()?;
        let player_name = fields.next()?.to_string();
        let date = fields.next()?.trim().parse().ok()?;
        Some(Self {
            score,
            player_name,
            date,
        })
    }

    /// Local date as shown in the table.
    pub fn local_date(&self) -> String {
        match DateTime::<Utc>::from_timestamp(self.date, 0) {
            Some(utc) => utc.with_timezone(&Local).format(DATE_FORMAT).to_string(),
            None => "-".to_string(),
        }
    }
}

/// Sorted list of the best marks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    marks: Vec<ScoreMark>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a score file. A missing file is an empty board; unreadable lines
    /// are skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no score file yet");
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("read score file {}", path.display()))
            }
        };

        let mut marks = Vec::new();
        for (lineno, line) in text.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            match ScoreMark::parse(line) {
                Some(mark) => marks.push(mark),
                None => warn!(
                    path = %path.display(),
                    line = lineno + 1,
                    "skipping malformed score line"
                ),
            }
        }
        Ok(Self { marks })
    }

    /// Rewrite the score file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("create score directory {}", dir.display()))?;
        }
        fs::write(path, self.to_file_string())
            .with_context(|| format!("write score file {}", path.display()))?;
        debug!(path = %path.display(), marks = self.marks.len(), "saved scores");
        Ok(())
    }

    fn to_file_string(&self) -> String {
        let mut out = String::with_capacity(32 * (self.marks.len() + 1));
        out.push_str(HEADER);
        out.push('\n');
        for mark in &self.marks {
            let _ = writeln!(
                out,
                "{}{SEPARATOR}{}{SEPARATOR}{}",
                mark.score, mark.player_name, mark.date
            );
        }
        out
    }

    pub fn marks(&self) -> &[ScoreMark] {
        &self.marks
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn lowest(&self) -> Option<u32> {
        self.marks.iter().map(|m| m.score).min()
    }

    /// Whether `score` earns a place on a board holding at most `max` marks.
    pub fn qualifies(&self, score: u32, max: usize) -> bool {
        if max == 0 {
            return false;
        }
        self.marks.len() < max || self.lowest().is_some_and(|low| score > low)
    }

    /// Insert before the first strictly lower score, then keep the best
    /// `max` marks. Returns the zero-based rank, or `None` if the mark fell
    /// off the end.
    pub fn insert(&mut self, mark: ScoreMark, max: usize) -> Option<usize> {
        let at = self
            .marks
            .iter()
            .position(|m| mark.score > m.score)
            .unwrap_or(self.marks.len());
        self.marks.insert(at, mark);
        self.marks.truncate(max);
        (at < self.marks.len()).then_some(at)
    }

    /// Printable "TOP SCORES" table, or `None` when the board is empty.
    pub fn render_table(&self) -> Option<String> {
        if self.marks.is_empty() {
            return None;
        }

        let score_w = self
            .marks
            .iter()
            .map(|m| m.score.to_string().len())
            .max()
            .unwrap_or(0)
            .max("Score".len());
        let name_w = self
            .marks
            .iter()
            .map(|m| m.player_name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Player Name".len());
        let table_w = score_w + name_w + 32;
        let rule = "-".repeat(table_w);

        let mut out = String::new();
        let title = "TOP SCORES";
        let _ = writeln!(out, "{:>w$}", title, w = table_w / 2 + title.len() / 2);
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "| Top | {:<score_w$} | {:<name_w$} | {:<16} |",
            "Score", "Player Name", "Date"
        );
        let _ = writeln!(out, "{rule}");
        for (i, mark) in self.marks.iter().enumerate() {
            let _ = writeln!(
                out,
                "| {:>3} | {:<score_w$} | {:<name_w$} | {:<16} |",
                i + 1,
                mark.score,
                mark.player_name,
                mark.local_date()
            );
        }
        let _ = writeln!(out, "{rule}");
        Some(out)
    }
}

/// Check a player name before it goes into the score file.
pub fn validate_player_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.contains(SEPARATOR) {
        return Err(NameError::Illegal(SEPARATOR));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Empty name: Try another name")]
    Empty,
    #[error("Illegal character '{0}': Try another name")]
    Illegal(char),
}

/// Current time as stored in the `date` column.
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// `$HOME/.local/share/snake_scores.csv`, or `None` without a home directory.
pub fn default_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(|home| PathBuf::from(home).join(DEFAULT_SCORE_FILE))
}
