//! Temporal item registry - lifetimes of shorteners, decelerators and bonus cells
//!
//! Items are kept in a plain vector; expiry is checked per entry, so
//! insertion order only matters for which expired item is handed out first.
//! Expiry instants are measured on the session's game clock (a `Duration`
//! since the session started), never on wall-clock time directly.

use std::time::Duration;

use tracing::trace;

use crate::grid::Grid;
use crate::types::{Cell, ItemKind, Pos};

/// A time-limited item sitting on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalItem {
    pub pos: Pos,
    pub kind: ItemKind,
    pub expires_at: Duration,
}

impl TemporalItem {
    pub fn is_expired(&self, now: Duration) -> bool {
        now >= self.expires_at
    }
}

/// Registry of live temporal items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemRegistry {
    items: Vec<TemporalItem>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item expiring at `now + duration`
    pub fn add(&mut self, pos: Pos, kind: ItemKind, duration: Duration, now: Duration) {
        self.items.push(TemporalItem {
            pos,
            kind,
            expires_at: now + duration,
        });
    }

    /// Remove and return one item whose expiry is at or before `now`
    pub fn take_next_expired(&mut self, now: Duration) -> Option<TemporalItem> {
        let idx = self.items.iter().position(|item| item.is_expired(now))?;
        Some(self.items.remove(idx))
    }

    /// Push every expiry back by `extra`, used to make up for pauses
    pub fn extend_all(&mut self, extra: Duration) {
        for item in &mut self.items {
            item.expires_at += extra;
        }
    }

    /// Forget the item at `pos`, if one is still registered there
    pub fn remove_at(&mut self, pos: Pos) -> Option<TemporalItem> {
        let idx = self.items.iter().position(|item| item.pos == pos)?;
        Some(self.items.remove(idx))
    }

    /// Drop every expired item and clear its cell.
    ///
    /// A cell is only reverted to Empty while it still shows the item's own
    /// kind; anything that replaced it in the meantime is left untouched.
    /// Returns how many cells were actually cleared.
    pub fn sweep_expired(&mut self, grid: &mut Grid, now: Duration) -> usize {
        let mut cleared = 0;
        while let Some(item) = self.take_next_expired(now) {
            if grid.get(item.pos) == Some(item.kind.cell()) {
                grid.set(item.pos, Cell::Empty);
                cleared += 1;
                trace!(kind = item.kind.as_str(), row = item.pos.row, col = item.pos.col, "item expired");
            }
        }
        cleared
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemporalItem> {
        self.items.iter()
    }
}
