//! Rolling form window: the last N win/loss results of a team.
//!
//! Fixed-capacity ring buffer: pushing onto a full window evicts the oldest
//! result. The window never allocates past its capacity.

use serde::{Deserialize, Serialize};

/// Number of recent results a team's form window keeps.
pub const FORM_WINDOW_CAPACITY: usize = 10;

/// Win rate reported for a team with no results yet.
pub const NEUTRAL_WIN_RATE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormWindow {
    slots: [bool; FORM_WINDOW_CAPACITY],
    /// Index of the oldest result.
    head: usize,
    len: usize,
}

impl Default for FormWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl FormWindow {
    pub fn new() -> Self {
        Self {
            slots: [false; FORM_WINDOW_CAPACITY],
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        FORM_WINDOW_CAPACITY
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == FORM_WINDOW_CAPACITY
    }

    /// Append a result, evicting the oldest one if the window is full.
    pub fn push(&mut self, won: bool) {
        if self.is_full() {
            self.slots[self.head] = won;
            self.head = (self.head + 1) % FORM_WINDOW_CAPACITY;
        } else {
            let tail = (self.head + self.len) % FORM_WINDOW_CAPACITY;
            self.slots[tail] = won;
            self.len += 1;
        }
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Results in chronological order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.slots[(self.head + i) % FORM_WINDOW_CAPACITY])
    }

    pub fn wins(&self) -> usize {
        self.iter().filter(|&won| won).count()
    }

    /// Fraction of wins in the window, or 0.5 when the window is empty.
    pub fn win_rate(&self) -> f64 {
        if self.is_empty() {
            return NEUTRAL_WIN_RATE;
        }
        self.wins() as f64 / self.len as f64
    }
}
