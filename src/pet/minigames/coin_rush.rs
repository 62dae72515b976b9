//! Coin Rush: tap the coin as many times as possible before time runs out.
//!
//! The field is a 3x3 grid addressed by keys 1-9. Hitting the coin scores a
//! point and moves it to another cell; misses cost nothing.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::ClickState;
use crate::pet::rng::rng_range;

use super::MiniGame;

pub const DURATION_MS: u64 = 30_000;
pub const CELLS: u32 = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RushPhase {
    Idle,
    Playing,
    Finished,
}

pub struct CoinRush {
    pub phase: RushPhase,
    pub score: u32,
    pub time_left_ms: u64,
    /// Cell index (0-8) holding the coin.
    pub coin: u32,
    seed: u64,
}

impl CoinRush {
    pub fn new(seed: u64) -> Self {
        Self {
            phase: RushPhase::Idle,
            score: 0,
            time_left_ms: DURATION_MS,
            coin: 0,
            seed,
        }
    }

    pub fn start(&mut self) {
        self.score = 0;
        self.time_left_ms = DURATION_MS;
        self.phase = RushPhase::Playing;
        self.move_coin();
    }

    /// Tap a cell. Returns true on a hit.
    pub fn tap(&mut self, cell: u32) -> bool {
        if self.phase != RushPhase::Playing || cell != self.coin {
            return false;
        }
        self.score += 1;
        self.move_coin();
        true
    }

    /// Seconds shown on the timer, rounded up.
    pub fn seconds_left(&self) -> u64 {
        self.time_left_ms.div_ceil(1000)
    }

    fn move_coin(&mut self) {
        // Always land on a different cell so a hit is visible.
        let offset = 1 + rng_range(&mut self.seed, CELLS - 1);
        self.coin = (self.coin + offset) % CELLS;
    }
}

impl MiniGame for CoinRush {
    fn handle_key(&mut self, key: char) -> bool {
        match key {
            's' if self.phase == RushPhase::Idle => {
                self.start();
                true
            }
            '1'..='9' if self.phase == RushPhase::Playing => {
                self.tap(key as u32 - '1' as u32);
                true
            }
            _ => false,
        }
    }

    fn advance(&mut self, ms: u64) {
        if self.phase != RushPhase::Playing {
            return;
        }
        self.time_left_ms = self.time_left_ms.saturating_sub(ms);
        if self.time_left_ms == 0 {
            self.phase = RushPhase::Finished;
        }
    }

    fn is_finished(&self) -> bool {
        self.phase == RushPhase::Finished
    }

    fn reward(&self) -> i64 {
        self.score as i64
    }

    fn replay(&mut self) {
        self.phase = RushPhase::Idle;
        self.score = 0;
        self.time_left_ms = DURATION_MS;
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        super::render::render_coin_rush(self, f, area, click_state);
    }
}
