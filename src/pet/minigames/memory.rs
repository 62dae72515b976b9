//! Memory: find the six pairs among twelve face-down cards.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::ClickState;
use crate::pet::rng::shuffle;

use super::MiniGame;

pub const SYMBOLS: &[&str] = &["🐼", "🎋", "💖", "⭐", "🎀", "🎉"];
pub const CARD_COUNT: usize = 12;
/// How long a mismatched pair stays visible.
pub const MISMATCH_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Card {
    /// Index into `SYMBOLS`.
    pub symbol: usize,
    pub face_up: bool,
    pub matched: bool,
}

pub struct Memory {
    pub cards: Vec<Card>,
    /// Pairs turned so far.
    pub moves: u32,
    first: Option<usize>,
    /// Mismatched pair waiting to be turned back, with the remaining delay.
    pending: Option<(usize, usize, u64)>,
    seed: u64,
}

/// Coins for finishing in `moves` turns.
pub fn memory_reward(moves: u32) -> i64 {
    (50 - 2 * moves as i64).max(10)
}

/// Key for the card at `idx` (a..l).
pub fn card_key(idx: usize) -> char {
    (b'a' + idx as u8) as char
}

impl Memory {
    pub fn new(seed: u64) -> Self {
        let mut g = Self {
            cards: Vec::new(),
            moves: 0,
            first: None,
            pending: None,
            seed,
        };
        g.deal();
        g
    }

    fn deal(&mut self) {
        let mut symbols: Vec<usize> = (0..SYMBOLS.len()).chain(0..SYMBOLS.len()).collect();
        shuffle(&mut symbols, &mut self.seed);
        self.cards = symbols
            .into_iter()
            .map(|symbol| Card {
                symbol,
                face_up: false,
                matched: false,
            })
            .collect();
        self.moves = 0;
        self.first = None;
        self.pending = None;
    }

    /// Turn a card over. Refused while a mismatch is showing or when the card
    /// is already visible.
    pub fn flip(&mut self, idx: usize) -> bool {
        if self.pending.is_some() || self.is_finished() {
            return false;
        }
        match self.cards.get(idx) {
            Some(c) if !c.face_up && !c.matched => {}
            _ => return false,
        }
        self.cards[idx].face_up = true;

        let Some(first) = self.first.take() else {
            self.first = Some(idx);
            return true;
        };

        self.moves += 1;
        if self.cards[first].symbol == self.cards[idx].symbol {
            self.cards[first].matched = true;
            self.cards[idx].matched = true;
        } else {
            self.pending = Some((first, idx, MISMATCH_MS));
        }
        true
    }

    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|c| c.matched).count() / 2
    }
}

impl MiniGame for Memory {
    fn handle_key(&mut self, key: char) -> bool {
        match key {
            'a'..='l' => {
                self.flip((key as u8 - b'a') as usize);
                true
            }
            _ => false,
        }
    }

    fn advance(&mut self, ms: u64) {
        if let Some((a, b, left)) = self.pending {
            if ms >= left {
                self.cards[a].face_up = false;
                self.cards[b].face_up = false;
                self.pending = None;
            } else {
                self.pending = Some((a, b, left - ms));
            }
        }
    }

    fn is_finished(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.matched)
    }

    fn reward(&self) -> i64 {
        memory_reward(self.moves)
    }

    fn replay(&mut self) {
        self.deal();
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        super::render::render_memory(self, f, area, click_state);
    }
}
