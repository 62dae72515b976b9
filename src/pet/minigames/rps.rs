//! Rock-Paper-Scissors against the panda, five rounds.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::ClickState;
use crate::pet::rng::rng_range;

use super::MiniGame;

pub const ROUNDS: u32 = 5;
/// Suspense before the panda's hand is revealed.
pub const REVEAL_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hand {
    Rock,
    Paper,
    Scissors,
}

impl Hand {
    pub fn all() -> &'static [Hand] {
        &[Hand::Rock, Hand::Paper, Hand::Scissors]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Hand::Rock => "Pierre",
            Hand::Paper => "Feuille",
            Hand::Scissors => "Ciseaux",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Hand::Rock => "✊",
            Hand::Paper => "✋",
            Hand::Scissors => "✌",
        }
    }

    pub fn key(&self) -> char {
        match self {
            Hand::Rock => '1',
            Hand::Paper => '2',
            Hand::Scissors => '3',
        }
    }

    pub fn beats(&self, other: Hand) -> bool {
        matches!(
            (self, other),
            (Hand::Rock, Hand::Scissors) | (Hand::Paper, Hand::Rock) | (Hand::Scissors, Hand::Paper)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Tie,
    Loss,
}

impl Outcome {
    pub fn of(player: Hand, panda: Hand) -> Self {
        if player == panda {
            Outcome::Tie
        } else if player.beats(panda) {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    pub fn coins(&self) -> u32 {
        match self {
            Outcome::Win => 5,
            Outcome::Tie => 2,
            Outcome::Loss => 1,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Outcome::Win => "Gagné ! (+5 pièces)",
            Outcome::Tie => "Égalité ! (+2 pièces)",
            Outcome::Loss => "Perdu... (+1 pièce)",
        }
    }
}

pub struct Rps {
    pub round: u32,
    pub score: u32,
    pub player: Option<Hand>,
    pub panda: Option<Hand>,
    /// Time left before the current round resolves.
    pub revealing_ms: Option<u64>,
    pub last: Option<Outcome>,
    seed: u64,
}

impl Rps {
    pub fn new(seed: u64) -> Self {
        Self {
            round: 0,
            score: 0,
            player: None,
            panda: None,
            revealing_ms: None,
            last: None,
            seed,
        }
    }

    pub fn choose(&mut self, hand: Hand) -> bool {
        if self.is_finished() || self.revealing_ms.is_some() {
            return false;
        }
        let panda = Hand::all()[rng_range(&mut self.seed, 3) as usize];
        self.player = Some(hand);
        self.panda = Some(panda);
        self.revealing_ms = Some(REVEAL_MS);
        true
    }

    fn resolve(&mut self) {
        self.revealing_ms = None;
        if let (Some(p), Some(q)) = (self.player, self.panda) {
            let outcome = Outcome::of(p, q);
            self.score += outcome.coins();
            self.last = Some(outcome);
            self.round += 1;
        }
    }
}

impl MiniGame for Rps {
    fn handle_key(&mut self, key: char) -> bool {
        match Hand::all().iter().find(|h| h.key() == key) {
            Some(&hand) => {
                self.choose(hand);
                true
            }
            None => false,
        }
    }

    fn advance(&mut self, ms: u64) {
        if let Some(left) = self.revealing_ms {
            if ms >= left {
                self.resolve();
            } else {
                self.revealing_ms = Some(left - ms);
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.round >= ROUNDS
    }

    fn reward(&self) -> i64 {
        self.score as i64
    }

    fn replay(&mut self) {
        self.round = 0;
        self.score = 0;
        self.player = None;
        self.panda = None;
        self.revealing_ms = None;
        self.last = None;
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        super::render::render_rps(self, f, area, click_state);
    }
}
