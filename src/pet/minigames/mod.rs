/// Phone mini-games. Each one ends with a coin count that is paid into the
/// pet economy exactly once per play.
pub mod coin_rush;
pub mod memory;
pub mod render;
pub mod rps;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

/// Trait that all mini-games implement.
pub trait MiniGame {
    /// Handle a game key. Returns true if the key was consumed.
    fn handle_key(&mut self, key: char) -> bool;

    /// Advance real-time timers by `ms` milliseconds.
    fn advance(&mut self, ms: u64);

    fn is_finished(&self) -> bool;

    /// Coins earned so far; final once `is_finished` is true.
    fn reward(&self) -> i64;

    /// Reset for another play.
    fn replay(&mut self);

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MiniGameKind {
    CoinRush,
    Memory,
    Rps,
}

impl MiniGameKind {
    pub fn all() -> &'static [MiniGameKind] {
        &[MiniGameKind::CoinRush, MiniGameKind::Memory, MiniGameKind::Rps]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MiniGameKind::CoinRush => "Chasse aux pièces",
            MiniGameKind::Memory => "Memory",
            MiniGameKind::Rps => "Pierre-Feuille-Ciseaux",
        }
    }

    pub fn key(&self) -> char {
        match self {
            MiniGameKind::CoinRush => '1',
            MiniGameKind::Memory => '2',
            MiniGameKind::Rps => '3',
        }
    }
}

/// Create a game instance from a choice.
pub fn create_minigame(kind: MiniGameKind, seed: u64) -> Box<dyn MiniGame> {
    match kind {
        MiniGameKind::CoinRush => Box::new(coin_rush::CoinRush::new(seed)),
        MiniGameKind::Memory => Box::new(memory::Memory::new(seed)),
        MiniGameKind::Rps => Box::new(rps::Rps::new(seed)),
    }
}

/// A running mini-game plus its payout bookkeeping.
pub struct MiniGameSession {
    pub kind: MiniGameKind,
    pub game: Box<dyn MiniGame>,
    paid: bool,
}

impl MiniGameSession {
    pub fn new(kind: MiniGameKind, seed: u64) -> Self {
        Self {
            kind,
            game: create_minigame(kind, seed),
            paid: false,
        }
    }

    /// The final reward, handed out the first time the game is seen finished.
    pub fn take_payout(&mut self) -> Option<i64> {
        if self.paid || !self.game.is_finished() {
            return None;
        }
        self.paid = true;
        Some(self.game.reward())
    }

    pub fn replay(&mut self) {
        self.game.replay();
        self.paid = false;
    }

    /// Route a key to the game. 's' on a finished game starts another play.
    pub fn handle_key(&mut self, key: char) -> bool {
        if key == 's' && self.game.is_finished() {
            self.replay();
            return true;
        }
        self.game.handle_key(key)
    }
}
