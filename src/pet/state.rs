/// Pandagotchi state definitions.
use std::collections::BTreeSet;

use super::config::{PetConfig, StatTable};

/// One of the three needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stat {
    Hunger,
    Happiness,
    Cleanliness,
}

impl Stat {
    pub fn all() -> &'static [Stat] {
        &[Stat::Hunger, Stat::Happiness, Stat::Cleanliness]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stat::Hunger => "Faim",
            Stat::Happiness => "Bonheur",
            Stat::Cleanliness => "Propreté",
        }
    }

    /// Pick this stat's entry from a per-stat table.
    pub fn of(&self, table: &StatTable) -> u32 {
        match self {
            Stat::Hunger => table.hunger,
            Stat::Happiness => table.happiness,
            Stat::Cleanliness => table.cleanliness,
        }
    }
}

/// The three needs, each kept within `[0, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stats {
    pub hunger: u32,
    pub happiness: u32,
    pub cleanliness: u32,
}

impl Stats {
    pub fn full(max: u32) -> Self {
        Self {
            hunger: max,
            happiness: max,
            cleanliness: max,
        }
    }

    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Hunger => self.hunger,
            Stat::Happiness => self.happiness,
            Stat::Cleanliness => self.cleanliness,
        }
    }

    fn slot(&mut self, stat: Stat) -> &mut u32 {
        match stat {
            Stat::Hunger => &mut self.hunger,
            Stat::Happiness => &mut self.happiness,
            Stat::Cleanliness => &mut self.cleanliness,
        }
    }

    /// Saturating add, capped at `max`.
    pub fn raise(&mut self, stat: Stat, amount: u32, max: u32) {
        let v = self.slot(stat);
        *v = v.saturating_add(amount).min(max);
    }

    /// Saturating subtract, floored at 0.
    pub fn lower(&mut self, stat: Stat, amount: u32) {
        let v = self.slot(stat);
        *v = v.saturating_sub(amount);
    }

    pub fn set(&mut self, stat: Stat, value: u32, max: u32) {
        *self.slot(stat) = value.min(max);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Sad,
    Hungry,
    Dirty,
    Sleeping,
    Bathing,
}

impl Mood {
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "Content",
            Mood::Sad => "Triste",
            Mood::Hungry => "Affamé",
            Mood::Dirty => "Sale",
            Mood::Sleeping => "Endormi",
            Mood::Bathing => "Au bain",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Day,
    Night,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Baby,
    Adult,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Baby => "Bébé",
            Stage::Adult => "Adulte",
        }
    }
}

/// Cosmetic items sold in the shop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Accessory {
    TopHat,
    Sunglasses,
    PartyHat,
    BowTie,
}

impl Accessory {
    /// Catalog in shop order.
    pub fn all() -> &'static [Accessory] {
        &[
            Accessory::TopHat,
            Accessory::Sunglasses,
            Accessory::PartyHat,
            Accessory::BowTie,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Accessory::TopHat => "Haut-de-forme",
            Accessory::Sunglasses => "Lunettes de soleil",
            Accessory::PartyHat => "Chapeau de fête",
            Accessory::BowTie => "Nœud papillon",
        }
    }

    pub fn price(&self) -> u32 {
        match self {
            Accessory::TopHat => 25,
            Accessory::Sunglasses => 15,
            Accessory::PartyHat => 10,
            Accessory::BowTie => 20,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Accessory::TopHat => "🎩",
            Accessory::Sunglasses => "🕶",
            Accessory::PartyHat => "🥳",
            Accessory::BowTie => "🎀",
        }
    }
}

/// Status line text with the session time at which it disappears.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub text: String,
    /// `None` keeps the message until something replaces it.
    pub expires_at_ms: Option<u64>,
}

/// The whole pet session.
pub struct PetState {
    pub cfg: PetConfig,

    pub stats: Stats,
    pub mood: Mood,
    pub stage: Stage,
    pub phase: Phase,
    /// Ticks lived. Never decreases except on restart.
    pub ticks: u64,

    /// Session time at which the current bath ends.
    pub bathing_until: Option<u64>,
    pub game_over: bool,

    pub coins: u32,
    pub owned: BTreeSet<Accessory>,
    pub equipped: Option<Accessory>,

    pub message: Option<Message>,
    /// Milliseconds of session time, advanced by the frame loop.
    pub clock_ms: u64,
}

impl PetState {
    /// Fresh session: the panda starts the night asleep.
    pub fn new(cfg: PetConfig) -> Self {
        let max = cfg.max_stat;
        Self {
            cfg,
            stats: Stats::full(max),
            mood: Mood::Sleeping,
            stage: Stage::Baby,
            phase: Phase::Night,
            ticks: 0,
            bathing_until: None,
            game_over: false,
            coins: 0,
            owned: BTreeSet::new(),
            equipped: None,
            message: Some(Message {
                text: "Zzz... Ton panda dort paisiblement.".into(),
                expires_at_ms: None,
            }),
            clock_ms: 0,
        }
    }

    /// Whole days lived.
    pub fn day(&self) -> u64 {
        self.ticks / self.cfg.ticks_per_day
    }

    pub fn is_bathing(&self) -> bool {
        self.bathing_until.is_some()
    }

    pub fn is_sleeping(&self) -> bool {
        self.mood == Mood::Sleeping
    }

    /// Mood shown to the player and to the camera / chat.
    pub fn display_mood(&self) -> Mood {
        if self.is_bathing() {
            Mood::Bathing
        } else {
            self.mood
        }
    }

    /// Care actions are refused while asleep, in the bath or after game over.
    pub fn can_act(&self) -> bool {
        !self.game_over && !self.is_sleeping() && !self.is_bathing()
    }

    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }

    /// Replace the current message; it disappears after `duration_ms`.
    pub fn say(&mut self, text: impl Into<String>, duration_ms: u64) {
        self.message = Some(Message {
            text: text.into(),
            expires_at_ms: Some(self.clock_ms.saturating_add(duration_ms)),
        });
    }

    /// Replace the current message with one that stays until replaced.
    pub fn say_sticky(&mut self, text: impl Into<String>) {
        self.message = Some(Message {
            text: text.into(),
            expires_at_ms: None,
        });
    }
}

/// Phase at a given tick count.
pub fn phase_at(ticks: u64, cfg: &PetConfig) -> Phase {
    if ticks % cfg.ticks_per_day >= cfg.night_start_tick {
        Phase::Night
    } else {
        Phase::Day
    }
}
