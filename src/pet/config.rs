//! Tunable constants for the pet simulation.
//!
//! Defaults are the shipped balance. Any subset of fields can be overridden
//! from a JSON object (see `PetConfig::from_json`); missing fields keep their
//! default value.

use serde::Deserialize;

/// Per-stat amounts, in hunger / happiness / cleanliness order.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct StatTable {
    pub hunger: u32,
    pub happiness: u32,
    pub cleanliness: u32,
}

impl StatTable {
    pub const fn new(hunger: u32, happiness: u32, cleanliness: u32) -> Self {
        Self {
            hunger,
            happiness,
            cleanliness,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PetConfig {
    pub max_stat: u32,
    /// Real time between two simulation ticks.
    pub tick_interval_ms: u32,
    /// Longest frame the clock accepts; longer gaps are dropped.
    pub max_frame_ms: u32,
    pub ticks_per_day: u64,
    /// Tick offset within a day at which night begins.
    pub night_start_tick: u64,
    pub evolution_age_days: u64,

    pub decay_awake: StatTable,
    pub decay_asleep: StatTable,
    /// Gain applied by feed / play / toilet.
    pub action_gain: StatTable,
    /// Below these values the panda is hungry / sad / dirty.
    pub low_threshold: StatTable,
    /// The panda only falls asleep while strictly above all of these.
    pub sleep_threshold: StatTable,

    pub bath_duration_ms: u64,
    pub message_ms: u64,
    pub evolution_message_ms: u64,
    pub error_message_ms: u64,
    /// Coins granted by each successful care action.
    pub action_coin_reward: u32,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            max_stat: 100,
            tick_interval_ms: 2000,
            max_frame_ms: 500,
            ticks_per_day: 30,
            night_start_tick: 20,
            evolution_age_days: 2,
            decay_awake: StatTable::new(5, 3, 2),
            decay_asleep: StatTable::new(1, 0, 0),
            action_gain: StatTable::new(25, 20, 30),
            low_threshold: StatTable::new(30, 30, 30),
            sleep_threshold: StatTable::new(40, 50, 40),
            bath_duration_ms: 4000,
            message_ms: 2000,
            evolution_message_ms: 3000,
            error_message_ms: 3000,
            action_coin_reward: 1,
        }
    }
}

impl PetConfig {
    /// Parse a (possibly partial) JSON override.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut cfg: PetConfig = serde_json::from_str(json)?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Repair values that would break the day cycle.
    fn sanitize(&mut self) {
        self.ticks_per_day = self.ticks_per_day.max(1);
        self.tick_interval_ms = self.tick_interval_ms.max(1);
        self.max_stat = self.max_stat.max(1);
    }
}

/// localStorage key of the optional config override.
#[cfg(target_arch = "wasm32")]
const CONFIG_KEY: &str = "pandagotchi_config";

/// Read the override from localStorage, falling back to defaults.
#[cfg(target_arch = "wasm32")]
pub fn load_config() -> PetConfig {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(CONFIG_KEY).ok().flatten());

    let Some(json) = stored else {
        return PetConfig::default();
    };

    match PetConfig::from_json(&json) {
        Ok(cfg) => {
            web_sys::console::log_1(&"Pandagotchi: configuration personnalisée chargée".into());
            cfg
        }
        Err(e) => {
            web_sys::console::warn_1(
                &format!("Pandagotchi: configuration invalide ignorée: {e}").into(),
            );
            PetConfig::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> PetConfig {
    PetConfig::default()
}
