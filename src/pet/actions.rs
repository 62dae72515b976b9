//! Semantic action IDs for Pandagotchi click targets.
//!
//! These IDs are registered during render and dispatched via `InputEvent::Click`.

// ── Care actions ────────────────────────────────────────────────
pub const FEED: u16 = 1;
pub const PLAY: u16 = 2;
pub const TOILET: u16 = 3;
pub const BATHE: u16 = 4;
pub const OPEN_PHONE: u16 = 5;
pub const RESTART: u16 = 6;

// ── Phone navigation ────────────────────────────────────────────
pub const PHONE_BACK: u16 = 10;
/// Open an app (base + app index).
pub const OPEN_APP_BASE: u16 = 20;

// ── Shop (base + accessory index) ───────────────────────────────
pub const BUY_BASE: u16 = 40;
pub const EQUIP_BASE: u16 = 50;

// ── Games menu (base + game index) ──────────────────────────────
pub const PICK_GAME_BASE: u16 = 60;

// ── Camera ──────────────────────────────────────────────────────
pub const BACKGROUND_BASE: u16 = 70;
pub const SNAP: u16 = 79;

// ── Friends ─────────────────────────────────────────────────────
pub const ADD_FRIEND: u16 = 80;
pub const SEND_CHAT: u16 = 81;
/// Open the conversation with a friend (base + list index).
pub const SELECT_FRIEND_BASE: u16 = 100;

// ── Mini-game keys (base + ASCII code of the key) ───────────────
pub const MINIGAME_KEY_BASE: u16 = 1000;

/// Click ID that stands for pressing `key` inside a mini-game.
pub fn minigame_key(key: char) -> u16 {
    MINIGAME_KEY_BASE + (key as u8) as u16
}

/// Inverse of `minigame_key`.
pub fn minigame_key_of(id: u16) -> Option<char> {
    let code = id.checked_sub(MINIGAME_KEY_BASE)?;
    u8::try_from(code).ok().map(char::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minigame_keys_round_trip() {
        for c in ['1', '9', 'a', 'l', 's'] {
            assert_eq!(minigame_key_of(minigame_key(c)), Some(c));
        }
        assert_eq!(minigame_key_of(SNAP), None);
        assert_eq!(minigame_key_of(MINIGAME_KEY_BASE + 300), None);
    }
}
